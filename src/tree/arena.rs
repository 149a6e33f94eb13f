use smallvec::SmallVec;

use super::node::Node;
use super::Idx;

use crate::STACK_ELEMS;

type SlotVec = SmallVec<[Option<Node>; STACK_ELEMS]>;
type FreeVec = SmallVec<[Idx; STACK_ELEMS]>;

/// Slab of tree cells behind stable handles.
///
/// A handle stays good from `alloc` until the matching `free`. Freeing
/// empties the slot in place, so nothing shifts and every other handle
/// keeps pointing where it did; the emptied slot queues up for reuse by a
/// later `alloc`. The first `STACK_ELEMS` slots live inline, the rest
/// spill to the heap.
pub(crate) struct NodeArena {
    slots: SlotVec,
    free_slots: FreeVec,
}

impl NodeArena {
    pub fn new() -> Self {
        NodeArena {
            slots: SlotVec::new(),
            free_slots: FreeVec::new(),
        }
    }

    /// Inline slot count before heap spill.
    pub fn capacity(&self) -> usize {
        STACK_ELEMS
    }

    /// Store a cell and hand back its handle, favoring recycled slots over
    /// growing the slab.
    pub fn alloc(&mut self, node: Node) -> Idx {
        if let Some(idx) = self.free_slots.pop() {
            let slot = &mut self.slots[idx];
            debug_assert!(slot.is_none(), "free list handed out a live slot");
            *slot = Some(node);
            idx
        } else {
            self.slots.push(Some(node));
            self.slots.len() - 1
        }
    }

    /// Empty the slot behind `idx` and return its cell. The handle is dead
    /// afterwards, until `alloc` recycles the slot.
    ///
    /// Panics when `idx` does not name a live cell.
    pub fn free(&mut self, idx: Idx) -> Node {
        let cell = self.slots.get_mut(idx).and_then(Option::take);
        match cell {
            Some(node) => {
                self.free_slots.push(idx);
                node
            }
            None => panic!("arena handle {} does not name a live cell", idx),
        }
    }

    /// Borrow the cell behind a handle that is known to be live.
    ///
    /// Panics when it is not: a dead handle reachable from the tree is a
    /// linking bug, not a recoverable state.
    pub fn node(&self, idx: Idx) -> &Node {
        match self.slots.get(idx) {
            Some(Some(node)) => node,
            _ => panic!("arena handle {} does not name a live cell", idx),
        }
    }

    /// Mutably borrow the cell behind a live handle. Panics like `node`.
    pub fn node_mut(&mut self, idx: Idx) -> &mut Node {
        match self.slots.get_mut(idx) {
            Some(Some(node)) => node,
            _ => panic!("arena handle {} does not name a live cell", idx),
        }
    }
}
