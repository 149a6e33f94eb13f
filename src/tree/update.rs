//! Deletion engine: unlink a cell while keeping BST order, the ancestor
//! size chain, and parent back-links exact.

use super::node::Node;
use super::tree::ScoreTree;
use super::Idx;

impl ScoreTree {
    // Crate-internal API ----------------------------------------------------------------------------------------------

    /// Remove the cell at `idx`, repair links and every affected size
    /// counter, and return the detached node with its links nullified.
    ///
    /// Case split on the target's children: none (unlink), one (splice the
    /// child up), two (replace with the in-order successor, shallow or deep).
    pub(crate) fn remove(&mut self, idx: Idx) -> Node {
        // Copy out the target's links up front; the fix-ups below mutate
        // other cells on the path
        let (target_left, target_right, target_parent) = {
            let node = self.arena.node(idx);
            (node.left_idx, node.right_idx, node.parent_idx)
        };

        let replacement = match (target_left, target_right) {
            // Leaf
            (None, None) => None,
            // Single child moves up into the target's slot
            (Some(child_idx), None) | (None, Some(child_idx)) => Some(child_idx),
            // Two children: the in-order successor takes over
            (Some(left_idx), Some(right_idx)) => {
                Some(self.splice_successor(idx, left_idx, right_idx))
            }
        };

        // Every subtree on the path from the root down to the target now
        // holds one cell less
        self.decrement_ancestors(idx);

        // Swap the replacement into the target's slot
        match target_parent {
            Some(parent_idx) => {
                let parent_node = self.arena.node_mut(parent_idx);
                if parent_node.right_idx == Some(idx) {
                    parent_node.right_idx = replacement;
                } else {
                    debug_assert_eq!(
                        parent_node.left_idx,
                        Some(idx),
                        "Internal invariant failed: target is not a child of its parent!"
                    );
                    parent_node.left_idx = replacement;
                }
            }
            None => self.root_idx = replacement,
        }
        if let Some(replacement_idx) = replacement {
            self.arena.node_mut(replacement_idx).parent_idx = target_parent;
        }

        self.curr_size -= 1;
        let mut removed = self.arena.free(idx);
        removed.nullify();
        removed
    }

    // Private API -----------------------------------------------------------------------------------------------------

    // Two-children case: detach the in-order successor (leftmost cell of the
    // right subtree) and re-link it in place of the target. Sizes inside the
    // target's subtree are repaired here; ancestors above the target are the
    // caller's job. Returns the successor's index.
    fn splice_successor(&mut self, idx: Idx, left_idx: Idx, right_idx: Idx) -> Idx {
        let target_lsize = self.arena.node(idx).lsize;

        if self.arena.node(right_idx).left_idx.is_none() {
            // The right child is the successor: it adopts the target's left
            // subtree and keeps its own right side
            let succ_node = self.arena.node_mut(right_idx);
            succ_node.left_idx = Some(left_idx);
            succ_node.lsize = target_lsize;
            self.arena.node_mut(left_idx).parent_idx = Some(right_idx);
            return right_idx;
        }

        // Walk the left spine of the right subtree down to the successor,
        // tracking its parent
        let mut succ_idx = right_idx;
        let mut succ_parent_idx = idx;
        loop {
            let succ_node = self.arena.node(succ_idx);
            match succ_node.left_idx {
                Some(lt_idx) => {
                    succ_parent_idx = succ_idx;
                    succ_idx = lt_idx;
                }
                None => break,
            }
        }
        debug_assert_ne!(
            succ_parent_idx, idx,
            "Internal invariant failed: deep successor search ended at the target!"
        );

        // The successor has no left child; splice its right subtree into its
        // parent's left slot
        let succ_right = self.arena.node(succ_idx).right_idx;
        let succ_parent = self.arena.node_mut(succ_parent_idx);
        succ_parent.left_idx = succ_right;
        succ_parent.lsize -= 1;
        if let Some(succ_right_idx) = succ_right {
            self.arena.node_mut(succ_right_idx).parent_idx = Some(succ_parent_idx);
        }

        // Full-delta repair: every subtree from the successor's old parent
        // up to and including the target lost one cell
        let mut child_idx = succ_parent_idx;
        while child_idx != idx {
            let parent_idx = match self.arena.node(child_idx).parent_idx {
                Some(parent_idx) => parent_idx,
                None => panic!(
                    "Internal invariant failed: successor chain detached from the target!"
                ),
            };
            let parent_node = self.arena.node_mut(parent_idx);
            if parent_node.left_idx == Some(child_idx) {
                parent_node.lsize -= 1;
            } else {
                debug_assert_eq!(
                    parent_node.right_idx,
                    Some(child_idx),
                    "Internal invariant failed: successor chain is not parent-linked!"
                );
                parent_node.rsize -= 1;
            }
            child_idx = parent_idx;
        }

        // Install the successor in the target's place with the target's
        // children and repaired sizes
        let target_rsize = self.arena.node(idx).rsize;
        let succ_node = self.arena.node_mut(succ_idx);
        succ_node.left_idx = Some(left_idx);
        succ_node.right_idx = Some(right_idx);
        succ_node.lsize = target_lsize;
        succ_node.rsize = target_rsize;
        self.arena.node_mut(left_idx).parent_idx = Some(succ_idx);
        self.arena.node_mut(right_idx).parent_idx = Some(succ_idx);
        succ_idx
    }

    // Walk the parent chain from `idx` to the root, shrinking each
    // ancestor's counter on the side the chain came up from.
    fn decrement_ancestors(&mut self, idx: Idx) {
        let mut child_idx = idx;
        loop {
            let parent_idx = match self.arena.node(child_idx).parent_idx {
                Some(parent_idx) => parent_idx,
                None => break,
            };
            let parent_node = self.arena.node_mut(parent_idx);
            if parent_node.left_idx == Some(child_idx) {
                parent_node.lsize -= 1;
            } else {
                debug_assert_eq!(
                    parent_node.right_idx,
                    Some(child_idx),
                    "Internal invariant failed: ancestor chain is not parent-linked!"
                );
                parent_node.rsize -= 1;
            }
            child_idx = parent_idx;
        }
    }
}
