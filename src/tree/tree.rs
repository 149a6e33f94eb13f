use smallvec::{smallvec, SmallVec};

use super::arena::NodeArena;
use super::iter::RankIter;
use super::node::Node;
use super::view::NodeView;
use super::Idx;

use crate::STACK_ELEMS;

/// A score entry: caller-supplied user identity plus value.
///
/// For [`ScoreBoard::update`](crate::ScoreBoard::update) the `value` field
/// carries the increment on input and the accumulated total on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    /// Caller-supplied user identity, unique within a board.
    pub user: i64,
    /// Score value; the tree key.
    pub value: i64,
}

/// One pending step of the rank-window search.
enum SearchStep {
    /// Walk into the subtree at `idx`, whose highest-ranked cell holds
    /// global rank `start_rank`, looking for ranks within `[lo, hi]`.
    Descend {
        idx: Idx,
        start_rank: i64,
        lo: i64,
        hi: i64,
    },
    /// The cell itself ranks inside the window.
    Emit(Idx),
}

type SearchVec = SmallVec<[SearchStep; STACK_ELEMS]>;

/// An order-statistics tree of scores.
///
/// Unbalanced binary search tree keyed by score value, augmented with exact
/// left/right subtree sizes and parent back-links. Equal keys descend right,
/// which combined with right-first enumeration ranks later insertions above
/// earlier ones.
pub(crate) struct ScoreTree {
    pub(crate) arena: NodeArena,
    pub(crate) root_idx: Option<Idx>,
    pub(crate) curr_size: usize,
}

impl ScoreTree {
    // Public API ------------------------------------------------------------------------------------------------------

    /// Constructor.
    pub fn new() -> Self {
        ScoreTree {
            arena: NodeArena::new(),
            root_idx: None,
            curr_size: 0,
        }
    }

    /// Number of scores in the tree.
    pub fn len(&self) -> usize {
        self.curr_size
    }

    /// `true` if the tree holds no scores.
    pub fn is_empty(&self) -> bool {
        self.root_idx.is_none()
    }

    /// Inline cell capacity of the backing arena.
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Sorted insert of a new score. Returns the new cell's handle.
    ///
    /// Size counters along the descent path are bumped as each side is
    /// chosen; that is safe because an insert always succeeds (uniqueness of
    /// users is the facade's concern, equal values are allowed and go right).
    pub fn insert(&mut self, score: Score) -> Idx {
        match self.root_idx {
            Some(root_idx) => {
                let mut curr_idx = root_idx;
                let (parent_idx, is_right_child) = loop {
                    let curr_node = self.arena.node_mut(curr_idx);
                    if score.value < curr_node.score {
                        curr_node.lsize += 1;
                        match curr_node.left_idx {
                            Some(left_idx) => curr_idx = left_idx,
                            None => break (curr_idx, false),
                        }
                    } else {
                        curr_node.rsize += 1;
                        match curr_node.right_idx {
                            Some(right_idx) => curr_idx = right_idx,
                            None => break (curr_idx, true),
                        }
                    }
                };

                let mut new_node = Node::new(score.value, score.user);
                new_node.parent_idx = Some(parent_idx);
                let new_idx = self.arena.alloc(new_node);

                let parent_node = self.arena.node_mut(parent_idx);
                if is_right_child {
                    parent_node.right_idx = Some(new_idx);
                } else {
                    parent_node.left_idx = Some(new_idx);
                }

                self.curr_size += 1;
                new_idx
            }

            // Empty tree
            None => {
                debug_assert_eq!(self.curr_size, 0);
                let root_idx = self.arena.alloc(Node::new(score.value, score.user));
                self.root_idx = Some(root_idx);
                self.curr_size = 1;
                root_idx
            }
        }
    }

    /// The `count` highest scores in descending rank order.
    ///
    /// Size-pruned: while the whole answer fits inside a right subtree the
    /// descent moves right without emitting; otherwise the right subtree is
    /// enumerated wholesale, the node follows, and the remainder comes from
    /// the left side.
    pub fn top(&self, count: i64) -> Vec<Score> {
        // Everything is selected; skip the pruning descent
        if count >= self.curr_size as i64 {
            return self.iter().collect();
        }

        let mut scores = Vec::new();
        let mut remaining = count;
        let mut curr = self.root_idx;
        while let Some(idx) = curr {
            if remaining <= 0 {
                break;
            }
            let node = self.arena.node(idx);
            if remaining < node.rsize as i64 + 1 {
                curr = node.right_idx;
                continue;
            }
            if let Some(right_idx) = node.right_idx {
                scores.extend(RankIter::over_subtree(self, right_idx));
            }
            scores.push(Score {
                user: node.user,
                value: node.score,
            });
            remaining -= node.rsize as i64 + 1;
            curr = node.left_idx;
        }
        scores
    }

    /// Scores whose ranks fall in the closed window
    /// `[position - count, position + count]`, in descending rank order.
    /// Rank 1 is the highest score; a window that misses `[1, len]` yields
    /// nothing.
    pub fn range(&self, position: i64, count: i64) -> Vec<Score> {
        let mut scores = Vec::new();
        if let Some(root_idx) = self.root_idx {
            self.search(root_idx, 1, position - count, position + count, &mut scores);
        }
        scores
    }

    /// Descending-rank traversal over the whole tree.
    pub fn iter(&self) -> RankIter<'_> {
        RankIter::new(self)
    }

    /// Read-only view of the root cell, if any.
    pub fn view(&self) -> Option<NodeView<'_>> {
        self.root_idx.map(|idx| NodeView::new(self, idx))
    }

    // Private API -----------------------------------------------------------------------------------------------------

    // Collect the scores of every cell whose rank intersects `[lo, hi]`,
    // pruning subtrees with the size counters. Entering a subtree, its right
    // side spans ranks [start_rank, start_rank + rsize - 1], the cell itself
    // holds start_rank + rsize, and the left side follows.
    fn search(&self, idx: Idx, start_rank: i64, lo: i64, hi: i64, scores: &mut Vec<Score>) {
        let mut worklist: SearchVec = smallvec![SearchStep::Descend {
            idx,
            start_rank,
            lo,
            hi,
        }];

        while let Some(step) = worklist.pop() {
            match step {
                SearchStep::Emit(emit_idx) => {
                    let node = self.arena.node(emit_idx);
                    scores.push(Score {
                        user: node.user,
                        value: node.score,
                    });
                }
                SearchStep::Descend {
                    idx,
                    start_rank,
                    lo,
                    hi,
                } => {
                    let node = self.arena.node(idx);
                    let node_rank = start_rank + node.rsize as i64;

                    // Left side first: the stack pops it last
                    if let Some(left_idx) = node.left_idx {
                        let left_ranks = (node_rank + 1, node_rank + node.lsize as i64);
                        if let Some((l1, l2)) = intersect((lo, hi), left_ranks) {
                            worklist.push(SearchStep::Descend {
                                idx: left_idx,
                                start_rank: node_rank + 1,
                                lo: l1,
                                hi: l2,
                            });
                        }
                    }

                    if lo <= node_rank && node_rank <= hi {
                        worklist.push(SearchStep::Emit(idx));
                    }

                    if let Some(right_idx) = node.right_idx {
                        let right_ranks = (start_rank, start_rank + node.rsize as i64 - 1);
                        if let Some((r1, r2)) = intersect((lo, hi), right_ranks) {
                            worklist.push(SearchStep::Descend {
                                idx: right_idx,
                                start_rank,
                                lo: r1,
                                hi: r2,
                            });
                        }
                    }
                }
            }
        }
    }
}

// Intersection of two closed intervals, `None` when disjoint. Handles
// negative endpoints, which arise when a window starts above rank 1.
fn intersect(a: (i64, i64), b: (i64, i64)) -> Option<(i64, i64)> {
    if a.1 < b.0 || b.1 < a.0 {
        return None;
    }
    Some((a.0.max(b.0), a.1.min(b.1)))
}

impl Default for ScoreTree {
    fn default() -> Self {
        Self::new()
    }
}
