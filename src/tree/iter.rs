use smallvec::SmallVec;

use super::tree::{Score, ScoreTree};
use super::Idx;

use crate::STACK_ELEMS;

type IdxVec = SmallVec<[Idx; STACK_ELEMS]>;

// Descending-rank reference iterator ----------------------------------------------------------------------------------

/// Uses iterative reverse in-order traversal (right subtree, cell, left
/// subtree), which enumerates scores from highest rank to lowest.
/// Maintains a small stack of arena indexes (the pending right spine).
pub(crate) struct RankIter<'a> {
    tree: &'a ScoreTree,
    idx_stack: IdxVec,
}

impl<'a> RankIter<'a> {
    /// Traversal over the whole tree.
    pub fn new(tree: &'a ScoreTree) -> Self {
        Self::over(tree, tree.root_idx)
    }

    /// Traversal over the subtree rooted at `idx`.
    pub fn over_subtree(tree: &'a ScoreTree, idx: Idx) -> Self {
        Self::over(tree, Some(idx))
    }

    fn over(tree: &'a ScoreTree, root: Option<Idx>) -> Self {
        let mut ordered_iter = RankIter {
            tree,
            idx_stack: IdxVec::new(),
        };

        if let Some(root_idx) = root {
            ordered_iter.push_right_spine(root_idx);
        }

        ordered_iter
    }

    fn push_right_spine(&mut self, idx: Idx) {
        let mut curr_idx = idx;
        loop {
            self.idx_stack.push(curr_idx);
            match self.tree.arena.node(curr_idx).right_idx {
                Some(gt_idx) => curr_idx = gt_idx,
                None => break,
            }
        }
    }
}

impl<'a> Iterator for RankIter<'a> {
    type Item = Score;

    fn next(&mut self) -> Option<Self::Item> {
        match self.idx_stack.pop() {
            Some(pop_idx) => {
                let (score, left_idx) = {
                    let node = self.tree.arena.node(pop_idx);
                    (
                        Score {
                            user: node.user,
                            value: node.score,
                        },
                        node.left_idx,
                    )
                };
                if let Some(lt_idx) = left_idx {
                    self.push_right_spine(lt_idx);
                }
                Some(score)
            }
            None => None,
        }
    }
}
