use super::tree::ScoreTree;
use super::Idx;

/// Read-only view of one tree cell, for external renderers.
///
/// The capability surface is navigation plus display labels; no mutable
/// access to the tree leaks through it. Views borrow the tree, so a view
/// obtained through [`ScoreBoard::with_view`](crate::ScoreBoard::with_view)
/// only exists while the facade lock is held.
#[derive(Clone, Copy)]
pub struct NodeView<'a> {
    tree: &'a ScoreTree,
    idx: Idx,
}

impl<'a> NodeView<'a> {
    pub(crate) fn new(tree: &'a ScoreTree, idx: Idx) -> Self {
        NodeView { tree, idx }
    }

    /// View of the left child, if any.
    pub fn left(&self) -> Option<NodeView<'a>> {
        self.tree
            .arena
            .node(self.idx)
            .left_idx
            .map(|idx| NodeView::new(self.tree, idx))
    }

    /// View of the right child, if any.
    pub fn right(&self) -> Option<NodeView<'a>> {
        self.tree
            .arena
            .node(self.idx)
            .right_idx
            .map(|idx| NodeView::new(self.tree, idx))
    }

    /// Box label: decimal score and user.
    pub fn key(&self) -> String {
        let node = self.tree.arena.node(self.idx);
        format!("{} {}", node.score, node.user)
    }

    /// Label for the edge to the left child: decimal left-subtree size.
    pub fn left_edge(&self) -> String {
        self.tree.arena.node(self.idx).lsize.to_string()
    }

    /// Label for the edge to the right child: decimal right-subtree size.
    pub fn right_edge(&self) -> String {
        self.tree.arena.node(self.idx).rsize.to_string()
    }
}
