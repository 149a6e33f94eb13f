//! DOT (graphviz) emitter.

use crate::NodeView;

/// Emit a DOT directed graph for the tree rooted at `root`.
///
/// One edge per parent→child link; the edge label is the parent's subtree
/// size on that side and the `side` attribute states the direction
/// explicitly, so consumers never have to infer it from layout. Node
/// identifiers are `s<score>u<user>`, quoted so negative values stay valid
/// DOT ids.
///
/// # Examples
///
/// ```
/// use scoreboard::render::dot;
/// use scoreboard::{Score, ScoreBoard};
///
/// let board = ScoreBoard::new();
/// board.add(Score { user: 1, value: 5 }).unwrap();
/// board.add(Score { user: 2, value: 3 }).unwrap();
///
/// let graph = board.with_view(dot::graph);
/// assert!(graph.contains("\"s5u1\" -> \"s3u2\" [label=\"1\", side=\"left\"];"));
/// ```
pub fn graph(root: Option<NodeView<'_>>) -> String {
    let mut out = String::from("digraph scores {\n");
    let mut worklist: Vec<NodeView<'_>> = root.into_iter().collect();
    while let Some(view) = worklist.pop() {
        let from = ident(&view);
        if let Some(left) = view.left() {
            out.push_str(&format!(
                "    {} -> {} [label=\"{}\", side=\"left\"];\n",
                from,
                ident(&left),
                view.left_edge()
            ));
            worklist.push(left);
        }
        if let Some(right) = view.right() {
            out.push_str(&format!(
                "    {} -> {} [label=\"{}\", side=\"right\"];\n",
                from,
                ident(&right),
                view.right_edge()
            ));
            worklist.push(right);
        }
    }
    out.push_str("}\n");
    out
}

// `"s<score>u<user>"`, derived from the view's key label.
fn ident(view: &NodeView<'_>) -> String {
    let key = view.key();
    let mut parts = key.split(' ');
    let score = parts.next().unwrap_or("");
    let user = parts.next().unwrap_or("");
    format!("\"s{}u{}\"", score, user)
}

#[cfg(test)]
mod tests {
    use super::graph;
    use crate::{Score, ScoreBoard};

    #[test]
    fn test_graph_edges() {
        let board = ScoreBoard::new();
        board.add(Score { user: 1, value: 5 }).unwrap();
        board.add(Score { user: 2, value: 3 }).unwrap();
        board.add(Score { user: 3, value: 7 }).unwrap();

        let out = board.with_view(graph);
        assert!(out.starts_with("digraph scores {\n"));
        assert!(out.ends_with("}\n"));
        assert!(out.contains("\"s5u1\" -> \"s3u2\" [label=\"1\", side=\"left\"];"));
        assert!(out.contains("\"s5u1\" -> \"s7u3\" [label=\"1\", side=\"right\"];"));
    }

    #[test]
    fn test_graph_empty_tree() {
        let board = ScoreBoard::new();
        assert_eq!(board.with_view(graph), "digraph scores {\n}\n");
    }

    #[test]
    fn test_graph_negative_score() {
        let board = ScoreBoard::new();
        board.add(Score { user: 1, value: -5 }).unwrap();
        board.add(Score { user: 2, value: -9 }).unwrap();

        let out = board.with_view(graph);
        assert!(out.contains("\"s-5u1\" -> \"s-9u2\" [label=\"1\", side=\"left\"];"));
    }
}
