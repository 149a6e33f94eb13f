//! Ascii-art renderer for binary trees.
//!
//! The drawing is assembled level by level: node levels hold fixed-size
//! boxes (invisible placeholder boxes keep the geometry where a child is
//! missing), edge levels hold the connecting lines with their size labels.
//! Indents are computed bottom-up so every parent sits midway between its
//! children.

use std::iter::repeat;

use crate::NodeView;

/// Drawing geometry.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Width of a node box's content, in characters.
    pub node_width: usize,
    /// Height of a node box's content, in lines.
    pub node_height: usize,
    /// Height of an edge, in lines.
    pub edge_height: usize,
    /// Horizontal distance between two sibling boxes.
    pub distance: usize,
    /// Horizontal distance between two consecutive boxes that are not
    /// siblings.
    pub sep: usize,
}

/// Ascii-art renderer over the [`NodeView`] traversal surface.
///
/// # Examples
///
/// ```
/// use scoreboard::render::ascii::{AsciiTree, Config};
/// use scoreboard::{Score, ScoreBoard};
///
/// let board = ScoreBoard::new();
/// board.add(Score { user: 1, value: 5 }).unwrap();
/// board.add(Score { user: 2, value: 3 }).unwrap();
///
/// let mut ascii = AsciiTree::new(Config {
///     node_width: 4,
///     node_height: 1,
///     edge_height: 3,
///     distance: 2,
///     sep: 1,
/// });
/// let drawing = board.with_view(|view| {
///     ascii.from_view(view);
///     ascii.draw()
/// });
/// assert!(String::from_utf8_lossy(&drawing).contains("5 1"));
/// ```
pub struct AsciiTree {
    config: Config,
    levels: Vec<Level>,
}

impl AsciiTree {
    /// Renderer with the given geometry. Feed it a tree with
    /// [`from_view`](AsciiTree::from_view), then [`draw`](AsciiTree::draw).
    pub fn new(config: Config) -> Self {
        AsciiTree {
            config,
            levels: Vec::new(),
        }
    }

    /// Build drawable levels for the tree rooted at `root`.
    pub fn from_view(&mut self, root: Option<NodeView<'_>>) {
        self.levels.clear();
        let root = match root {
            Some(root) => root,
            None => return,
        };

        let tree_levels = view_levels(root);
        let depth = tree_levels.len();

        // Node levels sit at even positions, edge levels between them
        let mut built: Vec<Option<Level>> = Vec::new();
        built.resize_with(2 * depth - 1, || None);
        built[2 * depth - 2] = Some(Level::last(
            self.config,
            self.node_elements(&tree_levels[depth - 1]),
        ));

        let mut i = 2 * depth - 2;
        while i >= 2 {
            let (parent, edge) = {
                let child = match &built[i] {
                    Some(level) => level,
                    None => break,
                };
                let tree_level = &tree_levels[(i - 2) / 2];
                let parent = Level::parent(child, self.node_elements(tree_level));
                let edge = Level::edge(
                    &parent,
                    child,
                    self.config.edge_height,
                    &edge_labels(tree_level),
                );
                (parent, edge)
            };
            built[i - 2] = Some(parent);
            built[i - 1] = Some(edge);
            i -= 2;
        }

        self.levels = built.into_iter().flatten().collect();
    }

    /// Draw every level into one multi-line byte buffer, top to bottom.
    pub fn draw(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        for level in &self.levels {
            buf.extend_from_slice(&level.draw());
        }
        buf
    }

    fn node_elements(&self, level: &[Option<NodeView<'_>>]) -> Vec<Element> {
        level
            .iter()
            .map(|slot| match slot {
                Some(view) => Element::Box(NodeBox::new(
                    &view.key(),
                    self.config.node_width,
                    self.config.node_height,
                )),
                None => {
                    Element::Box(NodeBox::invisible(self.config.node_width, self.config.node_height))
                }
            })
            .collect()
    }
}

// Level-order decomposition. Missing parents expand into two missing
// children so every level is a full power of two and geometry lines up.
fn view_levels<'a>(root: NodeView<'a>) -> Vec<Vec<Option<NodeView<'a>>>> {
    let mut levels = Vec::new();
    let mut parent_level = vec![Some(root)];
    loop {
        let mut child_level = Vec::with_capacity(2 * parent_level.len());
        let mut is_last_level = true;
        for slot in &parent_level {
            match slot {
                Some(view) => {
                    let (left, right) = (view.left(), view.right());
                    if left.is_some() || right.is_some() {
                        is_last_level = false;
                    }
                    child_level.push(left);
                    child_level.push(right);
                }
                None => {
                    child_level.push(None);
                    child_level.push(None);
                }
            }
        }
        levels.push(parent_level);
        if is_last_level {
            break;
        }
        parent_level = child_level;
    }
    levels
}

// Edge labels for one node level: left then right per slot, empty for
// placeholders.
fn edge_labels(level: &[Option<NodeView<'_>>]) -> Vec<String> {
    let mut labels = Vec::with_capacity(2 * level.len());
    for slot in level {
        match slot {
            Some(view) => {
                labels.push(view.left_edge());
                labels.push(view.right_edge());
            }
            None => {
                labels.push(String::new());
                labels.push(String::new());
            }
        }
    }
    labels
}

// Levels --------------------------------------------------------------------------------------------------------------

// One horizontal band of the drawing: its elements and their left indents.
struct Level {
    elements: Vec<Element>,
    indents: Vec<usize>,
}

impl Level {
    // The deepest node level: boxes separated alternately by the sibling
    // distance and the non-sibling separator.
    fn last(config: Config, elements: Vec<Element>) -> Level {
        let mut indents = vec![0; elements.len()];
        for i in 1..elements.len() {
            let gap = if i % 2 == 1 { config.distance } else { config.sep };
            indents[i] = indents[i - 1] + elements[i - 1].width() + gap;
        }
        Level { elements, indents }
    }

    // A node level above an existing one: each parent is centered over the
    // span of its two children.
    fn parent(child: &Level, elements: Vec<Element>) -> Level {
        let mut indents = vec![0; child.elements.len() / 2];
        for i in 0..indents.len() {
            let gap =
                child.indents[2 * i + 1] - child.indents[2 * i] - child.elements[2 * i].width();
            indents[i] = child.indents[2 * i] + child.elements[2 * i].width() / 2 + gap / 2;
        }
        Level { elements, indents }
    }

    // The edge band between a parent level and its child level.
    fn edge(parent: &Level, child: &Level, edge_height: usize, labels: &[String]) -> Level {
        let mut elements = Vec::with_capacity(child.elements.len());
        let mut indents = vec![0; child.elements.len()];
        for i in 0..parent.elements.len() {
            let parent_mid = parent.indents[i] + parent.elements[i].width() / 2;

            // Left edge spans from above the left child's middle up to the
            // parent's middle
            indents[2 * i] = child.indents[2 * i] + child.elements[2 * i].width() / 2;
            elements.push(Element::Edge(EdgeBox::left(
                parent_mid - indents[2 * i],
                edge_height,
                &labels[2 * i],
                child.elements[2 * i].is_invisible(),
            )));

            // Right edge continues from the parent's middle out over the
            // right child's middle
            indents[2 * i + 1] = parent_mid;
            elements.push(Element::Edge(EdgeBox::right(
                child.indents[2 * i + 1] + child.elements[2 * i + 1].width() / 2 - parent_mid,
                edge_height,
                &labels[2 * i + 1],
                child.elements[2 * i + 1].is_invisible(),
            )));
        }
        Level { elements, indents }
    }

    // Compose the level's rows: each element contributes its next line (or
    // blank space once exhausted) at its indent.
    fn draw(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        let mut row = 0;
        loop {
            let mut any_line = false;
            let mut line: Vec<u8> = Vec::new();
            let mut cursor = 0;
            for (i, element) in self.elements.iter().enumerate() {
                line.extend(repeat(b' ').take(self.indents[i] - cursor));
                cursor = self.indents[i] + element.width();
                match element.line(row) {
                    Some(bytes) => {
                        any_line = true;
                        line.extend_from_slice(bytes);
                    }
                    None => line.extend(repeat(b' ').take(element.width())),
                }
            }
            if !any_line {
                break;
            }
            buf.extend_from_slice(&line);
            buf.push(b'\n');
            row += 1;
        }
        buf
    }
}

// Elements ------------------------------------------------------------------------------------------------------------

// A drawable cell of a level. Boxes render nodes, edges render the
// connections; invisible variants occupy space without ink.
enum Element {
    Box(NodeBox),
    Edge(EdgeBox),
}

impl Element {
    // Width as occupied in the drawing, borders included.
    fn width(&self) -> usize {
        match self {
            Element::Box(node_box) => node_box.width + 2,
            Element::Edge(edge_box) => edge_box.content_width + 2,
        }
    }

    fn is_invisible(&self) -> bool {
        match self {
            Element::Box(node_box) => node_box.invisible,
            Element::Edge(edge_box) => edge_box.invisible,
        }
    }

    fn line(&self, row: usize) -> Option<&[u8]> {
        let lines = match self {
            Element::Box(node_box) => &node_box.lines,
            Element::Edge(edge_box) => &edge_box.lines,
        };
        lines.get(row).map(|line| line.as_slice())
    }
}

// A node box: bordered rectangle with the key written into the content.
struct NodeBox {
    width: usize,
    lines: Vec<Vec<u8>>,
    invisible: bool,
}

impl NodeBox {
    fn new(key: &str, width: usize, height: usize) -> Self {
        Self::fill(key, width, height, false)
    }

    // Takes space but draws nothing; keeps geometry under missing children.
    fn invisible(width: usize, height: usize) -> Self {
        Self::fill("", width, height, true)
    }

    fn fill(key: &str, width: usize, height: usize, invisible: bool) -> Self {
        let mut border = Vec::with_capacity(width + 2);
        border.push(b'+');
        border.extend(repeat(b'-').take(width));
        border.push(b'+');

        let mut lines = Vec::with_capacity(height + 2);
        lines.push(border.clone());
        let mut key_bytes = key.bytes();
        for _ in 0..height {
            let mut line = Vec::with_capacity(width + 2);
            line.push(b'|');
            for _ in 0..width {
                line.push(key_bytes.next().unwrap_or(b' '));
            }
            line.push(b'|');
            lines.push(line);
        }
        lines.push(border);

        if invisible {
            blank_out(&mut lines);
        }
        NodeBox {
            width,
            lines,
            invisible,
        }
    }
}

// An edge: a horizontal run at the top, a parent anchor, and a descending
// child anchor carrying the label on its first row.
struct EdgeBox {
    content_width: usize,
    lines: Vec<Vec<u8>>,
    invisible: bool,
}

impl EdgeBox {
    //  ______|
    // |label
    // |
    fn left(width: usize, height: usize, label: &str, invisible: bool) -> Self {
        let content_width = width.saturating_sub(2);

        let mut top = Vec::with_capacity(content_width + 2);
        top.push(b' ');
        top.extend(repeat(b'_').take(content_width));
        top.push(b'|');

        let mut anchor = Vec::with_capacity(content_width + 2);
        anchor.push(b'|');
        anchor.extend(repeat(b' ').take(content_width + 1));

        let mut lines = vec![top];
        for row in 0..height.saturating_sub(1) {
            if row == 0 {
                lines.push(replace_prefix(&anchor, label.as_bytes()));
            } else {
                lines.push(anchor.clone());
            }
        }

        if invisible {
            blank_out(&mut lines);
        }
        EdgeBox {
            content_width,
            lines,
            invisible,
        }
    }

    // |______
    //   label|
    //        |
    fn right(width: usize, height: usize, label: &str, invisible: bool) -> Self {
        let content_width = width.saturating_sub(2);

        let mut top = Vec::with_capacity(content_width + 2);
        top.push(b'|');
        top.extend(repeat(b'_').take(content_width));
        top.push(b' ');

        let mut anchor = Vec::with_capacity(content_width + 2);
        anchor.extend(repeat(b' ').take(content_width + 1));
        anchor.push(b'|');

        let mut lines = vec![top];
        for row in 0..height.saturating_sub(1) {
            if row == 0 {
                lines.push(replace_suffix(&anchor, label.as_bytes()));
            } else {
                lines.push(anchor.clone());
            }
        }

        if invisible {
            blank_out(&mut lines);
        }
        EdgeBox {
            content_width,
            lines,
            invisible,
        }
    }
}

// Replace every byte with a space, preserving line widths.
fn blank_out(lines: &mut [Vec<u8>]) {
    for line in lines {
        for byte in line.iter_mut() {
            *byte = b' ';
        }
    }
}

// Copy of `line` with its first bytes overwritten by `label`.
fn replace_prefix(line: &[u8], label: &[u8]) -> Vec<u8> {
    let mut out = line.to_vec();
    let n = label.len().min(out.len());
    out[..n].copy_from_slice(&label[..n]);
    out
}

// Copy of `line` with its last bytes overwritten by `label`.
fn replace_suffix(line: &[u8], label: &[u8]) -> Vec<u8> {
    if label.len() >= line.len() {
        return label[..line.len()].to_vec();
    }
    let mut out = line.to_vec();
    let start = out.len() - label.len();
    out[start..].copy_from_slice(label);
    out
}
