//! Snapshot helpers.
//!
//! Functions that turn a painted tree or a layout into plain text suitable
//! for `insta` snapshots and direct assertions.

use std::fmt::Write as _;

use super::grid::GridRenderer;
use crate::geometry::Rect;
use crate::render;
use crate::tree::{WidgetId, WidgetTree};
use crate::widget::Widget;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Paint a single widget into a `width` x `height` grid at the origin.
///
/// Rows are right-trimmed and joined with `'\n'`.
///
/// # Examples
///
/// ```ignore
/// use trellis::testing::render_widget;
/// use trellis::widgets::Label;
///
/// assert_eq!(render_widget(&Label::new("Hello"), 20, 1), "Hello");
/// ```
pub fn render_widget(widget: &dyn Widget, width: u32, height: u32) -> String {
    let mut grid = GridRenderer::new(width, height);
    widget.paint(&mut grid, Rect::new(0, 0, width, height));
    trim_rows(&grid.to_string())
}

/// Paint the whole tree into a `width` x `height` grid.
///
/// Rows are right-trimmed and joined with `'\n'`.
pub fn render_tree(tree: &mut WidgetTree, width: u32, height: u32) -> String {
    let mut grid = GridRenderer::new(width, height);
    if let Some(root) = tree.root() {
        tree.invalidate(root);
    }
    render::paint(tree, &mut grid, Rect::new(0, 0, width, height));
    trim_rows(&grid.to_string())
}

/// One line per attached node, depth-first, indented two spaces per level:
/// `Type#name x,y wxh` with rects in parent space. Hidden nodes are marked.
pub fn layout_dump(tree: &WidgetTree) -> String {
    let mut out = String::new();
    if let Some(root) = tree.root() {
        dump_node(tree, root, 0, &mut out);
    }
    out.truncate(out.trim_end().len());
    out
}

/// Right-trim every line of `text`.
pub fn trim_rows(text: &str) -> String {
    text.lines().map(str::trim_end).collect::<Vec<_>>().join("\n")
}

fn dump_node(tree: &WidgetTree, id: WidgetId, depth: usize, out: &mut String) {
    let Some(node) = tree.node(id) else {
        return;
    };
    let rect = node.rect();
    let _ = write!(out, "{:indent$}{}", "", node.widget().widget_type(), indent = depth * 2);
    if let Some(name) = node.name() {
        let _ = write!(out, "#{name}");
    }
    let _ = write!(out, " {},{} {}x{}", rect.x, rect.y, rect.width, rect.height);
    if !node.is_visible() {
        out.push_str(" (hidden)");
    }
    out.push('\n');
    for &child in tree.children(id) {
        dump_node(tree, child, depth + 1, out);
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Border, Color};
    use crate::layout::Flex;
    use crate::tree::Node;
    use crate::widgets::{Button, Label, Panel};

    #[test]
    fn render_widget_trims_rows() {
        assert_eq!(render_widget(&Label::new("Hello"), 20, 1), "Hello");
        assert_eq!(render_widget(&Button::new("OK"), 8, 3), "\n   OK\n");
    }

    #[test]
    fn render_tree_paints_everything() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(
            Node::container(Panel::new(), Flex::row()).with_border(Border::new(Color::WHITE, 1)),
        );
        tree.insert_child(root, Node::new(Label::new("a")).with_weight(1.0)).unwrap();
        tree.insert_child(root, Node::new(Label::new("b")).with_weight(1.0)).unwrap();
        tree.set_rect(root, Rect::new(0, 0, 6, 3)).unwrap();

        insta::assert_snapshot!(render_tree(&mut tree, 6, 3), @r"
        ┌────┐
        │a b │
        └────┘
        ");
    }

    #[test]
    fn layout_dump_lists_nested_rects() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Node::container(Panel::new(), Flex::column()).with_name("root"));
        let row = tree.insert_child(root, Node::container(Panel::new(), Flex::row()).with_weight(1.0)).unwrap();
        tree.insert_child(row, Node::new(Label::new("x")).with_weight(1.0).with_name("x")).unwrap();
        let hidden = tree.insert_child(root, Node::new(Button::new("b")).with_weight(1.0)).unwrap();
        tree.set_rect(root, Rect::new(0, 0, 10, 4)).unwrap();
        tree.set_visible(hidden, false).unwrap();

        insta::assert_snapshot!(layout_dump(&tree), @r"
        Panel#root 0,0 10x4
          Panel 0,0 10x4
            Label#x 0,0 10x4
          Button 0,2 10x2 (hidden)
        ");
    }

    #[test]
    fn empty_tree_dumps_nothing() {
        assert_eq!(layout_dump(&WidgetTree::new()), "");
    }
}
