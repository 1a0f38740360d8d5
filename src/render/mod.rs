//! Rendering: the `Renderer` capability, text styling and the paint pass.
//!
//! The core never draws pixels or cells itself. A [`Renderer`] supplies four
//! primitives (fill, stroke, text, text measurement) and [`paint`] walks the
//! tree calling them in painter order. [`TerminalRenderer`] is the crossterm
//! backend; tests use the headless grid renderer from `testing`.

pub mod terminal;

use tracing::trace;

pub use terminal::TerminalRenderer;

use crate::color::{Border, Color};
use crate::geometry::{clamp_coord, Point, Rect, Size};
use crate::tree::{WidgetId, WidgetTree};

// ---------------------------------------------------------------------------
// Text style
// ---------------------------------------------------------------------------

/// Font request. Backends map it to whatever they can render.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Font {
    pub family: Option<String>,
    /// Nominal size in backend units; `0` means the backend default.
    pub size: u32,
    pub bold: bool,
    pub italic: bool,
}

impl Font {
    pub fn bold() -> Self {
        Self { bold: true, ..Self::default() }
    }
}

/// Horizontal text placement inside its rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text placement inside its rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Everything `draw_text` needs besides the string, rect and colour.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TextStyle {
    pub font: Font,
    pub h_align: HAlign,
    pub v_align: VAlign,
}

impl TextStyle {
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn with_align(mut self, h_align: HAlign, v_align: VAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }

    /// Centred on both axes.
    pub fn centered() -> Self {
        Self::default().with_align(HAlign::Center, VAlign::Middle)
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Drawing capability consumed by the paint pass and by widgets.
///
/// All rects are absolute (root space). Backends must tolerate rects that
/// lie partly or wholly outside their surface.
pub trait Renderer {
    /// Fill `rect` with `color`.
    fn draw_rect(&mut self, rect: Rect, color: Color);

    /// Stroke the inside edge of `rect` with `border`.
    fn draw_border(&mut self, rect: Rect, border: Border);

    /// Draw `text` inside `rect`, placed per `style`.
    fn draw_text(&mut self, text: &str, rect: Rect, color: Color, style: &TextStyle);

    /// Size `text` would occupy in `font`.
    fn measure_text(&self, text: &str, font: &Font) -> Size;

    /// Restrict subsequent drawing to `clip`; `None` lifts the restriction.
    fn set_clip(&mut self, _clip: Option<Rect>) {}
}

/// Lines of `text` with their top-left positions inside `rect`, assuming one
/// unit per character and per line. Lines are cut to the rect width.
///
/// Shared by the cell-based backends.
pub fn layout_text(text: &str, rect: Rect, style: &TextStyle) -> Vec<(Point, String)> {
    let lines: Vec<&str> = text.lines().collect();
    let height = lines.len() as i64;
    let slack_y = i64::from(rect.height) - height;
    let top = i64::from(rect.y)
        + match style.v_align {
            VAlign::Top => 0,
            VAlign::Middle => slack_y.div_euclid(2),
            VAlign::Bottom => slack_y,
        };

    lines
        .into_iter()
        .enumerate()
        .map(|(row, line)| {
            let visible: String = line.chars().take(rect.width as usize).collect();
            let width = visible.chars().count() as i64;
            let slack_x = (i64::from(rect.width) - width).max(0);
            let left = i64::from(rect.x)
                + match style.h_align {
                    HAlign::Left => 0,
                    HAlign::Center => slack_x / 2,
                    HAlign::Right => slack_x,
                };
            let y = top + row as i64;
            (Point::new(clamp_coord(left), clamp_coord(y)), visible)
        })
        .collect()
}

/// Measure `text` as a grid of characters: widest line by line count.
pub fn measure_cells(text: &str) -> Size {
    let width = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    let height = text.lines().count();
    Size::new(width as u32, height as u32)
}

// ---------------------------------------------------------------------------
// Paint pass
// ---------------------------------------------------------------------------

/// Paint the attached, visible part of the tree that intersects `clip`.
///
/// Painter order: each node draws its background, then its border, then its
/// widget content, then its children first to last. Children are clipped to
/// their parent's rect. Painted nodes have their dirty flag cleared. Returns
/// how many nodes were painted.
pub fn paint(tree: &mut WidgetTree, renderer: &mut dyn Renderer, clip: Rect) -> usize {
    let Some(root) = tree.root() else {
        return 0;
    };
    let mut painted = 0;
    paint_node(tree, renderer, root, Point::ZERO, clip, &mut painted);
    renderer.set_clip(None);
    trace!(?clip, painted, "paint pass");
    painted
}

fn paint_node(
    tree: &mut WidgetTree,
    renderer: &mut dyn Renderer,
    id: WidgetId,
    origin: Point,
    clip: Rect,
    painted: &mut usize,
) {
    let Some(node) = tree.node(id) else {
        return;
    };
    if !node.is_visible() {
        return;
    }
    let rect = node.rect().relative_from(origin);
    let clip = clip.intersect(rect);
    if clip.is_empty() {
        return;
    }

    renderer.set_clip(Some(clip));
    if let Some(color) = node.background().filter(|c| !c.is_transparent()) {
        renderer.draw_rect(rect, color);
    }
    if let Some(border) = node.border().filter(|b| b.width > 0) {
        renderer.draw_border(rect, border);
    }
    node.widget().paint(renderer, rect);

    let children = tree.children(id).to_vec();
    tree.clear_dirty(id);
    *painted += 1;

    for child in children {
        paint_node(tree, renderer, child, rect.origin(), clip, painted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Absolute, Flex};
    use crate::testing::GridRenderer;
    use crate::tree::Node;
    use crate::widgets::{Label, Panel};

    // ── Text layout ──────────────────────────────────────────────────

    #[test]
    fn layout_text_alignments() {
        let rect = Rect::new(2, 1, 10, 5);
        let placed = layout_text("abcd", rect, &TextStyle::centered());
        assert_eq!(placed, vec![(Point::new(5, 3), "abcd".to_string())]);

        let style = TextStyle::default().with_align(HAlign::Right, VAlign::Bottom);
        let placed = layout_text("ab\nc", rect, &style);
        assert_eq!(
            placed,
            vec![(Point::new(10, 4), "ab".to_string()), (Point::new(11, 5), "c".to_string())]
        );
    }

    #[test]
    fn layout_text_truncates_to_width() {
        let placed = layout_text("overflowing", Rect::new(0, 0, 4, 1), &TextStyle::centered());
        assert_eq!(placed, vec![(Point::new(0, 0), "over".to_string())]);
    }

    #[test]
    fn measure_cells_counts_chars_and_lines() {
        assert_eq!(measure_cells("héllo\nab"), Size::new(5, 2));
        assert_eq!(measure_cells(""), Size::ZERO);
    }

    // ── Paint pass ───────────────────────────────────────────────────

    #[test]
    fn paints_background_border_then_children() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(
            Node::container(Panel::new(), Flex::row())
                .with_border(Border::new(Color::WHITE, 1))
                .with_background(Color::BLUE),
        );
        tree.insert_child(root, Node::new(Label::new("hi")).with_weight(1.0)).unwrap();
        tree.set_rect(root, Rect::new(0, 0, 6, 3)).unwrap();

        let mut grid = GridRenderer::new(6, 3);
        assert_eq!(paint(&mut tree, &mut grid, Rect::new(0, 0, 6, 3)), 2);
        assert_eq!(grid.to_string(), "┌────┐\n│hi  │\n└────┘");
        assert_eq!(grid.background_at(3, 1), Some(Color::BLUE));
    }

    #[test]
    fn clip_skips_outside_nodes_and_keeps_them_dirty() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Node::container(Panel::new(), Absolute).with_rect(Rect::new(0, 0, 10, 2)));
        let left = tree
            .insert_child(root, Node::new(Label::new("L")).with_rect(Rect::new(0, 0, 1, 1)))
            .unwrap();
        let right = tree
            .insert_child(root, Node::new(Label::new("R")).with_rect(Rect::new(9, 0, 1, 1)))
            .unwrap();

        let mut grid = GridRenderer::new(10, 2);
        assert_eq!(paint(&mut tree, &mut grid, Rect::new(0, 0, 5, 2)), 2);
        assert_eq!(grid.to_string(), "L         \n          ");
        assert!(!tree.node(left).is_some_and(|n| n.is_dirty()));
        assert!(tree.node(right).is_some_and(|n| n.is_dirty()));
    }

    #[test]
    fn hidden_nodes_are_not_painted() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Node::container(Panel::new(), Flex::row()));
        let label = tree.insert_child(root, Node::new(Label::new("x")).with_weight(1.0)).unwrap();
        tree.set_rect(root, Rect::new(0, 0, 3, 1)).unwrap();
        tree.set_visible(label, false).unwrap();

        let mut grid = GridRenderer::new(3, 1);
        assert_eq!(paint(&mut tree, &mut grid, Rect::new(0, 0, 3, 1)), 1);
        assert_eq!(grid.to_string(), "   ");
    }

    #[test]
    fn empty_tree_paints_nothing() {
        let mut grid = GridRenderer::new(1, 1);
        assert_eq!(paint(&mut WidgetTree::new(), &mut grid, Rect::new(0, 0, 1, 1)), 0);
    }
}
