//! Panel widget: a plain surface that hosts children.
//!
//! A panel has no behaviour of its own. Its background and border come from
//! the node, its children from the tree; the only thing it paints is an
//! optional title on its top edge.

use std::any::Any;

use crate::color::Color;
use crate::geometry::Rect;
use crate::render::{Renderer, TextStyle};
use crate::widget::traits::Widget;

// ---------------------------------------------------------------------------
// Panel
// ---------------------------------------------------------------------------

/// A decorative surface, usually the widget half of a container node.
///
/// # Examples
///
/// ```ignore
/// let root = tree.insert(Node::container(Panel::new().with_title("Files"), Flex::column()));
/// ```
#[derive(Debug, Clone)]
pub struct Panel {
    title: Option<String>,
    title_color: Color,
}

impl Panel {
    /// Create an untitled panel.
    pub fn new() -> Self {
        Self { title: None, title_color: Color::WHITE }
    }

    /// Set a title drawn on the top edge, one unit in from the left (builder
    /// pattern).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the title colour (builder pattern).
    pub fn with_title_color(mut self, color: Color) -> Self {
        self.title_color = color;
        self
    }

    /// Return the title, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Panel {
    fn widget_type(&self) -> &str {
        "Panel"
    }

    fn paint(&self, renderer: &mut dyn Renderer, rect: Rect) {
        let Some(title) = &self.title else {
            return;
        };
        if rect.width <= 2 || rect.height == 0 {
            return;
        }
        let row = Rect::new(rect.x + 1, rect.y, rect.width - 2, 1);
        renderer.draw_text(title, row, self.title_color, &TextStyle::default());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::GridRenderer;

    #[test]
    fn widget_type_is_panel() {
        assert_eq!(Panel::new().widget_type(), "Panel");
    }

    #[test]
    fn panel_is_inert() {
        let p = Panel::new();
        assert!(!p.can_focus());
        assert!(!p.is_draggable());
        assert_eq!(p.title(), None);
    }

    #[test]
    fn untitled_panel_paints_nothing() {
        let mut grid = GridRenderer::new(4, 2);
        Panel::new().paint(&mut grid, Rect::new(0, 0, 4, 2));
        assert_eq!(grid.to_string(), "    \n    ");
    }

    #[test]
    fn title_sits_on_top_edge() {
        let mut grid = GridRenderer::new(8, 2);
        Panel::new().with_title("Files").paint(&mut grid, Rect::new(0, 0, 8, 2));
        assert_eq!(grid.to_string(), " Files  \n        ");
    }

    #[test]
    fn title_is_cut_to_width() {
        let mut grid = GridRenderer::new(5, 1);
        Panel::new().with_title("Documents").paint(&mut grid, Rect::new(0, 0, 5, 1));
        assert_eq!(grid.to_string(), " Doc ");
    }
}
