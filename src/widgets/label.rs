//! Label widget: displays text.
//!
//! The simplest content widget. Its intrinsic size is whatever the renderer
//! measures for its text, so a label in a flex row takes exactly the room
//! its text needs.

use std::any::Any;

use crate::color::Color;
use crate::geometry::{Rect, Size};
use crate::render::{Renderer, TextStyle};
use crate::widget::traits::Widget;

// ---------------------------------------------------------------------------
// Label
// ---------------------------------------------------------------------------

/// A non-interactive text widget.
///
/// Lines are split on `'\n'` and placed inside the node rect according to
/// the label's [`TextStyle`].
///
/// # Examples
///
/// ```ignore
/// let label = Label::new("Hello, world!").with_style(TextStyle::centered());
/// ```
#[derive(Debug, Clone)]
pub struct Label {
    text: String,
    color: Color,
    style: TextStyle,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: Color::WHITE,
            style: TextStyle::default(),
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. The caller should re-run intrinsic measurement if
    /// layout depends on it.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

impl Widget for Label {
    fn widget_type(&self) -> &str {
        "Label"
    }

    fn paint(&self, renderer: &mut dyn Renderer, rect: Rect) {
        if rect.is_empty() || self.text.is_empty() {
            return;
        }
        renderer.draw_text(&self.text, rect, self.color, &self.style);
    }

    fn measure(&self, renderer: &dyn Renderer) -> Option<Size> {
        Some(renderer.measure_text(&self.text, &self.style.font))
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
    use crate::render::{HAlign, VAlign};
    use crate::testing::GridRenderer;

    fn render(label: &Label, w: u32, h: u32) -> String {
        let mut grid = GridRenderer::new(w, h);
        label.paint(&mut grid, Rect::new(0, 0, w, h));
        grid.to_string()
    }

    #[test]
    fn widget_type_is_label() {
        assert_eq!(Label::new("hi").widget_type(), "Label");
        assert!(!Label::new("hi").can_focus());
    }

    #[test]
    fn paints_top_left_by_default() {
        assert_eq!(render(&Label::new("Hello"), 7, 2), "Hello  \n       ");
    }

    #[test]
    fn truncates_to_rect() {
        assert_eq!(render(&Label::new("Hello, world!"), 5, 1), "Hello");
        assert_eq!(render(&Label::new("A\nB\nC"), 2, 2), "A \nB ");
    }

    #[test]
    fn honours_alignment() {
        let label = Label::new("ab").with_style(TextStyle::default().with_align(HAlign::Right, VAlign::Bottom));
        assert_eq!(render(&label, 4, 2), "    \n  ab");
        assert_eq!(render(&Label::new("ab").with_style(TextStyle::centered()), 4, 3), "    \n ab \n    ");
    }

    #[test]
    fn measure_uses_renderer() {
        let grid = GridRenderer::new(1, 1);
        assert_eq!(Label::new("Line1\nLonger").measure(&grid), Some(Size::new(6, 2)));
    }

    #[test]
    fn set_text_replaces_content() {
        let mut label = Label::new("old");
        label.set_text("new");
        assert_eq!(label.text(), "new");
    }

    #[test]
    fn as_any_downcast() {
        let w: Box<dyn Widget> = Box::new(Label::new("downcast"));
        let text = w.as_any().downcast_ref::<Label>().map(Label::text);
        assert_eq!(text, Some("downcast"));
    }
}
