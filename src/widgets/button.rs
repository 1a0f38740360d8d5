//! Button widget: an interactive, focusable push button.
//!
//! A button arms on a left press and fires when the release lands back
//! inside it. Because it captures the pointer, dragging off and releasing
//! elsewhere disarms it without a click. `Enter` and `Space` click a focused
//! button.

use std::any::Any;

use crate::color::Color;
use crate::event::{Event, Key, PointerButton};
use crate::geometry::{Rect, Size};
use crate::render::{Renderer, TextStyle};
use crate::widget::traits::{EventCtx, EventResult, Widget};

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// A push button with a centred label.
///
/// The click count is the observable effect; applications poll it through
/// [`WidgetTree::widget`](crate::tree::WidgetTree::widget) or react in a
/// wrapping widget.
///
/// # Examples
///
/// ```ignore
/// let ok = tree.insert_child(row, Node::new(Button::new("OK")))?;
/// ```
#[derive(Debug, Clone)]
pub struct Button {
    label: String,
    color: Color,
    active_color: Color,
    clicks: u32,
    pressed: bool,
    hovered: bool,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: Color::WHITE,
            active_color: Color::rgb(255, 215, 0),
            clicks: 0,
            pressed: false,
            hovered: false,
        }
    }

    /// Set the label colour (builder pattern).
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the colour used while hovered or pressed (builder pattern).
    pub fn with_active_color(mut self, color: Color) -> Self {
        self.active_color = color;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// How many times the button has fired.
    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    /// Whether a press is in progress.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    fn click(&mut self, ctx: &mut EventCtx) -> EventResult {
        self.clicks += 1;
        ctx.request_paint();
        EventResult::Handled
    }
}

impl Widget for Button {
    fn widget_type(&self) -> &str {
        "Button"
    }

    fn on_event(&mut self, ctx: &mut EventCtx, event: &Event) -> EventResult {
        match event {
            Event::PointerDown { button: PointerButton::Left, .. } => {
                self.pressed = true;
                ctx.request_paint();
                EventResult::Handled
            }
            Event::PointerUp { pos, button: PointerButton::Left } if self.pressed => {
                self.pressed = false;
                if ctx.local_rect().contains(*pos) {
                    return self.click(ctx);
                }
                ctx.request_paint();
                EventResult::Handled
            }
            Event::CaptureLost => {
                self.pressed = false;
                ctx.request_paint();
                EventResult::Handled
            }
            Event::PointerEnter | Event::PointerLeave => {
                self.hovered = matches!(event, Event::PointerEnter);
                ctx.request_paint();
                EventResult::Unhandled
            }
            Event::KeyDown(key) if key.modifiers.is_empty() => match key.code {
                Key::Enter | Key::Char(' ') => self.click(ctx),
                _ => EventResult::Unhandled,
            },
            _ => EventResult::Unhandled,
        }
    }

    fn paint(&self, renderer: &mut dyn Renderer, rect: Rect) {
        let color = if self.pressed || self.hovered { self.active_color } else { self.color };
        renderer.draw_text(&self.label, rect, color, &TextStyle::centered());
    }

    /// Label plus two units of padding on each side.
    fn measure(&self, renderer: &dyn Renderer) -> Option<Size> {
        let text = renderer.measure_text(&self.label, &TextStyle::default().font);
        Some(Size::new(text.width + 4, text.height.max(1)))
    }

    fn can_focus(&self) -> bool {
        true
    }

    fn is_draggable(&self) -> bool {
        true
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
