//! Slider widget: a draggable horizontal value picker.
//!
//! The value lives in `[0, 1]`. Pressing anywhere on the track jumps the
//! thumb there and captures the pointer, so the drag keeps tracking after
//! the pointer leaves the slider. Arrow keys step the value while focused.

use std::any::Any;

use crate::color::Color;
use crate::event::{Event, Key, PointerButton};
use crate::geometry::{Point, Rect, Size};
use crate::render::{Renderer, TextStyle};
use crate::widget::traits::{EventCtx, EventResult, Widget};

const TRACK: char = '─';
const THUMB: char = '●';

// ---------------------------------------------------------------------------
// Slider
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Slider {
    value: f32,
    step: f32,
    color: Color,
    dragging: bool,
}

impl Slider {
    /// A slider at `value`, clamped into `[0, 1]`.
    pub fn new(value: f32) -> Self {
        Self {
            value: clamp_unit(value),
            step: 0.1,
            color: Color::WHITE,
            dragging: false,
        }
    }

    /// Keyboard step (builder pattern). Non-positive steps fall back to 0.1.
    pub fn with_step(mut self, step: f32) -> Self {
        self.step = if step > 0.0 { step } else { 0.1 };
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Set the value, clamped into `[0, 1]`. NaN becomes `0`.
    pub fn set_value(&mut self, value: f32) {
        self.value = clamp_unit(value);
    }

    /// Whether a pointer drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Move the value to where `pos` lies along a track of `width` units.
    fn seek(&mut self, pos: Point, width: u32) {
        let span = width.saturating_sub(1);
        if span == 0 {
            self.value = 0.0;
            return;
        }
        self.set_value(pos.x as f32 / span as f32);
    }

    /// Thumb column for a track of `width` units.
    fn thumb_at(&self, width: u32) -> u32 {
        let span = width.saturating_sub(1);
        (self.value * span as f32).round() as u32
    }
}

impl Default for Slider {
    fn default() -> Self {
        Self::new(0.0)
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

impl Widget for Slider {
    fn widget_type(&self) -> &str {
        "Slider"
    }

    fn on_event(&mut self, ctx: &mut EventCtx, event: &Event) -> EventResult {
        let before = self.value;
        let result = match event {
            Event::PointerDown { pos, button: PointerButton::Left } => {
                self.dragging = true;
                self.seek(*pos, ctx.size().width);
                EventResult::Handled
            }
            Event::PointerMove { pos } if self.dragging => {
                self.seek(*pos, ctx.size().width);
                EventResult::Handled
            }
            Event::PointerUp { button: PointerButton::Left, .. } if self.dragging => {
                self.dragging = false;
                EventResult::Handled
            }
            Event::CaptureLost => {
                self.dragging = false;
                EventResult::Handled
            }
            Event::KeyDown(key) => match key.code {
                Key::Left | Key::Down => {
                    self.set_value(self.value - self.step);
                    EventResult::Handled
                }
                Key::Right | Key::Up => {
                    self.set_value(self.value + self.step);
                    EventResult::Handled
                }
                Key::Home => {
                    self.value = 0.0;
                    EventResult::Handled
                }
                Key::End => {
                    self.value = 1.0;
                    EventResult::Handled
                }
                _ => EventResult::Unhandled,
            },
            _ => EventResult::Unhandled,
        };
        if self.value != before {
            ctx.request_paint();
        }
        result
    }

    fn paint(&self, renderer: &mut dyn Renderer, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        let thumb = self.thumb_at(rect.width);
        let track: String = (0..rect.width).map(|x| if x == thumb { THUMB } else { TRACK }).collect();
        let row = Rect::new(rect.x, rect.y + (rect.height as i32 - 1) / 2, rect.width, 1);
        renderer.draw_text(&track, row, self.color, &TextStyle::default());
    }

    fn measure(&self, _renderer: &dyn Renderer) -> Option<Size> {
        Some(Size::new(10, 1))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::KeyEvent;
    use crate::testing::GridRenderer;
    use slotmap::SlotMap;

    fn ctx(width: u32) -> EventCtx {
        let mut sm: SlotMap<crate::tree::WidgetId, ()> = SlotMap::with_key();
        EventCtx::new(sm.insert(()), Size::new(width, 1))
    }

    fn key(code: Key) -> Event {
        Event::KeyDown(KeyEvent::plain(code))
    }

    #[test]
    fn value_is_clamped() {
        assert_eq!(Slider::new(2.0).value(), 1.0);
        assert_eq!(Slider::new(-1.0).value(), 0.0);
        assert_eq!(Slider::new(f32::NAN).value(), 0.0);
    }

    #[test]
    fn press_seeks_and_drag_follows_past_the_edge() {
        let mut s = Slider::default();
        let mut c = ctx(11);
        let press = Event::PointerDown { pos: Point::new(5, 0), button: PointerButton::Left };
        assert!(s.on_event(&mut c, &press).is_handled());
        assert_eq!(s.value(), 0.5);
        assert!(s.is_dragging());

        s.on_event(&mut c, &Event::PointerMove { pos: Point::new(30, 4) });
        assert_eq!(s.value(), 1.0);
        s.on_event(&mut c, &Event::PointerMove { pos: Point::new(-3, 0) });
        assert_eq!(s.value(), 0.0);

        let release = Event::PointerUp { pos: Point::new(0, 0), button: PointerButton::Left };
        assert!(s.on_event(&mut c, &release).is_handled());
        assert!(!s.is_dragging());
    }

    #[test]
    fn hover_move_without_press_is_ignored() {
        let mut s = Slider::new(0.3);
        let mv = Event::PointerMove { pos: Point::new(9, 0) };
        assert_eq!(s.on_event(&mut ctx(11), &mv), EventResult::Unhandled);
        assert_eq!(s.value(), 0.3);
    }

    #[test]
    fn capture_lost_ends_drag() {
        let mut s = Slider::default();
        let mut c = ctx(11);
        s.on_event(&mut c, &Event::PointerDown { pos: Point::new(2, 0), button: PointerButton::Left });
        s.on_event(&mut c, &Event::CaptureLost);
        assert!(!s.is_dragging());
    }

    #[test]
    fn keys_step_and_saturate() {
        let mut s = Slider::new(0.5).with_step(0.25);
        let mut c = ctx(5);
        s.on_event(&mut c, &key(Key::Right));
        assert_eq!(s.value(), 0.75);
        s.on_event(&mut c, &key(Key::Right));
        s.on_event(&mut c, &key(Key::Right));
        assert_eq!(s.value(), 1.0);
        s.on_event(&mut c, &key(Key::Home));
        assert_eq!(s.value(), 0.0);
        assert_eq!(s.on_event(&mut c, &key(Key::Enter)), EventResult::Unhandled);
    }

    #[test]
    fn one_unit_track_pins_to_zero() {
        let mut s = Slider::new(0.8);
        s.on_event(&mut ctx(1), &Event::PointerDown { pos: Point::new(0, 0), button: PointerButton::Left });
        assert_eq!(s.value(), 0.0);
    }

    #[test]
    fn paints_thumb_on_track() {
        let mut grid = GridRenderer::new(5, 1);
        Slider::new(0.5).paint(&mut grid, Rect::new(0, 0, 5, 1));
        assert_eq!(grid.to_string(), "──●──");
    }
}
