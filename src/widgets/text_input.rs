//! TextInput widget: a focusable single-line text field.
//!
//! Text arrives as [`Event::TextInput`]; editing and cursor keys arrive as
//! [`Event::KeyDown`]. A press places the cursor at the clicked column.
//! Supports placeholder text and password masking.

use std::any::Any;

use crate::color::Color;
use crate::event::{Event, Key, PointerButton};
use crate::geometry::{Point, Rect, Size};
use crate::render::{Renderer, TextStyle};
use crate::widget::traits::{EventCtx, EventResult, Widget};

// ---------------------------------------------------------------------------
// TextInput
// ---------------------------------------------------------------------------

/// A text input widget with cursor, placeholder and password support.
///
/// The cursor position is tracked as a byte offset into the value string.
/// All cursor operations are char-boundary safe.
///
/// # Examples
///
/// ```ignore
/// let input = TextInput::new()
///     .with_placeholder("Enter your name...")
///     .with_value("Alice");
/// ```
#[derive(Debug, Clone)]
pub struct TextInput {
    value: String,
    placeholder: String,
    cursor_position: usize,
    password: bool,
    focused: bool,
    color: Color,
    placeholder_color: Color,
    cursor_color: Color,
}

impl TextInput {
    pub fn new() -> Self {
        Self {
            value: String::new(),
            placeholder: String::new(),
            cursor_position: 0,
            password: false,
            focused: false,
            color: Color::WHITE,
            placeholder_color: Color::GREY,
            cursor_color: Color::GREY,
        }
    }

    /// Set the placeholder text (builder pattern).
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the initial value, cursor at the end (builder pattern).
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    /// Enable or disable password masking (builder pattern).
    pub fn password(mut self, password: bool) -> Self {
        self.password = password;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Set the value, moving the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor_position = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor_position = 0;
    }

    /// Whether the field has keyboard focus, as last reported by the
    /// dispatcher.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Insert text at the cursor. Control characters are dropped.
    pub fn insert_str(&mut self, text: &str) {
        for ch in text.chars().filter(|c| !c.is_control()) {
            self.insert_char(ch);
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        self.value.insert(self.cursor_position, ch);
        self.cursor_position += ch.len_utf8();
    }

    /// Delete the character before the cursor (backspace).
    pub fn delete_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        let prev = self.prev_char_boundary();
        self.value.drain(prev..self.cursor_position);
        self.cursor_position = prev;
    }

    /// Delete the character after the cursor.
    pub fn delete_forward(&mut self) {
        if self.cursor_position >= self.value.len() {
            return;
        }
        let next = self.next_char_boundary();
        self.value.drain(self.cursor_position..next);
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position = self.prev_char_boundary();
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.value.len() {
            self.cursor_position = self.next_char_boundary();
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.value.len();
    }

    /// Cursor position as a byte offset.
    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Cursor position in characters.
    pub fn cursor_column(&self) -> usize {
        self.value[..self.cursor_position].chars().count()
    }

    /// Put the cursor before the `column`th character, or at the end.
    pub fn set_cursor_column(&mut self, column: usize) {
        self.cursor_position = self
            .value
            .char_indices()
            .nth(column)
            .map_or(self.value.len(), |(i, _)| i);
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn prev_char_boundary(&self) -> usize {
        let mut pos = self.cursor_position.saturating_sub(1);
        while pos > 0 && !self.value.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }

    fn next_char_boundary(&self) -> usize {
        let mut pos = self.cursor_position + 1;
        while pos < self.value.len() && !self.value.is_char_boundary(pos) {
            pos += 1;
        }
        pos
    }

    /// Display string: either the value (possibly masked) or the placeholder.
    fn display_text(&self) -> String {
        if self.value.is_empty() {
            self.placeholder.clone()
        } else if self.password {
            "\u{2022}".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    /// First visible column so the cursor stays inside `width`.
    fn scroll_offset(&self, width: u32) -> usize {
        let width = width as usize;
        let column = self.cursor_column();
        if width == 0 || column < width {
            0
        } else {
            column + 1 - width
        }
    }

    fn on_key(&mut self, code: Key) -> EventResult {
        match code {
            Key::Backspace => self.delete_char(),
            Key::Delete => self.delete_forward(),
            Key::Left => self.move_cursor_left(),
            Key::Right => self.move_cursor_right(),
            Key::Home => self.move_cursor_home(),
            Key::End => self.move_cursor_end(),
            _ => return EventResult::Unhandled,
        }
        EventResult::Handled
    }
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for TextInput {
    fn widget_type(&self) -> &str {
        "TextInput"
    }

    fn on_event(&mut self, ctx: &mut EventCtx, event: &Event) -> EventResult {
        let result = match event {
            Event::TextInput(text) => {
                self.insert_str(text);
                EventResult::Handled
            }
            Event::KeyDown(key) => self.on_key(key.code),
            Event::PointerDown { pos, button: PointerButton::Left } => {
                let offset = self.scroll_offset(ctx.size().width);
                self.set_cursor_column(offset + pos.x.max(0) as usize);
                EventResult::Handled
            }
            Event::FocusGained | Event::FocusLost => {
                self.focused = matches!(event, Event::FocusGained);
                EventResult::Handled
            }
            _ => EventResult::Unhandled,
        };
        if result.is_handled() {
            ctx.request_paint();
        }
        result
    }

    fn paint(&self, renderer: &mut dyn Renderer, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        let row = Rect::new(rect.x, rect.y, rect.width, 1);
        let offset = if self.value.is_empty() { 0 } else { self.scroll_offset(rect.width) };
        let visible: String = self.display_text().chars().skip(offset).collect();
        let color = if self.value.is_empty() { self.placeholder_color } else { self.color };

        if self.focused {
            let column = (self.cursor_column() - offset) as i32;
            let cursor = Point::new(row.x + column, row.y);
            renderer.draw_rect(Rect::from_origin_size(cursor, Size::new(1, 1)), self.cursor_color);
        }
        renderer.draw_text(&visible, row, color, &TextStyle::default());
    }

    fn measure(&self, _renderer: &dyn Renderer) -> Option<Size> {
        Some(Size::new(20, 1))
    }

    fn can_focus(&self) -> bool {
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
