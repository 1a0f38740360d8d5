//! Input event types, decoupled from crossterm.
//!
//! Defines [`Event`], [`KeyEvent`], [`PointerButton`] and supporting types.
//! Crossterm events are converted by [`translate`] so the rest of the
//! toolkit never depends on crossterm directly.

use std::ops::{BitAnd, BitOr};
use std::path::PathBuf;

use crate::geometry::{Point, Rect};

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key, decoupled from crossterm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Modifier key bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(2);
    pub const ALT: Modifiers = Modifiers(4);

    /// Check whether `self` contains all the bits in `other`.
    pub fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether no modifier bits are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitAnd for Modifiers {
    type Output = Modifiers;
    fn bitand(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// KeyEvent / PointerButton
// ---------------------------------------------------------------------------

/// A keyboard event with key and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event.
    pub fn new(code: Key, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// A key event with no modifiers held.
    pub fn plain(code: Key) -> Self {
        Self::new(code, Modifiers::NONE)
    }
}

/// Pointer (mouse) button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    #[default]
    Left,
    Right,
    Middle,
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// Everything the dispatcher can route.
///
/// Pointer positions are in root coordinates when an event enters the
/// dispatcher, and in the target's local space by the time a widget sees it.
/// `PointerEnter`, `PointerLeave` and `CaptureLost` are synthesized by the
/// dispatcher and never come from an input source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    PointerMove { pos: Point },
    PointerDown { pos: Point, button: PointerButton },
    PointerUp { pos: Point, button: PointerButton },
    /// Scroll by `delta` notches; positive `y` scrolls down.
    Wheel { pos: Point, delta: Point },
    KeyDown(KeyEvent),
    KeyUp(KeyEvent),
    TextInput(String),
    /// New client area (root input) or the node's new local rect (delivered).
    Resize(Rect),
    FocusGained,
    FocusLost,
    FileDrop { pos: Point, paths: Vec<PathBuf> },
    PointerEnter,
    PointerLeave,
    CaptureLost,
}

impl Event {
    /// Position carried by pointer-like events.
    pub fn position(&self) -> Option<Point> {
        match self {
            Event::PointerMove { pos }
            | Event::PointerDown { pos, .. }
            | Event::PointerUp { pos, .. }
            | Event::Wheel { pos, .. }
            | Event::FileDrop { pos, .. } => Some(*pos),
            _ => None,
        }
    }

    /// A copy with the position replaced. Events without one are cloned as is.
    pub fn with_position(&self, new_pos: Point) -> Event {
        let mut event = self.clone();
        match &mut event {
            Event::PointerMove { pos }
            | Event::PointerDown { pos, .. }
            | Event::PointerUp { pos, .. }
            | Event::Wheel { pos, .. }
            | Event::FileDrop { pos, .. } => *pos = new_pos,
            _ => {}
        }
        event
    }

    /// Whether the event is routed by pointer position.
    pub fn is_pointer(&self) -> bool {
        self.position().is_some()
    }

    /// Whether the event is routed to the focused widget.
    pub fn is_keyboard(&self) -> bool {
        matches!(self, Event::KeyDown(_) | Event::KeyUp(_) | Event::TextInput(_))
    }

    /// Whether only the dispatcher may produce this event.
    pub fn is_synthetic(&self) -> bool {
        matches!(self, Event::PointerEnter | Event::PointerLeave | Event::CaptureLost)
    }
}

// ---------------------------------------------------------------------------
// crossterm conversions
// ---------------------------------------------------------------------------

/// Convert crossterm key modifiers to our `Modifiers`.
fn convert_modifiers(m: crossterm::event::KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if m.contains(crossterm::event::KeyModifiers::SHIFT) {
        out = out | Modifiers::SHIFT;
    }
    if m.contains(crossterm::event::KeyModifiers::CONTROL) {
        out = out | Modifiers::CTRL;
    }
    if m.contains(crossterm::event::KeyModifiers::ALT) {
        out = out | Modifiers::ALT;
    }
    out
}

/// Map a crossterm key code. Codes with no counterpart yield `None`.
fn convert_key(code: crossterm::event::KeyCode) -> Option<Key> {
    use crossterm::event::KeyCode;

    Some(match code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::F(n) => Key::F(n),
        _ => return None,
    })
}

/// Convert a crossterm mouse button to our `PointerButton`.
fn convert_button(b: crossterm::event::MouseButton) -> PointerButton {
    match b {
        crossterm::event::MouseButton::Left => PointerButton::Left,
        crossterm::event::MouseButton::Right => PointerButton::Right,
        crossterm::event::MouseButton::Middle => PointerButton::Middle,
    }
}

/// Convert a crossterm `Event` into zero or more core events.
///
/// A printable key press without Ctrl/Alt produces both `KeyDown` and a
/// `TextInput` carrying the character. Drags become plain pointer moves;
/// capture handles the rest. Pasted text arrives as `TextInput`.
pub fn translate(event: crossterm::event::Event) -> Vec<Event> {
    use crossterm::event::{Event as Ct, KeyEventKind, MouseEventKind};

    match event {
        Ct::Key(ke) => {
            let Some(code) = convert_key(ke.code) else {
                return Vec::new();
            };
            let key = KeyEvent::new(code, convert_modifiers(ke.modifiers));
            match ke.kind {
                KeyEventKind::Release => vec![Event::KeyUp(key)],
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    let mut out = vec![Event::KeyDown(key)];
                    if let Key::Char(c) = code {
                        if !key.modifiers.contains(Modifiers::CTRL)
                            && !key.modifiers.contains(Modifiers::ALT)
                        {
                            out.push(Event::TextInput(c.to_string()));
                        }
                    }
                    out
                }
            }
        }
        Ct::Mouse(me) => {
            let pos = Point::new(i32::from(me.column), i32::from(me.row));
            let event = match me.kind {
                MouseEventKind::Down(b) => Event::PointerDown { pos, button: convert_button(b) },
                MouseEventKind::Up(b) => Event::PointerUp { pos, button: convert_button(b) },
                MouseEventKind::Drag(_) | MouseEventKind::Moved => Event::PointerMove { pos },
                MouseEventKind::ScrollUp => Event::Wheel { pos, delta: Point::new(0, -1) },
                MouseEventKind::ScrollDown => Event::Wheel { pos, delta: Point::new(0, 1) },
                MouseEventKind::ScrollLeft => Event::Wheel { pos, delta: Point::new(-1, 0) },
                MouseEventKind::ScrollRight => Event::Wheel { pos, delta: Point::new(1, 0) },
            };
            vec![event]
        }
        Ct::Resize(w, h) => vec![Event::Resize(Rect::new(0, 0, u32::from(w), u32::from(h)))],
        Ct::FocusGained => vec![Event::FocusGained],
        Ct::FocusLost => vec![Event::FocusLost],
        Ct::Paste(s) => vec![Event::TextInput(s)],
    }
}

// ===========================================================================
// Tests
// ===========================================================================
