//! Pilot: programmatic interaction with a headless Window.
//!
//! The `Pilot` wraps a [`Window`] and a [`GridRenderer`] and provides methods
//! to simulate user input (pointer, keys, text, resize) in root coordinates
//! and to render the window to text for snapshot testing.

use super::grid::GridRenderer;
use super::snapshot::{layout_dump, trim_rows};
use crate::event::{DispatchOutcome, Event, Key, KeyEvent, Modifiers, PointerButton};
use crate::geometry::{Point, Size};
use crate::tree::{Node, WidgetId, WidgetTree};
use crate::window::{Window, WindowConfig};

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless window driver for tests.
///
/// # Examples
///
/// ```ignore
/// use trellis::testing::Pilot;
/// use trellis::widgets::Button;
///
/// let mut pilot = Pilot::new(20, 3);
/// let ok = pilot.add(Node::new(Button::new("OK")).with_weight(1.0));
/// pilot.click(5, 1);
/// assert_eq!(pilot.tree().widget::<Button>(ok).map(Button::clicks), Some(1));
/// ```
#[derive(Debug)]
pub struct Pilot {
    window: Window,
    grid: GridRenderer,
    stale: bool,
}

impl Pilot {
    /// A `width` x `height` window with a column root.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_config(WindowConfig::default().with_size(Size::new(width, height)))
    }

    pub fn with_config(config: WindowConfig) -> Self {
        Self::from_window(Window::new(config))
    }

    /// Drive an existing window.
    pub fn from_window(window: Window) -> Self {
        let size = window.size();
        Self {
            window,
            grid: GridRenderer::new(size.width, size.height),
            stale: true,
        }
    }

    // ── Tree access ──────────────────────────────────────────────────

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    pub fn tree(&self) -> &WidgetTree {
        &self.window.tree
    }

    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.window.tree
    }

    pub fn root(&self) -> WidgetId {
        self.window.root()
    }

    /// Add `node` under the root.
    ///
    /// # Panics
    ///
    /// Panics if the root has been removed.
    pub fn add(&mut self, node: Node) -> WidgetId {
        let root = self.root();
        self.add_to(root, node)
    }

    /// Add `node` under `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not exist.
    pub fn add_to(&mut self, parent: WidgetId, node: Node) -> WidgetId {
        match self.window.tree.insert_child(parent, node) {
            Ok(id) => id,
            Err(err) => panic!("pilot could not add node: {err}"),
        }
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Dispatch an arbitrary event.
    pub fn send(&mut self, event: Event) -> DispatchOutcome {
        self.window.handle_event(&event)
    }

    pub fn move_to(&mut self, x: i32, y: i32) -> DispatchOutcome {
        self.send(Event::PointerMove { pos: Point::new(x, y) })
    }

    /// Left-button press at `(x, y)`.
    pub fn press(&mut self, x: i32, y: i32) -> DispatchOutcome {
        self.send(Event::PointerDown { pos: Point::new(x, y), button: PointerButton::Left })
    }

    /// Left-button release at `(x, y)`.
    pub fn release(&mut self, x: i32, y: i32) -> DispatchOutcome {
        self.send(Event::PointerUp { pos: Point::new(x, y), button: PointerButton::Left })
    }

    /// Move, press and release at `(x, y)`. Returns the release outcome.
    pub fn click(&mut self, x: i32, y: i32) -> DispatchOutcome {
        self.move_to(x, y);
        self.press(x, y);
        self.release(x, y)
    }

    /// Press at `from`, move through each point of `path`, release at the
    /// last point (or at `from` when the path is empty).
    pub fn drag(&mut self, from: (i32, i32), path: &[(i32, i32)]) -> DispatchOutcome {
        self.move_to(from.0, from.1);
        self.press(from.0, from.1);
        for &(x, y) in path {
            self.move_to(x, y);
        }
        let (x, y) = path.last().copied().unwrap_or(from);
        self.release(x, y)
    }

    /// Scroll the wheel by `dy` rows at `(x, y)`.
    pub fn wheel(&mut self, x: i32, y: i32, dy: i32) -> DispatchOutcome {
        self.send(Event::Wheel { pos: Point::new(x, y), delta: Point::new(0, dy) })
    }

    /// Key press with no modifiers.
    pub fn press_key(&mut self, key: Key) -> DispatchOutcome {
        self.press_key_with(key, Modifiers::NONE)
    }

    pub fn press_key_with(&mut self, key: Key, modifiers: Modifiers) -> DispatchOutcome {
        self.send(Event::KeyDown(KeyEvent::new(key, modifiers)))
    }

    /// Type `text` the way a terminal delivers it: a `KeyDown` for each
    /// character followed by its `TextInput`.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.press_key(Key::Char(ch));
            self.send(Event::TextInput(ch.to_string()));
        }
    }

    /// Resize the window, relaying out the tree.
    pub fn resize(&mut self, width: u32, height: u32) -> DispatchOutcome {
        self.grid.resize(width, height);
        self.stale = true;
        self.window.resize(Size::new(width, height))
    }

    /// Simulate the window losing focus (cancels any capture).
    pub fn blur(&mut self) -> DispatchOutcome {
        self.send(Event::FocusLost)
    }

    /// Dispatch everything queued through [`Window::sender`].
    pub fn pump(&mut self) -> usize {
        self.window.pump()
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn focused(&self) -> Option<WidgetId> {
        self.window.dispatcher.focused()
    }

    pub fn hovered(&self) -> Option<WidgetId> {
        self.window.dispatcher.hovered()
    }

    pub fn captured(&self) -> Option<WidgetId> {
        self.window.dispatcher.captured()
    }

    // ── Render helpers ───────────────────────────────────────────────

    /// Re-measure intrinsic sizes with the pilot's grid renderer.
    pub fn measure(&mut self) -> bool {
        self.window.measure(&self.grid)
    }

    /// Flush pending repaints into the pilot's grid and return it as text,
    /// rows right-trimmed. Only the dirty region is repainted, except after
    /// creation or a resize.
    pub fn render(&mut self) -> String {
        if std::mem::take(&mut self.stale) {
            self.window.paint_all(&mut self.grid);
        } else {
            self.window.paint(&mut self.grid);
        }
        trim_rows(&self.grid.to_string())
    }

    /// The grid as last rendered.
    pub fn grid(&self) -> &GridRenderer {
        &self.grid
    }

    /// See [`layout_dump`].
    pub fn layout(&self) -> String {
        layout_dump(&self.window.tree)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
