//! Widget trait: event handling, painting, intrinsic measurement.
//!
//! The `Widget` trait is the behaviour half of a tree node. The node itself
//! (rect, visibility, styling, layout hints, children) lives in the
//! [`WidgetTree`](crate::tree::WidgetTree); the widget only decides how to
//! react to events delivered to it and how to paint its content.

use std::any::Any;
use std::fmt::Debug;

use crate::event::Event;
use crate::geometry::{Rect, Size};
use crate::render::Renderer;
use crate::tree::WidgetId;

// ---------------------------------------------------------------------------
// EventResult
// ---------------------------------------------------------------------------

/// Whether a widget consumed an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventResult {
    Handled,
    Unhandled,
}

impl EventResult {
    /// `true` for [`EventResult::Handled`].
    pub fn is_handled(self) -> bool {
        matches!(self, EventResult::Handled)
    }
}

impl From<bool> for EventResult {
    fn from(handled: bool) -> Self {
        if handled {
            EventResult::Handled
        } else {
            EventResult::Unhandled
        }
    }
}

// ---------------------------------------------------------------------------
// EventCtx
// ---------------------------------------------------------------------------

/// Per-delivery context handed to [`Widget::on_event`].
///
/// Carries read-only facts about the target node and collects requests the
/// widget makes back to the tree. Positions inside the delivered event are
/// already in the widget's local space.
#[derive(Debug, Clone)]
pub struct EventCtx {
    id: WidgetId,
    size: Size,
    hovered: bool,
    focused: bool,
    captured: bool,
    repaint: bool,
}

impl EventCtx {
    pub(crate) fn new(id: WidgetId, size: Size) -> Self {
        Self { id, size, hovered: false, focused: false, captured: false, repaint: false }
    }

    pub(crate) fn with_state(mut self, hovered: bool, focused: bool, captured: bool) -> Self {
        self.hovered = hovered;
        self.focused = focused;
        self.captured = captured;
        self
    }

    /// The id of the node receiving the event.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The node's current size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The node's bounds in its own local space.
    pub fn local_rect(&self) -> Rect {
        self.size.to_rect()
    }

    /// Whether the pointer is currently over this node.
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Whether this node holds keyboard focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether this node holds the pointer capture.
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Ask for the node to be repainted on the next paint cycle.
    pub fn request_paint(&mut self) {
        self.repaint = true;
    }

    pub(crate) fn repaint_requested(&self) -> bool {
        self.repaint
    }
}

// ---------------------------------------------------------------------------
// Widget trait
// ---------------------------------------------------------------------------

/// Core trait implemented by all widgets.
///
/// Widget is object-safe; nodes store it as `Box<dyn Widget>`. Every method
/// except the type name and the `Any` accessors has a default, so a plain
/// decorative widget only implements three one-liners.
pub trait Widget: Any + Debug {
    /// The type name for this widget (e.g. "Button", "Panel"). Used in logs
    /// and debug dumps.
    fn widget_type(&self) -> &str;

    /// React to an event. Leaf widgets own their whole interaction contract;
    /// returning `Unhandled` tells the dispatcher the event was ignored.
    fn on_event(&mut self, _ctx: &mut EventCtx, _event: &Event) -> EventResult {
        EventResult::Unhandled
    }

    /// Paint content on top of the node's background and border.
    ///
    /// `rect` is the node's absolute rect.
    fn paint(&self, _renderer: &mut dyn Renderer, _rect: Rect) {}

    /// Intrinsic content size, used by layout when no explicit size is set.
    fn measure(&self, _renderer: &dyn Renderer) -> Option<Size> {
        None
    }

    /// Whether this widget takes keyboard focus when pressed.
    fn can_focus(&self) -> bool {
        false
    }

    /// Whether a handled pointer-down should capture the pointer, so that the
    /// following moves and the release reach this widget wherever they occur.
    fn is_draggable(&self) -> bool {
        false
    }

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any` for mutable runtime type inspection.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// ===========================================================================
// Tests
// ===========================================================================
