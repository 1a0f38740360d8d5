//! Event dispatch: hit-test routing with hover, capture and focus state.
//!
//! [`Dispatcher`] owns the three relations a window keeps about its widgets:
//! which one the pointer is over, which one holds the pointer capture, and
//! which one has keyboard focus. All three are plain [`WidgetId`]s. They never
//! keep a node alive, and they are cleared (with the matching synthetic event)
//! before the node leaves the attached tree, or at the next lifecycle sync if
//! it left behind the dispatcher's back.

use tracing::{debug, trace, warn};

use super::focus::FocusChain;
use super::hit::{hit_test, to_local, Hit};
use super::input::{Event, Key};
use crate::geometry::{Point, Rect};
use crate::tree::{LifecycleEvent, WidgetId, WidgetTree};
use crate::widget::EventCtx;

// ---------------------------------------------------------------------------
// Phase / DispatchOutcome
// ---------------------------------------------------------------------------

/// The dispatcher's pointer state, derived from its relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Hovering(WidgetId),
    Capturing(WidgetId),
}

/// What happened to one dispatched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DispatchOutcome {
    /// The node the event was delivered to last (the handler, if any).
    pub target: Option<WidgetId>,
    pub handled: bool,
}

impl DispatchOutcome {
    const DROPPED: DispatchOutcome = DispatchOutcome { target: None, handled: false };

    fn new(target: WidgetId, handled: bool) -> Self {
        Self { target: Some(target), handled }
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Routes events into a [`WidgetTree`].
///
/// Routing rules:
/// - pointer moves go to the captured widget if any, otherwise to the hit
///   target, with `PointerLeave`/`PointerEnter` sent when the hover changes
/// - a pointer press goes to the hit target, moves focus to it if it is
///   focusable, and captures the pointer if the target handled it and is
///   draggable
/// - a pointer release during capture goes to the captured widget wherever
///   it happens, then ends the capture
/// - keyboard events go to the focused widget only
///
/// Unhandled events stop at the target unless bubbling is turned on.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    hovered: Option<WidgetId>,
    captured: Option<WidgetId>,
    focused: Option<WidgetId>,
    bubble: bool,
    tab_navigation: bool,
}

impl Dispatcher {
    /// A dispatcher with no relations, bubbling off, tab navigation on.
    pub fn new() -> Self {
        Self {
            hovered: None,
            captured: None,
            focused: None,
            bubble: false,
            tab_navigation: true,
        }
    }

    /// Re-deliver unhandled events to ancestors (builder).
    pub fn with_bubble(mut self, bubble: bool) -> Self {
        self.bubble = bubble;
        self
    }

    /// Move focus on unhandled Tab / BackTab (builder).
    pub fn with_tab_navigation(mut self, enabled: bool) -> Self {
        self.tab_navigation = enabled;
        self
    }

    pub fn hovered(&self) -> Option<WidgetId> {
        self.hovered
    }

    pub fn captured(&self) -> Option<WidgetId> {
        self.captured
    }

    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    /// Current pointer phase. Capture takes precedence over hover.
    pub fn phase(&self) -> Phase {
        match (self.captured, self.hovered) {
            (Some(id), _) => Phase::Capturing(id),
            (None, Some(id)) => Phase::Hovering(id),
            (None, None) => Phase::Idle,
        }
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    /// Route one event to completion. Pointer positions are in root space.
    pub fn dispatch(&mut self, tree: &mut WidgetTree, event: &Event) -> DispatchOutcome {
        self.sync_lifecycle(tree);
        match event {
            Event::PointerMove { pos } => self.pointer_move(tree, *pos, event),
            Event::PointerDown { pos, .. } => self.pointer_down(tree, *pos, event),
            Event::PointerUp { pos, .. } => self.pointer_up(tree, *pos, event),
            Event::Wheel { pos, .. } => match self.captured {
                Some(captured) => self.route(tree, captured, event),
                None => self.route_hit(tree, *pos, event),
            },
            Event::FileDrop { pos, .. } => self.route_hit(tree, *pos, event),
            Event::KeyDown(_) | Event::KeyUp(_) | Event::TextInput(_) => self.keyboard(tree, event),
            Event::Resize(rect) => self.resize(tree, *rect),
            Event::FocusLost => {
                let cancelled = self.cancel_capture(tree);
                DispatchOutcome { target: cancelled, handled: cancelled.is_some() }
            }
            Event::FocusGained => DispatchOutcome::DROPPED,
            Event::PointerEnter | Event::PointerLeave | Event::CaptureLost => {
                warn!(?event, "synthetic event fed to dispatcher, ignored");
                DispatchOutcome::DROPPED
            }
        }
    }

    fn pointer_move(&mut self, tree: &mut WidgetTree, pos: Point, event: &Event) -> DispatchOutcome {
        if let Some(captured) = self.captured {
            return self.route(tree, captured, event);
        }
        match self.update_hover(tree, pos) {
            Some(hit) => self.route(tree, hit.id, event),
            None => DispatchOutcome::DROPPED,
        }
    }

    fn pointer_down(&mut self, tree: &mut WidgetTree, pos: Point, event: &Event) -> DispatchOutcome {
        if let Some(captured) = self.captured {
            return self.route(tree, captured, event);
        }
        let Some(hit) = self.update_hover(tree, pos) else {
            return DispatchOutcome::DROPPED;
        };
        let target = hit.id;

        if tree.node(target).is_some_and(|n| n.is_focusable()) {
            self.set_focus(tree, Some(target));
        }

        let outcome = self.route(tree, target, event);
        let draggable = tree.node(target).is_some_and(|n| n.widget().is_draggable());
        if outcome.handled && outcome.target == Some(target) && draggable {
            debug!(?target, "pointer captured");
            self.captured = Some(target);
        }
        outcome
    }

    fn pointer_up(&mut self, tree: &mut WidgetTree, pos: Point, event: &Event) -> DispatchOutcome {
        let Some(captured) = self.captured else {
            return self.route_hit(tree, pos, event);
        };
        let outcome = self.route(tree, captured, event);
        self.captured = None;
        debug!(?captured, "pointer capture released");
        self.update_hover(tree, pos);
        outcome
    }

    fn keyboard(&mut self, tree: &mut WidgetTree, event: &Event) -> DispatchOutcome {
        let outcome = match self.focused {
            Some(focused) => self.route(tree, focused, event),
            None => {
                debug!(?event, "no focused widget");
                DispatchOutcome::DROPPED
            }
        };
        if outcome.handled || !self.tab_navigation {
            return outcome;
        }
        let moved = match event {
            Event::KeyDown(key) if key.code == Key::Tab => self.focus_next(tree),
            Event::KeyDown(key) if key.code == Key::BackTab => self.focus_previous(tree),
            _ => return outcome,
        };
        DispatchOutcome { target: moved, handled: moved.is_some() }
    }

    /// Lay the tree out for a new client area, then tell every placed node
    /// its new size, parents before children.
    fn resize(&mut self, tree: &mut WidgetTree, rect: Rect) -> DispatchOutcome {
        let Some(root) = tree.root() else {
            return DispatchOutcome::DROPPED;
        };
        let placed = tree.resize(root, rect).unwrap_or_default();
        debug!(?rect, nodes = placed.len(), "resize");
        for id in placed {
            let local = tree.rect(id).map_or(Rect::EMPTY, |r| r.size().to_rect());
            self.send(tree, id, &Event::Resize(local));
        }
        DispatchOutcome::new(root, true)
    }

    // -----------------------------------------------------------------------
    // Routing helpers
    // -----------------------------------------------------------------------

    fn route_hit(&mut self, tree: &mut WidgetTree, pos: Point, event: &Event) -> DispatchOutcome {
        match hit_test(tree, pos) {
            Some(Hit { id, .. }) => self.route(tree, id, event),
            None => DispatchOutcome::DROPPED,
        }
    }

    /// Deliver to `target`, then to its ancestors when bubbling is on and
    /// nobody handled it yet.
    fn route(&mut self, tree: &mut WidgetTree, target: WidgetId, event: &Event) -> DispatchOutcome {
        trace!(?target, ?event, "deliver");
        let local = localize(tree, target, event);
        if self.send(tree, target, &local) {
            return DispatchOutcome::new(target, true);
        }
        if self.bubble {
            for ancestor in tree.ancestors(target) {
                let local = localize(tree, ancestor, event);
                if self.send(tree, ancestor, &local) {
                    trace!(?target, handler = ?ancestor, "bubbled");
                    return DispatchOutcome::new(ancestor, true);
                }
            }
        }
        DispatchOutcome::new(target, false)
    }

    /// Deliver a single event to a single node. Returns whether it handled it.
    fn send(&self, tree: &mut WidgetTree, id: WidgetId, event: &Event) -> bool {
        let Some(size) = tree.delivery_size(id) else {
            return false;
        };
        let ctx = EventCtx::new(id, size).with_state(
            self.hovered == Some(id),
            self.focused == Some(id),
            self.captured == Some(id),
        );
        tree.deliver(id, ctx, event).is_handled()
    }

    /// Re-run the hit-test at `pos`, sending Leave/Enter when the hovered
    /// node changes.
    fn update_hover(&mut self, tree: &mut WidgetTree, pos: Point) -> Option<Hit> {
        let hit = hit_test(tree, pos);
        let new = hit.map(|h| h.id);
        if new != self.hovered {
            if let Some(old) = self.hovered.take() {
                self.send(tree, old, &Event::PointerLeave);
            }
            self.hovered = new;
            if let Some(new) = new {
                self.send(tree, new, &Event::PointerEnter);
            }
            trace!(hovered = ?new, "hover changed");
        }
        hit
    }

    // -----------------------------------------------------------------------
    // Capture and focus
    // -----------------------------------------------------------------------

    /// End the current capture without a release, sending `CaptureLost`.
    ///
    /// Used when the window loses focus mid-drag and the release will never
    /// arrive. Returns the widget that held the capture.
    pub fn cancel_capture(&mut self, tree: &mut WidgetTree) -> Option<WidgetId> {
        let captured = self.captured?;
        self.send(tree, captured, &Event::CaptureLost);
        self.captured = None;
        debug!(?captured, "pointer capture cancelled");
        Some(captured)
    }

    /// Move keyboard focus, sending `FocusLost` to the old holder and
    /// `FocusGained` to the new one.
    ///
    /// `None` clears focus. A target that is not in the focus chain (not
    /// focusable, hidden, disabled or detached) is refused. Returns whether
    /// focus changed.
    pub fn set_focus(&mut self, tree: &mut WidgetTree, target: Option<WidgetId>) -> bool {
        if target == self.focused {
            return false;
        }
        if let Some(id) = target {
            if !FocusChain::from_tree(tree).contains(id) {
                debug!(?id, "focus refused");
                return false;
            }
        }
        if let Some(old) = self.focused.take() {
            self.send(tree, old, &Event::FocusLost);
        }
        self.focused = target;
        if let Some(new) = target {
            self.send(tree, new, &Event::FocusGained);
        }
        debug!(focused = ?target, "focus changed");
        true
    }

    /// Focus the next node in tab order, wrapping around.
    pub fn focus_next(&mut self, tree: &mut WidgetTree) -> Option<WidgetId> {
        let next = FocusChain::from_tree(tree).next(self.focused)?;
        self.set_focus(tree, Some(next));
        self.focused
    }

    /// Focus the previous node in tab order, wrapping around.
    pub fn focus_previous(&mut self, tree: &mut WidgetTree) -> Option<WidgetId> {
        let previous = FocusChain::from_tree(tree).previous(self.focused)?;
        self.set_focus(tree, Some(previous));
        self.focused
    }

    // -----------------------------------------------------------------------
    // Detach safety
    // -----------------------------------------------------------------------

    /// Drop every relation into the subtree rooted at `id`, sending exactly
    /// one `CaptureLost`, `PointerLeave` and `FocusLost` to the nodes that
    /// held them. Must run while the nodes still exist.
    pub fn release_subtree(&mut self, tree: &mut WidgetTree, id: WidgetId) {
        if let Some(captured) = within(tree, id, self.captured) {
            self.send(tree, captured, &Event::CaptureLost);
            self.captured = None;
            debug!(?captured, "capture released by detach");
        }
        if let Some(hovered) = within(tree, id, self.hovered) {
            self.send(tree, hovered, &Event::PointerLeave);
            self.hovered = None;
            trace!(?hovered, "hover released by detach");
        }
        if let Some(focused) = within(tree, id, self.focused) {
            self.send(tree, focused, &Event::FocusLost);
            self.focused = None;
            debug!(?focused, "focus released by detach");
        }
    }

    /// Drain the tree's lifecycle log and drop relations to nodes that are no
    /// longer attached.
    ///
    /// This catches nodes that left the tree without going through
    /// [`release_subtree`](Self::release_subtree). Each relation gets exactly
    /// one synthetic event, whether the node was detached or destroyed.
    /// Destroyed widgets are freed afterwards.
    pub fn sync_lifecycle(&mut self, tree: &mut WidgetTree) {
        for event in tree.drain_lifecycle() {
            if let LifecycleEvent::Mount(_) = event {
                continue;
            }
            let id = event.id();
            if tree.is_attached(id) {
                continue;
            }
            if self.captured == Some(id) {
                warn!(?id, "captured widget left the tree");
                self.send(tree, id, &Event::CaptureLost);
                self.captured = None;
            }
            if self.hovered == Some(id) {
                self.send(tree, id, &Event::PointerLeave);
                self.hovered = None;
            }
            if self.focused == Some(id) {
                warn!(?id, "focused widget left the tree");
                self.send(tree, id, &Event::FocusLost);
                self.focused = None;
            }
        }
        let purged = tree.purge_destroyed();
        if purged > 0 {
            trace!(purged, "destroyed widgets freed");
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// `relation` if it points at `root` or one of its descendants.
fn within(tree: &WidgetTree, root: WidgetId, relation: Option<WidgetId>) -> Option<WidgetId> {
    relation.filter(|&r| r == root || tree.ancestors(r).contains(&root))
}

/// Translate a pointer event into `id`'s local space.
fn localize(tree: &WidgetTree, id: WidgetId, event: &Event) -> Event {
    match event.position().and_then(|p| to_local(tree, id, p)) {
        Some(local) => event.with_position(local),
        None => event.clone(),
    }
}

// ===========================================================================
// Tests
// ===========================================================================
