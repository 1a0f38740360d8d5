//! Window: the widget tree, its dispatcher and its event queue in one place.
//!
//! [`Window`] is the unit a platform integration drives. It feeds events to
//! the dispatcher, drains the cross-thread queue, keeps dispatcher relations
//! consistent when nodes leave the tree, and flushes the dirty region to a
//! renderer.

use tracing::{debug, info};

use crate::color::Color;
use crate::error::TreeError;
use crate::event::{DispatchOutcome, Dispatcher, Event, EventQueue, EventSender};
use crate::geometry::{Rect, Size};
use crate::layout::Flex;
use crate::render::{self, Renderer};
use crate::tree::{Node, WidgetId, WidgetTree};
use crate::widgets::Panel;

// ---------------------------------------------------------------------------
// WindowConfig
// ---------------------------------------------------------------------------

/// Configuration for a [`Window`].
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// Optional window title.
    pub title: Option<String>,
    /// Initial client area size.
    pub size: Size,
    /// Capacity of the cross-thread event queue.
    pub queue_capacity: usize,
    /// Move focus on unhandled Tab / BackTab.
    pub tab_navigation: bool,
    /// Re-deliver unhandled events to ancestors.
    pub bubble: bool,
    /// Colour the dirty region is cleared to before repainting.
    pub background: Color,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: None,
            size: Size::new(80, 24),
            queue_capacity: 256,
            tab_navigation: true,
            bubble: false,
            background: Color::BLACK,
        }
    }
}

impl WindowConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn with_tab_navigation(mut self, enabled: bool) -> Self {
        self.tab_navigation = enabled;
        self
    }

    pub fn with_bubble(mut self, bubble: bool) -> Self {
        self.bubble = bubble;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }
}

// ---------------------------------------------------------------------------
// Window
// ---------------------------------------------------------------------------

/// A widget tree bound to a client area.
///
/// The tree and dispatcher are public for direct manipulation. Structural
/// changes that can drop a hovered, captured or focused node should go
/// through [`detach`](Self::detach), [`remove`](Self::remove),
/// [`set_visible`](Self::set_visible) or [`set_enabled`](Self::set_enabled)
/// so the affected widgets are told before they go.
#[derive(Debug)]
pub struct Window {
    pub tree: WidgetTree,
    pub dispatcher: Dispatcher,
    config: WindowConfig,
    queue: EventQueue,
    root: WidgetId,
}

impl Window {
    /// A window whose root is a [`Panel`] laid out as a column.
    pub fn new(config: WindowConfig) -> Self {
        Self::with_root(config, Node::container(Panel::new(), Flex::column()).with_name("root"))
    }

    /// A window with a caller-supplied root node, sized to the client area.
    pub fn with_root(config: WindowConfig, root: Node) -> Self {
        let mut tree = WidgetTree::new();
        let root = tree.insert(root);
        // A fresh root always exists, so placement cannot fail.
        let _ = tree.set_rect(root, config.size.to_rect());
        let dispatcher = Dispatcher::new()
            .with_bubble(config.bubble)
            .with_tab_navigation(config.tab_navigation);
        let queue = EventQueue::new(config.queue_capacity);
        info!(title = ?config.title, size = ?config.size, "window created");
        Self { tree, dispatcher, config, queue, root }
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    pub fn root(&self) -> WidgetId {
        self.root
    }

    /// The client area size.
    pub fn size(&self) -> Size {
        self.tree.rect(self.root).map_or(Size::ZERO, Rect::size)
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    /// Dispatch one event to completion.
    pub fn handle_event(&mut self, event: &Event) -> DispatchOutcome {
        self.dispatcher.dispatch(&mut self.tree, event)
    }

    /// Resize the client area: lays the tree out and delivers `Resize`.
    pub fn resize(&mut self, size: Size) -> DispatchOutcome {
        self.handle_event(&Event::Resize(size.to_rect()))
    }

    /// A producer handle for the window's queue, for use on other threads.
    pub fn sender(&self) -> EventSender {
        self.queue.sender()
    }

    /// Dispatch every queued event, oldest first. Returns how many ran.
    pub fn pump(&mut self) -> usize {
        let events = self.queue.drain();
        for event in &events {
            self.handle_event(event);
        }
        if !events.is_empty() {
            debug!(count = events.len(), "pumped queued events");
        }
        events.len()
    }

    /// Wait for at least one queued event, then dispatch it and everything
    /// else already pending. Returns how many ran.
    pub async fn pump_async(&mut self) -> usize {
        let Some(first) = self.queue.next().await else {
            return 0;
        };
        self.handle_event(&first);
        1 + self.pump()
    }

    /// Move keyboard focus. See [`Dispatcher::set_focus`].
    pub fn focus(&mut self, id: Option<WidgetId>) -> bool {
        self.dispatcher.set_focus(&mut self.tree, id)
    }

    // -----------------------------------------------------------------------
    // Structure
    // -----------------------------------------------------------------------

    /// Detach `id` from its parent, releasing hover, capture and focus held
    /// inside the subtree first.
    pub fn detach(&mut self, id: WidgetId) -> Result<(), TreeError> {
        self.require(id)?;
        self.dispatcher.release_subtree(&mut self.tree, id);
        self.tree.detach(id)?;
        self.dispatcher.sync_lifecycle(&mut self.tree);
        Ok(())
    }

    /// Remove `id` and its subtree, releasing relations first. Returns the
    /// removed ids.
    pub fn remove(&mut self, id: WidgetId) -> Result<Vec<WidgetId>, TreeError> {
        self.require(id)?;
        self.dispatcher.release_subtree(&mut self.tree, id);
        let removed = self.tree.remove(id)?;
        self.dispatcher.sync_lifecycle(&mut self.tree);
        Ok(removed)
    }

    /// Show or hide `id`. Hiding releases relations inside the subtree.
    pub fn set_visible(&mut self, id: WidgetId, visible: bool) -> Result<(), TreeError> {
        self.require(id)?;
        if !visible {
            self.dispatcher.release_subtree(&mut self.tree, id);
        }
        self.tree.set_visible(id, visible)
    }

    /// Enable or disable `id`. Disabling releases relations inside the
    /// subtree.
    pub fn set_enabled(&mut self, id: WidgetId, enabled: bool) -> Result<(), TreeError> {
        self.require(id)?;
        if !enabled {
            self.dispatcher.release_subtree(&mut self.tree, id);
        }
        self.tree.set_enabled(id, enabled)
    }

    fn require(&self, id: WidgetId) -> Result<(), TreeError> {
        if self.tree.contains(id) {
            Ok(())
        } else {
            Err(TreeError::NotFound(id))
        }
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    /// Re-measure widgets with `renderer` and relayout where intrinsic sizes
    /// changed. Returns whether anything changed.
    pub fn measure(&mut self, renderer: &dyn Renderer) -> bool {
        self.tree.update_intrinsic_sizes(renderer)
    }

    /// Flush the dirty region: clear it to the background colour and paint
    /// the nodes that intersect it. Returns the repainted area, or `None`
    /// when nothing was dirty.
    pub fn paint(&mut self, renderer: &mut dyn Renderer) -> Option<Rect> {
        let region = self.tree.take_dirty_region()?.intersect(self.size().to_rect());
        if region.is_empty() {
            return None;
        }
        renderer.set_clip(Some(region));
        renderer.draw_rect(region, self.config.background);
        let painted = render::paint(&mut self.tree, renderer, region);
        debug!(?region, painted, "window painted");
        Some(region)
    }

    /// Repaint the whole client area.
    pub fn paint_all(&mut self, renderer: &mut dyn Renderer) -> Option<Rect> {
        self.tree.invalidate(self.root);
        self.paint(renderer)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
