//! Widget lifecycle: attach, detach, destroy.
//!
//! The `LifecycleTracker` records which widgets are currently attached to the
//! rooted tree and accumulates lifecycle events (`Mount`, `Unmount`,
//! `Destroy`) that the dispatcher drains to drop hover/capture/focus relations
//! to nodes that left the tree.

use std::collections::HashSet;

use crate::tree::WidgetId;

// ---------------------------------------------------------------------------
// LifecycleEvent
// ---------------------------------------------------------------------------

/// Events that occur during the widget lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// A widget became reachable from the root.
    Mount(WidgetId),
    /// A widget stopped being reachable from the root. The node may survive.
    Unmount(WidgetId),
    /// A widget was removed from the arena; its id is now stale.
    Destroy(WidgetId),
}

impl LifecycleEvent {
    /// The widget this event is about.
    pub fn id(self) -> WidgetId {
        match self {
            LifecycleEvent::Mount(id) | LifecycleEvent::Unmount(id) | LifecycleEvent::Destroy(id) => id,
        }
    }
}

// ---------------------------------------------------------------------------
// LifecycleTracker
// ---------------------------------------------------------------------------

/// Tracks which nodes are attached and accumulates lifecycle events.
///
/// Mount/unmount are idempotent: mounting an attached node or unmounting a
/// detached one records nothing.
#[derive(Debug)]
pub struct LifecycleTracker {
    mounted: HashSet<WidgetId>,
    pending: Vec<LifecycleEvent>,
}

impl LifecycleTracker {
    /// Create a new, empty lifecycle tracker.
    pub fn new() -> Self {
        Self {
            mounted: HashSet::new(),
            pending: Vec::new(),
        }
    }

    /// Record that a node has been attached.
    pub fn on_mount(&mut self, id: WidgetId) {
        if self.mounted.insert(id) {
            self.pending.push(LifecycleEvent::Mount(id));
        }
    }

    /// Record that a node has been detached.
    pub fn on_unmount(&mut self, id: WidgetId) {
        if self.mounted.remove(&id) {
            self.pending.push(LifecycleEvent::Unmount(id));
        }
    }

    /// Record that a node has been destroyed. Unmounts it first if needed.
    pub fn on_destroy(&mut self, id: WidgetId) {
        self.on_unmount(id);
        self.pending.push(LifecycleEvent::Destroy(id));
    }

    /// Check whether a node is currently attached.
    pub fn is_mounted(&self, id: WidgetId) -> bool {
        self.mounted.contains(&id)
    }

    /// Drain and return all pending lifecycle events, oldest first.
    pub fn drain(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.pending)
    }
}

impl Default for LifecycleTracker {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
