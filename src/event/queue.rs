//! Bounded cross-thread event queue.
//!
//! The widget tree is owned by one UI thread. Other threads (input readers,
//! background tasks) hold cloned [`EventSender`]s and push [`Event`]s; the UI
//! thread drains the [`EventQueue`] and dispatches them one at a time, in
//! arrival order.

use tokio::sync::mpsc;

pub use tokio::sync::mpsc::error::{SendError, TrySendError};

use super::input::Event;

/// Producer handle. Cheap to clone, `Send`.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::Sender<Event>,
}

impl EventSender {
    /// Wait for capacity, then enqueue.
    pub async fn send(&self, event: Event) -> Result<(), SendError<Event>> {
        self.tx.send(event).await
    }

    /// Enqueue without waiting. Fails when the queue is full or gone.
    pub fn try_send(&self, event: Event) -> Result<(), TrySendError<Event>> {
        self.tx.try_send(event)
    }

    /// Enqueue from a plain (non-async) thread, blocking while full.
    ///
    /// # Panics
    ///
    /// Panics if called from within an async runtime.
    pub fn blocking_send(&self, event: Event) -> Result<(), SendError<Event>> {
        self.tx.blocking_send(event)
    }

    /// Whether the receiving queue has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer end, owned by the UI thread.
#[derive(Debug)]
pub struct EventQueue {
    tx: mpsc::Sender<Event>,
    rx: mpsc::Receiver<Event>,
    capacity: usize,
}

impl EventQueue {
    /// A queue holding at most `capacity` pending events (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, rx) = mpsc::channel(capacity);
        Self { tx, rx, capacity }
    }

    /// A new producer handle.
    pub fn sender(&self) -> EventSender {
        EventSender { tx: self.tx.clone() }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Take the next pending event without waiting.
    pub fn try_next(&mut self) -> Option<Event> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next event.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Take every event pending right now, oldest first.
    pub fn drain(&mut self) -> Vec<Event> {
        let mut out = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            out.push(event);
        }
        out
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new(256)
    }
}
