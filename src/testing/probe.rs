//! Recording widget for dispatch tests.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use crate::event::Event;
use crate::widget::traits::{EventCtx, EventResult, Widget};

/// Shared log of `(probe name, event)` pairs, in delivery order.
pub type EventLog = Rc<RefCell<Vec<(String, Event)>>>;

/// A fresh, empty [`EventLog`].
pub fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// A widget that records every event delivered to it.
///
/// Whether it handles events, takes focus and captures the pointer are all
/// configurable, so one probe type covers every routing scenario.
#[derive(Debug)]
pub struct Probe {
    name: String,
    log: EventLog,
    handling: bool,
    draggable: bool,
    focusable: bool,
}

impl Probe {
    pub fn new(name: impl Into<String>, log: &EventLog) -> Self {
        Self {
            name: name.into(),
            log: Rc::clone(log),
            handling: false,
            draggable: false,
            focusable: false,
        }
    }

    /// Report every event as handled.
    pub fn handling(mut self, handling: bool) -> Self {
        self.handling = handling;
        self
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Widget for Probe {
    fn widget_type(&self) -> &str {
        "Probe"
    }

    fn on_event(&mut self, _ctx: &mut EventCtx, event: &Event) -> EventResult {
        self.log.borrow_mut().push((self.name.clone(), event.clone()));
        self.handling.into()
    }

    fn can_focus(&self) -> bool {
        self.focusable
    }

    fn is_draggable(&self) -> bool {
        self.draggable
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
