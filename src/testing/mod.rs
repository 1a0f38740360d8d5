//! Headless testing support: Pilot, grid renderer, probes and snapshot helpers.
//!
//! Use the [`Pilot`] to drive a [`Window`](crate::window::Window) without a
//! real display. Use [`render_widget`], [`render_tree`] and [`layout_dump`] to
//! capture output as plain text for snapshot-style assertions, and [`Probe`]
//! to record what the dispatcher delivers.

pub mod grid;
pub mod pilot;
pub mod probe;
pub mod snapshot;

pub use grid::{Cell, GridRenderer};
pub use pilot::Pilot;
pub use probe::{event_log, EventLog, Probe};
pub use snapshot::{layout_dump, render_tree, render_widget, trim_rows};
