//! Widget system: the behaviour trait and its per-event context.

pub mod traits;

pub use traits::{EventCtx, EventResult, Widget};
