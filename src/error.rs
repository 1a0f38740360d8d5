//! Error types for widget tree mutation.
//!
//! Geometry, hit-testing and event delivery never fail: they clamp, return
//! `None`, or report an unhandled result. Only structural tree operations
//! given an invalid id or an impossible relation return an error.

use thiserror::Error;

use crate::tree::WidgetId;

/// Errors from [`WidgetTree`](crate::tree::WidgetTree) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("widget {0:?} does not exist")]
    NotFound(WidgetId),

    #[error("widget {child:?} is already attached to {parent:?}")]
    AlreadyAttached { child: WidgetId, parent: WidgetId },

    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    CycleDetected { child: WidgetId, parent: WidgetId },

    #[error("the root widget {0:?} cannot be attached to a parent")]
    RootNotAttachable(WidgetId),

    #[error("widget {0:?} is not a container")]
    NotAContainer(WidgetId),
}
