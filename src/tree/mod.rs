//! Widget tree: slotmap-backed arena of widget nodes.

pub mod lifecycle;
pub mod node;
#[allow(clippy::module_inception)]
pub mod tree;

pub use lifecycle::{LifecycleEvent, LifecycleTracker};
pub use node::{ContainerPart, Node, WidgetId};
pub use tree::WidgetTree;
