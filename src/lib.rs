//! # trellis
//!
//! A retained-mode widget toolkit core: a widget tree, an integer layout
//! engine and hit-testing event dispatch with hover, pointer capture and
//! keyboard focus.
//!
//! Widgets live in a slotmap arena and are addressed by [`WidgetId`]. Rects
//! are integer and stored relative to the parent. Containers arrange their
//! children with a pluggable [`Layout`](layout::Layout) and relayout
//! automatically when their rect or children change.
//!
//! ## Core Systems
//!
//! - **[`geometry`]**: Point, Size, Rect, Spacing primitives
//! - **[`tree`]**: Slotmap-backed widget arena with parent/child links, dirty
//!   tracking and lifecycle events
//! - **[`layout`]**: Flex, Stack, Grid and Absolute layout strategies
//! - **[`widget`]**: Widget trait and event context
//! - **[`widgets`]**: Built-in widgets: Panel, Label, Button, Slider, TextInput
//! - **[`event`]**: Input model, crossterm adapter, hit-testing, dispatcher,
//!   focus chain and the cross-thread queue
//! - **[`render`]**: Renderer trait, tree painting and a crossterm renderer
//! - **[`list`]**: Scroll state and a virtualized list with view pooling
//! - **[`window`]**: Tree, dispatcher and queue bound to a client area
//! - **[`testing`]**: Headless Pilot, grid renderer and snapshot helpers

// Foundation
pub mod color;
pub mod error;
pub mod geometry;

// Core systems
pub mod layout;
pub mod tree;

// Widget system
pub mod widget;
pub mod widgets;

// Events
pub mod event;

// Rendering
pub mod render;

// Composites
pub mod list;
pub mod window;

// Test support
pub mod testing;

pub use color::{Border, Color};
pub use error::TreeError;
pub use event::{DispatchOutcome, Dispatcher, Event};
pub use geometry::{Point, Rect, Size, Spacing};
pub use tree::{Node, WidgetId, WidgetTree};
pub use widget::{EventCtx, EventResult, Widget};
pub use window::{Window, WindowConfig};
