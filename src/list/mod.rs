//! Virtualized lists: scroll state and a pooled view recycler.

pub mod scroll;
pub mod virtual_list;

pub use scroll::{ScrollState, ScrollbarState};
pub use virtual_list::{Adapter, VirtualList};
