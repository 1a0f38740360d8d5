//! Absolute strategy: children keep the rects they were given.

use super::{Layout, LayoutItem};
use crate::geometry::Rect;

/// Layout is a no-op: each child's current rect is returned verbatim.
///
/// Use this for containers whose children are positioned by application
/// code, such as a virtualized list placing its pooled rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Absolute;

impl Layout for Absolute {
    fn name(&self) -> &'static str {
        "absolute"
    }

    fn arrange(&self, _content: Rect, items: &[LayoutItem]) -> Vec<Rect> {
        items.iter().map(|item| item.current).collect()
    }
}
