//! Stack strategy: children overlap, each filling the content box.

use super::{Layout, LayoutItem};
use crate::geometry::Rect;

/// Every in-flow child gets the whole content box. Later children paint
/// above earlier ones and win hit-tests where they overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Stack;

impl Layout for Stack {
    fn name(&self) -> &'static str {
        "stack"
    }

    fn arrange(&self, content: Rect, items: &[LayoutItem]) -> Vec<Rect> {
        vec![content; items.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutProps;

    #[test]
    fn all_children_fill_content() {
        let content = Rect::new(2, 2, 16, 6);
        let items = [
            LayoutItem::from_rect(LayoutProps::default(), Rect::new(0, 0, 3, 3)),
            LayoutItem::from_rect(LayoutProps::weighted(4.0), Rect::new(9, 9, 1, 1)),
        ];
        assert_eq!(Stack.arrange(content, &items), vec![content, content]);
    }

    #[test]
    fn empty_is_noop() {
        assert!(Stack.arrange(Rect::new(0, 0, 5, 5), &[]).is_empty());
    }
}
