//! Spatial hit-testing over the widget tree.

use tracing::trace;

use crate::geometry::Point;
use crate::tree::{WidgetId, WidgetTree};

/// Result of a successful hit-test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hit {
    /// Deepest node containing the point.
    pub id: WidgetId,
    /// The point in that node's local space.
    pub local: Point,
}

/// Find the deepest visible, enabled node under `point` (root coordinates).
///
/// Descends from the root into nodes whose rect contains the point. Siblings
/// are tried last-to-first, so the most recently added (topmost painted)
/// child wins when siblings overlap. A hidden or disabled node hides its whole
/// subtree. Returns `None` when the point misses the root.
pub fn hit_test(tree: &WidgetTree, point: Point) -> Option<Hit> {
    let root = tree.root()?;
    let node = tree.node(root)?;
    if !node.is_visible() || !node.is_enabled() || !node.rect().contains(point) {
        return None;
    }

    let mut hit = Hit { id: root, local: point.relative_to(node.rect().origin()) };
    'descend: loop {
        for &child in tree.children(hit.id).iter().rev() {
            let Some(node) = tree.node(child) else {
                continue;
            };
            if node.is_visible() && node.is_enabled() && node.rect().contains(hit.local) {
                hit = Hit { id: child, local: hit.local.relative_to(node.rect().origin()) };
                continue 'descend;
            }
        }
        break;
    }
    trace!(?point, target = ?hit.id, "hit test");
    Some(hit)
}

/// Convert a root-space point into `id`'s local space.
pub fn to_local(tree: &WidgetTree, id: WidgetId, point: Point) -> Option<Point> {
    tree.absolute_rect(id).map(|r| point.relative_to(r.origin()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::layout::{Absolute, Flex};
    use crate::tree::Node;
    use crate::widgets::Panel;

    /// Row of two panels inside a 100x10 root; the left one holds a nested
    /// child at local (5,2).
    fn build() -> (WidgetTree, WidgetId, WidgetId, WidgetId, WidgetId) {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Node::container(Panel::new(), Flex::row()));
        let left = tree
            .insert_child(root, Node::container(Panel::new(), Absolute).with_weight(1.0))
            .unwrap();
        let right = tree.insert_child(root, Node::new(Panel::new()).with_weight(1.0)).unwrap();
        let inner = tree
            .insert_child(left, Node::new(Panel::new()).with_rect(Rect::new(5, 2, 4, 4)))
            .unwrap();
        tree.set_rect(root, Rect::new(0, 0, 100, 10)).unwrap();
        (tree, root, left, right, inner)
    }

    #[test]
    fn deepest_node_with_local_point() {
        let (tree, _root, _left, right, inner) = build();
        assert_eq!(hit_test(&tree, Point::new(6, 3)), Some(Hit { id: inner, local: Point::new(1, 1) }));
        assert_eq!(hit_test(&tree, Point::new(60, 9)), Some(Hit { id: right, local: Point::new(10, 9) }));
    }

    #[test]
    fn falls_back_to_container() {
        let (tree, _root, left, ..) = build();
        assert_eq!(hit_test(&tree, Point::new(0, 0)).map(|h| h.id), Some(left));
    }

    #[test]
    fn half_open_edges() {
        let (tree, _root, left, right, _inner) = build();
        assert_eq!(hit_test(&tree, Point::new(49, 0)).map(|h| h.id), Some(left));
        assert_eq!(hit_test(&tree, Point::new(50, 0)).map(|h| h.id), Some(right));
        assert_eq!(hit_test(&tree, Point::new(100, 0)), None);
        assert_eq!(hit_test(&tree, Point::new(-1, 0)), None);
    }

    #[test]
    fn hidden_and_disabled_nodes_are_transparent() {
        let (mut tree, _root, left, _right, inner) = build();
        tree.set_visible(inner, false).unwrap();
        assert_eq!(hit_test(&tree, Point::new(6, 3)).map(|h| h.id), Some(left));
        tree.set_visible(inner, true).unwrap();
        tree.set_enabled(left, false).unwrap();
        assert_eq!(hit_test(&tree, Point::new(6, 3)).map(|h| h.id), Some(tree.root().unwrap()));
    }

    #[test]
    fn later_sibling_wins_overlap() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Node::container(Panel::new(), Absolute).with_rect(Rect::new(0, 0, 10, 10)));
        let _below = tree.insert_child(root, Node::new(Panel::new()).with_rect(Rect::new(0, 0, 5, 5))).unwrap();
        let above = tree.insert_child(root, Node::new(Panel::new()).with_rect(Rect::new(2, 2, 5, 5))).unwrap();
        assert_eq!(hit_test(&tree, Point::new(3, 3)).map(|h| h.id), Some(above));
    }

    #[test]
    fn empty_tree_misses() {
        assert_eq!(hit_test(&WidgetTree::new(), Point::ZERO), None);
    }

    #[test]
    fn to_local_uses_absolute_origin() {
        let (tree, _root, _left, _right, inner) = build();
        assert_eq!(to_local(&tree, inner, Point::new(5, 2)), Some(Point::ZERO));
        assert_eq!(to_local(&tree, inner, Point::new(0, 0)), Some(Point::new(-5, -2)));
    }
}
