//! Tree operations: insert, attach, detach, remove, layout, invalidation.

use slotmap::{SecondaryMap, SlotMap};
use tracing::{debug, trace};

use super::lifecycle::{LifecycleEvent, LifecycleTracker};
use super::node::{ContainerPart, Node, WidgetId};
use crate::color::{Border, Color};
use crate::error::TreeError;
use crate::event::Event;
use crate::geometry::{Point, Rect, Size, Spacing};
use crate::layout::{arrange_items, Layout, LayoutItem, LayoutProps, LayoutResult};
use crate::render::Renderer;
use crate::widget::{EventCtx, EventResult, Widget};

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[WidgetId] = &[];

/// The widget tree, backed by a slotmap arena.
///
/// All nodes live in a single `SlotMap`. Parent/child relationships are stored
/// in secondary maps so that removal is O(subtree size) and lookup is O(1).
/// A parent exclusively owns its children: removing a node destroys its whole
/// subtree. The parent map is a plain back-reference.
///
/// A node is *attached* when it is the root or its parent chain reaches the
/// root. Only attached nodes are painted, hit-tested, or contribute to the
/// dirty region.
#[derive(Debug)]
pub struct WidgetTree {
    nodes: SlotMap<WidgetId, Node>,
    children: SecondaryMap<WidgetId, Vec<WidgetId>>,
    parent: SecondaryMap<WidgetId, WidgetId>,
    root: Option<WidgetId>,
    dirty_region: Rect,
    lifecycle: LifecycleTracker,
    /// Removed nodes whose widgets may still be owed a final event. Freed by
    /// [`purge_destroyed`](Self::purge_destroyed).
    destroyed: Vec<(WidgetId, Node)>,
    /// When `Some`, every node placed is appended here (top-down).
    laid_out: Option<Vec<WidgetId>>,
}

impl WidgetTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            root: None,
            dirty_region: Rect::EMPTY,
            lifecycle: LifecycleTracker::new(),
            destroyed: Vec::new(),
            laid_out: None,
        }
    }

    // -----------------------------------------------------------------------
    // Structure
    // -----------------------------------------------------------------------

    /// Insert a parentless node.
    ///
    /// If no root has been set yet, this node becomes the (attached) root.
    /// Otherwise it stays detached until added somewhere with
    /// [`add_child`](Self::add_child).
    pub fn insert(&mut self, node: Node) -> WidgetId {
        let id = self.nodes.insert(node);
        self.children.insert(id, Vec::new());
        if self.root.is_none() {
            self.root = Some(id);
            self.lifecycle.on_mount(id);
            self.invalidate(id);
        }
        id
    }

    /// Insert a node as the last child of `parent`.
    pub fn insert_child(&mut self, parent: WidgetId, node: Node) -> Result<WidgetId, TreeError> {
        self.check(parent)?;
        let id = self.nodes.insert(node);
        self.children.insert(id, Vec::new());
        self.link(parent, id);
        Ok(id)
    }

    /// Attach an existing parentless node as the last child of `parent`.
    pub fn add_child(&mut self, parent: WidgetId, child: WidgetId) -> Result<(), TreeError> {
        self.check(parent)?;
        self.check(child)?;
        if self.root == Some(child) {
            return Err(TreeError::RootNotAttachable(child));
        }
        if let Some(existing) = self.parent(child) {
            return Err(TreeError::AlreadyAttached { child, parent: existing });
        }
        if child == parent || self.ancestors(parent).contains(&child) {
            return Err(TreeError::CycleDetected { child, parent });
        }
        self.link(parent, child);
        Ok(())
    }

    /// Detach `id` from its parent. The node and its subtree survive, become
    /// unattached and can be added again later. A parentless node is left
    /// as is.
    pub fn detach(&mut self, id: WidgetId) -> Result<(), TreeError> {
        self.check(id)?;
        let Some(parent) = self.parent(id) else {
            return Ok(());
        };
        // Repaint the area the subtree used to cover.
        self.invalidate(id);
        self.unlink(parent, id);
        self.unmount_subtree(id);
        debug!(?id, ?parent, "detached widget");
        self.relayout(parent);
        Ok(())
    }

    /// Destroy `id` and all its descendants.
    ///
    /// Returns the destroyed ids in depth-first order. Every one of them is
    /// stale afterwards. The widgets themselves are held until
    /// [`purge_destroyed`](Self::purge_destroyed) so a dispatcher draining the
    /// lifecycle log can still send them `PointerLeave`, `FocusLost` or
    /// `CaptureLost`.
    pub fn remove(&mut self, id: WidgetId) -> Result<Vec<WidgetId>, TreeError> {
        self.check(id)?;
        let doomed = self.walk_depth_first(id);
        let former_parent = self.parent(id);

        self.invalidate(id);
        if let Some(parent) = former_parent {
            self.unlink(parent, id);
        }
        if self.root == Some(id) {
            self.root = None;
        }
        for &current in &doomed {
            self.children.remove(current);
            self.parent.remove(current);
            if let Some(node) = self.nodes.remove(current) {
                self.destroyed.push((current, node));
            }
            self.lifecycle.on_destroy(current);
        }
        debug!(?id, count = doomed.len(), "removed subtree");

        if let Some(parent) = former_parent {
            self.relayout(parent);
        }
        Ok(doomed)
    }

    /// Move `id` (with its subtree) to become the last child of `new_parent`.
    pub fn reparent(&mut self, id: WidgetId, new_parent: WidgetId) -> Result<(), TreeError> {
        self.check(id)?;
        self.check(new_parent)?;
        if self.root == Some(id) {
            return Err(TreeError::RootNotAttachable(id));
        }
        if id == new_parent || self.ancestors(new_parent).contains(&id) {
            return Err(TreeError::CycleDetected { child: id, parent: new_parent });
        }
        self.detach(id)?;
        self.add_child(new_parent, id)
    }

    /// Make a parentless node the root. The previous root stays in the arena,
    /// detached.
    pub fn set_root(&mut self, id: WidgetId) -> Result<(), TreeError> {
        self.check(id)?;
        if let Some(parent) = self.parent(id) {
            return Err(TreeError::AlreadyAttached { child: id, parent });
        }
        if let Some(old) = self.root.filter(|&old| old != id) {
            self.invalidate(old);
            self.unmount_subtree(old);
        }
        self.root = Some(id);
        self.mount_subtree(id);
        self.invalidate(id);
        Ok(())
    }

    fn link(&mut self, parent: WidgetId, child: WidgetId) {
        self.parent.insert(child, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(child);
        }
        if self.is_attached(parent) {
            self.mount_subtree(child);
        }
        trace!(?child, ?parent, "attached widget");
        self.relayout(parent);
        self.invalidate(child);
    }

    fn unlink(&mut self, parent: WidgetId, child: WidgetId) {
        self.parent.remove(child);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.retain(|&c| c != child);
        }
    }

    fn mount_subtree(&mut self, id: WidgetId) {
        for node in self.walk_depth_first(id) {
            self.lifecycle.on_mount(node);
        }
    }

    fn unmount_subtree(&mut self, id: WidgetId) {
        for node in self.walk_depth_first(id) {
            self.lifecycle.on_unmount(node);
        }
    }

    fn check(&self, id: WidgetId) -> Result<(), TreeError> {
        if self.nodes.contains_key(id) {
            Ok(())
        } else {
            Err(TreeError::NotFound(id))
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.parent.get(id).copied()
    }

    /// Get the children of a node in insertion order. Returns an empty slice
    /// if the node has no children or does not exist.
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Walk from `id` up its parent chain, collecting ancestor ids.
    ///
    /// The returned vec does **not** include `id` itself; it starts with the
    /// immediate parent.
    pub fn ancestors(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Whether the arena holds a live node with this id.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Whether `id` is reachable from the root.
    pub fn is_attached(&self, id: WidgetId) -> bool {
        self.lifecycle.is_mounted(id)
    }

    /// The current root node, if set.
    pub fn root(&self) -> Option<WidgetId> {
        self.root
    }

    /// Number of live nodes, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: WidgetId) -> Vec<WidgetId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Push children in reverse so the first child is visited first.
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    /// Immutable access to a node.
    pub fn node(&self, id: WidgetId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// First node (in arena order) with the given debug name.
    pub fn find(&self, name: &str) -> Option<WidgetId> {
        self.nodes
            .iter()
            .find(|(_, node)| node.name() == Some(name))
            .map(|(id, _)| id)
    }

    /// Downcast a node's widget to a concrete type.
    pub fn widget<T: Widget>(&self, id: WidgetId) -> Option<&T> {
        self.nodes.get(id)?.widget.as_any().downcast_ref::<T>()
    }

    /// Mutable downcast of a node's widget. Marks the node dirty.
    pub fn widget_mut<T: Widget>(&mut self, id: WidgetId) -> Option<&mut T> {
        if !self.nodes.get(id)?.widget.as_any().is::<T>() {
            return None;
        }
        self.invalidate(id);
        self.nodes.get_mut(id)?.widget.as_any_mut().downcast_mut::<T>()
    }

    /// Parent-local rect of a node.
    pub fn rect(&self, id: WidgetId) -> Option<Rect> {
        self.nodes.get(id).map(|n| n.rect)
    }

    /// Rect of a node in root coordinates, accumulating ancestor origins.
    pub fn absolute_rect(&self, id: WidgetId) -> Option<Rect> {
        let node = self.nodes.get(id)?;
        let origin = self
            .ancestors(id)
            .iter()
            .filter_map(|&a| self.nodes.get(a))
            .fold(Point::ZERO, |acc, n| acc + n.rect.origin());
        Some(node.rect.relative_from(origin))
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Set a node's parent-local rect. On an auto-layout container the
    /// children are laid out again immediately, recursively.
    pub fn set_rect(&mut self, id: WidgetId, rect: Rect) -> Result<(), TreeError> {
        self.check(id)?;
        self.place(id, rect);
        Ok(())
    }

    /// [`set_rect`](Self::set_rect), returning every node placed during the
    /// pass in top-down order, starting with `id`.
    pub fn resize(&mut self, id: WidgetId, rect: Rect) -> Result<Vec<WidgetId>, TreeError> {
        self.laid_out = Some(Vec::new());
        let result = self.set_rect(id, rect);
        let placed = self.laid_out.take().unwrap_or_default();
        result.map(|()| placed)
    }

    pub fn set_visible(&mut self, id: WidgetId, visible: bool) -> Result<(), TreeError> {
        let node = self.nodes.get(id).ok_or(TreeError::NotFound(id))?;
        if node.visible == visible {
            return Ok(());
        }
        self.invalidate(id);
        if let Some(node) = self.nodes.get_mut(id) {
            node.visible = visible;
        }
        if let Some(parent) = self.parent(id) {
            self.relayout(parent);
        }
        self.invalidate(id);
        Ok(())
    }

    pub fn set_enabled(&mut self, id: WidgetId, enabled: bool) -> Result<(), TreeError> {
        self.nodes.get_mut(id).ok_or(TreeError::NotFound(id))?.enabled = enabled;
        self.invalidate(id);
        Ok(())
    }

    pub fn set_focusable(&mut self, id: WidgetId, focusable: bool) -> Result<(), TreeError> {
        self.nodes.get_mut(id).ok_or(TreeError::NotFound(id))?.focusable = focusable;
        Ok(())
    }

    pub fn set_background(&mut self, id: WidgetId, color: Option<Color>) -> Result<(), TreeError> {
        self.nodes.get_mut(id).ok_or(TreeError::NotFound(id))?.background = color;
        self.invalidate(id);
        Ok(())
    }

    /// Set or clear the border. A container re-runs layout, since the border
    /// width narrows its content box.
    pub fn set_border(&mut self, id: WidgetId, border: Option<Border>) -> Result<(), TreeError> {
        self.nodes.get_mut(id).ok_or(TreeError::NotFound(id))?.border = border;
        self.invalidate(id);
        self.relayout(id);
        Ok(())
    }

    /// Replace a node's layout hints and re-run its parent's layout.
    pub fn set_layout_props(&mut self, id: WidgetId, props: LayoutProps) -> Result<(), TreeError> {
        self.nodes.get_mut(id).ok_or(TreeError::NotFound(id))?.props = props;
        if let Some(parent) = self.parent(id) {
            self.relayout(parent);
        }
        Ok(())
    }

    /// Replace the layout strategy. A leaf node becomes an auto-layout
    /// container.
    pub fn set_layout(&mut self, id: WidgetId, layout: impl Layout + 'static) -> Result<(), TreeError> {
        let node = self.nodes.get_mut(id).ok_or(TreeError::NotFound(id))?;
        match node.container.as_mut() {
            Some(container) => container.layout = Box::new(layout),
            None => {
                node.container = Some(ContainerPart {
                    layout: Box::new(layout),
                    padding: Spacing::ZERO,
                    auto_layout: true,
                });
            }
        }
        self.relayout(id);
        Ok(())
    }

    pub fn set_padding(&mut self, id: WidgetId, padding: Spacing) -> Result<(), TreeError> {
        self.container_mut(id)?.padding = padding;
        self.relayout(id);
        Ok(())
    }

    /// Turn automatic re-layout on or off. Turning it on lays out at once.
    pub fn set_auto_layout(&mut self, id: WidgetId, enabled: bool) -> Result<(), TreeError> {
        self.container_mut(id)?.auto_layout = enabled;
        self.relayout(id);
        Ok(())
    }

    fn container_mut(&mut self, id: WidgetId) -> Result<&mut ContainerPart, TreeError> {
        self.nodes
            .get_mut(id)
            .ok_or(TreeError::NotFound(id))?
            .container
            .as_mut()
            .ok_or(TreeError::NotAContainer(id))
    }

    // -----------------------------------------------------------------------
    // Layout
    // -----------------------------------------------------------------------

    /// Compute child rects for a container without applying them.
    ///
    /// Invisible children are left out. The rects are in the container's
    /// local space.
    pub fn compute_layout(&self, id: WidgetId) -> Result<LayoutResult, TreeError> {
        let node = self.nodes.get(id).ok_or(TreeError::NotFound(id))?;
        let container = node.container.as_ref().ok_or(TreeError::NotAContainer(id))?;
        let content = node.content_rect();

        let (ids, items): (Vec<WidgetId>, Vec<LayoutItem>) = self
            .children(id)
            .iter()
            .filter_map(|&child| {
                let n = self.nodes.get(child).filter(|n| n.visible)?;
                Some((child, LayoutItem { props: n.props, preferred: n.preferred_size(), current: n.rect }))
            })
            .unzip();

        let rects = arrange_items(container.layout.as_ref(), content, &items);
        trace!(?id, layout = container.layout.name(), children = ids.len(), "layout pass");
        Ok(ids.into_iter().zip(rects).collect())
    }

    /// Compute and apply a container's layout, recursing into nested
    /// auto-layout containers. Works whether or not auto-layout is on.
    pub fn apply_layout(&mut self, id: WidgetId) -> Result<(), TreeError> {
        for (child, rect) in self.compute_layout(id)? {
            self.place(child, rect);
        }
        Ok(())
    }

    fn place(&mut self, id: WidgetId, rect: Rect) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let auto = node.is_auto_layout();
        if node.rect != rect {
            self.invalidate(id);
            if let Some(node) = self.nodes.get_mut(id) {
                node.rect = rect;
            }
            self.invalidate(id);
        }
        if let Some(placed) = self.laid_out.as_mut() {
            placed.push(id);
        }
        if auto {
            // Only containers reach here, so NotAContainer cannot occur.
            let _ = self.apply_layout(id);
        }
    }

    /// Re-run layout on `id` if it is an auto-layout container.
    fn relayout(&mut self, id: WidgetId) {
        if self.nodes.get(id).is_some_and(Node::is_auto_layout) {
            let _ = self.apply_layout(id);
        }
    }

    /// Ask every widget for its intrinsic size and cache the answer.
    ///
    /// Parents of nodes whose size changed are laid out again, outermost
    /// first. Returns whether anything changed.
    pub fn update_intrinsic_sizes(&mut self, renderer: &dyn Renderer) -> bool {
        let mut changed = Vec::new();
        for (id, node) in self.nodes.iter_mut() {
            let measured = node.widget.measure(renderer);
            if measured != node.intrinsic {
                node.intrinsic = measured;
                changed.push(id);
            }
        }

        let mut parents: Vec<(usize, WidgetId)> = changed
            .iter()
            .filter_map(|&id| self.parent(id))
            .map(|p| (self.ancestors(p).len(), p))
            .collect();
        parents.sort();
        parents.dedup();
        for (_, parent) in parents {
            self.relayout(parent);
        }
        !changed.is_empty()
    }

    // -----------------------------------------------------------------------
    // Invalidation
    // -----------------------------------------------------------------------

    /// Mark a node dirty. If it is attached, its absolute rect joins the
    /// tree-wide dirty region. Never paints.
    pub fn invalidate(&mut self, id: WidgetId) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        node.dirty = true;
        if self.is_attached(id) {
            if let Some(rect) = self.absolute_rect(id) {
                self.invalidate_rect(rect);
            }
        }
    }

    /// Add an absolute rect to the dirty region.
    pub fn invalidate_rect(&mut self, rect: Rect) {
        self.dirty_region = self.dirty_region.merge(rect);
    }

    /// The pending dirty region, without clearing it.
    pub fn dirty_region(&self) -> Rect {
        self.dirty_region
    }

    /// Take and clear the pending dirty region. `None` when nothing changed.
    pub fn take_dirty_region(&mut self) -> Option<Rect> {
        let region = std::mem::replace(&mut self.dirty_region, Rect::EMPTY);
        (!region.is_empty()).then_some(region)
    }

    pub(crate) fn clear_dirty(&mut self, id: WidgetId) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.dirty = false;
        }
    }

    // -----------------------------------------------------------------------
    // Delivery
    // -----------------------------------------------------------------------

    /// Drain lifecycle events recorded since the last call.
    pub fn drain_lifecycle(&mut self) -> Vec<LifecycleEvent> {
        self.lifecycle.drain()
    }

    /// Free the widgets of removed nodes. Returns how many were freed.
    pub fn purge_destroyed(&mut self) -> usize {
        let count = self.destroyed.len();
        self.destroyed.clear();
        count
    }

    /// Size of a live node, or of a removed one still awaiting its purge.
    pub(crate) fn delivery_size(&self, id: WidgetId) -> Option<Size> {
        match self.nodes.get(id) {
            Some(node) => Some(node.rect.size()),
            None => self.destroyed.iter().find(|(d, _)| *d == id).map(|(_, n)| n.rect.size()),
        }
    }

    /// Hand `event` to a node's widget, live or awaiting its purge. A repaint
    /// request invalidates a live node.
    pub(crate) fn deliver(&mut self, id: WidgetId, mut ctx: EventCtx, event: &Event) -> EventResult {
        if let Some(node) = self.nodes.get_mut(id) {
            let result = node.widget.on_event(&mut ctx, event);
            if ctx.repaint_requested() {
                self.invalidate(id);
            }
            return result;
        }
        match self.destroyed.iter_mut().find(|(d, _)| *d == id) {
            Some((_, node)) => node.widget.on_event(&mut ctx, event),
            None => EventResult::Unhandled,
        }
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::layout::{Absolute, Align, Flex, Stack};
    use crate::widgets::{Label, Panel};
    use pretty_assertions::assert_eq;

    /// Build a small test tree:
    /// ```text
    ///       root (row, 100x10)
    ///      /    \
    ///    a        b
    ///   / \
    ///  c   d
    /// ```
    fn build_tree() -> (WidgetTree, WidgetId, WidgetId, WidgetId, WidgetId, WidgetId) {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Node::container(Panel::new(), Flex::row()).with_name("root"));
        let a = tree
            .insert_child(root, Node::container(Panel::new(), Flex::column()).with_weight(1.0))
            .unwrap();
        let b = tree.insert_child(root, Node::new(Panel::new()).with_weight(1.0)).unwrap();
        let c = tree.insert_child(a, Node::new(Panel::new()).with_weight(1.0)).unwrap();
        let d = tree.insert_child(a, Node::new(Panel::new()).with_weight(1.0)).unwrap();
        tree.set_rect(root, Rect::new(0, 0, 100, 10)).unwrap();
        (tree, root, a, b, c, d)
    }

    // ── Structure ────────────────────────────────────────────────────

    #[test]
    fn insert_sets_root() {
        let mut tree = WidgetTree::new();
        let first = tree.insert(Node::new(Panel::new()));
        let second = tree.insert(Node::new(Panel::new()));
        assert_eq!(tree.root(), Some(first));
        assert!(tree.is_attached(first));
        assert!(!tree.is_attached(second));
    }

    #[test]
    fn parent_children_ancestors() {
        let (tree, root, a, b, c, d) = build_tree();
        assert_eq!(tree.parent(c), Some(a));
        assert_eq!(tree.parent(root), None);
        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.children(a), &[c, d]);
        assert_eq!(tree.ancestors(c), vec![a, root]);
        assert_eq!(tree.walk_depth_first(root), vec![root, a, c, d, b]);
        assert_eq!(tree.find("root"), Some(root));
    }

    #[test]
    fn add_child_errors() {
        let (mut tree, root, a, b, c, _d) = build_tree();
        assert_eq!(tree.add_child(a, c), Err(TreeError::AlreadyAttached { child: c, parent: a }));
        assert_eq!(tree.add_child(c, root), Err(TreeError::RootNotAttachable(root)));

        tree.detach(a).unwrap();
        assert_eq!(tree.add_child(c, a), Err(TreeError::CycleDetected { child: a, parent: c }));
        assert_eq!(tree.add_child(a, a), Err(TreeError::CycleDetected { child: a, parent: a }));

        let gone = tree.insert(Node::new(Panel::new()));
        tree.remove(gone).unwrap();
        assert_eq!(tree.add_child(b, gone), Err(TreeError::NotFound(gone)));
    }

    #[test]
    fn detach_keeps_node_and_relayouts_parent() {
        let (mut tree, root, a, b, c, _d) = build_tree();
        assert_eq!(tree.rect(b), Some(Rect::new(50, 0, 50, 10)));

        tree.detach(a).unwrap();
        assert!(tree.contains(a));
        assert!(!tree.is_attached(a));
        assert!(!tree.is_attached(c));
        assert_eq!(tree.children(root), &[b]);
        assert_eq!(tree.rect(b), Some(Rect::new(0, 0, 100, 10)));

        tree.add_child(root, a).unwrap();
        assert!(tree.is_attached(c));
        assert_eq!(tree.children(root), &[b, a]);
    }

    #[test]
    fn remove_destroys_subtree() {
        let (mut tree, root, a, b, c, d) = build_tree();
        let removed = tree.remove(a).unwrap();
        assert_eq!(removed, vec![a, c, d]);
        assert!(!tree.contains(c));
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.children(root), &[b]);
        assert_eq!(tree.node(c).map(|n| n.rect()), None);
        assert_eq!(tree.purge_destroyed(), 3);
        assert_eq!(tree.purge_destroyed(), 0);
    }

    #[test]
    fn stale_id_never_aliases() {
        let (mut tree, root, a, ..) = build_tree();
        tree.remove(a).unwrap();
        let fresh = tree.insert_child(root, Node::new(Panel::new())).unwrap();
        assert_ne!(fresh, a);
        assert!(!tree.contains(a));
        assert_eq!(tree.set_rect(a, Rect::EMPTY), Err(TreeError::NotFound(a)));
    }

    #[test]
    fn remove_root_clears_root() {
        let (mut tree, root, ..) = build_tree();
        tree.remove(root).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
    }

    #[test]
    fn reparent_moves_subtree() {
        let (mut tree, root, a, b, c, _d) = build_tree();
        tree.set_layout(b, Stack).unwrap();
        tree.reparent(c, b).unwrap();
        assert_eq!(tree.ancestors(c), vec![b, root]);
        assert!(tree.is_attached(c));
        assert_eq!(tree.rect(c), Some(Rect::new(0, 0, 50, 10)));
        assert_eq!(tree.reparent(a, c), Ok(()));
        assert_eq!(tree.reparent(b, a), Err(TreeError::CycleDetected { child: b, parent: a }));
    }

    #[test]
    fn set_root_swaps_attachment() {
        let mut tree = WidgetTree::new();
        let old = tree.insert(Node::new(Panel::new()));
        let new = tree.insert(Node::new(Panel::new()));
        tree.set_root(new).unwrap();
        assert_eq!(tree.root(), Some(new));
        assert!(tree.is_attached(new));
        assert!(!tree.is_attached(old));
    }

    #[test]
    fn lifecycle_records_attach_detach_destroy() {
        let (mut tree, _root, a, _b, c, d) = build_tree();
        tree.drain_lifecycle();
        tree.detach(a).unwrap();
        assert_eq!(
            tree.drain_lifecycle(),
            vec![LifecycleEvent::Unmount(a), LifecycleEvent::Unmount(c), LifecycleEvent::Unmount(d)]
        );
        tree.remove(c).unwrap();
        assert_eq!(tree.drain_lifecycle(), vec![LifecycleEvent::Destroy(c)]);
    }

    // ── Layout ───────────────────────────────────────────────────────

    #[test]
    fn set_rect_lays_out_recursively() {
        let (tree, _root, a, b, c, d) = build_tree();
        assert_eq!(tree.rect(a), Some(Rect::new(0, 0, 50, 10)));
        assert_eq!(tree.rect(b), Some(Rect::new(50, 0, 50, 10)));
        assert_eq!(tree.rect(c), Some(Rect::new(0, 0, 50, 5)));
        assert_eq!(tree.rect(d), Some(Rect::new(0, 5, 50, 5)));
        assert_eq!(tree.absolute_rect(d), Some(Rect::new(0, 5, 50, 5)));
    }

    #[test]
    fn resize_reports_top_down_order() {
        let (mut tree, root, a, b, c, d) = build_tree();
        let placed = tree.resize(root, Rect::new(0, 0, 40, 8)).unwrap();
        assert_eq!(placed, vec![root, a, c, d, b]);
        assert_eq!(tree.rect(d), Some(Rect::new(0, 4, 20, 4)));
    }

    #[test]
    fn invisible_children_are_skipped() {
        let (mut tree, _root, a, b, ..) = build_tree();
        tree.set_visible(a, false).unwrap();
        assert_eq!(tree.rect(b), Some(Rect::new(0, 0, 100, 10)));
        assert_eq!(tree.rect(a), Some(Rect::new(0, 0, 50, 10)));
    }

    #[test]
    fn layout_props_change_relayouts_parent() {
        let (mut tree, _root, a, b, ..) = build_tree();
        tree.set_layout_props(a, LayoutProps::weighted(3.0)).unwrap();
        assert_eq!(tree.rect(a), Some(Rect::new(0, 0, 75, 10)));
        assert_eq!(tree.rect(b), Some(Rect::new(75, 0, 25, 10)));
    }

    #[test]
    fn padding_and_border_shrink_content() {
        let (mut tree, root, a, ..) = build_tree();
        tree.set_padding(root, Spacing::symmetric(1, 2)).unwrap();
        assert_eq!(tree.rect(a), Some(Rect::new(2, 1, 48, 8)));
        tree.set_border(root, Some(Border::new(Color::WHITE, 1))).unwrap();
        assert_eq!(tree.rect(a), Some(Rect::new(3, 2, 47, 6)));
    }

    #[test]
    fn auto_layout_off_defers_until_apply() {
        let (mut tree, root, a, ..) = build_tree();
        tree.set_auto_layout(root, false).unwrap();
        tree.set_rect(root, Rect::new(0, 0, 60, 10)).unwrap();
        assert_eq!(tree.rect(a), Some(Rect::new(0, 0, 50, 10)));
        tree.apply_layout(root).unwrap();
        assert_eq!(tree.rect(a), Some(Rect::new(0, 0, 30, 10)));
    }

    #[test]
    fn compute_layout_is_pure() {
        let (tree, root, a, b, ..) = build_tree();
        let result = tree.compute_layout(root).unwrap();
        assert_eq!(result, vec![(a, Rect::new(0, 0, 50, 10)), (b, Rect::new(50, 0, 50, 10))]);
        assert_eq!(tree.compute_layout(root).unwrap(), result);
    }

    #[test]
    fn leaf_is_not_a_container() {
        let (mut tree, _root, _a, b, ..) = build_tree();
        assert_eq!(tree.compute_layout(b), Err(TreeError::NotAContainer(b)));
        assert_eq!(tree.set_padding(b, Spacing::all(1)), Err(TreeError::NotAContainer(b)));
    }

    #[test]
    fn absolute_container_keeps_rects() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Node::container(Panel::new(), Absolute));
        let child = tree
            .insert_child(root, Node::new(Panel::new()).with_rect(Rect::new(7, 3, 4, 4)))
            .unwrap();
        tree.set_rect(root, Rect::new(0, 0, 50, 50)).unwrap();
        assert_eq!(tree.rect(child), Some(Rect::new(7, 3, 4, 4)));
    }

    #[test]
    fn intrinsic_sizes_feed_layout() {
        use crate::testing::GridRenderer;

        let mut tree = WidgetTree::new();
        let root = tree.insert(Node::container(Panel::new(), Flex::row().with_align(Align::Start)));
        let label = tree.insert_child(root, Node::new(Label::new("hello"))).unwrap();
        let fill = tree
            .insert_child(root, Node::new(Panel::new()).with_weight(1.0).with_align(Align::Stretch))
            .unwrap();
        tree.set_rect(root, Rect::new(0, 0, 20, 3)).unwrap();

        assert!(tree.update_intrinsic_sizes(&GridRenderer::new(20, 3)));
        assert_eq!(tree.node(label).and_then(Node::intrinsic_size), Some(Size::new(5, 1)));
        assert_eq!(tree.rect(label), Some(Rect::new(0, 0, 5, 1)));
        assert_eq!(tree.rect(fill), Some(Rect::new(5, 0, 15, 3)));
        assert!(!tree.update_intrinsic_sizes(&GridRenderer::new(20, 3)));
    }

    // ── Invalidation ─────────────────────────────────────────────────

    #[test]
    fn invalidate_merges_absolute_rects() {
        let (mut tree, _root, _a, b, c, _d) = build_tree();
        tree.take_dirty_region();
        tree.invalidate(c);
        tree.invalidate(b);
        assert_eq!(tree.take_dirty_region(), Some(Rect::new(0, 0, 100, 10)));
        assert_eq!(tree.take_dirty_region(), None);
        assert!(tree.node(c).is_some_and(Node::is_dirty));
    }

    #[test]
    fn detached_invalidate_does_not_touch_region() {
        let (mut tree, _root, a, _b, c, _d) = build_tree();
        tree.detach(a).unwrap();
        tree.take_dirty_region();
        tree.invalidate(c);
        assert_eq!(tree.take_dirty_region(), None);
    }

    #[test]
    fn widget_downcast_and_mut_invalidates() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Node::new(Label::new("a")).with_rect(Rect::new(0, 0, 3, 1)));
        tree.take_dirty_region();
        assert!(tree.widget::<Panel>(root).is_none());
        if let Some(label) = tree.widget_mut::<Label>(root) {
            label.set_text("b");
        }
        assert_eq!(tree.widget::<Label>(root).map(Label::text), Some("b"));
        assert_eq!(tree.take_dirty_region(), Some(Rect::new(0, 0, 3, 1)));
    }
}
