//! Focus chain: tab order of focusable nodes.
//!
//! [`FocusChain`] is a snapshot of the tab order, taken from the tree when
//! focus has to move. It holds no focus state itself; the dispatcher owns the
//! focused relation and asks the chain for the neighbour of the current node.

use crate::tree::{WidgetId, WidgetTree};

/// Ordered list of focusable nodes for tab navigation.
///
/// Order is depth-first from the root. A node qualifies when it is focusable
/// and it and all its ancestors are visible and enabled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusChain {
    nodes: Vec<WidgetId>,
}

impl FocusChain {
    /// Build the chain from the attached part of `tree`.
    pub fn from_tree(tree: &WidgetTree) -> Self {
        let mut nodes = Vec::new();
        let Some(root) = tree.root() else {
            return Self { nodes };
        };

        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            let Some(node) = tree.node(current) else {
                continue;
            };
            // A hidden or disabled container takes its whole subtree out.
            if !node.is_visible() || !node.is_enabled() {
                continue;
            }
            if node.is_focusable() {
                nodes.push(current);
            }
            for &child in tree.children(current).iter().rev() {
                stack.push(child);
            }
        }
        Self { nodes }
    }

    /// Whether `id` may take focus right now.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains(&id)
    }

    /// The node after `current`, wrapping around. With no current node (or
    /// one outside the chain) the first node is returned.
    pub fn next(&self, current: Option<WidgetId>) -> Option<WidgetId> {
        if self.nodes.is_empty() {
            return None;
        }
        let idx = match current.and_then(|c| self.position(c)) {
            Some(idx) => (idx + 1) % self.nodes.len(),
            None => 0,
        };
        self.nodes.get(idx).copied()
    }

    /// The node before `current`, wrapping around. With no current node (or
    /// one outside the chain) the last node is returned.
    pub fn previous(&self, current: Option<WidgetId>) -> Option<WidgetId> {
        if self.nodes.is_empty() {
            return None;
        }
        let idx = match current.and_then(|c| self.position(c)) {
            Some(0) | None => self.nodes.len() - 1,
            Some(idx) => idx - 1,
        };
        self.nodes.get(idx).copied()
    }

    fn position(&self, id: WidgetId) -> Option<usize> {
        self.nodes.iter().position(|&n| n == id)
    }

    /// Focusable nodes in tab order.
    pub fn nodes(&self) -> &[WidgetId] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
