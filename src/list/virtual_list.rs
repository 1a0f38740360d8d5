//! Virtualized list: a recycling pool of views over an [`Adapter`].
//!
//! Only the rows inside the viewport exist as attached nodes. Scrolling
//! rebinds pooled views to new indices instead of building and tearing down
//! widgets, so the tree work per [`VirtualList::sync`] is proportional to
//! the number of visible rows, not to the item count.

use std::ops::Range;

use tracing::{debug, trace};

use super::scroll::ScrollState;
use crate::error::TreeError;
use crate::geometry::{Rect, Size};
use crate::tree::{Node, WidgetId, WidgetTree};
use crate::window::Window;

// ---------------------------------------------------------------------------
// Adapter
// ---------------------------------------------------------------------------

/// Supplies the rows of a [`VirtualList`].
pub trait Adapter {
    /// Number of items.
    fn count(&self) -> usize;

    /// Build a fresh view for `index`. Called only when no pooled view can
    /// be reused.
    fn create_view(&mut self, index: usize) -> Node;

    /// Bind an existing view to `index`. Called on every sync for every
    /// visible row, whether the view is new, rebound or unchanged.
    fn update_view(&mut self, index: usize, tree: &mut WidgetTree, view: WidgetId);
}

// ---------------------------------------------------------------------------
// VirtualList
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct PooledView {
    id: WidgetId,
    index: Option<usize>,
}

/// A vertical list of fixed-height rows backed by a view pool.
///
/// The list is not itself a widget. It drives a container node owned by a
/// [`Window`]: call [`sync`](Self::sync) after scrolling, resizing or
/// changing the adapter's data.
#[derive(Debug)]
pub struct VirtualList<A: Adapter> {
    adapter: A,
    extent: u32,
    scroll: ScrollState,
    pool: Vec<PooledView>,
    created: usize,
}

impl<A: Adapter> VirtualList<A> {
    /// A list whose rows are each `extent` units tall (at least one).
    pub fn new(adapter: A, extent: u32) -> Self {
        Self {
            adapter,
            extent: extent.max(1),
            scroll: ScrollState::default(),
            pool: Vec::new(),
            created: 0,
        }
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Mutable access to the adapter. Call [`sync`](Self::sync) afterwards if
    /// the data changed.
    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    pub fn extent(&self) -> u32 {
        self.extent
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    /// Scroll by `dy` units, clamped against the sizes seen by the last sync.
    /// Takes effect on the next sync.
    pub fn scroll_by(&mut self, dy: i32) {
        self.scroll.scroll_by(0, dy);
    }

    /// Scroll to offset `y`. Takes effect on the next sync.
    pub fn scroll_to(&mut self, y: i32) {
        self.scroll.scroll_to(0, y);
    }

    /// Scroll just enough to show row `index`.
    pub fn scroll_to_index(&mut self, index: usize) {
        let top = i64::from(self.extent) * index as i64;
        self.scroll.reveal_y(top.min(i64::from(i32::MAX)) as i32, self.extent);
    }

    /// How many views the pool has ever created.
    pub fn created_views(&self) -> usize {
        self.created
    }

    /// The view currently bound to `index`, if the row is visible.
    pub fn view_for(&self, index: usize) -> Option<WidgetId> {
        self.pool.iter().find(|v| v.index == Some(index)).map(|v| v.id)
    }

    /// `(index, view)` for every bound row, in index order.
    pub fn bound_views(&self) -> Vec<(usize, WidgetId)> {
        let mut bound: Vec<_> = self.pool.iter().filter_map(|v| v.index.map(|i| (i, v.id))).collect();
        bound.sort_by_key(|&(i, _)| i);
        bound
    }

    /// Indices that intersect the viewport at the current offset.
    pub fn visible_range(&self) -> Range<usize> {
        let count = self.adapter.count();
        let extent = u64::from(self.extent);
        let top = self.scroll.offset.y.max(0) as u64;
        let bottom = top + u64::from(self.scroll.viewport_size.height);
        let first = (top / extent) as usize;
        let end = bottom.div_ceil(extent) as usize;
        first.min(count)..end.min(count)
    }

    /// Bring the views under `container` in line with the viewport.
    ///
    /// Every pooled view starts unbound. Each visible index then claims the
    /// view already bound to it, else any free view, else a newly created
    /// one, created directly under `container`; the adapter updates it and it
    /// is attached and placed. Views left
    /// unbound are detached through the window so hover, capture and focus
    /// are released first.
    pub fn sync(&mut self, window: &mut Window, container: WidgetId) -> Result<(), TreeError> {
        let viewport = window.tree.rect(container).ok_or(TreeError::NotFound(container))?.size();
        self.pool.retain(|v| window.tree.contains(v.id));

        let content = u64::from(self.extent) * self.adapter.count() as u64;
        let content = u32::try_from(content).unwrap_or(u32::MAX);
        self.scroll.set_viewport_size(viewport);
        self.scroll.set_content_size(Size::new(viewport.width, content));

        let range = self.visible_range();
        let previous: Vec<Option<usize>> = self.pool.iter().map(|v| v.index).collect();
        for view in &mut self.pool {
            view.index = None;
        }

        // Same index first, so unchanged rows keep their view.
        let mut pending = Vec::new();
        for index in range.clone() {
            match previous.iter().position(|&p| p == Some(index)) {
                Some(slot) => self.pool[slot].index = Some(index),
                None => pending.push(index),
            }
        }
        for index in pending {
            match self.pool.iter().position(|v| v.index.is_none()) {
                Some(slot) => self.pool[slot].index = Some(index),
                None => {
                    let id = window.tree.insert_child(container, self.adapter.create_view(index))?;
                    self.pool.push(PooledView { id, index: Some(index) });
                    self.created += 1;
                    trace!(index, ?id, "list view created");
                }
            }
        }

        let offset = self.scroll.offset.y;
        for view in self.pool.clone() {
            match view.index {
                Some(index) => {
                    self.adapter.update_view(index, &mut window.tree, view.id);
                    let parent = window.tree.parent(view.id);
                    if parent != Some(container) {
                        if parent.is_some() {
                            window.detach(view.id)?;
                        }
                        window.tree.add_child(container, view.id)?;
                    }
                    let top = i64::from(self.extent) * index as i64 - i64::from(offset);
                    let rect = Rect::new(0, top_to_i32(top), viewport.width, self.extent);
                    place(&mut window.tree, view.id, rect)?;
                }
                None if window.tree.parent(view.id).is_some() => window.detach(view.id)?,
                None => {}
            }
        }

        debug!(?range, pool = self.pool.len(), created = self.created, "list synced");
        Ok(())
    }
}

fn top_to_i32(top: i64) -> i32 {
    top.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Pin `id` at `rect` in its parent, whatever layout the parent uses.
fn place(tree: &mut WidgetTree, id: WidgetId, rect: Rect) -> Result<(), TreeError> {
    let mut props = *tree.node(id).ok_or(TreeError::NotFound(id))?.layout_props();
    if props.fixed_rect == Some(rect) {
        return Ok(());
    }
    props.fixed_rect = Some(rect);
    tree.set_layout_props(id, props)?;
    tree.set_rect(id, rect)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Absolute;
    use crate::widgets::{Label, Panel};
    use crate::window::WindowConfig;
    use pretty_assertions::assert_eq;

    #[derive(Debug)]
    struct Rows {
        items: Vec<String>,
        updates: usize,
    }

    impl Rows {
        fn new(n: usize) -> Self {
            Self { items: (0..n).map(|i| format!("row {i}")).collect(), updates: 0 }
        }
    }

    impl Adapter for Rows {
        fn count(&self) -> usize {
            self.items.len()
        }

        fn create_view(&mut self, _index: usize) -> Node {
            Node::new(Label::new(""))
        }

        fn update_view(&mut self, index: usize, tree: &mut WidgetTree, view: WidgetId) {
            self.updates += 1;
            if let Some(label) = tree.widget_mut::<Label>(view) {
                label.set_text(self.items[index].clone());
            }
        }
    }

    /// A 20x10 window whose root hosts an absolute container filling it.
    fn setup() -> (Window, WidgetId) {
        let mut window = Window::new(WindowConfig::default().with_size(Size::new(20, 10)));
        let root = window.root();
        window.tree.set_layout(root, Absolute).unwrap();
        let container = window
            .tree
            .insert_child(root, Node::container(Panel::new(), Absolute).with_rect(Rect::new(0, 0, 20, 10)))
            .unwrap();
        (window, container)
    }

    fn text(window: &Window, id: WidgetId) -> String {
        window.tree.widget::<Label>(id).map(|l| l.text().to_string()).unwrap_or_default()
    }

    #[test]
    fn binds_only_visible_rows() {
        let (mut window, container) = setup();
        let mut list = VirtualList::new(Rows::new(1000), 3);
        list.sync(&mut window, container).unwrap();

        assert_eq!(list.visible_range(), 0..4);
        assert_eq!(list.created_views(), 4);
        assert_eq!(window.tree.children(container).len(), 4);
        let third = list.view_for(2).unwrap();
        assert_eq!(text(&window, third), "row 2");
        assert_eq!(window.tree.rect(third), Some(Rect::new(0, 6, 20, 3)));
    }

    #[test]
    fn pool_never_exceeds_visible_plus_one() {
        let (mut window, container) = setup();
        let mut list = VirtualList::new(Rows::new(500), 3);
        let visible = 10_usize.div_ceil(3);

        for step in [1, 2, 5, 7, 1, 13, 40, -60, 3, 300, -1] {
            list.scroll_by(step);
            list.sync(&mut window, container).unwrap();
            assert!(list.created_views() <= visible + 1);
            assert!(window.tree.children(container).len() <= visible + 1);
        }
    }

    #[test]
    fn scrolling_rebinds_and_repositions() {
        let (mut window, container) = setup();
        let mut list = VirtualList::new(Rows::new(100), 2);
        list.sync(&mut window, container).unwrap();
        let kept = list.view_for(3).unwrap();

        list.scroll_by(4);
        list.sync(&mut window, container).unwrap();

        assert_eq!(list.visible_range(), 2..7);
        assert_eq!(list.view_for(3), Some(kept));
        assert_eq!(window.tree.rect(kept), Some(Rect::new(0, 2, 20, 2)));
        let last = list.view_for(6).unwrap();
        assert_eq!(text(&window, last), "row 6");
    }

    #[test]
    fn short_list_detaches_leftovers() {
        let (mut window, container) = setup();
        let mut list = VirtualList::new(Rows::new(10), 1);
        list.sync(&mut window, container).unwrap();
        assert_eq!(window.tree.children(container).len(), 10);

        list.adapter_mut().items.truncate(3);
        list.sync(&mut window, container).unwrap();
        assert_eq!(list.bound_views().len(), 3);
        assert_eq!(window.tree.children(container).len(), 3);
        assert_eq!(list.created_views(), 10);
    }

    #[test]
    fn scroll_to_index_reveals_row() {
        let (mut window, container) = setup();
        let mut list = VirtualList::new(Rows::new(100), 2);
        list.sync(&mut window, container).unwrap();
        list.scroll_to_index(20);
        list.sync(&mut window, container).unwrap();
        assert_eq!(list.scroll().offset.y, 32);
        assert!(list.view_for(20).is_some());
    }

    #[test]
    fn empty_adapter_binds_nothing() {
        let (mut window, container) = setup();
        let mut list = VirtualList::new(Rows::new(0), 2);
        list.sync(&mut window, container).unwrap();
        assert_eq!(list.visible_range(), 0..0);
        assert_eq!(list.created_views(), 0);
    }

    #[test]
    fn missing_container_is_an_error() {
        let (mut window, container) = setup();
        window.remove(container).unwrap();
        let mut list = VirtualList::new(Rows::new(3), 1);
        assert_eq!(list.sync(&mut window, container), Err(TreeError::NotFound(container)));
    }

    #[test]
    fn new_views_are_created_under_the_container() {
        let (mut window, container) = setup();
        let root = window.root();
        window.detach(container).unwrap();
        window.remove(root).unwrap();
        assert_eq!(window.tree.root(), None);

        let mut list = VirtualList::new(Rows::new(3), 1);
        list.sync(&mut window, container).unwrap();

        assert_eq!(list.created_views(), 3);
        assert_eq!(window.tree.root(), None);
        for (_, view) in list.bound_views() {
            assert_eq!(window.tree.parent(view), Some(container));
        }
        assert_eq!(window.tree.children(container).len(), 3);
    }
}
