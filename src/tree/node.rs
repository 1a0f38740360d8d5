//! Node types: WidgetId, Node, ContainerPart.

use std::fmt;

use slotmap::new_key_type;

use crate::color::{Border, Color};
use crate::geometry::{Rect, Size, Spacing};
use crate::layout::{Align, Layout, LayoutProps};
use crate::widget::Widget;

new_key_type! {
    /// Unique, generation-checked identifier for a widget node. Copy,
    /// lightweight (u64). A stale id never aliases a live node.
    pub struct WidgetId;
}

/// The container half of a node: a layout strategy plus its inner spacing.
pub struct ContainerPart {
    pub(crate) layout: Box<dyn Layout>,
    pub(crate) padding: Spacing,
    pub(crate) auto_layout: bool,
}

impl fmt::Debug for ContainerPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerPart")
            .field("layout", &self.layout.name())
            .field("padding", &self.padding)
            .field("auto_layout", &self.auto_layout)
            .finish()
    }
}

/// A single entry in the [`WidgetTree`](super::WidgetTree).
///
/// Built with the `with_*` methods before insertion. Once the node is in a
/// tree, mutation goes through the tree so that invalidation and re-layout
/// happen; the getters here stay available through
/// [`WidgetTree::node`](super::WidgetTree::node).
#[derive(Debug)]
pub struct Node {
    pub(crate) widget: Box<dyn Widget>,
    pub(crate) name: Option<String>,
    /// Bounds in the parent's coordinate space.
    pub(crate) rect: Rect,
    pub(crate) visible: bool,
    pub(crate) enabled: bool,
    pub(crate) focusable: bool,
    pub(crate) background: Option<Color>,
    pub(crate) border: Option<Border>,
    pub(crate) props: LayoutProps,
    pub(crate) container: Option<ContainerPart>,
    /// Cached result of `Widget::measure`.
    pub(crate) intrinsic: Option<Size>,
    pub(crate) dirty: bool,
}

impl Node {
    /// A leaf node wrapping `widget`. Focusability defaults to
    /// `widget.can_focus()`.
    pub fn new(widget: impl Widget) -> Self {
        let focusable = widget.can_focus();
        Self {
            widget: Box::new(widget),
            name: None,
            rect: Rect::EMPTY,
            visible: true,
            enabled: true,
            focusable,
            background: None,
            border: None,
            props: LayoutProps::default(),
            container: None,
            intrinsic: None,
            dirty: true,
        }
    }

    /// A container node: `widget` plus a layout strategy, auto-layout on.
    pub fn container(widget: impl Widget, layout: impl Layout + 'static) -> Self {
        Self::new(widget).with_layout(layout)
    }

    // -- builders ------------------------------------------------------------

    /// Set a debug name (builder).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the initial parent-local rect (builder).
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    /// Set the background fill (builder).
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Set the border stroke (builder).
    pub fn with_border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    /// Replace all layout hints (builder).
    pub fn with_props(mut self, props: LayoutProps) -> Self {
        self.props = props;
        self
    }

    /// Set the flex weight (builder).
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.props.weight = weight;
        self
    }

    /// Set the cross-axis alignment (builder).
    pub fn with_align(mut self, align: Align) -> Self {
        self.props.align = Some(align);
        self
    }

    /// Set an explicit preferred size (builder).
    pub fn with_size(mut self, size: Size) -> Self {
        self.props.size = Some(size);
        self
    }

    /// Pin the node to a fixed parent-local rect, out of layout flow (builder).
    pub fn with_fixed_rect(mut self, rect: Rect) -> Self {
        self.props.fixed_rect = Some(rect);
        self
    }

    /// Turn the node into a container using `layout` (builder). Padding is
    /// kept if the node already was one.
    pub fn with_layout(mut self, layout: impl Layout + 'static) -> Self {
        let padding = self.container.as_ref().map_or(Spacing::ZERO, |c| c.padding);
        self.container = Some(ContainerPart {
            layout: Box::new(layout),
            padding,
            auto_layout: true,
        });
        self
    }

    /// Set the container padding (builder). No-op on leaf nodes.
    pub fn with_padding(mut self, padding: Spacing) -> Self {
        if let Some(container) = self.container.as_mut() {
            container.padding = padding;
        }
        self
    }

    /// Enable or disable automatic re-layout (builder). No-op on leaf nodes.
    pub fn auto_layout(mut self, enabled: bool) -> Self {
        if let Some(container) = self.container.as_mut() {
            container.auto_layout = enabled;
        }
        self
    }

    /// Set visibility (builder).
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Set enabled state (builder).
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Override focusability (builder).
    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    // -- accessors -----------------------------------------------------------

    pub fn widget(&self) -> &dyn Widget {
        self.widget.as_ref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Parent-local bounds.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_focusable(&self) -> bool {
        self.focusable
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn border(&self) -> Option<Border> {
        self.border
    }

    pub fn layout_props(&self) -> &LayoutProps {
        &self.props
    }

    pub fn is_container(&self) -> bool {
        self.container.is_some()
    }

    /// The layout strategy, for container nodes.
    pub fn layout(&self) -> Option<&dyn Layout> {
        self.container.as_ref().map(|c| c.layout.as_ref())
    }

    pub fn padding(&self) -> Spacing {
        self.container.as_ref().map_or(Spacing::ZERO, |c| c.padding)
    }

    /// Whether this is a container that re-runs layout on its own.
    pub fn is_auto_layout(&self) -> bool {
        self.container.as_ref().is_some_and(|c| c.auto_layout)
    }

    pub fn intrinsic_size(&self) -> Option<Size> {
        self.intrinsic
    }

    /// Whether the node changed since it was last painted.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Width of the border stroke, `0` without a border.
    pub fn border_width(&self) -> u32 {
        self.border.map_or(0, |b| b.width)
    }

    /// Size the parent layout should start from: the explicit size, else the
    /// measured intrinsic size, else the current rect size.
    pub fn preferred_size(&self) -> Size {
        self.props
            .size
            .or(self.intrinsic)
            .unwrap_or_else(|| self.rect.size())
    }

    /// Area available to children, in this node's local space: the local
    /// rect inset by the border width, then shrunk by padding.
    pub fn content_rect(&self) -> Rect {
        self.rect
            .size()
            .to_rect()
            .inset(self.border_width())
            .shrink(self.padding())
    }
}
