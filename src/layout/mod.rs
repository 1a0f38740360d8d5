//! Layout engine: per-child layout hints and pluggable placement strategies.
//!
//! A container owns one [`Layout`] strategy. Each pass the tree collects a
//! [`LayoutItem`] per visible child and asks the strategy to place them inside
//! the container's content box. Strategies are pure: the same content box and
//! items always produce the same rects, using integer arithmetic only.
//!
//! Built-in strategies:
//! - [`Flex`]: weighted row/column distribution with cross-axis alignment
//! - [`Stack`]: every child fills the content box
//! - [`Grid`]: fixed column count, equal cells
//! - [`Absolute`]: children keep the rects they were given

pub mod absolute;
pub mod flex;
pub mod grid;
pub mod stack;

use std::fmt::Debug;

pub use absolute::Absolute;
pub use flex::Flex;
pub use grid::Grid;
pub use stack::Stack;

use crate::geometry::{Rect, Size};
use crate::tree::WidgetId;

/// An ordered sequence of `(child, rect)` pairs produced by one layout pass.
///
/// Computed fresh on every pass and never stored.
pub type LayoutResult = Vec<(WidgetId, Rect)>;

// ---------------------------------------------------------------------------
// Axis / Align
// ---------------------------------------------------------------------------

/// The main axis of a [`Flex`] container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    /// Children are placed left to right.
    #[default]
    Horizontal,
    /// Children are placed top to bottom.
    Vertical,
}

impl Axis {
    /// Extent of `size` along this axis.
    #[inline]
    pub const fn main(self, size: Size) -> u32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    /// Extent of `size` across this axis.
    #[inline]
    pub const fn cross(self, size: Size) -> u32 {
        match self {
            Axis::Horizontal => size.height,
            Axis::Vertical => size.width,
        }
    }

    /// Build a rect from main/cross coordinates.
    #[inline]
    pub(crate) const fn rect(self, main_pos: i32, cross_pos: i32, main: u32, cross: u32) -> Rect {
        match self {
            Axis::Horizontal => Rect::new(main_pos, cross_pos, main, cross),
            Axis::Vertical => Rect::new(cross_pos, main_pos, cross, main),
        }
    }

    /// Start coordinate of `rect` along this axis.
    #[inline]
    pub(crate) const fn main_start(self, rect: Rect) -> i32 {
        match self {
            Axis::Horizontal => rect.x,
            Axis::Vertical => rect.y,
        }
    }

    /// Start coordinate of `rect` across this axis.
    #[inline]
    pub(crate) const fn cross_start(self, rect: Rect) -> i32 {
        match self {
            Axis::Horizontal => rect.y,
            Axis::Vertical => rect.x,
        }
    }
}

/// Cross-axis alignment of a child inside its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Align {
    Start,
    Center,
    End,
    /// Fill the whole cross extent.
    #[default]
    Stretch,
}

// ---------------------------------------------------------------------------
// LayoutProps
// ---------------------------------------------------------------------------

/// Layout hints a child carries for its parent container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutProps {
    /// Flex-grow factor. `0` keeps the child at its preferred size; a positive
    /// weight shares the remaining main-axis space proportionally. Negative
    /// and NaN weights are treated as `0`.
    pub weight: f32,
    /// Cross-axis alignment. `None` uses the container default.
    pub align: Option<Align>,
    /// Explicit preferred size. Falls back to the widget's intrinsic size,
    /// then to its current rect.
    pub size: Option<Size>,
    /// Take the child out of flow and place it at exactly this rect
    /// (container-local coordinates), whatever the strategy.
    pub fixed_rect: Option<Rect>,
}

impl LayoutProps {
    /// Props with the given flex weight.
    pub fn weighted(weight: f32) -> Self {
        Self { weight, ..Self::default() }
    }

    /// Props with an explicit preferred size.
    pub fn sized(size: Size) -> Self {
        Self { size: Some(size), ..Self::default() }
    }

    /// Set the weight (builder).
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    /// Set the cross-axis alignment (builder).
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    /// Set the preferred size (builder).
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    /// Pin the child to a fixed rect (builder).
    pub fn with_fixed_rect(mut self, rect: Rect) -> Self {
        self.fixed_rect = Some(rect);
        self
    }

    /// Whether the child participates in remaining-space distribution.
    pub fn is_flexible(&self) -> bool {
        self.weight > 0.0
    }
}

// ---------------------------------------------------------------------------
// LayoutItem / Layout
// ---------------------------------------------------------------------------

/// What a strategy knows about one child during a pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutItem {
    pub props: LayoutProps,
    /// Resolved preferred size (explicit, intrinsic, or current).
    pub preferred: Size,
    /// The child's rect before this pass.
    pub current: Rect,
}

impl LayoutItem {
    /// An item whose preferred size and current rect are both `rect`'s.
    pub fn from_rect(props: LayoutProps, rect: Rect) -> Self {
        Self { props, preferred: rect.size(), current: rect }
    }
}

/// A placement strategy for a container's children.
///
/// `arrange` receives the container's content box (its local rect minus
/// border and padding) and the in-flow children in insertion order, and
/// returns one rect per item, index-aligned with `items`. Implementations
/// must be deterministic: identical inputs produce identical output.
pub trait Layout: Debug {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Place `items` inside `content`.
    fn arrange(&self, content: Rect, items: &[LayoutItem]) -> Vec<Rect>;
}

/// Run `layout` over `items`, honouring [`LayoutProps::fixed_rect`].
///
/// Pinned items are removed from the flow before the strategy runs, so they
/// neither consume space nor gaps. The result is index-aligned with `items`.
pub fn arrange_items(layout: &dyn Layout, content: Rect, items: &[LayoutItem]) -> Vec<Rect> {
    let flow: Vec<LayoutItem> = items
        .iter()
        .filter(|item| item.props.fixed_rect.is_none())
        .copied()
        .collect();
    let mut placed = layout.arrange(content, &flow).into_iter();

    items
        .iter()
        .map(|item| match item.props.fixed_rect {
            Some(rect) => rect,
            None => placed.next().unwrap_or(Rect::EMPTY),
        })
        .collect()
}
