//! Scroll state and scrollbar geometry.
//!
//! `ScrollState` tracks the scroll position of a viewport over larger
//! content, handling clamping and scroll percentages. `ScrollbarState`
//! provides the data needed to draw a scrollbar thumb.

use crate::geometry::{Point, Rect, Size};

// ---------------------------------------------------------------------------
// ScrollState
// ---------------------------------------------------------------------------

/// Tracks the scroll position of a viewport.
///
/// The offset is always clamped to `[0, max_scroll]` on each axis, where
/// `max_scroll = content_size - viewport_size` (saturating at zero).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollState {
    /// Current scroll offset (both components `>= 0`).
    pub offset: Point,
    pub content_size: Size,
    pub viewport_size: Size,
}

impl ScrollState {
    /// A scroll state at the origin.
    pub fn new(content_size: Size, viewport_size: Size) -> Self {
        Self {
            offset: Point::ZERO,
            content_size,
            viewport_size,
        }
    }

    /// The largest valid offset on each axis.
    pub fn max_scroll(&self) -> Point {
        let x = self.content_size.width.saturating_sub(self.viewport_size.width);
        let y = self.content_size.height.saturating_sub(self.viewport_size.height);
        Point::new(to_i32(x), to_i32(y))
    }

    /// Scroll to an absolute position, clamped.
    pub fn scroll_to(&mut self, x: i32, y: i32) {
        let max = self.max_scroll();
        self.offset = Point::new(x.clamp(0, max.x), y.clamp(0, max.y));
    }

    /// Scroll by a relative delta, clamped.
    pub fn scroll_by(&mut self, dx: i32, dy: i32) {
        self.scroll_to(self.offset.x.saturating_add(dx), self.offset.y.saturating_add(dy));
    }

    pub fn is_scrollable_x(&self) -> bool {
        self.content_size.width > self.viewport_size.width
    }

    pub fn is_scrollable_y(&self) -> bool {
        self.content_size.height > self.viewport_size.height
    }

    /// The part of the content currently inside the viewport, in content
    /// coordinates.
    pub fn visible_rect(&self) -> Rect {
        Rect::from_origin_size(self.offset, self.viewport_size)
    }

    /// Horizontal progress in `[0.0, 1.0]`; `0.0` when not scrollable.
    pub fn scroll_percent_x(&self) -> f32 {
        percent(self.offset.x, self.max_scroll().x)
    }

    /// Vertical progress in `[0.0, 1.0]`; `0.0` when not scrollable.
    pub fn scroll_percent_y(&self) -> f32 {
        percent(self.offset.y, self.max_scroll().y)
    }

    /// Update the content size and re-clamp the offset.
    pub fn set_content_size(&mut self, size: Size) {
        self.content_size = size;
        self.scroll_to(self.offset.x, self.offset.y);
    }

    /// Update the viewport size and re-clamp the offset.
    pub fn set_viewport_size(&mut self, size: Size) {
        self.viewport_size = size;
        self.scroll_to(self.offset.x, self.offset.y);
    }

    /// Scroll vertically by the least amount that brings `[top, top + height)`
    /// into view.
    pub fn reveal_y(&mut self, top: i32, height: u32) {
        let bottom = top.saturating_add(to_i32(height));
        let view_bottom = self.offset.y.saturating_add(to_i32(self.viewport_size.height));
        if top < self.offset.y {
            self.scroll_to(self.offset.x, top);
        } else if bottom > view_bottom {
            let y = bottom - to_i32(self.viewport_size.height);
            self.scroll_to(self.offset.x, y);
        }
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new(Size::ZERO, Size::ZERO)
    }
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn percent(offset: i32, max: i32) -> f32 {
    if max <= 0 {
        0.0
    } else {
        offset as f32 / max as f32
    }
}

// ---------------------------------------------------------------------------
// ScrollbarState
// ---------------------------------------------------------------------------

/// Data needed to draw a scrollbar thumb.
///
/// Both fields are fractions of the track in `[0.0, 1.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollbarState {
    /// Thumb position (0.0 = top/left, 1.0 = bottom/right).
    pub thumb_position: f32,
    /// Thumb length relative to the track (viewport / content).
    pub thumb_size: f32,
}

impl ScrollbarState {
    /// Scrollbar for the vertical axis when `vertical`, else the horizontal.
    pub fn from_scroll_state(state: &ScrollState, vertical: bool) -> Self {
        let (content, viewport, position) = if vertical {
            (state.content_size.height, state.viewport_size.height, state.scroll_percent_y())
        } else {
            (state.content_size.width, state.viewport_size.width, state.scroll_percent_x())
        };

        if content == 0 || viewport == 0 {
            return ScrollbarState { thumb_position: 0.0, thumb_size: 1.0 };
        }

        ScrollbarState {
            thumb_position: position.clamp(0.0, 1.0),
            thumb_size: (viewport as f32 / content as f32).clamp(0.0, 1.0),
        }
    }

    /// Thumb extent along a track of `length` units: `(start, size)`, with
    /// the size at least one unit.
    pub fn thumb_span(&self, length: u32) -> (u32, u32) {
        if length == 0 {
            return (0, 0);
        }
        let size = ((self.thumb_size * length as f32).round() as u32).clamp(1, length);
        let start = (self.thumb_position * (length - size) as f32).round() as u32;
        (start, size)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
