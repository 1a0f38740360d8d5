//! Core geometry types: Point, Size, Rect, Spacing.
//!
//! These are the value types used throughout trellis for positioning, sizing,
//! and hit-testing widgets. Widths and heights are unsigned: every constructor
//! or operation that could produce a negative extent clamps it to zero instead.
//!
//! Widget rects are stored in their parent's coordinate space. Use
//! [`Point::relative_to`] / [`Point::relative_from`] (and the [`Rect`]
//! equivalents) to move between a parent-local and an absolute space.

use std::ops::{Add, Neg, Sub};

/// Clamp a signed extent into the unsigned range.
#[inline]
const fn clamp_extent(value: i64) -> u32 {
    if value <= 0 {
        0
    } else if value > u32::MAX as i64 {
        u32::MAX
    } else {
        value as u32
    }
}

/// Saturating conversion of a wide signed coordinate back to `i32`.
#[inline]
pub(crate) const fn clamp_coord(value: i64) -> i32 {
    if value < i32::MIN as i64 {
        i32::MIN
    } else if value > i32::MAX as i64 {
        i32::MAX
    } else {
        value as i32
    }
}

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D position or displacement.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// The origin.
    pub const ZERO: Point = Point { x: 0, y: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Express this absolute point in the space whose origin is `origin`.
    #[inline]
    pub const fn relative_to(self, origin: Point) -> Point {
        Point {
            x: self.x.saturating_sub(origin.x),
            y: self.y.saturating_sub(origin.y),
        }
    }

    /// Convert a point local to `origin` back into the enclosing space.
    #[inline]
    pub const fn relative_from(self, origin: Point) -> Point {
        Point {
            x: self.x.saturating_add(origin.x),
            y: self.y.saturating_add(origin.y),
        }
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        self.relative_from(rhs)
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        self.relative_to(rhs)
    }
}

impl Neg for Point {
    type Output = Point;
    #[inline]
    fn neg(self) -> Point {
        Point { x: self.x.saturating_neg(), y: self.y.saturating_neg() }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A 2D extent. Never negative.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// A zero-sized size.
    pub const ZERO: Size = Size { width: 0, height: 0 };

    /// Create a new size.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Build a size from signed extents, clamping negatives to zero.
    #[inline]
    pub const fn clamped(width: i64, height: i64) -> Self {
        Self { width: clamp_extent(width), height: clamp_extent(height) }
    }

    /// Total area (width * height).
    #[inline]
    pub const fn area(self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Whether either extent is zero.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Convert to a [`Rect`] positioned at the origin.
    #[inline]
    pub const fn to_rect(self) -> Rect {
        Rect { x: 0, y: 0, width: self.width, height: self.height }
    }
}

impl Add for Size {
    type Output = Size;
    #[inline]
    fn add(self, rhs: Size) -> Size {
        Size {
            width: self.width.saturating_add(rhs.width),
            height: self.height.saturating_add(rhs.height),
        }
    }
}

impl Sub for Size {
    type Output = Size;
    /// Componentwise subtraction, clamped at zero.
    #[inline]
    fn sub(self, rhs: Size) -> Size {
        Size {
            width: self.width.saturating_sub(rhs.width),
            height: self.height.saturating_sub(rhs.height),
        }
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// An axis-aligned rectangle defined by its top-left corner and size.
///
/// This is the most heavily-used geometry type. Containment is half-open:
/// `x ∈ [left, right)` and `y ∈ [top, bottom)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// An empty rect at the origin.
    pub const EMPTY: Rect = Rect { x: 0, y: 0, width: 0, height: 0 };

    /// Create a new rect.
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rect from an origin and a size.
    #[inline]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { x: origin.x, y: origin.y, width: size.width, height: size.height }
    }

    /// Create a rect from its edges. Inverted edges produce a zero extent.
    #[inline]
    pub const fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            x: left,
            y: top,
            width: clamp_extent(right as i64 - left as i64),
            height: clamp_extent(bottom as i64 - top as i64),
        }
    }

    /// The left edge.
    #[inline]
    pub const fn left(self) -> i32 {
        self.x
    }

    /// The top edge.
    #[inline]
    pub const fn top(self) -> i32 {
        self.y
    }

    /// The right edge (exclusive): `x + width`.
    #[inline]
    pub const fn right(self) -> i32 {
        clamp_coord(self.x as i64 + self.width as i64)
    }

    /// The bottom edge (exclusive): `y + height`.
    #[inline]
    pub const fn bottom(self) -> i32 {
        clamp_coord(self.y as i64 + self.height as i64)
    }

    /// The center point, rounded toward the top-left.
    #[inline]
    pub const fn center(self) -> Point {
        Point {
            x: clamp_coord(self.x as i64 + self.width as i64 / 2),
            y: clamp_coord(self.y as i64 + self.height as i64 / 2),
        }
    }

    /// The top-left corner.
    #[inline]
    pub const fn origin(self) -> Point {
        Point { x: self.x, y: self.y }
    }

    /// The dimensions as a [`Size`].
    #[inline]
    pub const fn size(self) -> Size {
        Size { width: self.width, height: self.height }
    }

    /// Whether the rect has zero area.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether the point lies inside this rect (half-open on both axes).
    #[inline]
    pub const fn contains(self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Whether `other` is entirely contained within this rect.
    #[inline]
    pub const fn contains_rect(self, other: Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Whether `other` overlaps this rect with non-zero area.
    #[inline]
    pub const fn overlaps(self, other: Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Compute the overlap of two rects.
    ///
    /// Disjoint rects produce a zero-area rect positioned at the clamped
    /// overlap corner; callers test [`Rect::is_empty`] rather than a sentinel.
    #[inline]
    pub const fn intersect(self, other: Rect) -> Rect {
        let x1 = if self.x > other.x { self.x } else { other.x };
        let y1 = if self.y > other.y { self.y } else { other.y };

        let sr = self.right();
        let or = other.right();
        let x2 = if sr < or { sr } else { or };

        let sb = self.bottom();
        let ob = other.bottom();
        let y2 = if sb < ob { sb } else { ob };

        Rect::from_edges(x1, y1, x2, y2)
    }

    /// The smallest rect containing both `self` and `other`.
    ///
    /// A zero-area operand contributes nothing, so merging into
    /// [`Rect::EMPTY`] yields the other rect unchanged.
    #[inline]
    pub const fn merge(self, other: Rect) -> Rect {
        if other.is_empty() {
            return self;
        }
        if self.is_empty() {
            return other;
        }
        let x1 = if self.x < other.x { self.x } else { other.x };
        let y1 = if self.y < other.y { self.y } else { other.y };

        let sr = self.right();
        let or = other.right();
        let x2 = if sr > or { sr } else { or };

        let sb = self.bottom();
        let ob = other.bottom();
        let y2 = if sb > ob { sb } else { ob };

        Rect::from_edges(x1, y1, x2, y2)
    }

    /// Translate the rect by a displacement.
    #[inline]
    pub const fn translate(self, delta: Point) -> Rect {
        let origin = self.origin().relative_from(delta);
        Rect { x: origin.x, y: origin.y, width: self.width, height: self.height }
    }

    /// Express this absolute rect in the space whose origin is `origin`.
    #[inline]
    pub const fn relative_to(self, origin: Point) -> Rect {
        let local = self.origin().relative_to(origin);
        Rect { x: local.x, y: local.y, width: self.width, height: self.height }
    }

    /// Convert a rect local to `origin` back into the enclosing space.
    #[inline]
    pub const fn relative_from(self, origin: Point) -> Rect {
        self.translate(origin)
    }

    /// Replace the size, keeping the origin.
    #[inline]
    pub const fn with_size(self, size: Size) -> Rect {
        Rect { x: self.x, y: self.y, width: size.width, height: size.height }
    }

    /// Contract the rect inward by the given [`Spacing`], clamping at zero.
    #[inline]
    pub const fn shrink(self, spacing: Spacing) -> Rect {
        let w = self.width as i64 - spacing.left as i64 - spacing.right as i64;
        let h = self.height as i64 - spacing.top as i64 - spacing.bottom as i64;
        Rect {
            x: clamp_coord(self.x as i64 + spacing.left as i64),
            y: clamp_coord(self.y as i64 + spacing.top as i64),
            width: clamp_extent(w),
            height: clamp_extent(h),
        }
    }

    /// Contract the rect by `amount` on every side.
    #[inline]
    pub const fn inset(self, amount: u32) -> Rect {
        self.shrink(Spacing::all(amount))
    }
}

// ---------------------------------------------------------------------------
// Spacing
// ---------------------------------------------------------------------------

/// Spacing around the four sides of a rectangle, used for container padding.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Spacing {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Spacing {
    /// Zero spacing on all sides.
    pub const ZERO: Spacing = Spacing { top: 0, right: 0, bottom: 0, left: 0 };

    /// Create spacing with explicit values for each side.
    #[inline]
    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self { top, right, bottom, left }
    }

    /// All four sides set to the same value.
    #[inline]
    pub const fn all(value: u32) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }

    /// Symmetric spacing: `vertical` for top/bottom, `horizontal` for left/right.
    #[inline]
    pub const fn symmetric(vertical: u32, horizontal: u32) -> Self {
        Self { top: vertical, right: horizontal, bottom: vertical, left: horizontal }
    }

    /// Total horizontal extent: `left + right`.
    #[inline]
    pub const fn width(self) -> u32 {
        self.left.saturating_add(self.right)
    }

    /// Total vertical extent: `top + bottom`.
    #[inline]
    pub const fn height(self) -> u32 {
        self.top.saturating_add(self.bottom)
    }
}

impl Add for Spacing {
    type Output = Spacing;
    #[inline]
    fn add(self, rhs: Spacing) -> Spacing {
        Spacing {
            top: self.top.saturating_add(rhs.top),
            right: self.right.saturating_add(rhs.right),
            bottom: self.bottom.saturating_add(rhs.bottom),
            left: self.left.saturating_add(rhs.left),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
