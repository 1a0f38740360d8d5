//! Flex strategy: weighted distribution along a main axis.
//!
//! Per pass:
//! 1. Children with weight `0` keep their preferred main-axis extent.
//! 2. `consumed` is the sum of those extents plus `(n - 1) * gap`.
//! 3. `remaining = max(0, main - consumed)` is split among weighted children
//!    in proportion to their weight. Shares are truncated and the rounding
//!    leftover goes to the last weighted child, so the weighted extents always
//!    sum to exactly `remaining`.
//! 4. Cross extent is the full content cross extent for [`Align::Stretch`],
//!    otherwise the preferred cross extent offset by the alignment.
//! 5. Children are placed in insertion order from the content start, advancing
//!    by `extent + gap`.
//!
//! Weights are converted to integer milli-units up front so the whole pass is
//! integer arithmetic and bit-for-bit repeatable.

use tracing::trace;

use super::{Align, Axis, Layout, LayoutItem};
use crate::geometry::{clamp_coord, Rect};

/// Scale applied to `f32` weights before integer distribution.
const WEIGHT_SCALE: f64 = 1000.0;

/// Convert a weight to integer units. Any positive weight gets at least one
/// unit; zero, negative and NaN weights get none.
fn weight_units(weight: f32) -> u64 {
    if !(weight > 0.0) {
        return 0;
    }
    let scaled = (f64::from(weight) * WEIGHT_SCALE).round();
    scaled.clamp(1.0, f64::from(u32::MAX)) as u64
}

/// Row or column layout with weights, gap, and cross-axis alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Flex {
    pub axis: Axis,
    pub gap: u32,
    /// Alignment used by children that do not set their own.
    pub align: Align,
}

impl Flex {
    /// A flex layout along `axis` with no gap and stretched children.
    pub const fn new(axis: Axis) -> Self {
        Self { axis, gap: 0, align: Align::Stretch }
    }

    /// Horizontal main axis.
    pub const fn row() -> Self {
        Self::new(Axis::Horizontal)
    }

    /// Vertical main axis.
    pub const fn column() -> Self {
        Self::new(Axis::Vertical)
    }

    /// Set the gap between adjacent children (builder).
    pub const fn with_gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    /// Set the default cross-axis alignment (builder).
    pub const fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Main-axis extents for every item, per steps 1–3.
    fn main_extents(&self, main: u32, items: &[LayoutItem]) -> Vec<u32> {
        let weights: Vec<u64> = items.iter().map(|item| weight_units(item.props.weight)).collect();

        let fixed: u64 = items
            .iter()
            .zip(&weights)
            .filter(|&(_, &w)| w == 0)
            .map(|(item, _)| u64::from(self.axis.main(item.preferred)))
            .sum();
        let gaps = u64::from(self.gap) * (items.len() as u64).saturating_sub(1);
        let consumed = fixed + gaps;
        let remaining = u64::from(main).saturating_sub(consumed);
        let total_weight: u64 = weights.iter().sum();

        let mut extents: Vec<u32> = items
            .iter()
            .zip(&weights)
            .map(|(item, &w)| {
                if w == 0 {
                    self.axis.main(item.preferred)
                } else {
                    // remaining <= u32::MAX and w <= u32::MAX, so no overflow.
                    (remaining * w / total_weight) as u32
                }
            })
            .collect();

        if let Some(last_flex) = weights.iter().rposition(|&w| w > 0) {
            let distributed: u64 = extents
                .iter()
                .zip(&weights)
                .filter(|&(_, &w)| w > 0)
                .map(|(&e, _)| u64::from(e))
                .sum();
            let leftover = remaining - distributed;
            extents[last_flex] += leftover as u32;
        }

        trace!(main, consumed, remaining, "flex distribution");
        extents
    }
}

impl Default for Flex {
    fn default() -> Self {
        Self::row()
    }
}

impl Layout for Flex {
    fn name(&self) -> &'static str {
        match self.axis {
            Axis::Horizontal => "flex-row",
            Axis::Vertical => "flex-column",
        }
    }

    fn arrange(&self, content: Rect, items: &[LayoutItem]) -> Vec<Rect> {
        if items.is_empty() {
            return Vec::new();
        }

        let size = content.size();
        let main = self.axis.main(size);
        let cross = self.axis.cross(size);
        let cross_start = i64::from(self.axis.cross_start(content));
        let extents = self.main_extents(main, items);

        let mut cursor = i64::from(self.axis.main_start(content));
        items
            .iter()
            .zip(extents)
            .map(|(item, extent)| {
                let (cross_pos, cross_extent) = match item.props.align.unwrap_or(self.align) {
                    Align::Stretch => (cross_start, cross),
                    align => {
                        let wanted = self.axis.cross(item.preferred);
                        let slack = i64::from(cross) - i64::from(wanted);
                        let offset = match align {
                            Align::Start | Align::Stretch => 0,
                            Align::Center => slack.div_euclid(2),
                            Align::End => slack,
                        };
                        (cross_start + offset, wanted)
                    }
                };

                let rect = self.axis.rect(
                    clamp_coord(cursor),
                    clamp_coord(cross_pos),
                    extent,
                    cross_extent,
                );
                cursor += i64::from(extent) + i64::from(self.gap);
                rect
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::layout::LayoutProps;

    fn flexible(weight: f32) -> LayoutItem {
        LayoutItem::from_rect(LayoutProps::weighted(weight), Rect::EMPTY)
    }

    fn fixed(width: u32, height: u32) -> LayoutItem {
        LayoutItem::from_rect(LayoutProps::default(), Rect::new(0, 0, width, height))
    }

    // ── Distribution ─────────────────────────────────────────────────

    #[test]
    fn weights_one_two_one_with_gap() {
        let flex = Flex::row().with_gap(10);
        let rects = flex.arrange(
            Rect::new(0, 0, 300, 20),
            &[flexible(1.0), flexible(2.0), flexible(1.0)],
        );
        let widths: Vec<u32> = rects.iter().map(|r| r.width).collect();
        assert_eq!(widths, vec![70, 140, 70]);
        assert_eq!(rects[0].x, 0);
        assert_eq!(rects[1].x, 80);
        assert_eq!(rects[2].x, 230);
    }

    #[test]
    fn fixed_overflow_gives_flexible_zero() {
        let rects = Flex::row().arrange(Rect::new(0, 0, 100, 10), &[fixed(150, 10), flexible(1.0)]);
        assert_eq!(rects[0].width, 150);
        assert_eq!(rects[1].width, 0);
        assert_eq!(rects[1].x, 150);
    }

    #[test]
    fn rounding_leftover_goes_to_last_flexible() {
        let rects = Flex::row().arrange(
            Rect::new(0, 0, 10, 1),
            &[flexible(1.0), flexible(1.0), flexible(1.0), fixed(0, 1)],
        );
        let widths: Vec<u32> = rects.iter().map(|r| r.width).collect();
        assert_eq!(widths, vec![3, 3, 4, 0]);
    }

    #[test]
    fn flexible_sum_is_exact_for_all_extents() {
        let weight_sets: [&[f32]; 5] = [
            &[1.0],
            &[1.0, 2.0, 1.0],
            &[0.3, 0.3, 0.3],
            &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
            &[7.0, 0.5, 3.25, 1.0, 2.0, 9.0, 0.1, 4.0, 1.5, 6.0],
        ];
        let flex = Flex::row().with_gap(3);
        for weights in weight_sets {
            let mut items: Vec<LayoutItem> = weights.iter().map(|&w| flexible(w)).collect();
            items.insert(0, fixed(17, 1));
            let gaps = 3 * (items.len() as u32 - 1);
            for extent in 0..=10_000u32 {
                let rects = flex.arrange(Rect::new(0, 0, extent, 1), &items);
                let flexible_sum: u32 = rects[1..].iter().map(|r| r.width).sum();
                assert_eq!(flexible_sum, extent.saturating_sub(17 + gaps), "extent {extent}");
            }
        }
    }

    #[test]
    fn arrange_is_idempotent() {
        let flex = Flex::column().with_gap(2).with_align(Align::Center);
        let items = [fixed(4, 3), flexible(1.5), flexible(2.5), fixed(9, 1)];
        let content = Rect::new(3, 7, 11, 97);
        assert_eq!(flex.arrange(content, &items), flex.arrange(content, &items));
    }

    #[test]
    fn zero_children_is_noop() {
        assert!(Flex::row().arrange(Rect::new(0, 0, 10, 10), &[]).is_empty());
    }

    #[test]
    fn zero_and_negative_weights_are_fixed() {
        let mut negative = fixed(5, 1);
        negative.props.weight = -3.0;
        let rects = Flex::row().arrange(Rect::new(0, 0, 50, 1), &[negative, flexible(1.0)]);
        assert_eq!(rects[0].width, 5);
        assert_eq!(rects[1].width, 45);
    }

    #[test]
    fn only_fixed_children_may_overflow() {
        let rects = Flex::row()
            .with_gap(5)
            .arrange(Rect::new(0, 0, 20, 4), &[fixed(15, 4), fixed(15, 4)]);
        assert_eq!(rects[0], Rect::new(0, 0, 15, 4));
        assert_eq!(rects[1], Rect::new(20, 0, 15, 4));
    }

    // ── Cross axis ───────────────────────────────────────────────────

    #[test]
    fn stretch_fills_cross_axis() {
        let rects = Flex::row().arrange(Rect::new(2, 3, 40, 12), &[fixed(10, 1)]);
        assert_eq!(rects[0], Rect::new(2, 3, 10, 12));
    }

    #[test]
    fn cross_alignment_start_center_end() {
        let content = Rect::new(0, 0, 30, 10);
        let mut item = fixed(10, 4);
        for (align, y) in [(Align::Start, 0), (Align::Center, 3), (Align::End, 6)] {
            item.props.align = Some(align);
            let rects = Flex::row().arrange(content, &[item]);
            assert_eq!(rects[0], Rect::new(0, y, 10, 4), "{align:?}");
        }
    }

    #[test]
    fn container_default_alignment_applies() {
        let rects = Flex::column()
            .with_align(Align::End)
            .arrange(Rect::new(0, 0, 20, 20), &[fixed(6, 2)]);
        assert_eq!(rects[0], Rect::new(14, 0, 6, 2));
    }

    #[test]
    fn center_oversized_child_overflows_both_sides() {
        let mut item = fixed(4, 9);
        item.props.align = Some(Align::Center);
        let rects = Flex::row().arrange(Rect::new(0, 0, 4, 4), &[item]);
        assert_eq!(rects[0], Rect::new(0, -3, 4, 9));
    }

    // ── Column ───────────────────────────────────────────────────────

    #[test]
    fn column_places_top_to_bottom_from_content_origin() {
        let rects = Flex::column()
            .with_gap(1)
            .arrange(Rect::new(5, 5, 10, 21), &[fixed(3, 5), flexible(1.0)]);
        assert_eq!(rects[0], Rect::new(5, 5, 10, 5));
        assert_eq!(rects[1], Rect::new(5, 11, 10, 15));
        assert_eq!(rects[1].size(), Size::new(10, 15));
    }
}
