//! Grid strategy: a fixed number of columns with equal cells.

use super::{Layout, LayoutItem};
use crate::geometry::{clamp_coord, Rect};

/// Equal-cell grid, filled row-major in insertion order.
///
/// Cell extents are truncated and the rounding leftover of each axis goes to
/// the last column / last row, so the cells plus gaps cover the content box
/// exactly. With a fixed `rows` count, children beyond `rows * columns` get a
/// zero-size rect at the content origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Column count. `0` is treated as `1`.
    pub columns: u32,
    /// Row count. `0` means as many rows as the children need.
    pub rows: u32,
    pub gap: u32,
}

impl Grid {
    /// A grid with `columns` columns and automatic rows.
    pub const fn new(columns: u32) -> Self {
        Self { columns, rows: 0, gap: 0 }
    }

    /// Fix the row count (builder).
    pub const fn with_rows(mut self, rows: u32) -> Self {
        self.rows = rows;
        self
    }

    /// Set the gap between cells on both axes (builder).
    pub const fn with_gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }
}

/// Split `extent` into `count` tracks separated by `gap`.
///
/// Returns `(start offsets, sizes)`; the last track absorbs the leftover.
/// Offsets saturate at `i64::MAX` for gaps far wider than the extent.
fn tracks(extent: u32, count: u32, gap: u32) -> Vec<(i64, u32)> {
    let gaps = u64::from(gap) * u64::from(count.saturating_sub(1));
    let available = u64::from(extent).saturating_sub(gaps);
    let base = available / u64::from(count);
    let leftover = available - base * u64::from(count);

    (0..u64::from(count))
        .map(|i| {
            let start = i.saturating_mul(base + u64::from(gap));
            let size = if i + 1 == u64::from(count) { base + leftover } else { base };
            // size <= extent, so it fits in u32.
            (i64::try_from(start).unwrap_or(i64::MAX), size as u32)
        })
        .collect()
}

impl Layout for Grid {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn arrange(&self, content: Rect, items: &[LayoutItem]) -> Vec<Rect> {
        if items.is_empty() {
            return Vec::new();
        }
        let columns = self.columns.max(1);
        let rows = if self.rows == 0 {
            (items.len() as u32).div_ceil(columns)
        } else {
            self.rows
        };

        let cols = tracks(content.width, columns, self.gap);
        let row_tracks = tracks(content.height, rows, self.gap);

        items
            .iter()
            .enumerate()
            .map(|(index, _)| {
                let index = index as u32;
                let (row, col) = (index / columns, index % columns);
                match row_tracks.get(row as usize) {
                    Some(&(y, height)) => {
                        let (x, width) = cols[col as usize];
                        let x = clamp_coord(i64::from(content.x).saturating_add(x));
                        let y = clamp_coord(i64::from(content.y).saturating_add(y));
                        Rect::new(x, y, width, height)
                    }
                    None => Rect::from_origin_size(content.origin(), Default::default()),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutProps;

    fn items(n: usize) -> Vec<LayoutItem> {
        vec![LayoutItem::from_rect(LayoutProps::default(), Rect::EMPTY); n]
    }

    #[test]
    fn two_by_two_equal_cells() {
        let rects = Grid::new(2).arrange(Rect::new(0, 0, 20, 10), &items(4));
        assert_eq!(
            rects,
            vec![
                Rect::new(0, 0, 10, 5),
                Rect::new(10, 0, 10, 5),
                Rect::new(0, 5, 10, 5),
                Rect::new(10, 5, 10, 5),
            ]
        );
    }

    #[test]
    fn leftover_goes_to_last_track() {
        let rects = Grid::new(3).with_gap(1).arrange(Rect::new(0, 0, 12, 3), &items(3));
        // 12 - 2 gaps = 10 -> 3, 3, 4
        assert_eq!(rects[0], Rect::new(0, 0, 3, 3));
        assert_eq!(rects[1], Rect::new(4, 0, 3, 3));
        assert_eq!(rects[2], Rect::new(8, 0, 4, 3));
        assert_eq!(rects[2].right(), 12);
    }

    #[test]
    fn automatic_rows_round_up() {
        let rects = Grid::new(2).arrange(Rect::new(5, 5, 10, 9), &items(3));
        assert_eq!(rects[2], Rect::new(5, 9, 5, 5));
    }

    #[test]
    fn huge_gap_saturates_offsets() {
        let gap = u32::MAX / 2 + 1;
        let rects = Grid::new(2).with_gap(gap).arrange(Rect::new(5, 0, 10, 10), &items(2));
        assert_eq!(rects, vec![Rect::new(5, 0, 0, 10), Rect::new(i32::MAX, 0, 0, 10)]);

        let rects = Grid::new(2).with_gap(gap).arrange(Rect::new(-1, 0, 10, 10), &items(2));
        assert_eq!(rects, vec![Rect::new(-1, 0, 0, 10), Rect::new(i32::MAX, 0, 0, 10)]);

        let rects = Grid::new(1).with_rows(3).with_gap(u32::MAX).arrange(Rect::new(0, i32::MAX, 4, 4), &items(3));
        assert_eq!(rects[2], Rect::new(0, i32::MAX, 4, 0));
    }

    #[test]
    fn overflow_beyond_fixed_rows_is_collapsed() {
        let rects = Grid::new(1).with_rows(1).arrange(Rect::new(3, 4, 10, 10), &items(2));
        assert_eq!(rects[0], Rect::new(3, 4, 10, 10));
        assert_eq!(rects[1], Rect::new(3, 4, 0, 0));
    }

    #[test]
    fn zero_columns_behaves_as_one() {
        let rects = Grid::new(0).arrange(Rect::new(0, 0, 8, 8), &items(2));
        assert_eq!(rects[0], Rect::new(0, 0, 8, 4));
        assert_eq!(rects[1], Rect::new(0, 4, 8, 4));
    }

    #[test]
    fn idempotent() {
        let grid = Grid::new(3).with_gap(2);
        let content = Rect::new(1, 1, 101, 37);
        assert_eq!(grid.arrange(content, &items(7)), grid.arrange(content, &items(7)));
    }
}
