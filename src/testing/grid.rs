//! Headless cell-grid renderer.
//!
//! [`GridRenderer`] implements [`Renderer`] over an in-memory grid of
//! characters and colours, one cell per layout unit. It backs the snapshot
//! helpers and is what tests paint into.

use std::fmt;

use crate::color::{Border, Color};
use crate::geometry::{Point, Rect, Size};
use crate::render::{layout_text, measure_cells, Font, Renderer, TextStyle};

/// One grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
}

impl Default for Cell {
    fn default() -> Self {
        Self { ch: ' ', fg: None, bg: None }
    }
}

/// An in-memory [`Renderer`]. `Display` prints the characters, rows joined
/// by `'\n'`, with no trailing newline.
#[derive(Debug, Clone)]
pub struct GridRenderer {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
    clip: Option<Rect>,
}

impl GridRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
            clip: None,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The cell at `(x, y)`, or `None` off the grid.
    pub fn cell(&self, x: u32, y: u32) -> Option<&Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get((y * self.width + x) as usize)
    }

    pub fn char_at(&self, x: u32, y: u32) -> Option<char> {
        self.cell(x, y).map(|c| c.ch)
    }

    pub fn background_at(&self, x: u32, y: u32) -> Option<Color> {
        self.cell(x, y).and_then(|c| c.bg)
    }

    pub fn foreground_at(&self, x: u32, y: u32) -> Option<Color> {
        self.cell(x, y).and_then(|c| c.fg)
    }

    /// Row `y` as a string, or `None` off the grid.
    pub fn row(&self, y: u32) -> Option<String> {
        if y >= self.height {
            return None;
        }
        let start = (y * self.width) as usize;
        Some(self.cells[start..start + self.width as usize].iter().map(|c| c.ch).collect())
    }

    /// Reset every cell.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Reallocate to a new size, clearing the contents.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    /// The cells of `rect` that are on the grid and inside the clip.
    fn visible(&self, rect: Rect) -> Rect {
        let area = rect.intersect(self.size().to_rect());
        match self.clip {
            Some(clip) => area.intersect(clip),
            None => area,
        }
    }

    fn put(&mut self, at: Point, ch: char, fg: Color) {
        if self.visible(Rect::new(at.x, at.y, 1, 1)).is_empty() {
            return;
        }
        let index = (at.y as u32 * self.width + at.x as u32) as usize;
        if let Some(cell) = self.cells.get_mut(index) {
            cell.ch = ch;
            cell.fg = Some(fg);
        }
    }

    fn put_str(&mut self, at: Point, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put(Point::new(at.x.saturating_add(i as i32), at.y), ch, fg);
        }
    }
}

impl Renderer for GridRenderer {
    fn draw_rect(&mut self, rect: Rect, color: Color) {
        let area = self.visible(rect);
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let index = (y as u32 * self.width + x as u32) as usize;
                if let Some(cell) = self.cells.get_mut(index) {
                    *cell = Cell { ch: ' ', fg: None, bg: Some(color) };
                }
            }
        }
    }

    fn draw_border(&mut self, rect: Rect, border: Border) {
        if rect.width < 2 || rect.height < 2 || border.width == 0 {
            return;
        }
        let (left, top) = (rect.left(), rect.top());
        let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);
        for x in left + 1..right {
            self.put(Point::new(x, top), '─', border.color);
            self.put(Point::new(x, bottom), '─', border.color);
        }
        for y in top + 1..bottom {
            self.put(Point::new(left, y), '│', border.color);
            self.put(Point::new(right, y), '│', border.color);
        }
        self.put(Point::new(left, top), '┌', border.color);
        self.put(Point::new(right, top), '┐', border.color);
        self.put(Point::new(left, bottom), '└', border.color);
        self.put(Point::new(right, bottom), '┘', border.color);
    }

    fn draw_text(&mut self, text: &str, rect: Rect, color: Color, style: &TextStyle) {
        let clip = self.visible(rect);
        if clip.is_empty() {
            return;
        }
        let outer = self.clip.replace(clip);
        for (at, line) in layout_text(text, rect, style) {
            self.put_str(at, &line, color);
        }
        self.clip = outer;
    }

    fn measure_text(&self, text: &str, _font: &Font) -> Size {
        measure_cells(text)
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        self.clip = clip;
    }
}

impl fmt::Display for GridRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            if y > 0 {
                f.write_str("\n")?;
            }
            if let Some(row) = self.row(y) {
                f.write_str(&row)?;
            }
        }
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_blank() {
        let g = GridRenderer::new(3, 2);
        assert_eq!(g.to_string(), "   \n   ");
        assert_eq!(g.background_at(0, 0), None);
        assert_eq!(g.cell(3, 0), None);
    }

    #[test]
    fn rect_fills_background_and_clears_text() {
        let mut g = GridRenderer::new(4, 2);
        g.draw_text("abcd", Rect::new(0, 0, 4, 1), Color::WHITE, &TextStyle::default());
        g.draw_rect(Rect::new(1, 0, 2, 5), Color::RED);
        assert_eq!(g.to_string(), "a  d\n    ");
        assert_eq!(g.background_at(2, 1), Some(Color::RED));
        assert_eq!(g.background_at(3, 1), None);
    }

    #[test]
    fn text_stays_inside_its_rect_and_clip() {
        let mut g = GridRenderer::new(6, 1);
        g.draw_text("abcdef", Rect::new(1, 0, 3, 1), Color::WHITE, &TextStyle::default());
        assert_eq!(g.to_string(), " abc  ");

        g.clear();
        g.set_clip(Some(Rect::new(0, 0, 2, 1)));
        g.draw_text("xyz", Rect::new(0, 0, 6, 1), Color::GREEN, &TextStyle::default());
        assert_eq!(g.to_string(), "xy    ");
        assert_eq!(g.foreground_at(1, 0), Some(Color::GREEN));
    }

    #[test]
    fn border_draws_box() {
        let mut g = GridRenderer::new(4, 3);
        g.draw_border(Rect::new(0, 0, 4, 3), Border::new(Color::GREY, 1));
        assert_eq!(g.to_string(), "┌──┐\n│  │\n└──┘");
    }

    #[test]
    fn negative_positions_are_clipped() {
        let mut g = GridRenderer::new(3, 1);
        g.draw_text("abc", Rect::new(-1, 0, 3, 1), Color::WHITE, &TextStyle::default());
        assert_eq!(g.to_string(), "bc ");
    }

    #[test]
    fn measures_chars_by_lines() {
        let g = GridRenderer::new(1, 1);
        assert_eq!(g.measure_text("ab\nc", &Font::default()), Size::new(2, 2));
    }
}
