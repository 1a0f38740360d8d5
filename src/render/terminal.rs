//! Crossterm terminal backend.
//!
//! [`TerminalRenderer`] maps one layout unit to one terminal cell. Drawing
//! commands are queued into a buffered writer; call [`flush`] to send a frame.
//! The renderer does NOT enter the alternate screen on creation; call
//! [`enter_alt_screen`] explicitly.
//!
//! [`flush`]: TerminalRenderer::flush
//! [`enter_alt_screen`]: TerminalRenderer::enter_alt_screen

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor, execute, queue,
    style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::warn;

use super::{layout_text, measure_cells, Font, Renderer, TextStyle};
use crate::color::{Border, Color};
use crate::geometry::{Point, Rect, Size};

// ---------------------------------------------------------------------------
// TerminalRenderer
// ---------------------------------------------------------------------------

/// Terminal output backend using crossterm.
///
/// Generic over the writer so frames can be captured in memory; the default
/// is buffered stdout. Write errors inside the [`Renderer`] methods are kept
/// and reported by the next [`flush`](Self::flush).
pub struct TerminalRenderer<W: Write = Stdout> {
    writer: BufWriter<W>,
    size: Size,
    clip: Option<Rect>,
    error: Option<io::Error>,
}

impl TerminalRenderer<Stdout> {
    /// A renderer on stdout, sized to the current terminal.
    pub fn stdout() -> io::Result<Self> {
        let (w, h) = terminal::size()?;
        Ok(Self::new(io::stdout(), Size::new(u32::from(w), u32::from(h))))
    }
}

impl<W: Write> TerminalRenderer<W> {
    /// A renderer drawing a surface of `size` cells into `writer`.
    pub fn new(writer: W, size: Size) -> Self {
        Self {
            writer: BufWriter::new(writer),
            size,
            clip: None,
            error: None,
        }
    }

    /// Surface size in cells.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Track a terminal resize.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }

    /// Enter alternate screen, enable raw mode and mouse capture.
    pub fn enter_alt_screen(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            EnterAlternateScreen,
            crossterm::event::EnableMouseCapture,
            crossterm::event::EnableFocusChange,
            cursor::Hide
        )?;
        terminal::enable_raw_mode()
    }

    /// Undo [`enter_alt_screen`](Self::enter_alt_screen).
    pub fn leave_alt_screen(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(
            self.writer,
            cursor::Show,
            crossterm::event::DisableFocusChange,
            crossterm::event::DisableMouseCapture,
            LeaveAlternateScreen
        )
    }

    /// Send every queued command to the terminal, reporting the first write
    /// error hit since the last flush.
    pub fn flush(&mut self) -> io::Result<()> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.writer.flush()
    }

    /// The underlying writer. Queued output may still be buffered.
    pub fn get_ref(&self) -> &W {
        self.writer.get_ref()
    }

    /// Cells of `rect` that are on the surface and inside the clip.
    fn visible(&self, rect: Rect) -> Rect {
        let surface = self.size.to_rect();
        let area = rect.intersect(surface);
        match self.clip {
            Some(clip) => area.intersect(clip),
            None => area,
        }
    }

    /// Print `text` starting at `at`, dropping characters outside the visible
    /// area.
    fn print_clipped(&mut self, at: Point, text: &str, fg: Color, bg: Option<Color>) {
        let row = self.visible(Rect::new(at.x, at.y, text.chars().count() as u32, 1));
        if row.is_empty() {
            return;
        }
        let skip = (row.x - at.x) as usize;
        let visible: String = text.chars().skip(skip).take(row.width as usize).collect();
        let result = self.queue_print(row.origin(), &visible, fg, bg);
        self.record(result);
    }

    fn queue_print(&mut self, at: Point, text: &str, fg: Color, bg: Option<Color>) -> io::Result<()> {
        // `visible` clamps to the surface, so the cast cannot truncate.
        queue!(self.writer, cursor::MoveTo(at.x as u16, at.y as u16))?;
        queue!(self.writer, SetForegroundColor(to_crossterm(fg)))?;
        if let Some(bg) = bg {
            queue!(self.writer, SetBackgroundColor(to_crossterm(bg)))?;
        }
        queue!(self.writer, Print(text), ResetColor)
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(err) = result {
            warn!(%err, "terminal write failed");
            self.error.get_or_insert(err);
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn draw_rect(&mut self, rect: Rect, color: Color) {
        let area = self.visible(rect);
        if area.is_empty() {
            return;
        }
        let blank = " ".repeat(area.width as usize);
        for y in area.top()..area.bottom() {
            let result = self.queue_print(Point::new(area.x, y), &blank, color, Some(color));
            self.record(result);
        }
    }

    fn draw_border(&mut self, rect: Rect, border: Border) {
        if rect.width < 2 || rect.height < 2 || border.width == 0 {
            return;
        }
        let inner = (rect.width - 2) as usize;
        let top = format!("┌{}┐", "─".repeat(inner));
        let bottom = format!("└{}┘", "─".repeat(inner));
        self.print_clipped(rect.origin(), &top, border.color, None);
        for y in rect.top() + 1..rect.bottom() - 1 {
            self.print_clipped(Point::new(rect.left(), y), "│", border.color, None);
            self.print_clipped(Point::new(rect.right() - 1, y), "│", border.color, None);
        }
        self.print_clipped(Point::new(rect.left(), rect.bottom() - 1), &bottom, border.color, None);
    }

    fn draw_text(&mut self, text: &str, rect: Rect, color: Color, style: &TextStyle) {
        for (at, line) in layout_text(text, rect, style) {
            self.print_clipped(at, &line, color, None);
        }
    }

    fn measure_text(&self, text: &str, _font: &Font) -> Size {
        measure_cells(text)
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        self.clip = clip;
    }
}

/// Map an RGBA colour to a crossterm colour. Alpha is ignored.
pub fn to_crossterm(color: Color) -> style::Color {
    style::Color::Rgb { r: color.r, g: color.g, b: color.b }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn output(renderer: TerminalRenderer<Vec<u8>>) -> String {
        let mut renderer = renderer;
        renderer.flush().unwrap();
        String::from_utf8_lossy(renderer.get_ref()).into_owned()
    }

    #[test]
    fn to_crossterm_drops_alpha() {
        assert_eq!(
            to_crossterm(Color::rgba(1, 2, 3, 4)),
            style::Color::Rgb { r: 1, g: 2, b: 3 }
        );
    }

    #[test]
    fn text_is_written() {
        let mut r = TerminalRenderer::new(Vec::new(), Size::new(20, 2));
        r.draw_text("hello", Rect::new(0, 0, 20, 1), Color::WHITE, &TextStyle::default());
        assert!(output(r).contains("hello"));
    }

    #[test]
    fn text_outside_clip_is_dropped() {
        let mut r = TerminalRenderer::new(Vec::new(), Size::new(20, 2));
        r.set_clip(Some(Rect::new(0, 0, 3, 1)));
        r.draw_text("hello", Rect::new(0, 0, 20, 1), Color::WHITE, &TextStyle::default());
        let out = output(r);
        assert!(out.contains("hel"));
        assert!(!out.contains("hello"));
    }

    #[test]
    fn off_surface_drawing_writes_nothing() {
        let mut r = TerminalRenderer::new(Vec::new(), Size::new(4, 4));
        r.draw_rect(Rect::new(10, 10, 3, 3), Color::RED);
        r.draw_text("x", Rect::new(-5, 0, 1, 1), Color::RED, &TextStyle::default());
        assert!(output(r).is_empty());
    }

    #[test]
    fn border_uses_box_drawing() {
        let mut r = TerminalRenderer::new(Vec::new(), Size::new(4, 3));
        r.draw_border(Rect::new(0, 0, 4, 3), Border::new(Color::GREY, 1));
        let out = output(r);
        assert!(out.contains("┌──┐"));
        assert!(out.contains("└──┘"));
        assert_eq!(out.matches('│').count(), 2);
    }

    #[test]
    fn measure_is_cell_based() {
        let r = TerminalRenderer::new(Vec::new(), Size::new(1, 1));
        assert_eq!(r.measure_text("ab\ncde", &Font::default()), Size::new(3, 2));
    }
}
