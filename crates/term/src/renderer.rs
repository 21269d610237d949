//! Getting frames onto the terminal.
//!
//! The viewer composes every frame into a [`CellBuffer`] (shape glyphs plus
//! the status line). Between two consecutive frames most of a spinning shape
//! keeps its glyph, so [`TerminalRenderer`] keeps the previously shown buffer
//! and only repaints the changed cells. Each changed stretch of a row becomes
//! one cursor move followed by its glyphs; color sequences are emitted only
//! where the style differs from the last cell written. A size change, a
//! resize event ([`TerminalRenderer::invalidate`]) or the first frame paints
//! the whole screen instead.
//!
//! [`PlainRenderer`] is the `--plain` path: no alternate screen and no diffing.
//! Every frame is the scene color, a cursor home and the rows of the shape
//! grid, so the output can be piped or recorded.
//!
//! All encoders write crossterm commands into a byte buffer and never touch
//! stdout themselves.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::core::Snapshot;
use crate::fb::{Cell, CellBuffer, CellStyle, Rgb};

/// Reusable byte buffer in front of stdout.
struct Output {
    stdout: io::Stdout,
    buf: Vec<u8>,
}

impl Output {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Encode into the buffer, then write it out in one go.
    fn send(&mut self, encode: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> Result<()> {
        self.buf.clear();
        encode(&mut self.buf)?;
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Alternate-screen renderer that repaints changed cells only.
pub struct TerminalRenderer {
    out: Output,
    /// What the terminal currently shows; `None` forces a full paint.
    shown: Option<CellBuffer>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            out: Output::with_capacity(64 * 1024),
            shown: None,
        }
    }

    /// Raw mode, alternate screen, hidden cursor, no line wrap.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.out.send(|buf| {
            buf.queue(terminal::EnterAlternateScreen)?;
            buf.queue(cursor::Hide)?;
            buf.queue(terminal::DisableLineWrap)?;
            Ok(())
        })
    }

    /// Undo [`enter`](Self::enter).
    pub fn exit(&mut self) -> Result<()> {
        self.out.send(|buf| {
            buf.queue(ResetColor)?;
            buf.queue(SetAttribute(Attribute::Reset))?;
            buf.queue(terminal::EnableLineWrap)?;
            buf.queue(cursor::Show)?;
            buf.queue(terminal::LeaveAlternateScreen)?;
            Ok(())
        })?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Paint the whole screen on the next draw.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Show `cells`, then hand back the previously shown buffer in its place.
    ///
    /// The caller composes the next frame into whatever comes back, so two
    /// buffers alternate and nothing is cloned per frame.
    pub fn draw_swap(&mut self, cells: &mut CellBuffer) -> Result<()> {
        let mut spare = match self.shown.take() {
            Some(shown) if same_size(&shown, cells) => {
                self.out.send(|buf| encode_diff_into(&shown, cells, buf))?;
                shown
            }
            stale => {
                self.out.send(|buf| encode_full_into(cells, buf))?;
                let mut spare = stale.unwrap_or_else(|| CellBuffer::new(0, 0));
                spare.resize(cells.width(), cells.height());
                spare
            }
        };
        std::mem::swap(&mut spare, cells);
        self.shown = Some(spare);
        Ok(())
    }
}

/// Streams frames to stdout without taking over the terminal.
pub struct PlainRenderer {
    out: Output,
}

impl Default for PlainRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PlainRenderer {
    pub fn new() -> Self {
        Self {
            out: Output::with_capacity(8 * 1024),
        }
    }

    /// Clear the screen once before the first frame.
    pub fn begin(&mut self) -> Result<()> {
        self.out.send(|buf| {
            buf.queue(terminal::Clear(terminal::ClearType::All))?;
            Ok(())
        })
    }

    pub fn draw(&mut self, frame: &Snapshot<'_>, color: Rgb) -> Result<()> {
        self.out.send(|buf| encode_plain_into(frame, color, buf))
    }

    /// Restore the default color and leave the cursor under the last frame.
    pub fn finish(&mut self) -> Result<()> {
        self.out.send(|buf| {
            buf.queue(ResetColor)?;
            buf.queue(Print("\n"))?;
            Ok(())
        })
    }
}

/// Paint every cell of `cells` into `out`.
pub fn encode_full_into(cells: &CellBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::new(out);
    for (y, row) in rows(cells).enumerate() {
        pen.move_to(0, y as u16)?;
        for &cell in row {
            pen.put(cell)?;
        }
    }
    pen.finish()
}

/// Paint only the cells where `next` differs from `prev` into `out`.
///
/// Buffers of different sizes cannot be compared and get a full paint.
pub fn encode_diff_into(prev: &CellBuffer, next: &CellBuffer, out: &mut Vec<u8>) -> Result<()> {
    if !same_size(prev, next) {
        return encode_full_into(next, out);
    }
    let mut pen = Pen::new(out);
    for (x, y, run) in changed_runs(prev, next) {
        pen.move_to(x, y)?;
        for &cell in run {
            pen.put(cell)?;
        }
    }
    pen.finish()
}

/// Encode one frame in the plain streaming format into `out`.
///
/// Truecolor foreground, cursor home, then the rows separated by newlines.
pub fn encode_plain_into(frame: &Snapshot<'_>, color: Rgb, out: &mut Vec<u8>) -> Result<()> {
    out.queue(SetForegroundColor(rgb_to_color(color)))?;
    out.queue(cursor::MoveTo(0, 0))?;
    for (y, row) in frame.rows().enumerate() {
        if y > 0 {
            out.queue(Print('\n'))?;
        }
        for &ch in row {
            out.queue(Print(ch))?;
        }
    }
    Ok(())
}

/// Writes cells, switching colors only when the style changes.
struct Pen<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> Pen<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn move_to(&mut self, x: u16, y: u16) -> Result<()> {
        self.out.queue(cursor::MoveTo(x, y))?;
        Ok(())
    }

    fn put(&mut self, cell: Cell) -> Result<()> {
        if self.style != Some(cell.style) {
            apply_style_into(self.out, cell.style)?;
            self.style = Some(cell.style);
        }
        self.out.queue(Print(cell.ch))?;
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    out.queue(SetAttribute(Attribute::Reset))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn same_size(a: &CellBuffer, b: &CellBuffer) -> bool {
    a.width() == b.width() && a.height() == b.height()
}

fn rows(cells: &CellBuffer) -> std::slice::Chunks<'_, Cell> {
    cells.cells().chunks(usize::from(cells.width().max(1)))
}

/// Stretches of differing cells in two equally sized buffers.
///
/// Yields `(x, y, cells)` with the new cells of each stretch; a stretch never
/// crosses a row boundary.
fn changed_runs<'a>(prev: &'a CellBuffer, next: &'a CellBuffer) -> ChangedRuns<'a> {
    ChangedRuns {
        prev: prev.cells(),
        next: next.cells(),
        width: usize::from(next.width()),
        pos: 0,
    }
}

struct ChangedRuns<'a> {
    prev: &'a [Cell],
    next: &'a [Cell],
    width: usize,
    pos: usize,
}

impl<'a> Iterator for ChangedRuns<'a> {
    type Item = (u16, u16, &'a [Cell]);

    fn next(&mut self) -> Option<Self::Item> {
        let end = self.next.len().min(self.prev.len());
        while self.pos < end && self.prev[self.pos] == self.next[self.pos] {
            self.pos += 1;
        }
        if self.pos >= end {
            return None;
        }

        let start = self.pos;
        let row_end = ((start / self.width + 1) * self.width).min(end);
        while self.pos < row_end && self.prev[self.pos] != self.next[self.pos] {
            self.pos += 1;
        }
        let x = (start % self.width) as u16;
        let y = (start / self.width) as u16;
        let next = self.next;
        Some((x, y, &next[start..self.pos]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FrameBuffer;

    fn runs(prev: &CellBuffer, next: &CellBuffer) -> Vec<(u16, u16, String)> {
        changed_runs(prev, next)
            .map(|(x, y, cells)| (x, y, cells.iter().map(|c| c.ch).collect()))
            .collect()
    }

    #[test]
    fn style_conversion_is_truecolor() {
        let style = CellStyle::fg(Rgb::new(0, 255, 0));
        assert_eq!(
            rgb_to_color(style.fg),
            Color::Rgb {
                r: 0,
                g: 255,
                b: 0
            }
        );
    }

    #[test]
    fn adjacent_changes_form_one_run() {
        let style = CellStyle::default();
        let a = CellBuffer::new(5, 1);
        let mut b = CellBuffer::new(5, 1);
        for x in 1..=3 {
            b.put_char(x, 0, 'X', style);
        }
        assert_eq!(runs(&a, &b), vec![(1, 0, "XXX".to_string())]);
    }

    #[test]
    fn runs_stop_at_row_ends() {
        let style = CellStyle::default();
        let a = CellBuffer::new(3, 3);
        let mut b = a.clone();
        b.put_str(1, 0, "ab", style);
        b.put_str(0, 1, "c", style);
        b.put_char(2, 2, 'd', style);
        assert_eq!(
            runs(&a, &b),
            vec![
                (1, 0, "ab".to_string()),
                (0, 1, "c".to_string()),
                (2, 2, "d".to_string()),
            ]
        );
    }

    #[test]
    fn identical_buffers_encode_no_cells() {
        let a = CellBuffer::new(4, 2);
        let mut out = Vec::new();
        encode_diff_into(&a, &a.clone(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        // Only the trailing reset sequences.
        assert!(!text.contains(' '));
    }

    #[test]
    fn diff_styles_once_per_color_change() {
        let green = CellStyle::fg(Rgb::new(0, 255, 0));
        let a = CellBuffer::new(6, 1);
        let mut b = a.clone();
        b.put_str(0, 0, "@@", green);
        b.put_str(4, 0, "##", green);
        let mut out = Vec::new();
        encode_diff_into(&a, &b, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("38;2;0;255;0").count(), 1);
        assert!(text.contains("@@"));
        assert!(text.contains("##"));
    }

    #[test]
    fn size_change_repaints_everything() {
        let a = CellBuffer::new(2, 1);
        let mut b = CellBuffer::new(3, 2);
        b.put_char(2, 1, 'Z', CellStyle::default());
        let mut diff = Vec::new();
        encode_diff_into(&a, &b, &mut diff).unwrap();
        let mut full = Vec::new();
        encode_full_into(&b, &mut full).unwrap();
        assert_eq!(diff, full);
    }

    #[test]
    fn plain_encoding_sets_color_and_separates_rows() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.try_write(0, 0, 1.0, '@');
        fb.try_write(2, 1, 1.0, '.');
        let mut out = Vec::new();
        encode_plain_into(&fb.snapshot(), Rgb::new(0, 255, 0), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\x1b[38;2;0;255;0m"));
        assert!(text.ends_with("@  \n  ."));
    }
}
