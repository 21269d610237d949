//! Frame buffer - glyph grid with a parallel closeness (depth) grid
//!
//! Every rasterizer writes through [`FrameBuffer::try_write`], the only
//! mutation path besides [`FrameBuffer::clear`]. A write lands only when the
//! cell is on screen and the sample is strictly nearer than whatever the cell
//! already holds, so the result is independent of rasterization order and
//! equal-closeness ties keep the first writer.

use std::fmt;

use crate::types::BLANK;

/// Glyph and closeness grids for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    glyphs: Vec<char>,
    closeness: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            glyphs: vec![BLANK; len],
            closeness: vec![0.0; len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the buffer and clear it.
    ///
    /// This preserves the underlying allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.glyphs.resize(len, BLANK);
        self.closeness.resize(len, 0.0);
        self.clear();
    }

    /// Reset every cell to blank and infinitely far.
    pub fn clear(&mut self) {
        self.glyphs.fill(BLANK);
        self.closeness.fill(0.0);
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Occlusion-tested write.
    ///
    /// Returns `true` when the glyph was stored. Off-screen coordinates,
    /// farther-or-equal samples and NaN closeness leave the buffer untouched.
    #[inline]
    pub fn try_write(&mut self, x: i32, y: i32, closeness: f32, glyph: char) -> bool {
        let Some(i) = self.idx(x, y) else {
            return false;
        };
        if closeness > self.closeness[i] {
            self.closeness[i] = closeness;
            self.glyphs[i] = glyph;
            true
        } else {
            false
        }
    }

    pub fn get(&self, x: u16, y: u16) -> Option<char> {
        self.idx(i32::from(x), i32::from(y)).map(|i| self.glyphs[i])
    }

    pub fn closeness_at(&self, x: u16, y: u16) -> Option<f32> {
        self.idx(i32::from(x), i32::from(y)).map(|i| self.closeness[i])
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            width: self.width,
            height: self.height,
            glyphs: &self.glyphs,
        }
    }
}

/// Read-only view of a finished frame, handed to the output sink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<'a> {
    width: u16,
    height: u16,
    glyphs: &'a [char],
}

impl<'a> Snapshot<'a> {
    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.glyphs[(y as usize) * (self.width as usize) + (x as usize)])
    }

    /// Rows of exactly `width` glyphs, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &'a [char]> + 'a {
        // chunks(0) panics; a zero-width grid has no rows either way.
        let width = (self.width as usize).max(1);
        let glyphs: &'a [char] = if self.width == 0 { &[] } else { self.glyphs };
        glyphs.chunks(width)
    }

    /// Owned copy of every row.
    pub fn lines(&self) -> Vec<String> {
        self.rows().map(|row| row.iter().collect()).collect()
    }
}

impl fmt::Display for Snapshot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for ch in row {
                write!(f, "{}", ch)?;
            }
        }
        Ok(())
    }
}
