//! Luminance shading - maps surface/light alignment onto a glyph ramp.

use crate::types::{Vec3, GLYPH_RAMP};

/// Ordered glyphs, darkest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRamp {
    glyphs: Vec<char>,
}

impl Default for GlyphRamp {
    fn default() -> Self {
        Self {
            glyphs: GLYPH_RAMP.chars().collect(),
        }
    }
}

impl GlyphRamp {
    /// Build a ramp from a darkest-to-brightest string.
    ///
    /// Returns `None` for an empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_spin_core::GlyphRamp;
    ///
    /// let ramp = GlyphRamp::new(" .:#@").unwrap();
    /// assert_eq!(ramp.len(), 5);
    /// assert_eq!(ramp.glyph(4), '@');
    /// assert!(GlyphRamp::new("").is_none());
    /// ```
    pub fn new(glyphs: &str) -> Option<Self> {
        let glyphs: Vec<char> = glyphs.chars().collect();
        if glyphs.is_empty() {
            return None;
        }
        Some(Self { glyphs })
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyph at `index`, clamped to the brightest entry.
    #[inline]
    pub fn glyph(&self, index: usize) -> char {
        self.glyphs[index.min(self.glyphs.len() - 1)]
    }

    pub fn as_str(&self) -> String {
        self.glyphs.iter().collect()
    }
}

/// Glyph index for a unit normal under a unit light direction.
///
/// `floor(max(0, n·l) * (len - 1))`, clamped into the ramp.
#[inline]
pub fn shade(normal: Vec3, light: Vec3, ramp_len: usize) -> usize {
    luminance_to_index(normal.dot(light), ramp_len)
}

/// Glyph index for a luminance in `[-1, 1]`.
///
/// Non-positive and NaN luminance map to the dimmest glyph; the scale
/// follows the ramp length, so a short ramp spreads the same way a long one
/// does.
#[inline]
pub fn luminance_to_index(luminance: f32, ramp_len: usize) -> usize {
    level_to_index(luminance.max(0.0) * ramp_len.saturating_sub(1) as f32, ramp_len)
}

/// Clamp a raw luminance level (already on the index scale) into the ramp.
///
/// Negative and NaN levels map to the dimmest glyph.
#[inline]
pub fn level_to_index(level: f32, ramp_len: usize) -> usize {
    if level.is_nan() || level <= 0.0 {
        return 0;
    }
    (level as usize).min(ramp_len.saturating_sub(1))
}
