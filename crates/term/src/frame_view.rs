//! FrameView: maps a rendered glyph grid into a terminal cell buffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::Snapshot;
use crate::fb::{CellBuffer, CellStyle, Rgb};
use crate::types::RotationState;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Information shown on the status line under the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusView<'a> {
    pub scene: &'a str,
    pub frame: u32,
    pub rotation: RotationState,
    pub paused: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Places a frame on screen.
pub struct FrameView {
    anchor_y: AnchorY,
}

impl Default for FrameView {
    fn default() -> Self {
        Self {
            anchor_y: AnchorY::Center,
        }
    }
}

impl FrameView {
    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render a frame into an existing cell buffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a buffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(
        &self,
        frame: &Snapshot<'_>,
        color: Rgb,
        status: Option<&StatusView<'_>>,
        viewport: Viewport,
        fb: &mut CellBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let status_rows = u16::from(status.is_some());
        let block_h = frame.height().saturating_add(status_rows);
        let start_x = viewport.width.saturating_sub(frame.width()) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(block_h) / 2,
            AnchorY::Top => 0,
        };

        let style = CellStyle::fg(color);
        for (dy, row) in frame.rows().enumerate() {
            let y = start_y.saturating_add(dy as u16);
            if y >= viewport.height {
                break;
            }
            for (dx, &ch) in row.iter().enumerate() {
                fb.put_char(start_x.saturating_add(dx as u16), y, ch, style);
            }
        }

        if let Some(status) = status {
            let y = start_y.saturating_add(frame.height());
            if y < viewport.height {
                self.draw_status(fb, status, start_x, y);
            }
        }
    }

    /// Convenience helper that allocates a new cell buffer.
    pub fn render(
        &self,
        frame: &Snapshot<'_>,
        color: Rgb,
        status: Option<&StatusView<'_>>,
        viewport: Viewport,
    ) -> CellBuffer {
        let mut fb = CellBuffer::new(viewport.width, viewport.height);
        self.render_into(frame, color, status, viewport, &mut fb);
        fb
    }

    fn draw_status(&self, fb: &mut CellBuffer, status: &StatusView<'_>, x: u16, y: u16) {
        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let value = CellStyle {
            dim: true,
            ..CellStyle::default()
        };

        let mut cx = fb.put_str(x, y, status.scene, label);
        cx = fb.put_str(cx, y, "  #", value);
        cx = fb.put_u32(cx, y, status.frame, value);
        cx = fb.put_str(cx, y, "  A ", value);
        cx = fb.put_u32(cx, y, degrees(status.rotation.a), value);
        cx = fb.put_str(cx, y, "° B ", value);
        cx = fb.put_u32(cx, y, degrees(status.rotation.b), value);
        cx = fb.put_str(cx, y, "°", value);
        if status.paused {
            fb.put_str(cx.saturating_add(2), y, "PAUSED", label);
        }
    }
}

/// Whole degrees in `[0, 360)`.
fn degrees(radians: f32) -> u32 {
    let d = radians.to_degrees().rem_euclid(360.0);
    (d as u32).min(359)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degrees_wrap_into_one_turn() {
        assert_eq!(degrees(0.0), 0);
        assert_eq!(degrees(std::f32::consts::PI), 180);
        assert_eq!(degrees(-std::f32::consts::FRAC_PI_2), 270);
        assert_eq!(degrees(std::f32::consts::TAU * 3.0 + 0.1), 5);
    }
}
