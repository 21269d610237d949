//! Perspective projection from rotated model space to screen cells.

use crate::types::{Vec3, CAMERA_OFFSET, HEIGHT_SCALE, SCREEN_HEIGHT, SCREEN_WIDTH, WIDTH_SCALE};

/// A projected sample.
///
/// `closeness` is the reciprocal of the offset depth: larger means nearer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSample {
    pub x: i32,
    pub y: i32,
    pub closeness: f32,
}

/// Screen geometry and camera parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub width: u16,
    pub height: u16,
    pub width_scale: f32,
    pub height_scale: f32,
    /// Added to every depth before the divide.
    ///
    /// Must exceed the scene's radius so the denominator stays positive.
    pub camera_offset: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            width_scale: WIDTH_SCALE,
            height_scale: HEIGHT_SCALE,
            camera_offset: CAMERA_OFFSET,
        }
    }
}

impl Projection {
    pub fn with_camera_offset(mut self, camera_offset: f32) -> Self {
        self.camera_offset = camera_offset;
        self
    }

    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Project a rotated point.
    ///
    /// Results may fall outside the grid; the frame buffer discards those.
    #[inline]
    pub fn project(&self, p: Vec3) -> ScreenSample {
        let closeness = 1.0 / (p.z + self.camera_offset);
        let cx = f32::from(self.width) / 2.0;
        let cy = f32::from(self.height) / 2.0;
        ScreenSample {
            x: to_cell(cx + self.width_scale * closeness * p.x),
            y: to_cell(cy + self.height_scale * closeness * p.y),
            closeness,
        }
    }
}

/// Floor to a cell index. NaN lands off the grid instead of at 0.
#[inline]
fn to_cell(v: f32) -> i32 {
    if v.is_nan() {
        i32::MIN
    } else {
        v.floor() as i32
    }
}

/// Free-function form of [`Projection::project`].
pub fn project(
    rotated: Vec3,
    width: u16,
    height: u16,
    width_scale: f32,
    height_scale: f32,
    camera_offset: f32,
) -> ScreenSample {
    Projection {
        width,
        height,
        width_scale,
        height_scale,
        camera_offset,
    }
    .project(rotated)
}
