//! Parametric surfaces and their rasterizer
//!
//! A [`Surface`] is an ordered list of [`Patch`]es. Each patch maps a sampled
//! `(u, v)` domain to a model-space point plus a way of lighting it:
//!
//! - [`Shading::Normal`]: a true normal, rotated with the geometry and shaded
//!   against the scene light (cube faces, flat quads)
//! - [`Shading::Formula`]: a closed-form luminance in `[-1, 1]` evaluated from
//!   the same rotation angles (the classic torus)
//!
//! Both variants go through one sampling loop, so the rasterizer contract is
//! the same for every scene kind.

use crate::buffer::FrameBuffer;
use crate::projection::Projection;
use crate::rotation::{RotationAxes, Rotor};
use crate::shade::{luminance_to_index, shade, GlyphRamp};
use crate::types::{RotationState, Vec3};

/// `(u, v) -> point` or `(u, v) -> normal`.
pub type SurfaceFn = fn(f32, f32) -> Vec3;

/// `(u, v, angles) -> luminance` in `[-1, 1]`, scaled onto the ramp like `n·l`.
pub type LuminanceFn = fn(f32, f32, RotationState) -> f32;

/// One sampled parameter range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub start: f32,
    pub end: f32,
    pub step: f32,
    /// Whether `end` itself is sampled.
    pub inclusive: bool,
}

impl Span {
    /// `[start, end]`
    pub const fn closed(start: f32, end: f32, step: f32) -> Self {
        Self {
            start,
            end,
            step,
            inclusive: true,
        }
    }

    /// `[start, end)`
    pub const fn half_open(start: f32, end: f32, step: f32) -> Self {
        Self {
            start,
            end,
            step,
            inclusive: false,
        }
    }

    /// Number of samples.
    ///
    /// Counted up front so accumulated float error never adds or drops a
    /// sample at the far end.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_spin_core::Span;
    ///
    /// assert_eq!(Span::closed(-1.0, 1.0, 0.05).count(), 41);
    /// assert_eq!(Span::half_open(0.0, 1.0, 0.25).count(), 4);
    /// ```
    pub fn count(&self) -> usize {
        if !(self.step > 0.0) || self.end < self.start {
            return 0;
        }
        let ratio = (self.end - self.start) / self.step;
        if self.inclusive {
            (ratio + 1e-4).floor() as usize + 1
        } else {
            (ratio - 1e-4).ceil().max(0.0) as usize
        }
    }

    #[inline]
    pub fn value(&self, k: usize) -> f32 {
        self.start + k as f32 * self.step
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.count()).map(move |k| self.value(k))
    }
}

/// How a patch is lit.
#[derive(Debug, Clone, Copy)]
pub enum Shading {
    /// Unit normal at `(u, v)`.
    Normal(SurfaceFn),
    /// Luminance in `[-1, 1]` at `(u, v)` for the frame's angles.
    Formula(LuminanceFn),
}

/// One contiguous piece of a surface.
#[derive(Debug, Clone, Copy)]
pub struct Patch {
    pub u: Span,
    pub v: Span,
    pub point: SurfaceFn,
    pub shading: Shading,
}

impl Patch {
    pub fn new(u: Span, v: Span, point: SurfaceFn, shading: Shading) -> Self {
        Self {
            u,
            v,
            point,
            shading,
        }
    }

    pub fn sample_count(&self) -> usize {
        self.u.count() * self.v.count()
    }
}

/// An ordered set of patches.
#[derive(Debug, Clone, Default)]
pub struct Surface {
    patches: Vec<Patch>,
}

impl Surface {
    pub fn new(patches: Vec<Patch>) -> Self {
        Self { patches }
    }

    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    pub fn sample_count(&self) -> usize {
        self.patches.iter().map(Patch::sample_count).sum()
    }

    /// Largest distance from the origin of any sampled point.
    pub fn bounding_radius(&self) -> f32 {
        let mut radius = 0.0f32;
        for patch in &self.patches {
            for u in patch.u.iter() {
                for v in patch.v.iter() {
                    radius = radius.max((patch.point)(u, v).length());
                }
            }
        }
        radius
    }
}

/// Samples surfaces into a frame buffer.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceRasterizer<'a> {
    pub projection: &'a Projection,
    pub axes: RotationAxes,
    pub light: Vec3,
    pub ramp: &'a GlyphRamp,
}

impl<'a> SurfaceRasterizer<'a> {
    pub fn new(
        projection: &'a Projection,
        axes: RotationAxes,
        light: Vec3,
        ramp: &'a GlyphRamp,
    ) -> Self {
        Self {
            projection,
            axes,
            light,
            ramp,
        }
    }

    /// Rasterize every patch of `surface` for the given angles.
    ///
    /// Returns the number of accepted buffer writes.
    pub fn rasterize(
        &self,
        surface: &Surface,
        rotation: RotationState,
        buffer: &mut FrameBuffer,
    ) -> usize {
        let rotor = Rotor::new(self.axes, rotation);
        let light = self.light.normalized();
        let mut written = 0;

        for patch in surface.patches() {
            for u in patch.u.iter() {
                for v in patch.v.iter() {
                    let p = rotor.apply((patch.point)(u, v));
                    let sample = self.projection.project(p);
                    let index = match patch.shading {
                        Shading::Normal(normal) => {
                            let n = rotor.apply(normal(u, v));
                            shade(n, light, self.ramp.len())
                        }
                        Shading::Formula(luminance) => {
                            luminance_to_index(luminance(u, v, rotation), self.ramp.len())
                        }
                    };
                    let glyph = self.ramp.glyph(index);
                    if buffer.try_write(sample.x, sample.y, sample.closeness, glyph) {
                        written += 1;
                    }
                }
            }
        }

        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn front(u: f32, v: f32) -> Vec3 {
        Vec3::new(u, v, 1.0)
    }

    fn facing_viewer(_: f32, _: f32) -> Vec3 {
        Vec3::new(0.0, 0.0, -1.0)
    }

    #[test]
    fn span_counts_match_reference_loops() {
        // for (u = -1; u <= 1; u += 0.05)
        assert_eq!(Span::closed(-1.0, 1.0, 0.05).count(), 41);
        // for (j = 0; j < 2π; j += 0.07) and (i = 0; i < 2π; i += 0.02)
        assert_eq!(Span::half_open(0.0, std::f32::consts::TAU, 0.07).count(), 90);
        assert_eq!(Span::half_open(0.0, std::f32::consts::TAU, 0.02).count(), 315);
    }

    #[test]
    fn degenerate_spans_are_empty() {
        assert_eq!(Span::closed(0.0, 1.0, 0.0).count(), 0);
        assert_eq!(Span::closed(1.0, 0.0, 0.1).count(), 0);
        assert_eq!(Span::closed(0.5, 0.5, 0.1).count(), 1);
        assert_eq!(Span::half_open(0.5, 0.5, 0.1).count(), 0);
    }

    #[test]
    fn span_endpoints_are_sampled() {
        let span = Span::closed(-1.0, 1.0, 0.05);
        let values: Vec<f32> = span.iter().collect();
        assert!((values[0] + 1.0).abs() < 1e-6);
        assert!((values[values.len() - 1] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn bounding_radius_covers_the_farthest_sample() {
        let tiny = Span::closed(-1.0, 1.0, 1.0);
        let patch = Patch::new(tiny, tiny, front, Shading::Normal(facing_viewer));
        let surface = Surface::new(vec![patch]);
        assert!((surface.bounding_radius() - 3.0f32.sqrt()).abs() < 1e-6);
        assert_eq!(Surface::default().bounding_radius(), 0.0);
    }

    #[test]
    fn formula_luminance_clamps_to_ramp() {
        fn hot(_: f32, _: f32, _: RotationState) -> f32 {
            1.5
        }
        fn cold(_: f32, _: f32, _: RotationState) -> f32 {
            -1.0
        }

        let projection = Projection::default();
        let ramp = GlyphRamp::default();
        let light = Vec3::new(0.0, 1.0, -1.0);
        let raster = SurfaceRasterizer::new(&projection, RotationAxes::default(), light, &ramp);
        let tiny = Span::closed(0.0, 0.0, 1.0);

        let mut fb = FrameBuffer::new(80, 22);
        let hot_patch = Patch::new(tiny, tiny, front, Shading::Formula(hot));
        raster.rasterize(&Surface::new(vec![hot_patch]), RotationState::default(), &mut fb);
        assert_eq!(fb.get(40, 11), Some('@'));

        fb.clear();
        let cold_patch = Patch::new(tiny, tiny, front, Shading::Formula(cold));
        raster.rasterize(&Surface::new(vec![cold_patch]), RotationState::default(), &mut fb);
        assert_eq!(fb.get(40, 11), Some('.'));
    }

    #[test]
    fn formula_luminance_follows_ramp_length() {
        fn half(_: f32, _: f32, _: RotationState) -> f32 {
            0.5
        }

        let projection = Projection::default();
        let light = Vec3::new(0.0, 1.0, -1.0);
        let tiny = Span::closed(0.0, 0.0, 1.0);
        let surface = Surface::new(vec![Patch::new(tiny, tiny, front, Shading::Formula(half))]);

        let mut fb = FrameBuffer::new(80, 22);
        let cases = [
            (GlyphRamp::default(), ';'),
            (GlyphRamp::new(".:#@").unwrap(), ':'),
        ];
        for (ramp, expected) in cases {
            let raster = SurfaceRasterizer::new(&projection, RotationAxes::default(), light, &ramp);
            fb.clear();
            raster.rasterize(&surface, RotationState::default(), &mut fb);
            assert_eq!(fb.get(40, 11), Some(expected));
        }
    }

    #[test]
    fn normal_shading_uses_rotated_normal() {
        let projection = Projection::default();
        let ramp = GlyphRamp::default();
        let light = Vec3::new(0.0, 0.0, -1.0);
        let raster = SurfaceRasterizer::new(&projection, RotationAxes::default(), light, &ramp);
        let tiny = Span::closed(0.0, 0.0, 1.0);
        let patch = Patch::new(tiny, tiny, front, Shading::Normal(facing_viewer));
        let surface = Surface::new(vec![patch]);

        let mut fb = FrameBuffer::new(80, 22);
        raster.rasterize(&surface, RotationState::default(), &mut fb);
        assert_eq!(fb.get(40, 11), Some('@'));

        // Half a turn about X points the normal away from the light.
        fb.clear();
        let written =
            raster.rasterize(&surface, RotationState::new(std::f32::consts::PI, 0.0), &mut fb);
        assert_eq!(written, 1);
        let text = fb.snapshot().to_string();
        let lit: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
        assert_eq!(lit, vec!['.']);
    }
}
