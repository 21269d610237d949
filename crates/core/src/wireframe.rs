//! Wireframe meshes and their line rasterizer
//!
//! Edges are drawn with a DDA walk: `max(|dx|, |dy|)` integer steps from the
//! first projected endpoint to the second, using integer division for the
//! intermediate cells. Closeness is interpolated linearly along the edge so
//! wires occlude (and are occluded by) surfaces the same way samples do.

use crate::buffer::FrameBuffer;
use crate::projection::{Projection, ScreenSample};
use crate::rotation::{RotationAxes, Rotor};
use crate::types::{RotationState, Vec3};

/// Vertices plus index-pair edges, drawn with one flat glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct Wireframe {
    vertices: Vec<Vec3>,
    edges: Vec<(usize, usize)>,
    glyph: char,
}

impl Wireframe {
    /// Build a mesh.
    ///
    /// Edge indices must be valid into `vertices`.
    pub fn new(vertices: Vec<Vec3>, edges: Vec<(usize, usize)>, glyph: char) -> Self {
        debug_assert!(
            edges
                .iter()
                .all(|&(a, b)| a < vertices.len() && b < vertices.len()),
            "wireframe edge index out of range"
        );
        Self {
            vertices,
            edges,
            glyph,
        }
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn glyph(&self) -> char {
        self.glyph
    }

    pub fn with_glyph(mut self, glyph: char) -> Self {
        self.glyph = glyph;
        self
    }

    /// Largest vertex distance from the origin.
    pub fn bounding_radius(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| v.length())
            .fold(0.0, f32::max)
    }
}

/// Draws wireframes into a frame buffer.
#[derive(Debug, Clone, Copy)]
pub struct WireframeRasterizer<'a> {
    pub projection: &'a Projection,
    pub axes: RotationAxes,
}

impl<'a> WireframeRasterizer<'a> {
    pub fn new(projection: &'a Projection, axes: RotationAxes) -> Self {
        Self { projection, axes }
    }

    /// Rasterize every edge of `mesh` with `glyph`.
    ///
    /// Returns the number of accepted buffer writes.
    pub fn rasterize(
        &self,
        mesh: &Wireframe,
        rotation: RotationState,
        buffer: &mut FrameBuffer,
        glyph: char,
    ) -> usize {
        let rotor = Rotor::new(self.axes, rotation);
        let mut written = 0;
        for &(a, b) in mesh.edges() {
            let from = self.projection.project(rotor.apply(mesh.vertices()[a]));
            let to = self.projection.project(rotor.apply(mesh.vertices()[b]));
            written += draw_line(buffer, from, to, glyph);
        }
        written
    }
}

/// Walk from `from` to `to`, writing `glyph` at every cell on the way.
///
/// A zero-length segment still takes one step and writes its single cell.
/// Segments lying entirely beyond one edge of the buffer, or with an endpoint
/// at or behind the camera, are skipped without walking. Steps that cannot
/// land on the grid are never visited, so the walk is bounded by the grid size
/// however far the endpoints project.
pub fn draw_line(
    buffer: &mut FrameBuffer,
    from: ScreenSample,
    to: ScreenSample,
    glyph: char,
) -> usize {
    let w = i32::from(buffer.width());
    let h = i32::from(buffer.height());
    if !(from.closeness > 0.0 && to.closeness > 0.0) {
        return 0;
    }
    if (from.x < 0 && to.x < 0)
        || (from.y < 0 && to.y < 0)
        || (from.x >= w && to.x >= w)
        || (from.y >= h && to.y >= h)
    {
        return 0;
    }

    let x0 = i64::from(from.x);
    let y0 = i64::from(from.y);
    let dx = i64::from(to.x) - x0;
    let dy = i64::from(to.y) - y0;
    let steps = dx.abs().max(dy.abs()).max(1);

    let (x_lo, x_hi) = visible_steps(x0, dx, steps, i64::from(w));
    let (y_lo, y_hi) = visible_steps(y0, dy, steps, i64::from(h));

    let mut written = 0;
    for i in x_lo.max(y_lo)..=x_hi.min(y_hi) {
        let x = x0 + along(i, dx, steps);
        let y = y0 + along(i, dy, steps);
        let t = i as f32 / steps as f32;
        let closeness = from.closeness + (to.closeness - from.closeness) * t;
        if buffer.try_write(x as i32, y as i32, closeness, glyph) {
            written += 1;
        }
    }
    written
}

/// Offset after `i` of `steps` steps over `delta` cells.
///
/// Integer division truncates toward zero, matching the reference walk. The
/// product can exceed `i64` for endpoints at opposite ends of the `i32` range.
#[inline]
fn along(i: i64, delta: i64, steps: i64) -> i64 {
    (i128::from(i) * i128::from(delta) / i128::from(steps)) as i64
}

/// Step range `[lo, hi]` within `[0, steps]` where `start + i * delta / steps`
/// can fall inside `[0, limit)`.
///
/// Truncation moves a coordinate by less than one cell, so the exact line is
/// tested against `(-1, limit + 1)` and the bounds widened by one more step.
fn visible_steps(start: i64, delta: i64, steps: i64, limit: i64) -> (i64, i64) {
    if delta == 0 {
        return (0, steps);
    }
    let per_cell = steps as f64 / delta as f64;
    let a = (-1 - start) as f64 * per_cell;
    let b = (limit + 1 - start) as f64 * per_cell;
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    let lo = (lo.floor() - 1.0).max(0.0);
    let hi = (hi.ceil() + 1.0).min(steps as f64);
    (lo as i64, hi as i64)
}
