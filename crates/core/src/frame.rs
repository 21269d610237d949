//! Frame renderer - one complete frame per call
//!
//! The renderer owns the frame buffer. Each call clears it, rasterizes the
//! whole scene, and hands back a read-only snapshot together with the angles
//! for the next frame. Nothing partial is ever observable and the angles are
//! never touched mid-frame.

use crate::buffer::{FrameBuffer, Snapshot};
use crate::scene::Scene;
use crate::surface::SurfaceRasterizer;
use crate::types::RotationState;
use crate::wireframe::WireframeRasterizer;

/// Per-frame statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub surface_writes: usize,
    pub wireframe_writes: usize,
}

#[derive(Debug, Clone)]
pub struct FrameRenderer {
    buffer: FrameBuffer,
    last_stats: FrameStats,
}

impl FrameRenderer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: FrameBuffer::new(width, height),
            last_stats: FrameStats::default(),
        }
    }

    /// A renderer sized for `scene`.
    pub fn for_scene(scene: &Scene) -> Self {
        Self::new(scene.projection.width, scene.projection.height)
    }

    /// Render one frame of `scene` at `rotation`.
    ///
    /// Returns the finished frame and the rotation advanced by the scene's
    /// per-frame steps. The buffer is resized (reusing its allocation) if the
    /// scene's grid differs from the previous frame's.
    pub fn render_frame(
        &mut self,
        scene: &Scene,
        rotation: RotationState,
    ) -> (Snapshot<'_>, RotationState) {
        self.buffer
            .resize(scene.projection.width, scene.projection.height);
        self.buffer.clear();

        let mut stats = FrameStats::default();
        if let Some(surface) = &scene.surface {
            let raster =
                SurfaceRasterizer::new(&scene.projection, scene.axes, scene.light, &scene.ramp);
            stats.surface_writes = raster.rasterize(surface, rotation, &mut self.buffer);
        }
        if let Some(mesh) = &scene.wireframe {
            let raster = WireframeRasterizer::new(&scene.projection, scene.axes);
            stats.wireframe_writes =
                raster.rasterize(mesh, rotation, &mut self.buffer, mesh.glyph());
        }
        self.last_stats = stats;

        (self.buffer.snapshot(), rotation.advance(scene.steps))
    }

    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }
}
