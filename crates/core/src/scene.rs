//! Scene descriptors and the built-in scenes
//!
//! A [`Scene`] bundles what the renderer needs for one animation: geometry
//! (a parametric surface, a wireframe, or both), camera, light, glyph ramp,
//! rotation axes and per-frame angle steps, plus the presentation hints the
//! host uses (color and frame interval).
//!
//! Built-in geometry:
//!
//! - **cube**: six axis-aligned faces, `u, v ∈ [-1, 1]` sampled every 0.05
//! - **donut**: torus with tube radius 1 around a radius-2 ring, lit by a
//!   closed-form luminance formula
//! - **pyramid**: apex plus square base, eight edges
//! - **quad**: the single `z = 1` cube face

use std::f32::consts::{FRAC_1_SQRT_2, TAU};

use crate::projection::Projection;
use crate::rotation::{Axis, RotationAxes};
use crate::shade::GlyphRamp;
use crate::surface::{Patch, Shading, Span, Surface, SurfaceFn};
use crate::types::{AngleSteps, Rgb, RotationState, SceneKind, Vec3, DEFAULT_COLOR, FRAME_MS};
use crate::wireframe::Wireframe;

/// Sampling step for cube faces.
pub const CUBE_STEP: f32 = 0.05;

/// Torus ring (`j`) and revolution (`i`) sampling steps.
pub const DONUT_RING_STEP: f32 = 0.07;
pub const DONUT_SWEEP_STEP: f32 = 0.02;

/// The donut sits farther back: its radius is 3.
pub const DONUT_CAMERA_OFFSET: f32 = 5.0;

/// Frame interval used by the wireframe pyramid.
pub const PYRAMID_FRAME_MS: u64 = 8;

/// Everything needed to render one animation.
#[derive(Debug, Clone)]
pub struct Scene {
    pub kind: SceneKind,
    pub surface: Option<Surface>,
    pub wireframe: Option<Wireframe>,
    pub projection: Projection,
    pub axes: RotationAxes,
    /// Unit light direction.
    pub light: Vec3,
    pub ramp: GlyphRamp,
    pub steps: AngleSteps,
    pub color: Rgb,
    pub frame_ms: u64,
}

impl Scene {
    /// An empty scene with reference camera, light and timing.
    pub fn empty(kind: SceneKind) -> Self {
        Self {
            kind,
            surface: None,
            wireframe: None,
            projection: Projection::default(),
            axes: RotationAxes::default(),
            light: default_light(),
            ramp: GlyphRamp::default(),
            steps: AngleSteps::new(0.03, 0.02),
            color: DEFAULT_COLOR,
            frame_ms: FRAME_MS,
        }
    }

    pub fn builtin(kind: SceneKind) -> Self {
        match kind {
            SceneKind::Cube => Self::cube(),
            SceneKind::Donut => Self::donut(),
            SceneKind::Pyramid => Self::pyramid(),
            SceneKind::Quad => Self::quad(),
        }
    }

    pub fn cube() -> Self {
        Self::empty(SceneKind::Cube).with_surface(cube_surface(CUBE_STEP))
    }

    pub fn donut() -> Self {
        let mut scene = Self::empty(SceneKind::Donut).with_surface(torus_surface());
        scene.projection = scene.projection.with_camera_offset(DONUT_CAMERA_OFFSET);
        // 1761 characters per frame at 0.00004 / 0.00002 per character.
        scene.steps = AngleSteps::new(0.07, 0.035);
        scene
    }

    pub fn pyramid() -> Self {
        let mut scene = Self::empty(SceneKind::Pyramid).with_wireframe(pyramid_wireframe());
        scene.axes = RotationAxes::new(Axis::Y, Axis::X);
        scene.steps = AngleSteps::new(0.06, 0.0);
        scene.frame_ms = PYRAMID_FRAME_MS;
        scene
    }

    pub fn quad() -> Self {
        Self::empty(SceneKind::Quad).with_surface(Surface::new(vec![cube_faces(CUBE_STEP)[0]]))
    }

    pub fn with_surface(mut self, surface: Surface) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn with_wireframe(mut self, wireframe: Wireframe) -> Self {
        self.wireframe = Some(wireframe);
        self
    }

    /// Set the light direction; it is normalized here.
    pub fn with_light(mut self, light: Vec3) -> Self {
        self.light = light.normalized();
        self
    }

    /// Replace the sampling step of every patch in both parameters.
    pub fn with_sample_step(mut self, step: f32) -> Self {
        if let Some(surface) = self.surface.take() {
            let patches = surface
                .patches()
                .iter()
                .map(|p| {
                    let mut p = *p;
                    p.u.step = step;
                    p.v.step = step;
                    p
                })
                .collect();
            self.surface = Some(Surface::new(patches));
        }
        self
    }

    /// Radius of the sphere around the origin that holds all geometry.
    ///
    /// Rotation never moves a point outside it, so a camera offset larger
    /// than this keeps every depth in front of the camera.
    pub fn bounding_radius(&self) -> f32 {
        let surface = self.surface.as_ref().map_or(0.0, Surface::bounding_radius);
        let wireframe = self.wireframe.as_ref().map_or(0.0, Wireframe::bounding_radius);
        surface.max(wireframe)
    }

    /// Angles for the first frame.
    pub fn initial_rotation(&self) -> RotationState {
        RotationState::default()
    }
}

/// Up and back: `(0, 1, -1)` normalized.
pub fn default_light() -> Vec3 {
    Vec3::new(0.0, 1.0, -1.0).normalized()
}

/// The six faces of the `[-1, 1]^3` cube, in reference order.
pub fn cube_faces(step: f32) -> [Patch; 6] {
    let span = Span::closed(-1.0, 1.0, step);
    let face = |point: SurfaceFn, normal: SurfaceFn| {
        Patch::new(span, span, point, Shading::Normal(normal))
    };
    [
        face(|u, v| Vec3::new(u, v, 1.0), |_, _| Vec3::new(0.0, 0.0, 1.0)),
        face(|u, v| Vec3::new(u, v, -1.0), |_, _| Vec3::new(0.0, 0.0, -1.0)),
        face(|u, v| Vec3::new(1.0, u, v), |_, _| Vec3::new(1.0, 0.0, 0.0)),
        face(|u, v| Vec3::new(-1.0, u, v), |_, _| Vec3::new(-1.0, 0.0, 0.0)),
        face(|u, v| Vec3::new(u, 1.0, v), |_, _| Vec3::new(0.0, 1.0, 0.0)),
        face(|u, v| Vec3::new(u, -1.0, v), |_, _| Vec3::new(0.0, -1.0, 0.0)),
    ]
}

pub fn cube_surface(step: f32) -> Surface {
    Surface::new(cube_faces(step).to_vec())
}

/// Torus point for ring angle `j` and sweep angle `i`.
fn torus_point(j: f32, i: f32) -> Vec3 {
    let ring = 2.0 + j.cos();
    Vec3::new(i.cos() * ring, i.sin() * ring, j.sin())
}

/// Closed-form torus luminance.
///
/// Equals `n'·(0, -1, -1) / √2` for the rotated unit normal `n'`, so it spans
/// `[-1, 1]` like a normal shaded against a unit light.
fn torus_luminance(j: f32, i: f32, rotation: RotationState) -> f32 {
    let (sin_a, cos_a) = rotation.a.sin_cos();
    let (sin_b, cos_b) = rotation.b.sin_cos();
    let (sin_j, cos_j) = j.sin_cos();
    let (sin_i, cos_i) = i.sin_cos();
    FRAC_1_SQRT_2
        * ((sin_j * sin_a - sin_i * cos_j * cos_a) * cos_b
            - sin_i * cos_j * sin_a
            - sin_j * cos_a
            - cos_i * cos_j * sin_b)
}

pub fn torus_surface() -> Surface {
    Surface::new(vec![Patch::new(
        Span::half_open(0.0, TAU, DONUT_RING_STEP),
        Span::half_open(0.0, TAU, DONUT_SWEEP_STEP),
        torus_point,
        Shading::Formula(torus_luminance),
    )])
}

/// Square pyramid with its apex at screen-top (screen y grows downward).
pub fn pyramid_wireframe() -> Wireframe {
    Wireframe::new(
        vec![
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
        ],
        vec![
            (0, 1),
            (0, 2),
            (0, 3),
            (0, 4),
            (1, 2),
            (2, 3),
            (3, 4),
            (4, 1),
        ],
        '#',
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_six_patches_of_41_by_41() {
        let surface = cube_surface(CUBE_STEP);
        assert_eq!(surface.patches().len(), 6);
        assert_eq!(surface.sample_count(), 6 * 41 * 41);
    }

    #[test]
    fn cube_normals_point_outward() {
        for patch in cube_faces(CUBE_STEP) {
            let Shading::Normal(normal) = patch.shading else {
                panic!("cube faces carry true normals");
            };
            let center = (patch.point)(0.0, 0.0);
            assert_eq!(normal(0.0, 0.0), center);
        }
    }

    #[test]
    fn torus_formula_matches_rotated_normal() {
        let axes = RotationAxes::default();
        let light = Vec3::new(0.0, -1.0, -1.0);
        let cases: [(f32, f32, f32, f32); 3] =
            [(0.3, 1.2, 0.5, 0.25), (2.0, 4.0, 1.0, 3.0), (5.0, 0.1, 0.0, 0.0)];
        for (j, i, a, b) in cases {
            let rotation = RotationState::new(a, b);
            let normal = Vec3::new(i.cos() * j.cos(), i.sin() * j.cos(), j.sin());
            let expected = axes.rotate(normal, rotation).dot(light.normalized());
            let got = torus_luminance(j, i, rotation);
            assert!((expected - got).abs() < 1e-5, "{} vs {}", expected, got);
            assert!((-1.0..=1.0).contains(&got));
        }
    }

    #[test]
    fn builtin_scenes_match_reference_parameters() {
        let donut = Scene::builtin(SceneKind::Donut);
        assert_eq!(donut.projection.camera_offset, 5.0);
        assert_eq!(donut.surface.as_ref().map(Surface::sample_count), Some(90 * 315));

        let pyramid = Scene::builtin(SceneKind::Pyramid);
        assert_eq!(pyramid.wireframe.as_ref().map(|w| w.edges().len()), Some(8));
        assert_eq!(pyramid.steps, AngleSteps::new(0.06, 0.0));
        assert_eq!(pyramid.frame_ms, 8);

        let cube = Scene::builtin(SceneKind::Cube);
        assert_eq!(cube.steps, AngleSteps::new(0.03, 0.02));
        assert!((cube.light.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn builtin_geometry_stays_in_front_of_the_camera() {
        for kind in SceneKind::ALL {
            let scene = Scene::builtin(kind);
            assert!(
                scene.bounding_radius() < scene.projection.camera_offset,
                "{}",
                kind.as_str()
            );
        }
        let donut = Scene::donut().bounding_radius();
        assert!((donut - 3.0).abs() < 1e-5, "{}", donut);
        let pyramid = Scene::pyramid().bounding_radius();
        assert!((pyramid - 3.0f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn sample_step_override_applies_to_every_patch() {
        let scene = Scene::cube().with_sample_step(0.5);
        let surface = scene.surface.unwrap();
        assert!(surface.patches().iter().all(|p| p.u.step == 0.5 && p.v.step == 0.5));
        assert_eq!(surface.sample_count(), 6 * 5 * 5);
    }
}
