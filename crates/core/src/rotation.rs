//! Rotation module - two-angle rotation of points and normals
//!
//! A scene spins by two accumulating angles `(A, B)`: first about one axis by
//! `A`, then about a second axis by `B`. Points and normals go through the
//! identical transform so lighting stays attached to the geometry.
//!
//! Axis conventions (θ is the angle):
//!
//! | Axis | Result |
//! |------|--------|
//! | X | `y' = y cosθ - z sinθ`, `z' = y sinθ + z cosθ` |
//! | Y | `x' = x cosθ - z sinθ`, `z' = x sinθ + z cosθ` |
//! | Z | `x' = x cosθ - y sinθ`, `y' = x sinθ + y cosθ` |

use crate::types::{RotationState, Vec3};

/// A principal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Which axes the two angles rotate about, in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationAxes {
    pub first: Axis,
    pub second: Axis,
}

impl Default for RotationAxes {
    fn default() -> Self {
        Self {
            first: Axis::X,
            second: Axis::Z,
        }
    }
}

impl RotationAxes {
    pub const fn new(first: Axis, second: Axis) -> Self {
        Self { first, second }
    }

    pub fn rotate(&self, v: Vec3, rotation: RotationState) -> Vec3 {
        Rotor::new(*self, rotation).apply(v)
    }
}

/// Rotation with its sines and cosines evaluated once per frame.
///
/// Rasterizers build one `Rotor` per frame and apply it to every sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotor {
    axes: RotationAxes,
    sin_a: f32,
    cos_a: f32,
    sin_b: f32,
    cos_b: f32,
}

impl Rotor {
    pub fn new(axes: RotationAxes, rotation: RotationState) -> Self {
        let (sin_a, cos_a) = rotation.a.sin_cos();
        let (sin_b, cos_b) = rotation.b.sin_cos();
        Self {
            axes,
            sin_a,
            cos_a,
            sin_b,
            cos_b,
        }
    }

    #[inline]
    pub fn apply(&self, v: Vec3) -> Vec3 {
        let v = rotate_about(self.axes.first, v, self.sin_a, self.cos_a);
        rotate_about(self.axes.second, v, self.sin_b, self.cos_b)
    }
}

#[inline(always)]
fn rotate_about(axis: Axis, v: Vec3, sin: f32, cos: f32) -> Vec3 {
    match axis {
        Axis::X => Vec3::new(v.x, v.y * cos - v.z * sin, v.y * sin + v.z * cos),
        Axis::Y => Vec3::new(v.x * cos - v.z * sin, v.y, v.x * sin + v.z * cos),
        Axis::Z => Vec3::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos, v.z),
    }
}

/// Rotate a point about X by `a`, then about Z by `b`.
///
/// # Examples
///
/// ```
/// use tui_spin_core::rotation::rotate;
/// use tui_spin_core::types::Vec3;
///
/// let p = rotate(Vec3::new(1.0, 0.0, 0.0), 0.0, std::f32::consts::FRAC_PI_2);
/// assert!(p.x.abs() < 1e-6);
/// assert!((p.y - 1.0).abs() < 1e-6);
/// ```
pub fn rotate(point: Vec3, a: f32, b: f32) -> Vec3 {
    RotationAxes::default().rotate(point, RotationState::new(a, b))
}

/// Rotate a normal with the same transform as [`rotate`].
///
/// Pure rotations preserve length and angles, so normals need no
/// inverse-transpose treatment.
pub fn rotate_normal(normal: Vec3, a: f32, b: f32) -> Vec3 {
    rotate(normal, a, b)
}
