//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the renderer.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (rasterization core, terminal output, configuration).
//!
//! # Screen Defaults
//!
//! The reference terminal layout:
//!
//! - **Width**: 80 columns
//! - **Height**: 22 rows
//! - **Projection scale**: 30 horizontal, 15 vertical (compensates for tall glyphs)
//! - **Camera offset**: 3 units along the depth axis
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 10 | Delay between frames (~100 FPS) |
//! | `RUN_DURATION_SECS` | 10 | Total run length before the host stops |
//!
//! # Examples
//!
//! ```
//! use tui_spin_types::{RotationState, AngleSteps, SceneKind, Vec3, GLYPH_RAMP};
//!
//! let state = RotationState::default();
//! let next = state.advance(AngleSteps::new(0.03, 0.02));
//! assert!((next.a - 0.03).abs() < 1e-6);
//!
//! assert_eq!(SceneKind::from_str("Donut"), Some(SceneKind::Donut));
//! assert_eq!(Vec3::new(3.0, 0.0, 4.0).length(), 5.0);
//! assert_eq!(GLYPH_RAMP.chars().count(), 12);
//! ```

use std::ops::{Add, Mul, Neg, Sub};

/// Default grid width in columns (80)
pub const SCREEN_WIDTH: u16 = 80;

/// Default grid height in rows (22)
pub const SCREEN_HEIGHT: u16 = 22;

/// Horizontal projection scale (30)
pub const WIDTH_SCALE: f32 = 30.0;

/// Vertical projection scale (15)
pub const HEIGHT_SCALE: f32 = 15.0;

/// Depth offset that keeps unit-radius geometry in front of the camera
pub const CAMERA_OFFSET: f32 = 3.0;

/// Brightness ramp, darkest to brightest.
pub const GLYPH_RAMP: &str = ".,-~:;=!*#$@";

/// Glyph written into cells no sample reached.
pub const BLANK: char = ' ';

/// Default delay between frames in milliseconds
pub const FRAME_MS: u64 = 10;

/// Default total run length in seconds
pub const RUN_DURATION_SECS: u64 = 10;

/// Default foreground color (pure green)
pub const DEFAULT_COLOR: Rgb = Rgb::new(0x00, 0xFF, 0x00);

/// A 3D point or direction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Scale to unit length.
    ///
    /// A zero vector is returned unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_spin_types::Vec3;
    ///
    /// let n = Vec3::new(0.0, 1.0, -1.0).normalized();
    /// assert!((n.length() - 1.0).abs() < 1e-6);
    /// assert_eq!(Vec3::ZERO.normalized(), Vec3::ZERO);
    /// ```
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            return self;
        }
        self * (1.0 / len)
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpack a `0xRRGGBB` integer.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// Parse `#RRGGBB`, `0xRRGGBB` or bare `RRGGBB` (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_spin_types::Rgb;
    ///
    /// assert_eq!(Rgb::parse("#00FF00"), Some(Rgb::new(0, 255, 0)));
    /// assert_eq!(Rgb::parse("0x102030"), Some(Rgb::new(0x10, 0x20, 0x30)));
    /// assert_eq!(Rgb::parse("green"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let digits = s
            .strip_prefix('#')
            .or_else(|| s.strip_prefix("0x"))
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::from_hex)
    }
}

/// Rotation angles for the current frame.
///
/// Angles only ever grow; periodicity of sin/cos handles wrap-around.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationState {
    pub a: f32,
    pub b: f32,
}

impl RotationState {
    pub const fn new(a: f32, b: f32) -> Self {
        Self { a, b }
    }

    /// Return the state for the next frame.
    pub fn advance(self, steps: AngleSteps) -> Self {
        Self {
            a: self.a + steps.a,
            b: self.b + steps.b,
        }
    }
}

/// Fixed per-frame angle increments.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AngleSteps {
    pub a: f32,
    pub b: f32,
}

impl AngleSteps {
    pub const fn new(a: f32, b: f32) -> Self {
        Self { a, b }
    }
}

/// Built-in scenes
///
/// - **Cube**: six shaded faces with true normals
/// - **Donut**: torus lit with a closed-form luminance formula
/// - **Pyramid**: square pyramid drawn as a wireframe
/// - **Quad**: a single shaded face (diagnostics)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneKind {
    Cube,
    Donut,
    Pyramid,
    Quad,
}

impl SceneKind {
    /// Cycle order used by the "next scene" key.
    pub const ALL: [SceneKind; 4] = [
        SceneKind::Cube,
        SceneKind::Donut,
        SceneKind::Pyramid,
        SceneKind::Quad,
    ];

    /// Parse scene kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_spin_types::SceneKind;
    ///
    /// assert_eq!(SceneKind::from_str("cube"), Some(SceneKind::Cube));
    /// assert_eq!(SceneKind::from_str("TORUS"), Some(SceneKind::Donut));
    /// assert_eq!(SceneKind::from_str("teapot"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cube" => Some(SceneKind::Cube),
            "donut" | "torus" => Some(SceneKind::Donut),
            "pyramid" => Some(SceneKind::Pyramid),
            "quad" => Some(SceneKind::Quad),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SceneKind::Cube => "cube",
            SceneKind::Donut => "donut",
            SceneKind::Pyramid => "pyramid",
            SceneKind::Quad => "quad",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            SceneKind::Cube => SceneKind::Donut,
            SceneKind::Donut => SceneKind::Pyramid,
            SceneKind::Pyramid => SceneKind::Quad,
            SceneKind::Quad => SceneKind::Cube,
        }
    }
}

/// Viewer actions produced by keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerAction {
    /// Freeze or resume angle advancement
    TogglePause,
    /// Switch to the next built-in scene
    NextScene,
    /// Reset both angles to zero
    ResetRotation,
}
