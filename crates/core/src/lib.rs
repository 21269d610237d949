//! Core rasterization module - pure, deterministic, and testable
//!
//! This module turns a scene description and a pair of rotation angles into a
//! finished character grid. It has **zero dependencies** on terminals, clocks,
//! or I/O, making it:
//!
//! - **Deterministic**: Same scene and angles produce identical frames
//! - **Testable**: Every stage is a plain function or a small value type
//! - **Portable**: The grid can be printed anywhere (terminal, file, test)
//! - **Fast**: No heap allocation per frame once the buffer exists
//!
//! # Module Structure
//!
//! - [`rotation`]: two-angle rotation of points and normals
//! - [`projection`]: perspective divide to integer cells plus closeness
//! - [`buffer`]: glyph + closeness grid with a single occlusion-tested write
//! - [`shade`]: normal/light alignment to glyph ramp index
//! - [`surface`]: parametric patches and the surface rasterizer
//! - [`wireframe`]: vertex/edge meshes and the line rasterizer
//! - [`scene`]: scene descriptors and the built-in cube, donut, pyramid, quad
//! - [`frame`]: the per-frame orchestrator
//!
//! # Example
//!
//! ```
//! use tui_spin_core::{FrameRenderer, Scene};
//!
//! let scene = Scene::cube();
//! let mut renderer = FrameRenderer::for_scene(&scene);
//! let mut rotation = scene.initial_rotation();
//!
//! let (frame, next) = renderer.render_frame(&scene, rotation);
//! assert_eq!(frame.width(), 80);
//! assert_eq!(frame.height(), 22);
//! // The near face points halfway toward the light.
//! assert!(frame.to_string().contains('!'));
//! rotation = next;
//! assert!(rotation.a > 0.0);
//! ```
//!
//! # Occlusion
//!
//! Every sample carries `closeness = 1 / (z + camera_offset)`. A cell keeps
//! the glyph of the sample with the strictly greatest closeness; ties keep the
//! first writer. Surfaces and wireframes may be mixed in one scene.

pub mod buffer;
pub mod frame;
pub mod projection;
pub mod rotation;
pub mod scene;
pub mod shade;
pub mod surface;
pub mod wireframe;

pub use tui_spin_types as types;

// Re-export commonly used types for convenience
pub use buffer::{FrameBuffer, Snapshot};
pub use frame::{FrameRenderer, FrameStats};
pub use projection::{project, Projection, ScreenSample};
pub use rotation::{rotate, rotate_normal, Axis, RotationAxes, Rotor};
pub use scene::Scene;
pub use shade::{level_to_index, luminance_to_index, shade, GlyphRamp};
pub use surface::{LuminanceFn, Patch, Shading, Span, Surface, SurfaceFn, SurfaceRasterizer};
pub use wireframe::{draw_line, Wireframe, WireframeRasterizer};
