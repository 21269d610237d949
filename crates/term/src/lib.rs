//! Terminal output module.
//!
//! This is the host side of the renderer: it takes finished glyph grids from
//! `core` and puts them on a terminal. It intentionally avoids ratatui
//! widgets/layout and instead renders into a simple cell buffer that can be
//! flushed to a terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and free of I/O and clocks
//! - Redraw only the cells that changed between frames
//! - Keep frame pacing testable without a real clock

pub mod fb;
pub mod frame_view;
pub mod pacer;
pub mod renderer;

pub use tui_spin_core as core;
pub use tui_spin_types as types;

pub use fb::{Cell, CellBuffer, CellStyle, Rgb};
pub use frame_view::{AnchorY, FrameView, StatusView, Viewport};
pub use pacer::FramePacer;
pub use renderer::{
    encode_diff_into, encode_full_into, encode_plain_into, PlainRenderer, TerminalRenderer,
};
