//! Terminal input module.
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::ViewerAction`]s for the viewer
//! loop and decides which keys end the run.

pub mod map;

pub use tui_spin_types as types;

pub use map::{handle_key_event, should_quit};
