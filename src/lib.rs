//! TUI Spin (workspace facade crate).
//!
//! Re-exports the member crates as `tui_spin::{core,input,term,types}` and
//! adds the run [`config`] layer shared by the binary and the tests.

pub mod config;

pub use tui_spin_core as core;
pub use tui_spin_input as input;
pub use tui_spin_term as term;
pub use tui_spin_types as types;
