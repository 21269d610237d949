//! Key mapping from terminal events to viewer actions.

use crate::types::ViewerAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to viewer actions.
pub fn handle_key_event(key: KeyEvent) -> Option<ViewerAction> {
    match key.code {
        KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
            Some(ViewerAction::TogglePause)
        }
        KeyCode::Tab | KeyCode::Char('n') | KeyCode::Char('N') => Some(ViewerAction::NextScene),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(ViewerAction::ResetRotation),
        _ => None,
    }
}

/// Check if key should end the run.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
