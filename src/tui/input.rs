//! Input handling for TUI
//!
//! Maps keyboard input to application actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Something the user asked the application to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start or stop polling
    Toggle,
    /// Select the next output formatter
    CycleFormatter,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    /// Jump back to the newest result
    Top,
    Quit,
}

/// Translate a key press into an action
pub fn action_for(key: &KeyEvent) -> Option<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('s') | KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Toggle),
        KeyCode::Char('f') | KeyCode::Tab => Some(Action::CycleFormatter),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollDown),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::Home | KeyCode::Char('g') => Some(Action::Top),
        _ => None,
    }
}
