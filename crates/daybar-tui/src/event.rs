//! Key bindings for the daybar TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key action that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    AddMarker,
    RemoveMarker,
    SwitchFocus,
    Up,
    Down,
    Left,
    Right,
    FastLeft,
    FastRight,
    EditProblem,
    EditSolution,
    ToggleLunch,
    ToggleFlag,
    TogglePolicy,
    Export,
    Select,
    Back,
    None,
}

/// Convert a key event to an action.
///
/// Only used outside of text editing; while editing, keys go to the editor.
pub fn key_to_action(key: KeyEvent) -> Action {
    // Check for Ctrl+C first
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    // Ctrl+E exports, like the copy button
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('e') {
        return Action::Export;
    }

    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('a' | '+') => Action::AddMarker,
        KeyCode::Char('x' | '-') => Action::RemoveMarker,
        KeyCode::Char('p') => Action::EditProblem,
        KeyCode::Char('s') => Action::EditSolution,
        KeyCode::Char('b') => Action::ToggleLunch,
        KeyCode::Char('f') => Action::ToggleFlag,
        KeyCode::Char('v') => Action::TogglePolicy,
        KeyCode::Char('y') => Action::Export,
        KeyCode::Tab | KeyCode::BackTab => Action::SwitchFocus,
        KeyCode::Esc => Action::Back,
        KeyCode::Enter => Action::Select,
        KeyCode::Up | KeyCode::Char('k') => Action::Up,
        KeyCode::Down | KeyCode::Char('j') => Action::Down,
        KeyCode::Left if shift => Action::FastLeft,
        KeyCode::Right if shift => Action::FastRight,
        KeyCode::Char('H') => Action::FastLeft,
        KeyCode::Char('L') => Action::FastRight,
        KeyCode::Left | KeyCode::Char('h') => Action::Left,
        KeyCode::Right | KeyCode::Char('l') => Action::Right,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(key_to_action(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(
            key_to_action(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
    }

    #[test]
    fn test_marker_keys() {
        assert_eq!(key_to_action(key(KeyCode::Char('a'))), Action::AddMarker);
        assert_eq!(key_to_action(key(KeyCode::Char('+'))), Action::AddMarker);
        assert_eq!(key_to_action(key(KeyCode::Char('x'))), Action::RemoveMarker);
    }

    #[test]
    fn test_arrow_keys_with_shift() {
        assert_eq!(key_to_action(key(KeyCode::Left)), Action::Left);
        assert_eq!(
            key_to_action(KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT)),
            Action::FastRight
        );
        assert_eq!(key_to_action(key(KeyCode::Char('H'))), Action::FastLeft);
        assert_eq!(key_to_action(key(KeyCode::Char('l'))), Action::Right);
    }

    #[test]
    fn test_export_keys() {
        assert_eq!(key_to_action(key(KeyCode::Char('y'))), Action::Export);
        assert_eq!(
            key_to_action(KeyEvent::new(KeyCode::Char('e'), KeyModifiers::CONTROL)),
            Action::Export
        );
    }

    #[test]
    fn test_unbound_key() {
        assert_eq!(key_to_action(key(KeyCode::Char('z'))), Action::None);
    }
}
