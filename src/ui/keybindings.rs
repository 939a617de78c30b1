// src/ui/keybindings.rs
//! Keyboard input handling and key mappings.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Player actions derived from key events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerAction {
    TogglePause,
    VolumeUp,
    VolumeDown,
    ToggleStatus,
    Quit,
    None,
}

/// Convert a key event to a player action. Releases and repeats of
/// non-volume keys are ignored.
pub fn key_to_action(key: &KeyEvent) -> PlayerAction {
    if key.kind == KeyEventKind::Release {
        return PlayerAction::None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return PlayerAction::Quit;
    }

    let action = match key.code {
        KeyCode::Char(' ') => PlayerAction::TogglePause,
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => PlayerAction::VolumeUp,
        KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Down => PlayerAction::VolumeDown,
        KeyCode::Char('s') => PlayerAction::ToggleStatus,
        KeyCode::Char('q') | KeyCode::Esc => PlayerAction::Quit,
        _ => PlayerAction::None,
    };

    let repeatable = matches!(action, PlayerAction::VolumeUp | PlayerAction::VolumeDown);
    if key.kind == KeyEventKind::Repeat && !repeatable {
        return PlayerAction::None;
    }
    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn with_kind(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn basic_mapping() {
        assert_eq!(key_to_action(&press(KeyCode::Char(' '))), PlayerAction::TogglePause);
        assert_eq!(key_to_action(&press(KeyCode::Char('+'))), PlayerAction::VolumeUp);
        assert_eq!(key_to_action(&press(KeyCode::Down)), PlayerAction::VolumeDown);
        assert_eq!(key_to_action(&press(KeyCode::Char('s'))), PlayerAction::ToggleStatus);
        assert_eq!(key_to_action(&press(KeyCode::Esc)), PlayerAction::Quit);
        assert_eq!(key_to_action(&press(KeyCode::Char('x'))), PlayerAction::None);
    }

    #[test]
    fn ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_action(&key), PlayerAction::Quit);
    }

    #[test]
    fn releases_and_repeats() {
        assert_eq!(
            key_to_action(&with_kind(KeyCode::Char(' '), KeyEventKind::Release)),
            PlayerAction::None
        );
        assert_eq!(
            key_to_action(&with_kind(KeyCode::Char(' '), KeyEventKind::Repeat)),
            PlayerAction::None
        );
        assert_eq!(
            key_to_action(&with_kind(KeyCode::Char('+'), KeyEventKind::Repeat)),
            PlayerAction::VolumeUp
        );
    }
}
