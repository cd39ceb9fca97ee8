//! Key event classification.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::Route;

/// Result of event handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Continue processing.
    Continue,
    /// Exit application.
    Exit,
}

/// Shortcuts available on every screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalCommand {
    /// Ctrl+C or Ctrl+Q.
    Quit,
    /// Ctrl+F or Ctrl+T while logged in.
    Navigate(Route),
    /// Ctrl+L while logged in.
    Logout,
    /// F2 closes the current toast.
    DismissNotification,
}

/// Static key bindings.
pub struct EventHandler;

impl EventHandler {
    /// Crossterm reports releases on some platforms; only presses count.
    #[must_use]
    pub fn is_press(key: &KeyEvent) -> bool {
        key.kind == KeyEventKind::Press
    }

    /// Checks if key is a quit event.
    #[must_use]
    pub fn is_quit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('c' | 'q'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        )
    }

    /// Checks if key is a submit event.
    #[must_use]
    pub fn is_submit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Enter,
                ..
            }
        )
    }

    /// `Alt+<c>`, case-insensitive.
    #[must_use]
    pub fn is_alt(key: &KeyEvent, c: char) -> bool {
        key.modifiers.contains(KeyModifiers::ALT)
            && matches!(key.code, KeyCode::Char(k) if k.eq_ignore_ascii_case(&c))
    }

    /// Resolves a screen-independent shortcut.
    #[must_use]
    pub fn global_command(key: &KeyEvent, logged_in: bool) -> Option<GlobalCommand> {
        if Self::is_quit_event(key) {
            return Some(GlobalCommand::Quit);
        }
        if key.code == KeyCode::F(2) {
            return Some(GlobalCommand::DismissNotification);
        }
        if !logged_in || !key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }
        match key.code {
            KeyCode::Char('f') => Some(GlobalCommand::Navigate(Route::SearchClient)),
            KeyCode::Char('t') => Some(GlobalCommand::Navigate(Route::ClientContacted)),
            KeyCode::Char('l') => Some(GlobalCommand::Logout),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn make_key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new_with_kind(code, modifiers, KeyEventKind::Press)
    }

    #[test]
    fn test_quit_events() {
        assert!(EventHandler::is_quit_event(&make_key_event(
            KeyCode::Char('q'),
            KeyModifiers::CONTROL
        )));
        assert!(EventHandler::is_quit_event(&make_key_event(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!EventHandler::is_quit_event(&make_key_event(
            KeyCode::Char('q'),
            KeyModifiers::NONE
        )));
        assert!(!EventHandler::is_quit_event(&make_key_event(
            KeyCode::Esc,
            KeyModifiers::NONE
        )));
    }

    #[test]
    fn test_submit_event() {
        assert!(EventHandler::is_submit_event(&make_key_event(
            KeyCode::Enter,
            KeyModifiers::NONE
        )));
        assert!(!EventHandler::is_submit_event(&make_key_event(
            KeyCode::Char('a'),
            KeyModifiers::NONE
        )));
    }

    #[test]
    fn test_alt_shortcut() {
        assert!(EventHandler::is_alt(
            &make_key_event(KeyCode::Char('S'), KeyModifiers::ALT),
            's'
        ));
        assert!(!EventHandler::is_alt(
            &make_key_event(KeyCode::Char('s'), KeyModifiers::NONE),
            's'
        ));
    }

    #[test_case('f', true, Some(GlobalCommand::Navigate(Route::SearchClient)) ; "search")]
    #[test_case('t', true, Some(GlobalCommand::Navigate(Route::ClientContacted)) ; "contacted")]
    #[test_case('l', true, Some(GlobalCommand::Logout) ; "logout")]
    #[test_case('l', false, None ; "logout needs login")]
    #[test_case('x', true, None ; "unbound")]
    fn test_global_commands(c: char, logged_in: bool, expected: Option<GlobalCommand>) {
        let key = make_key_event(KeyCode::Char(c), KeyModifiers::CONTROL);
        assert_eq!(EventHandler::global_command(&key, logged_in), expected);
    }
}
