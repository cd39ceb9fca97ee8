//! Login screen.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::application::dto::LoginRequest;
use crate::presentation::widgets::{TextInput, Toggle};

/// Whether the form is editable, waiting or showing an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum LoginState {
    Input,
    Validating,
    Error,
}

/// Focused control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum LoginFocus {
    Email,
    Password,
    Remember,
}

/// What the app should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginAction {
    /// Nothing to do.
    None,
    /// Credentials are ready in [`LoginScreen::request`].
    Submit,
}

/// Login screen UI.
pub struct LoginScreen {
    email_input: TextInput,
    password_input: TextInput,
    focus: LoginFocus,
    state: LoginState,
    error_message: Option<String>,
    persist_session: bool,
}

impl LoginScreen {
    /// Creates new login screen.
    #[must_use]
    pub fn new() -> Self {
        let mut screen = Self {
            email_input: TextInput::new(" Email ").placeholder("operator@clinic.com"),
            password_input: TextInput::new(" Password ").password(),
            focus: LoginFocus::Email,
            state: LoginState::Input,
            error_message: None,
            persist_session: true,
        };
        screen.apply_focus();
        screen
    }

    /// Returns current state.
    #[must_use]
    pub const fn state(&self) -> LoginState {
        self.state
    }

    /// Focused control.
    #[must_use]
    pub const fn focus(&self) -> LoginFocus {
        self.focus
    }

    /// Builds the request from the entered values. Validation happens in the use case.
    #[must_use]
    pub fn request(&self) -> LoginRequest {
        let request = LoginRequest::new(self.email_input.value(), self.password_input.value());
        if self.persist_session {
            request
        } else {
            request.without_persistence()
        }
    }

    /// Sets validating state.
    pub fn set_validating(&mut self) {
        self.state = LoginState::Validating;
        self.error_message = None;
    }

    /// Sets error state. The password is cleared.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.state = LoginState::Error;
        self.error_message = Some(message.into());
        self.password_input.clear();
    }

    /// Resets to input state.
    pub fn reset(&mut self) {
        self.state = LoginState::Input;
        self.error_message = None;
    }

    fn apply_focus(&mut self) {
        self.email_input.set_focused(self.focus == LoginFocus::Email);
        self.password_input
            .set_focused(self.focus == LoginFocus::Password);
    }

    fn cycle_focus(&mut self, forward: bool) {
        self.focus = match (self.focus, forward) {
            (LoginFocus::Email, true) | (LoginFocus::Remember, false) => LoginFocus::Password,
            (LoginFocus::Password, true) | (LoginFocus::Email, false) => LoginFocus::Remember,
            (LoginFocus::Remember, true) | (LoginFocus::Password, false) => LoginFocus::Email,
        };
        self.apply_focus();
    }

    /// Handles key event, returns action.
    pub fn handle_key(&mut self, key: KeyEvent) -> LoginAction {
        if self.state == LoginState::Validating {
            return LoginAction::None;
        }

        if self.state == LoginState::Error {
            self.reset();
        }

        match key.code {
            KeyCode::Enter => return LoginAction::Submit,
            KeyCode::Tab | KeyCode::Down => self.cycle_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.cycle_focus(false),
            KeyCode::Char(' ') if self.focus == LoginFocus::Remember => {
                self.persist_session = !self.persist_session;
            }
            _ => match self.focus {
                LoginFocus::Email => {
                    self.email_input.handle_key(key);
                }
                LoginFocus::Password => {
                    self.password_input.handle_key(key);
                }
                LoginFocus::Remember => {}
            },
        }

        LoginAction::None
    }

    fn render_inner(&self, area: Rect, buf: &mut Buffer) {
        let vertical = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(14),
            Constraint::Fill(1),
        ]);
        let [_, center, _] = vertical.areas(area);

        let horizontal = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Min(50),
            Constraint::Fill(1),
        ]);
        let [_, content_area, _] = horizontal.areas(center);

        Clear.render(content_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Call Center Login ");

        let inner = block.inner(content_area);
        block.render(content_area, buf);

        let [title_area, _, email_area, password_area, _, remember_area, _, status_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(inner);

        Paragraph::new("Sign in with your call-center account")
            .style(Style::default().fg(Color::White))
            .render(title_area, buf);

        (&self.email_input).render(email_area, buf);
        (&self.password_input).render(password_area, buf);

        Toggle::checkbox("Keep me signed in", self.persist_session)
            .focused(self.focus == LoginFocus::Remember)
            .render(remember_area, buf);

        let status = match self.state {
            LoginState::Input => Line::from(vec![
                Span::styled("Enter: Login", Style::default().fg(Color::DarkGray)),
                Span::raw(" | "),
                Span::styled("Tab: Next field", Style::default().fg(Color::DarkGray)),
                Span::raw(" | "),
                Span::styled("Ctrl+Q: Quit", Style::default().fg(Color::DarkGray)),
            ]),
            LoginState::Validating => Line::from(Span::styled(
                "Signing in...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )),
            LoginState::Error => {
                let msg = self.error_message.as_deref().unwrap_or("Unknown error");
                Line::from(Span::styled(msg, Style::default().fg(Color::Red)))
            }
        };
        Paragraph::new(status).render(status_area, buf);
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &LoginScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.render_inner(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(screen: &mut LoginScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_initial_state() {
        let screen = LoginScreen::new();
        assert_eq!(screen.state(), LoginState::Input);
        assert_eq!(screen.focus(), LoginFocus::Email);
        assert!(screen.request().persist_session);
    }

    #[test]
    fn test_typing_fills_focused_field() {
        let mut screen = LoginScreen::new();
        type_text(&mut screen, "ops@clinic.com");
        screen.handle_key(key(KeyCode::Tab));
        type_text(&mut screen, "secret");

        let request = screen.request();
        assert_eq!(request.email, "ops@clinic.com");
        assert_eq!(request.password, "secret");
    }

    #[test]
    fn test_space_toggles_remember_only_when_focused() {
        let mut screen = LoginScreen::new();
        screen.handle_key(key(KeyCode::BackTab));
        assert_eq!(screen.focus(), LoginFocus::Remember);

        screen.handle_key(key(KeyCode::Char(' ')));
        assert!(!screen.request().persist_session);
    }

    #[test]
    fn test_enter_submits_even_when_empty() {
        let mut screen = LoginScreen::new();
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), LoginAction::Submit);
        assert!(screen.request().validate().is_err());
    }

    #[test]
    fn test_keys_ignored_while_validating() {
        let mut screen = LoginScreen::new();
        screen.set_validating();
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), LoginAction::None);
    }

    #[test]
    fn test_error_clears_password() {
        let mut screen = LoginScreen::new();
        screen.handle_key(key(KeyCode::Tab));
        type_text(&mut screen, "secret");

        screen.set_error("Invalid Email or Password");

        assert_eq!(screen.state(), LoginState::Error);
        assert!(screen.request().password.is_empty());
    }
}
