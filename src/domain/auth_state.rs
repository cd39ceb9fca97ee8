//! Authentication flag and its reducer.

/// Whether the operator is logged in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthState {
    /// True after a successful login or a restored session.
    pub logged_in: bool,
}

/// Transitions of [`AuthState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    /// Marks the operator as logged in.
    Authorize,
    /// Clears the logged in flag.
    Logout,
}

impl AuthState {
    /// Initial state from whether a session was found in storage.
    #[must_use]
    pub const fn from_stored_session(present: bool) -> Self {
        Self { logged_in: present }
    }
}

/// Applies an action. Pure; the previous state is not consulted.
#[must_use]
pub const fn reduce(_state: AuthState, action: AuthAction) -> AuthState {
    match action {
        AuthAction::Authorize => AuthState { logged_in: true },
        AuthAction::Logout => AuthState { logged_in: false },
    }
}
