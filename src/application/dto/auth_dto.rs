//! Authentication DTOs.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::domain::entities::Session;
use crate::domain::errors::ValidationError;

/// Login form submission. The password is wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct LoginRequest {
    /// Operator email.
    pub email: String,
    /// Operator password.
    pub password: String,
    /// Whether to persist the session.
    #[zeroize(skip)]
    pub persist_session: bool,
}

impl LoginRequest {
    /// Creates new login request.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            persist_session: true,
        }
    }

    /// Disables session persistence.
    #[must_use]
    pub fn without_persistence(mut self) -> Self {
        self.persist_session = false;
        self
    }

    /// Checks both fields are filled, email first.
    ///
    /// # Errors
    /// Returns the first missing field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingEmail);
        }
        if self.password.is_empty() {
            return Err(ValidationError::MissingPassword);
        }
        Ok(())
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .field("persist_session", &self.persist_session)
            .finish()
    }
}

/// Login response data.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    /// Newly issued session.
    pub session: Session,
    /// Whether the session was persisted.
    pub session_persisted: bool,
}

impl LoginResponse {
    /// Creates new login response.
    #[must_use]
    pub const fn new(session: Session, session_persisted: bool) -> Self {
        Self {
            session,
            session_persisted,
        }
    }
}
