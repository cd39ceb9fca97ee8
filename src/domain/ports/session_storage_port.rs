//! Long-lived session storage port.

use async_trait::async_trait;

use crate::domain::entities::Session;
use crate::domain::errors::AuthError;

/// Port for persisting the authenticated session across runs.
#[async_trait]
pub trait SessionStoragePort: Send + Sync {
    /// Retrieves the stored session. Unreadable data counts as no session.
    async fn load_session(&self) -> Result<Option<Session>, AuthError>;

    /// Replaces the stored session.
    async fn store_session(&self, session: &Session) -> Result<(), AuthError>;

    /// Removes the stored session. Succeeds when nothing is stored.
    async fn clear_session(&self) -> Result<(), AuthError>;

    /// Keeps the session for this run only and drops any persisted one.
    /// Backends without a volatile layer return an error.
    async fn hold_session(&self, session: &Session) -> Result<(), AuthError>;

    /// Replaces the session after a refresh, keeping the persistence choice
    /// made at login.
    async fn replace_session(&self, session: &Session) -> Result<(), AuthError> {
        self.store_session(session).await
    }

    /// Checks if a session exists.
    async fn has_session(&self) -> Result<bool, AuthError> {
        Ok(self.load_session().await?.is_some())
    }
}
