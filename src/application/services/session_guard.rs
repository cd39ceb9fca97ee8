//! Refresh-before-expiry check run ahead of every authenticated call.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::entities::{Session, SessionStatus};
use crate::domain::errors::AuthError;
use crate::domain::ports::{AuthPort, SessionStoragePort};

/// Result of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Access token still valid.
    Valid(Session),
    /// Access token was renewed and persisted.
    Refreshed(Session),
    /// No usable session; storage has been cleared.
    Cleared,
}

impl GuardOutcome {
    /// The session to use, unless cleared.
    #[must_use]
    pub fn into_session(self) -> Option<Session> {
        match self {
            Self::Valid(session) | Self::Refreshed(session) => Some(session),
            Self::Cleared => None,
        }
    }
}

/// Compares stored expiries with the clock and refreshes when needed.
#[derive(Clone)]
pub struct SessionGuard {
    auth_port: Arc<dyn AuthPort>,
    storage_port: Arc<dyn SessionStoragePort>,
}

impl SessionGuard {
    /// Creates a guard refreshing through `auth_port`.
    #[must_use]
    pub fn new(auth_port: Arc<dyn AuthPort>, storage_port: Arc<dyn SessionStoragePort>) -> Self {
        Self {
            auth_port,
            storage_port,
        }
    }

    /// Runs the check against the current time.
    ///
    /// # Errors
    /// Returns error if storage fails or the refresh call fails.
    pub async fn check(&self) -> Result<GuardOutcome, AuthError> {
        self.check_at(Utc::now()).await
    }

    /// Runs the check against `now`.
    ///
    /// A failed refresh leaves the stored session untouched.
    ///
    /// # Errors
    /// Returns error if storage fails or the refresh call fails.
    pub async fn check_at(&self, now: DateTime<Utc>) -> Result<GuardOutcome, AuthError> {
        let Some(session) = self.storage_port.load_session().await? else {
            debug!("No stored session");
            self.storage_port.clear_session().await?;
            return Ok(GuardOutcome::Cleared);
        };

        match session.status_at(now) {
            SessionStatus::Expired => {
                info!(
                    refresh_expires_at = %session.refresh_expires_at(),
                    "Refresh token expired, clearing session"
                );
                self.storage_port.clear_session().await?;
                Ok(GuardOutcome::Cleared)
            }
            SessionStatus::AccessExpired => {
                debug!(
                    access_expires_at = %session.access_expires_at(),
                    "Access token expired, refreshing"
                );
                let pair = self
                    .auth_port
                    .refresh_token(session.refresh_token())
                    .await
                    .inspect_err(|e| warn!(error = %e, "Token refresh failed"))?;
                let renewed = Session::issue(pair, now);
                self.storage_port.replace_session(&renewed).await?;
                info!(
                    token = %renewed.access_token(),
                    "Session refreshed"
                );
                Ok(GuardOutcome::Refreshed(renewed))
            }
            SessionStatus::Active => Ok(GuardOutcome::Valid(session)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AuthToken, TokenPair};
    use crate::domain::ports::MockAuthPort;
    use crate::domain::ports::mocks::{MockSessionStorage, StubAuthPort};
    use chrono::TimeDelta;

    fn session_with(access_offset: TimeDelta, refresh_offset: TimeDelta, now: DateTime<Utc>) -> Session {
        Session::new(
            AuthToken::new_unchecked("old-access"),
            AuthToken::new_unchecked("old-refresh"),
            now + access_offset,
            now + refresh_offset,
        )
    }

    #[tokio::test]
    async fn test_missing_session_reports_cleared() {
        let storage = Arc::new(MockSessionStorage::new());
        let auth = Arc::new(StubAuthPort::new(true));
        let guard = SessionGuard::new(auth.clone(), storage.clone());

        let outcome = guard.check().await.unwrap();

        assert_eq!(outcome, GuardOutcome::Cleared);
        assert_eq!(storage.clear_count(), 1);
        assert_eq!(auth.refresh_calls(), 0);
    }

    #[tokio::test]
    async fn test_expired_refresh_clears_regardless_of_access_expiry() {
        let now = Utc::now();
        let session = session_with(TimeDelta::hours(6), -TimeDelta::minutes(1), now);
        let storage = Arc::new(MockSessionStorage::with_session(session));
        let auth = Arc::new(StubAuthPort::new(true));
        let guard = SessionGuard::new(auth.clone(), storage.clone());

        let outcome = guard.check_at(now).await.unwrap();

        assert_eq!(outcome, GuardOutcome::Cleared);
        assert!(storage.snapshot().await.is_none());
        assert_eq!(auth.refresh_calls(), 0);
    }

    #[tokio::test]
    async fn test_expired_access_refreshes_exactly_once() {
        let now = Utc::now();
        let session = session_with(-TimeDelta::minutes(5), TimeDelta::hours(10), now);
        let storage = Arc::new(MockSessionStorage::with_session(session));

        let mut auth = MockAuthPort::new();
        auth.expect_refresh_token()
            .withf(|refresh| refresh.as_str() == "old-refresh")
            .times(1)
            .returning(|_| {
                Ok(TokenPair::new(
                    AuthToken::new_unchecked("new-access"),
                    AuthToken::new_unchecked("new-refresh"),
                ))
            });
        auth.expect_obtain_token().never();

        let guard = SessionGuard::new(Arc::new(auth), storage.clone());
        let outcome = guard.check_at(now).await.unwrap();

        assert!(matches!(outcome, GuardOutcome::Refreshed(_)));
        let stored = storage.snapshot().await.unwrap();
        assert_eq!(stored.access_token().as_str(), "new-access");
        assert_eq!(stored.access_expires_at(), now + TimeDelta::hours(12));
        assert_eq!(stored.refresh_expires_at(), now + TimeDelta::hours(24));
    }

    #[tokio::test]
    async fn test_valid_session_is_untouched() {
        let now = Utc::now();
        let session = session_with(TimeDelta::hours(1), TimeDelta::hours(2), now);
        let storage = Arc::new(MockSessionStorage::with_session(session.clone()));
        let auth = Arc::new(StubAuthPort::new(true));
        let guard = SessionGuard::new(auth.clone(), storage.clone());

        let outcome = guard.check_at(now).await.unwrap();

        assert_eq!(outcome, GuardOutcome::Valid(session));
        assert_eq!(auth.refresh_calls(), 0);
        assert_eq!(storage.clear_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_stored_session() {
        let now = Utc::now();
        let session = session_with(-TimeDelta::minutes(5), TimeDelta::hours(10), now);
        let storage = Arc::new(MockSessionStorage::with_session(session.clone()));
        let auth = Arc::new(StubAuthPort::new(false));
        let guard = SessionGuard::new(auth, storage.clone());

        let result = guard.check_at(now).await;

        assert!(matches!(result, Err(AuthError::CredentialsRejected { .. })));
        assert_eq!(storage.snapshot().await, Some(session));
    }
}
