//! Authentication port definition.

use async_trait::async_trait;

use crate::domain::entities::{AuthToken, TokenPair};
use crate::domain::errors::AuthError;

/// Port for the backend token endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthPort: Send + Sync {
    /// Exchanges credentials for a token pair.
    async fn obtain_token(&self, email: &str, password: &str) -> Result<TokenPair, AuthError>;

    /// Exchanges a refresh token for a new pair.
    async fn refresh_token(&self, refresh: &AuthToken) -> Result<TokenPair, AuthError>;
}

/// Test doubles for [`AuthPort`].
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Scripted auth port that counts its calls.
    pub struct StubAuthPort {
        should_succeed: Arc<AtomicBool>,
        obtain_calls: AtomicUsize,
        refresh_calls: AtomicUsize,
    }

    impl StubAuthPort {
        /// Creates new stub.
        pub fn new(should_succeed: bool) -> Self {
            Self {
                should_succeed: Arc::new(AtomicBool::new(should_succeed)),
                obtain_calls: AtomicUsize::new(0),
                refresh_calls: AtomicUsize::new(0),
            }
        }

        /// Sets success behavior.
        pub fn set_should_succeed(&self, value: bool) {
            self.should_succeed.store(value, Ordering::SeqCst);
        }

        /// Number of credential exchanges.
        pub fn obtain_calls(&self) -> usize {
            self.obtain_calls.load(Ordering::SeqCst)
        }

        /// Number of refreshes.
        pub fn refresh_calls(&self) -> usize {
            self.refresh_calls.load(Ordering::SeqCst)
        }

        fn pair(prefix: &str) -> TokenPair {
            TokenPair::new(
                AuthToken::new_unchecked(format!("{prefix}-access")),
                AuthToken::new_unchecked(format!("{prefix}-refresh")),
            )
        }
    }

    #[async_trait]
    impl AuthPort for StubAuthPort {
        async fn obtain_token(&self, _email: &str, _password: &str) -> Result<TokenPair, AuthError> {
            self.obtain_calls.fetch_add(1, Ordering::SeqCst);
            if self.should_succeed.load(Ordering::SeqCst) {
                Ok(Self::pair("login"))
            } else {
                Err(AuthError::rejected("No active account found with the given credentials"))
            }
        }

        async fn refresh_token(&self, _refresh: &AuthToken) -> Result<TokenPair, AuthError> {
            self.refresh_calls.fetch_add(1, Ordering::SeqCst);
            if self.should_succeed.load(Ordering::SeqCst) {
                Ok(Self::pair("refreshed"))
            } else {
                Err(AuthError::rejected("Token is invalid or expired"))
            }
        }
    }
}
