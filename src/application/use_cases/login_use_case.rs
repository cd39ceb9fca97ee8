//! Login and logout use cases.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::application::dto::{LoginRequest, LoginResponse};
use crate::domain::entities::Session;
use crate::domain::errors::AuthError;
use crate::domain::ports::{AuthPort, SessionStoragePort};

/// Handles operator authentication workflow.
#[derive(Clone)]
pub struct LoginUseCase {
    auth_port: Arc<dyn AuthPort>,
    storage_port: Arc<dyn SessionStoragePort>,
}

impl LoginUseCase {
    /// Creates new login use case.
    #[must_use]
    pub const fn new(
        auth_port: Arc<dyn AuthPort>,
        storage_port: Arc<dyn SessionStoragePort>,
    ) -> Self {
        Self {
            auth_port,
            storage_port,
        }
    }

    /// Executes login with provided request.
    ///
    /// # Errors
    /// Returns error if a field is empty or the credentials are rejected.
    pub async fn execute(&self, request: LoginRequest) -> Result<LoginResponse, AuthError> {
        self.execute_at(request, Utc::now()).await
    }

    /// Executes login, stamping session expiries from `now`.
    ///
    /// # Errors
    /// Returns error if a field is empty or the credentials are rejected.
    pub async fn execute_at(
        &self,
        request: LoginRequest,
        now: DateTime<Utc>,
    ) -> Result<LoginResponse, AuthError> {
        request.validate()?;
        debug!(email = %request.email, "Attempting login");

        let pair = self
            .auth_port
            .obtain_token(request.email.trim(), &request.password)
            .await
            .inspect_err(|e| warn!(error = %e, "Login failed"))?;

        let session = Session::issue(pair, now);
        info!(
            email = %request.email,
            access_expires_at = %session.access_expires_at(),
            "Successfully authenticated"
        );

        let session_persisted = if request.persist_session {
            match self.storage_port.store_session(&session).await {
                Ok(()) => {
                    info!("Session persisted");
                    true
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to persist session, keeping it for this run");
                    self.hold(&session).await?;
                    false
                }
            }
        } else {
            debug!("Session persistence disabled, keeping it for this run");
            self.hold(&session).await?;
            false
        };

        Ok(LoginResponse::new(session, session_persisted))
    }

    /// A session that cannot be kept anywhere fails the login.
    async fn hold(&self, session: &Session) -> Result<(), AuthError> {
        self.storage_port
            .hold_session(session)
            .await
            .inspect_err(|e| warn!(error = %e, "Could not keep session for this run"))
    }
}

/// Clears the stored session.
#[derive(Clone)]
pub struct LogoutUseCase {
    storage_port: Arc<dyn SessionStoragePort>,
}

impl LogoutUseCase {
    /// Creates new logout use case.
    #[must_use]
    pub const fn new(storage_port: Arc<dyn SessionStoragePort>) -> Self {
        Self { storage_port }
    }

    /// # Errors
    /// Returns error if the stored session cannot be removed.
    pub async fn execute(&self) -> Result<(), AuthError> {
        debug!("Clearing stored session");
        match self.storage_port.clear_session().await {
            Ok(()) => {
                info!("Logged out");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to clear stored session");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ValidationError;
    use crate::domain::ports::mocks::{MockSessionStorage, StubAuthPort};
    use chrono::TimeDelta;

    #[tokio::test]
    async fn test_successful_login() {
        let auth_port = Arc::new(StubAuthPort::new(true));
        let storage_port = Arc::new(MockSessionStorage::new());
        let now = Utc::now();

        let use_case = LoginUseCase::new(auth_port, storage_port.clone());
        let response = use_case
            .execute_at(LoginRequest::new("ops@clinic.com", "secret"), now)
            .await
            .unwrap();

        assert!(response.session_persisted);
        let stored = storage_port.snapshot().await.unwrap();
        assert_eq!(stored.access_token().as_str(), "login-access");
        assert_eq!(stored.access_expires_at(), now + TimeDelta::hours(12));
        assert_eq!(stored.refresh_expires_at(), now + TimeDelta::hours(24));
    }

    #[tokio::test]
    async fn test_empty_password_sends_no_request() {
        let auth_port = Arc::new(StubAuthPort::new(true));
        let storage_port = Arc::new(MockSessionStorage::new());

        let use_case = LoginUseCase::new(auth_port.clone(), storage_port);
        let result = use_case.execute(LoginRequest::new("ops@clinic.com", "")).await;

        assert!(matches!(
            result,
            Err(AuthError::Validation(ValidationError::MissingPassword))
        ));
        assert_eq!(auth_port.obtain_calls(), 0);
    }

    #[tokio::test]
    async fn test_rejected_credentials() {
        let auth_port = Arc::new(StubAuthPort::new(false));
        let storage_port = Arc::new(MockSessionStorage::new());

        let use_case = LoginUseCase::new(auth_port, storage_port.clone());
        let result = use_case.execute(LoginRequest::new("ops@clinic.com", "wrong")).await;

        assert!(matches!(result, Err(AuthError::CredentialsRejected { .. })));
        assert!(!storage_port.has_session().await.unwrap());
    }

    #[tokio::test]
    async fn test_login_without_persistence() {
        let auth_port = Arc::new(StubAuthPort::new(true));
        let storage_port = Arc::new(MockSessionStorage::new());

        let use_case = LoginUseCase::new(auth_port, storage_port.clone());
        let request = LoginRequest::new("ops@clinic.com", "secret").without_persistence();
        let response = use_case.execute(request).await.unwrap();

        assert!(!response.session_persisted);
        assert!(storage_port.snapshot().await.is_none());
        assert_eq!(storage_port.held().await, Some(response.session));
    }

    #[tokio::test]
    async fn test_login_fails_when_session_cannot_be_kept() {
        let auth_port = Arc::new(StubAuthPort::new(true));
        let storage_port = Arc::new(MockSessionStorage::persistent_only());

        let use_case = LoginUseCase::new(auth_port, storage_port.clone());
        let request = LoginRequest::new("ops@clinic.com", "secret").without_persistence();
        let result = use_case.execute(request).await;

        assert!(matches!(result, Err(AuthError::SessionStorageFailed { .. })));
        assert!(!storage_port.has_session().await.unwrap());
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let now = Utc::now();
        let storage_port = Arc::new(MockSessionStorage::new());
        let auth_port = Arc::new(StubAuthPort::new(true));
        LoginUseCase::new(auth_port, storage_port.clone())
            .execute_at(LoginRequest::new("ops@clinic.com", "secret"), now)
            .await
            .unwrap();

        LogoutUseCase::new(storage_port.clone()).execute().await.unwrap();

        assert!(storage_port.snapshot().await.is_none());
    }
}
