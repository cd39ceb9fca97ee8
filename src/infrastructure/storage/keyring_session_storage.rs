//! Keyring-based session storage.

use async_trait::async_trait;
use keyring::Entry;
use tracing::{debug, warn};

use crate::domain::entities::Session;
use crate::domain::errors::{AuthError, SecretError};
use crate::domain::ports::SessionStoragePort;

const KEYRING_SERVICE: &str = "vetdesk";
const KEYRING_USER: &str = "session";
const BACKEND: &str = "keyring";

/// Stores the session as one JSON secret in the system keyring.
pub struct KeyringSessionStorage {
    service: String,
    user: String,
}

impl KeyringSessionStorage {
    /// Creates new storage with default names.
    #[must_use]
    pub fn new() -> Self {
        Self {
            service: KEYRING_SERVICE.to_string(),
            user: KEYRING_USER.to_string(),
        }
    }

    /// Creates storage with custom names.
    #[must_use]
    pub fn with_names(service: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            user: user.into(),
        }
    }

    fn entry(&self) -> Result<Entry, SecretError> {
        Entry::new(&self.service, &self.user).map_err(|e| SecretError::BackendUnavailable {
            backend: BACKEND,
            reason: e.to_string(),
        })
    }
}

impl Default for KeyringSessionStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStoragePort for KeyringSessionStorage {
    async fn load_session(&self) -> Result<Option<Session>, AuthError> {
        debug!(service = %self.service, "Retrieving session from keyring");

        let entry = self.entry()?;

        match entry.get_password() {
            Ok(raw) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => {
                    debug!("Session found in keyring");
                    Ok(Some(session))
                }
                Err(e) => {
                    warn!(error = %e, "Stored session is unreadable, ignoring it");
                    Ok(None)
                }
            },
            Err(keyring::Error::NoEntry) => {
                debug!("No session stored in keyring");
                Ok(None)
            }
            Err(e) => {
                warn!(error = %e, "Failed to retrieve session from keyring");
                Err(SecretError::Read {
                    backend: BACKEND,
                    reason: e.to_string(),
                }
                .into())
            }
        }
    }

    async fn store_session(&self, session: &Session) -> Result<(), AuthError> {
        debug!(service = %self.service, "Storing session in keyring");

        let raw = serde_json::to_string(session)
            .map_err(|e| AuthError::storage_failed(format!("failed to encode session: {e}")))?;
        let entry = self.entry()?;

        entry.set_password(&raw).map_err(|e| {
            warn!(error = %e, "Failed to store session in keyring");
            SecretError::Write {
                backend: BACKEND,
                reason: e.to_string(),
            }
        })?;

        debug!("Session stored successfully");
        Ok(())
    }

    /// The keyring entry outlives the process; any stored session is removed
    /// and the new one refused.
    async fn hold_session(&self, _session: &Session) -> Result<(), AuthError> {
        self.clear_session().await?;
        Err(AuthError::storage_failed(
            "keyring cannot hold a session for this run only",
        ))
    }

    async fn clear_session(&self) -> Result<(), AuthError> {
        debug!(service = %self.service, "Deleting session from keyring");

        let entry = self.entry()?;

        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => {
                warn!(error = %e, "Failed to delete session from keyring");
                Err(SecretError::Remove {
                    backend: BACKEND,
                    reason: e.to_string(),
                }
                .into())
            }
        }
    }
}
