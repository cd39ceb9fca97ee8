//! Session storage backed by a TOML file in the config directory.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::entities::Session;
use crate::domain::errors::{AuthError, SecretError};
use crate::domain::ports::SessionStoragePort;
use crate::infrastructure::config::StorageManager;

const BACKEND: &str = "session file";

/// Session file storage. Writes go through a temp file and an atomic rename.
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    /// Creates storage backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage at the default session path of `manager`.
    #[must_use]
    pub fn from_manager(manager: &StorageManager) -> Self {
        Self::new(manager.session_path())
    }

    /// Location of the session file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStoragePort for FileSessionStorage {
    async fn load_session(&self) -> Result<Option<Session>, AuthError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No session file");
                return Ok(None);
            }
            Err(e) => {
                return Err(SecretError::Read {
                    backend: BACKEND,
                    reason: e.to_string(),
                }
                .into());
            }
        };

        match toml::from_str::<Session>(&content) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(error = %e, "Session file is unreadable, ignoring it");
                Ok(None)
            }
        }
    }

    async fn store_session(&self, session: &Session) -> Result<(), AuthError> {
        StorageManager::save_to_file(&self.path, session).map_err(|e| {
            warn!(error = %e, "Failed to write session file");
            SecretError::Write {
                backend: BACKEND,
                reason: e.to_string(),
            }
        })?;
        debug!(path = %self.path.display(), "Session stored");
        Ok(())
    }

    /// The file outlives the process; the stale copy is removed and the
    /// session refused.
    async fn hold_session(&self, _session: &Session) -> Result<(), AuthError> {
        self.clear_session().await?;
        Err(AuthError::storage_failed(
            "session file cannot hold a session for this run only",
        ))
    }

    async fn clear_session(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SecretError::Remove {
                backend: BACKEND,
                reason: e.to_string(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AuthToken, TokenPair};
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    fn session() -> Session {
        Session::issue(
            TokenPair::new(
                AuthToken::new_unchecked("access-token-value"),
                AuthToken::new_unchecked("refresh-token-value"),
            ),
            Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_round_trip_and_clear() {
        let dir = tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("session.toml"));

        assert_eq!(storage.load_session().await.unwrap(), None);

        storage.store_session(&session()).await.unwrap();
        assert_eq!(storage.load_session().await.unwrap(), Some(session()));

        storage.clear_session().await.unwrap();
        assert!(!storage.path().exists());
        storage.clear_session().await.unwrap();
    }

    #[tokio::test]
    async fn test_hold_refuses_and_removes_stored_session() {
        let dir = tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("session.toml"));
        storage.store_session(&session()).await.unwrap();

        let result = storage.hold_session(&session()).await;

        assert!(matches!(result, Err(AuthError::SessionStorageFailed { .. })));
        assert!(!storage.path().exists());
        assert_eq!(storage.load_session().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_as_no_session() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.toml");
        fs::write(&path, "access_token = [").unwrap();

        let storage = FileSessionStorage::new(&path);

        assert_eq!(storage.load_session().await.unwrap(), None);
    }
}
