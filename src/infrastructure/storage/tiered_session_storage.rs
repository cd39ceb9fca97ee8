//! Memory layer in front of a persistent session backend.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use crate::domain::entities::Session;
use crate::domain::errors::AuthError;
use crate::domain::ports::SessionStoragePort;

/// Serves the session from memory and writes through to `persistent` only
/// when the operator asked to stay signed in.
pub struct TieredSessionStorage {
    persistent: Arc<dyn SessionStoragePort>,
    memory: RwLock<Option<Session>>,
    durable: AtomicBool,
}

impl TieredSessionStorage {
    /// Wraps `persistent` with an in-memory layer for sessions kept for this run only.
    #[must_use]
    pub fn new(persistent: Arc<dyn SessionStoragePort>) -> Self {
        Self {
            persistent,
            memory: RwLock::new(None),
            durable: AtomicBool::new(false),
        }
    }

    /// Whether the current session is written to the persistent backend.
    #[must_use]
    pub fn is_durable(&self) -> bool {
        self.durable.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionStoragePort for TieredSessionStorage {
    async fn load_session(&self) -> Result<Option<Session>, AuthError> {
        if let Some(session) = self.memory.read().clone() {
            return Ok(Some(session));
        }
        let loaded = self.persistent.load_session().await?;
        if let Some(session) = &loaded {
            debug!("Session loaded from persistent storage");
            *self.memory.write() = Some(session.clone());
            self.durable.store(true, Ordering::SeqCst);
        }
        Ok(loaded)
    }

    async fn store_session(&self, session: &Session) -> Result<(), AuthError> {
        *self.memory.write() = Some(session.clone());
        self.durable.store(true, Ordering::SeqCst);
        self.persistent.store_session(session).await
    }

    /// A session kept in memory also removes any older persisted one.
    async fn hold_session(&self, session: &Session) -> Result<(), AuthError> {
        *self.memory.write() = Some(session.clone());
        self.durable.store(false, Ordering::SeqCst);
        self.persistent.clear_session().await
    }

    async fn replace_session(&self, session: &Session) -> Result<(), AuthError> {
        if self.is_durable() {
            self.store_session(session).await
        } else {
            *self.memory.write() = Some(session.clone());
            Ok(())
        }
    }

    async fn clear_session(&self) -> Result<(), AuthError> {
        *self.memory.write() = None;
        self.durable.store(false, Ordering::SeqCst);
        self.persistent.clear_session().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::AuthToken;
    use crate::domain::ports::mocks::MockSessionStorage;
    use chrono::{TimeDelta, Utc};

    fn session(access: &str) -> Session {
        let now = Utc::now();
        Session::new(
            AuthToken::new_unchecked(access),
            AuthToken::new_unchecked("refresh"),
            now + TimeDelta::hours(12),
            now + TimeDelta::hours(24),
        )
    }

    #[tokio::test]
    async fn test_held_session_is_not_persisted() {
        let persistent = Arc::new(MockSessionStorage::with_session(session("stale")));
        let storage = TieredSessionStorage::new(persistent.clone());

        storage.hold_session(&session("fresh")).await.unwrap();

        let loaded = storage.load_session().await.unwrap().unwrap();
        assert_eq!(loaded.access_token().as_str(), "fresh");
        assert!(persistent.snapshot().await.is_none());
        assert!(!storage.is_durable());
    }

    #[tokio::test]
    async fn test_refresh_of_held_session_stays_in_memory() {
        let persistent = Arc::new(MockSessionStorage::new());
        let storage = TieredSessionStorage::new(persistent.clone());
        storage.hold_session(&session("first")).await.unwrap();

        storage.replace_session(&session("second")).await.unwrap();

        assert!(persistent.snapshot().await.is_none());
        let loaded = storage.load_session().await.unwrap().unwrap();
        assert_eq!(loaded.access_token().as_str(), "second");
    }

    #[tokio::test]
    async fn test_persisted_session_is_loaded_and_refreshed_durably() {
        let persistent = Arc::new(MockSessionStorage::with_session(session("disk")));
        let storage = TieredSessionStorage::new(persistent.clone());

        assert!(storage.load_session().await.unwrap().is_some());
        assert!(storage.is_durable());

        storage.replace_session(&session("renewed")).await.unwrap();
        let on_disk = persistent.snapshot().await.unwrap();
        assert_eq!(on_disk.access_token().as_str(), "renewed");
    }

    #[tokio::test]
    async fn test_clear_empties_both_layers() {
        let persistent = Arc::new(MockSessionStorage::new());
        let storage = TieredSessionStorage::new(persistent.clone());
        storage.store_session(&session("a")).await.unwrap();

        storage.clear_session().await.unwrap();

        assert!(storage.load_session().await.unwrap().is_none());
        assert!(persistent.snapshot().await.is_none());
    }
}
