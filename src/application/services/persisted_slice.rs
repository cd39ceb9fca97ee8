//! Typed view over one key of the session-scoped store.

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domain::ports::SessionStorePort;

/// A value persisted as JSON under a fixed key. Unparseable data reads as absent.
#[derive(Debug, Clone, Copy)]
pub struct PersistedSlice<T> {
    key: &'static str,
    _value: PhantomData<fn() -> T>,
}

impl<T> PersistedSlice<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a slice stored under `key`.
    #[must_use]
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            _value: PhantomData,
        }
    }

    /// Store key.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// Reads the value. Unreadable JSON is logged and treated as absent.
    #[must_use]
    pub fn load(&self, store: &dyn SessionStorePort) -> Option<T> {
        let raw = store.get(self.key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key = self.key, error = %e, "Discarding unreadable stored value");
                None
            }
        }
    }

    /// Writes the value as JSON.
    pub fn save(&self, store: &dyn SessionStorePort, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => store.set(self.key, raw),
            Err(e) => warn!(key = self.key, error = %e, "Could not persist value"),
        }
    }

    /// Removes the value.
    pub fn clear(&self, store: &dyn SessionStorePort) {
        store.remove(self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::MemorySessionStore;

    #[test]
    fn test_save_load_clear() {
        let store = MemorySessionStore::new();
        let slice = PersistedSlice::<Vec<String>>::new("status");

        assert_eq!(slice.load(&store), None);

        slice.save(&store, &vec!["Followed Up".to_string()]);
        assert_eq!(slice.load(&store), Some(vec!["Followed Up".to_string()]));

        slice.clear(&store);
        assert_eq!(slice.load(&store), None);
    }

    #[test]
    fn test_unreadable_value_is_absent() {
        let store = MemorySessionStore::new();
        store.set("dateRange", "{not json".to_string());

        let slice = PersistedSlice::<Vec<u32>>::new("dateRange");
        assert_eq!(slice.load(&store), None);
    }
}
