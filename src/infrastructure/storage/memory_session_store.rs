use std::collections::HashMap;

use parking_lot::RwLock;

use crate::domain::ports::SessionStorePort;

/// Key/value store that lives for the duration of the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    /// Whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl SessionStorePort for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.values.write().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.values.write().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites_and_remove_deletes() {
        let store = MemorySessionStore::new();
        store.set("nameFilter", "\"Smi\"".into());
        store.set("nameFilter", "\"Smith\"".into());

        assert_eq!(store.get("nameFilter").as_deref(), Some("\"Smith\""));
        assert_eq!(store.len(), 1);

        store.remove("nameFilter");
        store.remove("missing");
        assert!(store.is_empty());
    }
}
