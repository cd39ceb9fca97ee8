//! Process-scoped key/value store for UI state that lives for one run.

/// String key/value store. Values are opaque serialized text.
pub trait SessionStorePort: Send + Sync {
    /// Returns the stored value.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores a value, replacing any previous one.
    fn set(&self, key: &str, value: String);

    /// Removes a value. Missing keys are ignored.
    fn remove(&self, key: &str);
}
