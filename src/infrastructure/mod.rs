//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// REST backend client.
pub mod http;
/// Fuzzy matching for pickers.
pub mod search;
/// Session storage adapters.
pub mod storage;

pub use config::{AppConfig, CliArgs, ConfigError, LogLevel, SessionBackend, StorageManager};
pub use http::CallCenterClient;
pub use search::FuzzySearcher;
pub use storage::{
    FileSessionStorage, KeyringSessionStorage, MemorySessionStore, TieredSessionStorage,
};
