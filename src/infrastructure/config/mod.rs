//! Application configuration.

/// Layered configuration file model.
pub mod app_config;
/// Command line arguments.
pub mod args;
/// Config directory and file management.
pub mod storage;

pub use app_config::{AppConfig, LogLevel, SessionBackend, UiConfig};
pub use args::CliArgs;
pub use storage::{ConfigError, StorageManager};
