//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::args::CliArgs;
use super::storage::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER};

const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Where the login session is kept between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    /// System keyring.
    #[default]
    Keyring,
    /// `session.toml` in the config directory.
    File,
}

impl std::fmt::Display for SessionBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keyring => write!(f, "keyring"),
            Self::File => write!(f, "file"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Route opened at start-up.
    #[serde(skip)]
    pub open: Option<String>,

    /// Backend root URL, without the `api/v1/` prefix.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Session storage backend.
    #[serde(default)]
    pub session_backend: SessionBackend,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Notification duration in seconds.
    #[serde(default = "default_notification_duration")]
    pub notification_duration: u64,

    /// Initial page size of the contacted log.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notification_duration: default_notification_duration(),
            page_size: default_page_size(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_notification_duration() -> u64 {
    5
}

fn default_page_size() -> u32 {
    25
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_url) = args.api_url {
            self.api_url = api_url;
        }
        if let Some(backend) = args.session_backend {
            self.session_backend = backend;
        }
        if let Some(notification_duration) = args.notification_duration {
            self.ui.notification_duration = notification_duration;
        }
        if let Some(open) = args.open {
            self.open = Some(open);
        }
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("vetdesk.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }

    /// Notification lifetime.
    #[must_use]
    pub const fn notification_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.ui.notification_duration)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            open: None,
            api_url: default_api_url(),
            log_level: LogLevel::Info,
            session_backend: SessionBackend::default(),
            ui: UiConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
            api_url = "https://crm.example.com"
            session_backend = "file"

            [ui]
            notification_duration = 8
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.api_url, "https://crm.example.com");
        assert_eq!(config.session_backend, SessionBackend::File);
        assert_eq!(config.ui.notification_duration, 8);
        assert_eq!(config.ui.page_size, 25);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.session_backend, SessionBackend::Keyring);
        assert_eq!(config.notification_duration().as_secs(), 5);
    }

    #[test]
    fn test_args_override_file_values() {
        let mut config: AppConfig = toml::from_str("api_url = \"https://file\"").unwrap();
        let args = CliArgs::parse_from([
            "vetdesk",
            "--api-url",
            "https://cli",
            "--session-backend",
            "file",
            "--log-level",
            "debug",
            "--open",
            "/client-contacted",
        ]);

        config.merge_with_args(args);

        assert_eq!(config.api_url, "https://cli");
        assert_eq!(config.session_backend, SessionBackend::File);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.open.as_deref(), Some("/client-contacted"));
    }
}
