use super::app_config::{LogLevel, SessionBackend};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "vetdesk",
    version,
    about = "Terminal console for veterinary call-center outreach",
    long_about = None
)]
/// Command line arguments.
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Backend root URL.
    #[arg(long, env = "CALLCENTER_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Where the login session is stored.
    #[arg(long, value_enum)]
    pub session_backend: Option<SessionBackend>,

    /// Notification duration in seconds.
    #[arg(long)]
    pub notification_duration: Option<u64>,

    /// Route to open at start-up, e.g. `/client-contacted`.
    #[arg(long, value_name = "PATH")]
    pub open: Option<String>,
}
