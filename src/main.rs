use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use vetdesk::domain::ports::SessionStoragePort;
use vetdesk::infrastructure::{
    AppConfig, CallCenterClient, CliArgs, FileSessionStorage, KeyringSessionStorage,
    MemorySessionStore, SessionBackend, StorageManager, TieredSessionStorage,
};
use vetdesk::presentation::{App, AppPorts};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config() -> Result<(AppConfig, StorageManager)> {
    let args = CliArgs::parse();
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok((config, storage))
}

fn create_app(config: &AppConfig, storage: &StorageManager) -> Result<App> {
    let client = Arc::new(CallCenterClient::new(&config.api_url)?);

    let persistent: Arc<dyn SessionStoragePort> = match config.session_backend {
        SessionBackend::Keyring => Arc::new(KeyringSessionStorage::new()),
        SessionBackend::File => Arc::new(FileSessionStorage::new(storage.session_path())),
    };
    info!(backend = %config.session_backend, api_url = %config.api_url, "Session storage selected");

    let ports = AppPorts {
        auth: client.clone(),
        call_center: client,
        session_storage: Arc::new(TieredSessionStorage::new(persistent)),
        session_store: Arc::new(MemorySessionStore::new()),
    };

    Ok(App::new(ports, &config.ui))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = dotenvy::dotenv();

    let (config, storage) = load_config()?;
    init_logging(&config)?;

    info!(version = vetdesk::VERSION, "Starting Vetdesk");

    let app = create_app(&config, &storage)?;
    let open = config.open.clone();

    let mut terminal = ratatui::init();

    let result = app.run(&mut terminal, open).await;

    ratatui::restore();

    result
}
