use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use relay_scheduler::domain::ThemeMode;
use relay_scheduler::infrastructure::{AppConfig, CliArgs, StorageManager};
use relay_scheduler::presentation::App;
use relay_scheduler::presentation::theme::prefers_dark;

const BACKGROUND_QUERY_TIMEOUT: Duration = Duration::from_millis(100);

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

fn create_app() -> Result<App> {
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();

    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);

    init_logging(&config)?;

    info!(version = relay_scheduler::VERSION, "Starting relay scheduler");

    let saved_theme = match storage.load_theme() {
        Ok(theme) => theme,
        Err(e) => {
            warn!(error = %e, "Failed to load UI state");
            None
        }
    };
    let theme = ThemeMode::resolve(
        saved_theme,
        saved_theme.is_none() && prefers_dark(BACKGROUND_QUERY_TIMEOUT),
    );
    info!(%theme, endpoint = %config.server.endpoint_url(), "Configuration resolved");

    Ok(App::new(&config, storage, theme))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let app = create_app()?;

    let mut terminal = ratatui::init();

    let result = app.run(&mut terminal).await;

    ratatui::restore();

    result
}
