pub mod acquire;
pub mod config;
pub mod session;

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use config::AppConfig;

/// Determine the data directory for the application.
/// Priority: PHOTOBOOTH_DATA_DIR env var > ~/.photobooth
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PHOTOBOOTH_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".photobooth")
}

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env", "../../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the default `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Load configuration and run one session.
pub fn run() -> Result<PathBuf, anyhow::Error> {
    load_dotenv();
    let config = AppConfig::load()?;
    tracing::debug!(?config, "Loaded config");
    session::run_session(&config)
}
