use std::path::PathBuf;
use std::process::ExitCode;

use dotenv::dotenv;
use save_migrate::config::{DEFAULT_LOG_FILTER, DEFAULT_SAVE_FILE, FAILURE_EXIT_CODE};
use save_migrate::{convert, MigrationConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load environment variables
    dotenv().ok();

    init_tracing();

    let save_file = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_FILE));

    let config = match MigrationConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(FAILURE_EXIT_CODE);
        }
    };

    info!(save_file = %save_file.display(), "Starting save conversion");

    match convert(&config, &save_file).await {
        Ok(_) => {
            info!("Database initialization complete.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::from(FAILURE_EXIT_CODE)
        }
    }
}
