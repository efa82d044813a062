//! Inventory portal server.
//!
//! Loads configuration, initialises logging and serves the portal until a
//! shutdown signal arrives.

use tracing_subscriber::{EnvFilter, fmt};

use inventory_core::config::AppConfig;
use inventory_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        orders_upstream = %config.orders_upstream(),
        "Starting inventory portal"
    );

    if let Err(e) = inventory_api::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load `config/default.toml`, the `INVENTORY_ENV` overlay and
/// `INVENTORY__*` variables, or a single file named by `INVENTORY_CONFIG`.
fn load_configuration() -> Result<AppConfig, AppError> {
    if let Ok(path) = std::env::var("INVENTORY_CONFIG") {
        return AppConfig::from_file(&path);
    }

    let env = std::env::var("INVENTORY_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
