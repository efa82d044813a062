//! CLI command definitions and dispatch.

pub mod alerts;
pub mod config;
pub mod notifications;
pub mod serve;
pub mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use inventory_auth::SessionStore;
use inventory_auth::storage::FileSessionStorage;
use inventory_core::config::{AppConfig, StorageBackend};
use inventory_core::error::{AppError, ErrorKind};
use inventory_worker::polling::PollHandle;

use crate::output::{self, OutputFormat};

/// Inventory portal client: session, role landing and dashboard alerts
#[derive(Debug, Parser)]
#[command(name = "inventory-cli", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file. Defaults to `config/default.toml` plus the
    /// environment overlay and `INVENTORY__*` variables.
    #[arg(short, long)]
    pub config: Option<String>,

    /// Environment overlay to load (`config/<env>.toml`)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the portal server
    Serve(serve::ServeArgs),
    /// Sign in and store the session
    Login(session::LoginArgs),
    /// Clear the stored session
    Logout,
    /// Show the signed-in user
    Whoami(session::WhoamiArgs),
    /// Print the landing page for the stored session
    Landing,
    /// Register a new account
    Signup(session::SignupArgs),
    /// Stock alerts
    Alerts(alerts::AlertsArgs),
    /// Notifications for the signed-in user
    Notifications(notifications::NotificationsArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = self.load_config()?;

        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Login(args) => session::login(args, &config, self.format).await,
            Commands::Logout => session::logout(&config).await,
            Commands::Whoami(args) => session::whoami(args, &config, self.format).await,
            Commands::Landing => session::landing(&config).await,
            Commands::Signup(args) => session::signup(args, &config).await,
            Commands::Alerts(args) => alerts::execute(args, &config, self.format).await,
            Commands::Notifications(args) => {
                notifications::execute(args, &config, self.format).await
            }
            Commands::Config(args) => config::execute(args, &config, self.format),
        }
    }

    fn load_config(&self) -> Result<AppConfig, AppError> {
        match &self.config {
            Some(path) => AppConfig::from_file(path),
            None => AppConfig::load(&self.env),
        }
    }
}

/// Helper: HTTP client shared by all commands
pub fn http_client() -> Result<reqwest::Client, AppError> {
    reqwest::Client::builder()
        .user_agent(concat!("inventory-cli/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to build HTTP client", e))
}

/// Helper: session store with relative session paths resolved against `$HOME`
pub fn session_store(config: &AppConfig) -> Result<SessionStore, AppError> {
    let http = http_client()?;
    let store = match config.session.storage {
        StorageBackend::File => {
            let path = session_path(&config.session.path);
            tracing::debug!(path = %path.display(), "Using session file");
            SessionStore::new(
                std::sync::Arc::new(FileSessionStorage::new(path)),
                inventory_auth::AuthClient::from_config(http, &config.services),
                &config.session,
            )
        }
        StorageBackend::Memory => SessionStore::from_config(config, http),
    };
    Ok(store)
}

fn session_path(configured: &str) -> PathBuf {
    let path = PathBuf::from(configured);
    if path.is_absolute() {
        return path;
    }
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(path),
        None => path,
    }
}

/// Helper: print each newly applied poll result until Ctrl+C, then stop
/// the poller. Data and errors are reported independently.
pub async fn watch_poller<T, F>(poller: PollHandle<T>, mut render: F)
where
    T: Clone,
    F: FnMut(&T),
{
    let mut updates = poller.subscribe();
    let mut shown = (0u64, 0u64);

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                let (shown_data, shown_error) = shown;
                if state.applied_success > shown_data {
                    if let Some(ref data) = state.data {
                        render(data);
                    }
                }
                if state.applied_error > shown_error {
                    if let Some(ref message) = state.error {
                        output::print_error(message);
                    }
                }
                shown = (state.applied_success, state.applied_error);
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    poller.shutdown().await;
}
