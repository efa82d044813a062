//! Start the portal server.

use clap::Args;

use inventory_core::config::AppConfig;
use inventory_core::error::AppError;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Override the frontend bundle directory
    #[arg(long)]
    pub static_dir: Option<String>,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if let Some(ref dir) = args.static_dir {
        config.server.static_dir = dir.clone();
    }

    println!("Starting inventory portal server...");
    println!("  Host: {}", config.server.host);
    println!("  Port: {}", config.server.port);
    println!("  Orders upstream: {}", config.orders_upstream());

    inventory_api::run_server(config).await
}
