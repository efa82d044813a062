//! Configuration CLI commands.

use clap::{Args, Subcommand};

use inventory_core::config::AppConfig;
use inventory_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Print the backend service URLs in use
    Services,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => output::print_json(config),
        ConfigCommand::Services => {
            let s = &config.services;
            if format == OutputFormat::Json {
                output::print_json(s);
                return Ok(());
            }
            output::print_kv("User", &s.user_url);
            output::print_kv("ML", &s.ml_url);
            output::print_kv("Supplier", &s.supplier_url);
            output::print_kv("Product", &s.product_url);
            output::print_kv("Order", &s.order_url);
            output::print_kv("Inventory", &s.inventory_url);
            output::print_kv("Resource", &s.resource_url);
            output::print_kv("Notification", &s.notification_url);
            output::print_kv("API gateway", &s.api_gateway_url);
            output::print_kv("Orders proxy", &config.orders_upstream());
        }
    }
    Ok(())
}
