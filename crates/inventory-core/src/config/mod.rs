//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field has a default so an empty file is valid.

pub mod app;
pub mod logging;
pub mod polling;
pub mod services;
pub mod session;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::logging::LoggingConfig;
pub use self::polling::PollingConfig;
pub use self::services::{ProxyConfig, ServicesConfig};
pub use self::session::{SessionConfig, StorageBackend};

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Backend microservice base URLs.
    #[serde(default)]
    pub services: ServicesConfig,
    /// Proxy route upstreams.
    #[serde(default)]
    pub proxy: ProxyConfig,
    /// Durable client session settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Dashboard polling intervals.
    #[serde(default)]
    pub polling: PollingConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `INVENTORY_`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("INVENTORY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Load configuration from a single TOML file, without overlays.
    pub fn from_file(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Full URL of the upstream behind `GET /api/orders/all`.
    pub fn orders_upstream(&self) -> String {
        self.proxy.orders_upstream(&self.services)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.services.user_url, "http://localhost:8080");
        assert_eq!(config.services.order_url, "http://localhost:8084");
        assert_eq!(config.proxy.orders_path, "/all");
        assert_eq!(config.session.token_key, "inventory_auth_token");
        assert_eq!(config.polling.stock_alerts_interval_seconds, 30);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_empty_proxy_section_keeps_orders_path() {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "proxy": {}
        }))
        .unwrap();

        assert_eq!(config.proxy.orders_path, "/all");
        assert_eq!(ProxyConfig::default().orders_path, "/all");
        assert_eq!(config.orders_upstream(), "http://localhost:8084/api/orders/all");
    }

    #[test]
    fn test_orders_upstream_follows_order_service() {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "services": { "order_url": "http://orders.internal:9000/" }
        }))
        .unwrap();

        assert_eq!(
            config.orders_upstream(),
            "http://orders.internal:9000/api/orders/all"
        );
    }

    #[test]
    fn test_explicit_orders_base_url_wins() {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "proxy": { "orders_base_url": "https://orders.example.com/api/orders" }
        }))
        .unwrap();

        assert_eq!(
            config.orders_upstream(),
            "https://orders.example.com/api/orders/all"
        );
    }
}
