//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use inventory_auth::RoutePolicy;
use inventory_core::config::AppConfig;
use inventory_core::error::{AppError, ErrorKind};
use inventory_core::result::AppResult;

/// Shared application state passed to all Axum handlers via `State`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Pooled HTTP client for upstream calls.
    pub http: reqwest::Client,
    /// Resolved URL behind `GET /api/orders/all`.
    pub orders_upstream: Arc<str>,
    /// Page gate policy.
    pub route_policy: Arc<RoutePolicy>,
}

impl AppState {
    /// Builds the state from configuration.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("inventory-portal/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Failed to build HTTP client", e)
            })?;

        Ok(Self::with_client(config, http))
    }

    /// Builds the state around an existing HTTP client.
    pub fn with_client(config: AppConfig, http: reqwest::Client) -> Self {
        let orders_upstream: Arc<str> = config.orders_upstream().into();
        let route_policy = Arc::new(RoutePolicy::new(config.session.cookie_name.clone()));

        Self {
            config: Arc::new(config),
            http,
            orders_upstream,
            route_policy,
        }
    }
}
