//! Stock alert client for the inventory service.

use http::HeaderMap;
use serde::de::DeserializeOwned;

use inventory_core::config::ServicesConfig;
use inventory_core::error::{AppError, ErrorKind};
use inventory_core::result::AppResult;
use inventory_entity::alert::StockAlert;

/// Reads and resolves stock alerts.
#[derive(Debug, Clone)]
pub struct StockAlertClient {
    http: reqwest::Client,
    base_url: String,
}

impl StockAlertClient {
    /// Creates a client for the inventory service at `inventory_url`.
    pub fn new(http: reqwest::Client, inventory_url: &str) -> Self {
        Self {
            http,
            base_url: format!("{}/api/stock-alerts", inventory_url.trim_end_matches('/')),
        }
    }

    /// Creates a client from the service configuration.
    pub fn from_config(http: reqwest::Client, services: &ServicesConfig) -> Self {
        Self::new(http, &services.inventory_url)
    }

    /// Unresolved alerts, optionally limited to a `(from, to)` date range.
    pub async fn list_unresolved(
        &self,
        auth: &HeaderMap,
        range: Option<(&str, &str)>,
    ) -> AppResult<Vec<StockAlert>> {
        self.fetch(&self.base_url, auth, range, "Failed to fetch stock alerts")
            .await
    }

    /// Resolved alert history, optionally limited to a date range.
    pub async fn list_history(
        &self,
        auth: &HeaderMap,
        range: Option<(&str, &str)>,
    ) -> AppResult<Vec<StockAlert>> {
        let url = format!("{}/history", self.base_url);
        self.fetch(&url, auth, range, "Failed to fetch stock alerts history")
            .await
    }

    /// Alerts raised for one product.
    pub async fn list_by_product(&self, auth: &HeaderMap, product_id: i64) -> AppResult<Vec<StockAlert>> {
        let url = format!("{}/product/{product_id}", self.base_url);
        self.fetch(&url, auth, None, "Failed to fetch stock alerts by product")
            .await
    }

    /// Marks an alert resolved.
    pub async fn resolve(&self, auth: &HeaderMap, alert_id: i64) -> AppResult<()> {
        let url = format!("{}/{alert_id}/resolve", self.base_url);
        let response = self
            .http
            .post(&url)
            .headers(auth.clone())
            .send()
            .await
            .map_err(network_error)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AppError::external_service("Failed to resolve alert"))
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        url: &str,
        auth: &HeaderMap,
        range: Option<(&str, &str)>,
        failure: &str,
    ) -> AppResult<T> {
        let mut request = self.http.get(url).headers(auth.clone());
        if let Some((from, to)) = range {
            request = request.query(&[("dateFrom", from), ("dateTo", to)]);
        }

        let response = request.send().await.map_err(network_error)?;
        if !response.status().is_success() {
            tracing::debug!(url, status = %response.status(), "Stock alert request rejected");
            return Err(AppError::external_service(failure));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::ExternalService, failure, e))
    }
}

fn network_error(err: reqwest::Error) -> AppError {
    AppError::with_source(
        ErrorKind::ExternalService,
        format!("Network error: {err}"),
        err,
    )
}
