//! Notification client for the notification service.

use http::HeaderMap;

use inventory_core::config::ServicesConfig;
use inventory_core::error::{AppError, ErrorKind};
use inventory_core::result::AppResult;
use inventory_entity::notification::Notification;

/// Reads a user's notifications and marks them read.
#[derive(Debug, Clone)]
pub struct NotificationClient {
    http: reqwest::Client,
    base_url: String,
}

impl NotificationClient {
    /// Creates a client for the notification service at `notification_url`.
    pub fn new(http: reqwest::Client, notification_url: &str) -> Self {
        Self {
            http,
            base_url: format!("{}/api/notifications", notification_url.trim_end_matches('/')),
        }
    }

    /// Creates a client from the service configuration.
    pub fn from_config(http: reqwest::Client, services: &ServicesConfig) -> Self {
        Self::new(http, &services.notification_url)
    }

    /// Notification history of `user_id`, newest as the service orders it.
    pub async fn list_for_user(&self, auth: &HeaderMap, user_id: &str) -> AppResult<Vec<Notification>> {
        let url = format!("{}/user/{user_id}", self.base_url);
        let response = self
            .http
            .get(&url)
            .headers(auth.clone())
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            tracing::debug!(url, status = %response.status(), "Notification request rejected");
            return Err(AppError::external_service(format!(
                "Failed to fetch notifications: {}",
                response.status().as_u16()
            )));
        }

        response.json().await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, "Failed to fetch notifications", e)
        })
    }

    /// Marks one notification read and returns the updated copy.
    pub async fn mark_read(&self, auth: &HeaderMap, notification_id: i64) -> AppResult<Notification> {
        let url = format!("{}/{notification_id}/read", self.base_url);
        let response = self
            .http
            .put(&url)
            .headers(auth.clone())
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            return Err(AppError::external_service(format!(
                "Failed to mark notification as read: {}",
                response.status().as_u16()
            )));
        }

        response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                "Failed to mark notification as read",
                e,
            )
        })
    }
}

fn network_error(err: reqwest::Error) -> AppError {
    AppError::with_source(
        ErrorKind::ExternalService,
        format!("Network error: {err}"),
        err,
    )
}
