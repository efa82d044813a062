//! Proxy-boundary errors and their `{ success: false, message }` envelope.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::dto::response::ErrorEnvelope;

/// Message used when a transport error has no text of its own.
pub const UNKNOWN_PROXY_ERROR: &str = "Unknown proxy error";

/// Every way a proxied call can fail before reaching the browser.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The inbound request carried no credential. No upstream call was made.
    #[error("Authorization header is required")]
    MissingAuthorization,
    /// The upstream answered with a non-success status.
    #[error("External API error: {} - {}", .status.as_u16(), .body)]
    Upstream {
        /// Upstream status, mirrored to the caller.
        status: StatusCode,
        /// Upstream body text.
        body: String,
    },
    /// The upstream could not be reached.
    #[error("{0}")]
    Transport(#[source] reqwest::Error),
    /// The upstream answered 2xx with a body that is not JSON.
    #[error("{0}")]
    Decode(#[source] reqwest::Error),
}

impl ProxyError {
    /// Status sent to the caller.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingAuthorization => StatusCode::UNAUTHORIZED,
            Self::Upstream { status, .. } => *status,
            Self::Transport(_) | Self::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut message = self.to_string();
        if message.trim().is_empty() {
            message = UNKNOWN_PROXY_ERROR.to_string();
        }

        match &self {
            Self::MissingAuthorization => tracing::debug!("Proxy request without credential"),
            Self::Upstream { status, .. } => {
                tracing::warn!(status = status.as_u16(), "Upstream returned an error")
            }
            Self::Transport(_) | Self::Decode(_) => {
                tracing::error!(error = %message, "Proxy forward failed")
            }
        }

        (status, Json(ErrorEnvelope::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_message_carries_status_and_body() {
        let err = ProxyError::Upstream {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: "maintenance".into(),
        };
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.to_string(), "External API error: 503 - maintenance");
    }

    #[test]
    fn test_missing_authorization_is_401() {
        let response = ProxyError::MissingAuthorization.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
