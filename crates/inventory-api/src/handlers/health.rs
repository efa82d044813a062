//! Health check handler.

use axum::Json;
use axum::http::StatusCode;

use crate::dto::response::{ErrorEnvelope, HealthResponse};

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Unmatched `/api/*` paths.
pub async fn api_not_found() -> (StatusCode, Json<ErrorEnvelope>) {
    (StatusCode::NOT_FOUND, Json(ErrorEnvelope::new("Not found")))
}
