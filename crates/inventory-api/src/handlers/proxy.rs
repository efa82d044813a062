//! Same-origin proxy for the orders service.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::{AUTHORIZATION, CACHE_CONTROL, EXPIRES, PRAGMA};
use serde_json::Value;

use crate::error::ProxyError;
use crate::extractors::ForwardedAuthorization;
use crate::state::AppState;

/// GET /api/orders/all
///
/// Forwards the caller's credential to the orders upstream with caching
/// disabled. A 2xx JSON body is relayed unchanged; anything else is
/// wrapped in the failure envelope with the upstream status.
pub async fn orders_all(
    State(state): State<AppState>,
    ForwardedAuthorization(credential): ForwardedAuthorization,
) -> Result<(StatusCode, Json<Value>), ProxyError> {
    let upstream = state.orders_upstream.as_ref();
    tracing::info!(upstream, "Forwarding orders request");

    let response = state
        .http
        .get(upstream)
        .header(AUTHORIZATION, credential)
        .header(CACHE_CONTROL, "no-cache, no-store, must-revalidate")
        .header(PRAGMA, "no-cache")
        .header(EXPIRES, "0")
        .send()
        .await
        .map_err(ProxyError::Transport)?;

    let status = response.status();
    tracing::debug!(status = status.as_u16(), "Orders upstream replied");

    if !status.is_success() {
        let body = response.text().await.map_err(|e| {
            tracing::warn!(status = status.as_u16(), error = %e, "Unreadable upstream error body");
            ProxyError::Decode(e)
        })?;
        return Err(ProxyError::Upstream { status, body });
    }

    let data = response.json::<Value>().await.map_err(ProxyError::Decode)?;
    Ok((StatusCode::OK, Json(data)))
}

/// OPTIONS /api/orders/all
///
/// CORS preflight. The CORS headers are added by the API middleware.
pub async fn orders_preflight() -> StatusCode {
    StatusCode::OK
}
