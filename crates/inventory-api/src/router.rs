//! Route definitions for the portal server.
//!
//! API routes are mounted under `/api` and carry CORS headers. Every other
//! path goes through the page gate to the frontend bundle.

use std::path::Path;

use axum::{Router, middleware as axum_middleware, routing::get};
use tower_http::services::{ServeDir, ServeFile};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(proxy_routes())
        .merge(health_routes())
        .fallback(handlers::health::api_not_found)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::cors::cors_headers,
        ));

    Router::new()
        .route("/", get(handlers::landing::root))
        .nest("/api", api_routes)
        .fallback_service(static_bundle(&state.config.server.static_dir))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::page_gate::page_gate,
        ))
        .with_state(state)
}

/// Same-origin proxies to backend services.
fn proxy_routes() -> Router<AppState> {
    Router::new().route(
        "/orders/all",
        get(handlers::proxy::orders_all).options(handlers::proxy::orders_preflight),
    )
}

/// Health check.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Frontend bundle. Unknown paths fall back to `index.html` so client-side
/// routes render.
fn static_bundle(dir: &str) -> ServeDir<ServeFile> {
    let index = Path::new(dir).join("index.html");
    ServeDir::new(dir)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(index))
}
