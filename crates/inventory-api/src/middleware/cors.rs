//! CORS response headers for the API routes.

use axum::extract::{Request, State};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;

use inventory_core::config::CorsConfig;

use crate::state::AppState;

/// Adds the configured CORS headers to every API response, errors included.
pub async fn cors_headers(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    apply_cors_headers(&state.config.server.cors, response.headers_mut());
    response
}

/// Writes `Access-Control-Allow-{Origin,Methods,Headers}` into `headers`.
pub fn apply_cors_headers(config: &CorsConfig, headers: &mut HeaderMap) {
    let values = [
        (ACCESS_CONTROL_ALLOW_ORIGIN, config.allow_origin()),
        (ACCESS_CONTROL_ALLOW_METHODS, config.allow_methods()),
        (ACCESS_CONTROL_ALLOW_HEADERS, config.allow_headers()),
    ];

    for (name, value) in values {
        match HeaderValue::from_str(&value) {
            Ok(value) => {
                headers.insert(name, value);
            }
            Err(_) => tracing::warn!(header = %name, %value, "Invalid CORS header value"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_headers() {
        let mut headers = HeaderMap::new();
        apply_cors_headers(&CorsConfig::default(), &mut headers);

        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            headers[ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, PUT, DELETE, OPTIONS"
        );
        assert_eq!(
            headers[ACCESS_CONTROL_ALLOW_HEADERS],
            "Content-Type, Authorization"
        );
    }
}
