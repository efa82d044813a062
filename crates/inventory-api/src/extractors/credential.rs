//! Credential extractors: the raw `Authorization` header for proxying and
//! the token cookie for page requests.

use axum::extract::FromRequestParts;
use axum::http::HeaderValue;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use crate::error::ProxyError;
use crate::state::AppState;

/// The inbound `Authorization` header, forwarded upstream as-is.
///
/// Rejects with [`ProxyError::MissingAuthorization`] when the header is
/// absent or empty.
#[derive(Debug, Clone)]
pub struct ForwardedAuthorization(pub HeaderValue);

impl<S: Send + Sync> FromRequestParts<S> for ForwardedAuthorization {
    type Rejection = ProxyError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(AUTHORIZATION)
            .filter(|v| !v.as_bytes().is_empty())
            .cloned()
            .map(ForwardedAuthorization)
            .ok_or(ProxyError::MissingAuthorization)
    }
}

/// Bearer token carried in the session cookie, if any.
#[derive(Debug, Clone, Default)]
pub struct TokenCookie(pub Option<String>);

impl TokenCookie {
    /// Reads the session cookie named by the route policy.
    pub fn from_jar(jar: &CookieJar, state: &AppState) -> Self {
        Self(
            jar.get(state.route_policy.cookie_name())
                .map(|c| c.value().to_string())
                .filter(|v| !v.is_empty()),
        )
    }
}

impl FromRequestParts<AppState> for TokenCookie {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(Self::from_jar(&jar, state))
    }
}
