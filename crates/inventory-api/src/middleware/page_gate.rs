//! Page gate: session and role checks in front of every browser page.

use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;

use inventory_auth::PageDecision;

use crate::extractors::TokenCookie;
use crate::state::AppState;

/// Response header carrying the role claim of an admitted request.
pub const USER_ROLE_HEADER: &str = "x-user-role";
/// Response header marking an admitted, authenticated request.
pub const USER_AUTHENTICATED_HEADER: &str = "x-user-authenticated";

/// Redirects visitors without a usable token to the login page and roles
/// without permission away from the page. Admitted responses are tagged
/// with the caller's role.
pub async fn page_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let jar = CookieJar::from_headers(request.headers());
    let TokenCookie(token) = TokenCookie::from_jar(&jar, &state);

    let decision = state.route_policy.evaluate(&path, token.as_deref());

    match &decision {
        PageDecision::Skip | PageDecision::Public => next.run(request).await,
        PageDecision::Allow { role } => {
            let mut response = next.run(request).await;
            if let Ok(value) = HeaderValue::from_str(role) {
                response.headers_mut().insert(USER_ROLE_HEADER, value);
            }
            response
                .headers_mut()
                .insert(USER_AUTHENTICATED_HEADER, HeaderValue::from_static("true"));
            response
        }
        PageDecision::Login { .. } | PageDecision::Forbidden { .. } => {
            let location = decision.location().unwrap_or_else(|| "/login".to_string());
            tracing::debug!(%path, %location, "Page gate redirect");
            Redirect::temporary(&location).into_response()
        }
    }
}
