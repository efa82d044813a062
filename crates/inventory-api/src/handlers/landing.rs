//! Role landing redirect for `/`.

use axum::extract::State;
use axum::response::Redirect;

use crate::extractors::TokenCookie;
use crate::state::AppState;

/// GET /
///
/// Sends the visitor to the dashboard of the role in their token, or to
/// the login page without a usable token.
pub async fn root(State(state): State<AppState>, TokenCookie(token): TokenCookie) -> Redirect {
    let target = state.route_policy.landing_for_token(token.as_deref());
    tracing::debug!(landing = %target, "Landing redirect");
    Redirect::temporary(target.path())
}
