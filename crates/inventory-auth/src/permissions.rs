//! Page gate policy: which browser paths need a session and which roles
//! may open them.

use chrono::Utc;
use reqwest::Url;

use inventory_entity::route::LandingRoute;
use inventory_entity::user::UserRole;
use inventory_entity::user::UserRole::{Admin, Manager, StoreKeeper, Supplier, User};

use crate::token::{TokenInspector, TokenStatus};

/// Where a role without permission for a page is sent.
pub const FALLBACK_PATH: &str = "/dashboard";

const SKIPPED_PREFIXES: &[&str] = &["/_next", "/api", "/static"];

const PUBLIC_PREFIXES: &[&str] = &[
    "/login",
    "/signup",
    "/forgot-password",
    "/reset-password",
    "/contact",
    "/about",
    "/privacy",
    "/terms",
];

const EVERYONE: &[UserRole] = &[User, StoreKeeper, Manager, Admin, Supplier];
const STAFF: &[UserRole] = &[StoreKeeper, Manager, Admin];
const MANAGEMENT: &[UserRole] = &[Manager, Admin];

/// Path to allowed roles. Exact matches win; otherwise the first entry in
/// this order whose path prefixes the request path applies.
const PERMISSIONS: &[(&str, &[UserRole])] = &[
    ("/dashboard", EVERYONE),
    ("/dashboard/manager", MANAGEMENT),
    ("/dashboard/supplier", &[Supplier]),
    ("/dashboard/storekeeper", STAFF),
    ("/profile", EVERYONE),
    ("/products", STAFF),
    ("/products/add", STAFF),
    ("/categories", STAFF),
    ("/operations/suppliers", STAFF),
    ("/operations/inventory", STAFF),
    ("/operations/returns", STAFF),
    ("/analytics", MANAGEMENT),
    ("/analytics/reports", MANAGEMENT),
    ("/analytics/promotions", MANAGEMENT),
    ("/logistics", STAFF),
    ("/logistics/shipping", STAFF),
    ("/logistics/payments", MANAGEMENT),
    ("/sales/orders", STAFF),
    ("/sales/customers", STAFF),
    ("/sales/reviews", STAFF),
    ("/settings", &[Admin]),
];

/// Decision for one page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageDecision {
    /// Not a page (assets, API, framework internals). Pass through untouched.
    Skip,
    /// Public page. Pass through.
    Public,
    /// Authenticated and permitted.
    Allow {
        /// Role claim of the token.
        role: String,
    },
    /// No usable token; send to the login page.
    Login {
        /// Path the visitor asked for.
        redirect: String,
        /// Whether the token had expired.
        expired: bool,
    },
    /// Authenticated but the role may not open this page.
    Forbidden {
        /// Where to send the visitor instead.
        location: String,
    },
}

impl PageDecision {
    /// `Location` for a redirecting decision.
    pub fn location(&self) -> Option<String> {
        match self {
            Self::Login { redirect, expired } => Some(login_location(redirect, *expired)),
            Self::Forbidden { location } => Some(location.clone()),
            _ => None,
        }
    }
}

/// Route policy evaluated before serving any page.
#[derive(Debug, Clone)]
pub struct RoutePolicy {
    cookie_name: String,
}

impl RoutePolicy {
    /// Creates a policy reading the token from `cookie_name`.
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
        }
    }

    /// Name of the cookie carrying the bearer token.
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Evaluates a request for `path` carrying `token`.
    pub fn evaluate(&self, path: &str, token: Option<&str>) -> PageDecision {
        self.evaluate_at(path, token, Utc::now().timestamp())
    }

    /// Evaluates against the unix timestamp `now`.
    pub fn evaluate_at(&self, path: &str, token: Option<&str>, now: i64) -> PageDecision {
        if is_skipped(path) {
            return PageDecision::Skip;
        }
        if is_public(path) {
            return PageDecision::Public;
        }

        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return PageDecision::Login {
                redirect: path.to_string(),
                expired: false,
            };
        };

        let role = match TokenInspector::inspect_at(token, now) {
            TokenStatus::Valid { role, .. } => role,
            status => {
                return PageDecision::Login {
                    redirect: path.to_string(),
                    expired: status == TokenStatus::Expired,
                };
            }
        };

        match required_roles(path) {
            Some(roles) if !roles.contains(&UserRole::parse(&role)) => PageDecision::Forbidden {
                location: forbidden_location(path).to_string(),
            },
            _ => PageDecision::Allow { role },
        }
    }

    /// Landing route for the `/` page given the cookie token.
    pub fn landing_for_token(&self, token: Option<&str>) -> LandingRoute {
        let role = token
            .map(TokenInspector::inspect)
            .and_then(|status| status.role().map(UserRole::parse));
        crate::gate::AccessGate::landing_for(role)
    }
}

/// Whether the page gate ignores `path` entirely.
pub fn is_skipped(path: &str) -> bool {
    SKIPPED_PREFIXES.iter().any(|p| path.starts_with(p)) || path.contains('.')
}

/// Whether `path` is reachable without a session.
pub fn is_public(path: &str) -> bool {
    PUBLIC_PREFIXES.iter().any(|p| path.starts_with(p))
}

/// Roles allowed on `path`, or `None` when any authenticated role may open it.
pub fn required_roles(path: &str) -> Option<&'static [UserRole]> {
    PERMISSIONS
        .iter()
        .find(|(route, _)| *route == path)
        .or_else(|| PERMISSIONS.iter().find(|(route, _)| path.starts_with(route)))
        .map(|(_, roles)| *roles)
}

/// Denials under `/dashboard` would bounce straight back, so those go to
/// the access-denied page instead.
fn forbidden_location(path: &str) -> &'static str {
    if path.starts_with(FALLBACK_PATH) {
        LandingRoute::AccessDenied.path()
    } else {
        FALLBACK_PATH
    }
}

fn login_location(redirect: &str, expired: bool) -> String {
    let login = LandingRoute::Login.path();
    let Ok(mut url) = Url::parse(&format!("http://portal.local{login}")) else {
        return login.to_string();
    };
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("redirect", redirect);
        if expired {
            query.append_pair("expired", "true");
        }
    }
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::tests::token_with;

    fn policy() -> RoutePolicy {
        RoutePolicy::new("inventory_auth_token")
    }

    fn token(role: &str) -> String {
        token_with(serde_json::json!({ "role": role, "exp": 10_000 }))
    }

    #[test]
    fn test_skipped_and_public_paths() {
        let p = policy();
        assert_eq!(p.evaluate_at("/_next/chunk", None, 0), PageDecision::Skip);
        assert_eq!(p.evaluate_at("/api/orders/all", None, 0), PageDecision::Skip);
        assert_eq!(p.evaluate_at("/logo.png", None, 0), PageDecision::Skip);
        assert_eq!(p.evaluate_at("/favicon.ico", None, 0), PageDecision::Skip);
        assert_eq!(p.evaluate_at("/login", None, 0), PageDecision::Public);
        assert_eq!(p.evaluate_at("/signup/verify", None, 0), PageDecision::Public);
    }

    #[test]
    fn test_missing_token_redirects_to_login() {
        let decision = policy().evaluate_at("/dashboard/manager", None, 0);
        assert_eq!(
            decision.location().as_deref(),
            Some("/login?redirect=%2Fdashboard%2Fmanager")
        );
    }

    #[test]
    fn test_expired_token_is_flagged() {
        let decision = policy().evaluate_at("/products", Some(&token("MANAGER")), 20_000);
        assert_eq!(
            decision,
            PageDecision::Login {
                redirect: "/products".into(),
                expired: true
            }
        );
        assert_eq!(
            decision.location().as_deref(),
            Some("/login?redirect=%2Fproducts&expired=true")
        );
    }

    #[test]
    fn test_malformed_token_redirects_without_expired_flag() {
        let decision = policy().evaluate_at("/products", Some("garbage"), 0);
        assert_eq!(
            decision.location().as_deref(),
            Some("/login?redirect=%2Fproducts")
        );
    }

    #[test]
    fn test_exact_match_wins_over_prefix() {
        assert_eq!(required_roles("/dashboard/supplier"), Some(&[Supplier][..]));
        assert_eq!(required_roles("/dashboard"), Some(EVERYONE));
        assert_eq!(required_roles("/settings/users"), Some(&[Admin][..]));
        assert_eq!(required_roles("/unlisted"), None);
    }

    #[test]
    fn test_permitted_role_is_allowed() {
        let decision = policy().evaluate_at("/analytics/reports", Some(&token("ADMIN")), 0);
        assert_eq!(decision, PageDecision::Allow { role: "ADMIN".into() });

        let decision = policy().evaluate_at("/products", Some(&token("Store Keeper")), 0);
        assert_eq!(
            decision,
            PageDecision::Allow {
                role: "Store Keeper".into()
            }
        );
    }

    #[test]
    fn test_unpermitted_role_is_sent_away() {
        let decision = policy().evaluate_at("/settings", Some(&token("MANAGER")), 0);
        assert_eq!(decision.location().as_deref(), Some("/dashboard"));

        let decision = policy().evaluate_at("/dashboard/manager", Some(&token("SUPPLIER")), 0);
        assert_eq!(decision.location().as_deref(), Some("/access-denied"));
    }

    #[test]
    fn test_landing_for_token() {
        let p = policy();
        assert_eq!(p.landing_for_token(None), LandingRoute::Login);
        assert_eq!(p.landing_for_token(Some("garbage")), LandingRoute::Login);
        let far_future = token_with(serde_json::json!({ "role": "supplier" }));
        assert_eq!(
            p.landing_for_token(Some(&far_future)),
            LandingRoute::SupplierDashboard
        );
    }
}
