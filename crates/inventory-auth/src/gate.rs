//! Role router: decides where an authenticated or anonymous visitor lands.

use tracing::debug;

use inventory_entity::route::LandingRoute;
use inventory_entity::session::Session;
use inventory_entity::user::UserRole;

/// States of the role router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// The session store has not been read yet.
    Loading,
    /// No session exists.
    Unauthenticated,
    /// A session exists and its role has a dashboard.
    AuthenticatedKnownRole(UserRole),
    /// A session exists but its role has no dashboard.
    AuthenticatedUnknownRole,
}

impl GateState {
    /// Classifies an observed session.
    pub fn from_session(session: Option<&Session>) -> Self {
        let Some(session) = session else {
            return Self::Unauthenticated;
        };
        let role = session.role();
        match role.landing() {
            LandingRoute::AccessDenied => Self::AuthenticatedUnknownRole,
            _ => Self::AuthenticatedKnownRole(role),
        }
    }

    /// Where this state sends the browser. `Loading` sends nowhere.
    pub fn redirect(&self) -> Option<LandingRoute> {
        match self {
            Self::Loading => None,
            Self::Unauthenticated => Some(LandingRoute::Login),
            Self::AuthenticatedKnownRole(role) => Some(role.landing()),
            Self::AuthenticatedUnknownRole => Some(LandingRoute::AccessDenied),
        }
    }
}

/// Outcome of a role-restricted page check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Render the page.
    Allowed,
    /// Send the browser elsewhere.
    Denied(LandingRoute),
}

/// Identity the gate last acted on. A change in any field re-evaluates.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Snapshot {
    token: String,
    user_id: String,
    role: String,
}

/// Role router state machine.
///
/// Starts in [`GateState::Loading`]. Each call to [`AccessGate::observe`]
/// reports what the session store currently holds; a redirect is emitted
/// the first time and afterwards only when the identity or auth state
/// changes, so repeated renders do not redirect again.
#[derive(Debug, Clone)]
pub struct AccessGate {
    state: GateState,
    last: Option<Option<Snapshot>>,
}

impl AccessGate {
    /// A gate that has not observed the session yet.
    pub fn new() -> Self {
        Self {
            state: GateState::Loading,
            last: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> GateState {
        self.state
    }

    /// Feeds the current session and returns the redirect to perform, if any.
    pub fn observe(&mut self, session: Option<&Session>) -> Option<LandingRoute> {
        let snapshot = session.map(|s| Snapshot {
            token: s.token.clone(),
            user_id: s.user.id.clone(),
            role: s.user.role.clone(),
        });

        if self.last.as_ref() == Some(&snapshot) {
            return None;
        }

        self.state = GateState::from_session(session);
        self.last = Some(snapshot);

        let target = self.state.redirect();
        debug!(state = ?self.state, target = ?target, "Access gate re-evaluated");
        target
    }

    /// Landing route for an optional role, with no state involved.
    pub fn landing_for(role: Option<UserRole>) -> LandingRoute {
        match role {
            Some(role) => role.landing(),
            None => LandingRoute::Login,
        }
    }

    /// Guards a page restricted to `roles`.
    pub fn require_roles(session: Option<&Session>, roles: &[UserRole]) -> Access {
        match session {
            None => Access::Denied(LandingRoute::Login),
            Some(s) if roles.is_empty() || roles.contains(&s.role()) => Access::Allowed,
            Some(_) => Access::Denied(LandingRoute::AccessDenied),
        }
    }
}

impl Default for AccessGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventory_entity::user::UserProfile;

    fn session(role: &str) -> Session {
        let user: UserProfile = serde_json::from_value(serde_json::json!({
            "id": 1,
            "username": "tester",
            "fullName": "Test User",
            "role": role
        }))
        .unwrap();
        Session::new("token", user)
    }

    #[test]
    fn test_loading_until_first_observation() {
        let gate = AccessGate::new();
        assert_eq!(gate.state(), GateState::Loading);
        assert_eq!(gate.state().redirect(), None);
    }

    #[test]
    fn test_no_session_goes_to_login() {
        let mut gate = AccessGate::new();
        assert_eq!(gate.observe(None), Some(LandingRoute::Login));
        assert_eq!(gate.state(), GateState::Unauthenticated);
    }

    #[test]
    fn test_role_redirects() {
        let cases = [
            ("admin", LandingRoute::ManagerDashboard),
            ("Manager", LandingRoute::ManagerDashboard),
            ("supplier", LandingRoute::SupplierDashboard),
            ("storekeeper", LandingRoute::StoreKeeperDashboard),
            ("Store Keeper", LandingRoute::StoreKeeperDashboard),
            ("user", LandingRoute::AccessDenied),
            ("bogus", LandingRoute::AccessDenied),
            ("", LandingRoute::AccessDenied),
        ];

        for (role, expected) in cases {
            let mut gate = AccessGate::new();
            assert_eq!(gate.observe(Some(&session(role))), Some(expected), "role {role:?}");
        }
    }

    #[test]
    fn test_unknown_role_state() {
        let mut gate = AccessGate::new();
        gate.observe(Some(&session("user")));
        assert_eq!(gate.state(), GateState::AuthenticatedUnknownRole);

        let mut gate = AccessGate::new();
        gate.observe(Some(&session("SUPPLIER")));
        assert_eq!(gate.state(), GateState::AuthenticatedKnownRole(UserRole::Supplier));
    }

    #[test]
    fn test_only_reevaluates_on_change() {
        let mut gate = AccessGate::new();
        let manager = session("MANAGER");

        assert_eq!(gate.observe(Some(&manager)), Some(LandingRoute::ManagerDashboard));
        assert_eq!(gate.observe(Some(&manager)), None);

        assert_eq!(gate.observe(None), Some(LandingRoute::Login));
        assert_eq!(gate.observe(None), None);

        assert_eq!(
            gate.observe(Some(&session("supplier"))),
            Some(LandingRoute::SupplierDashboard)
        );
    }

    #[test]
    fn test_require_roles() {
        let supplier = session("SUPPLIER");
        let allowed = [UserRole::Supplier, UserRole::Manager];

        assert_eq!(AccessGate::require_roles(Some(&supplier), &allowed), Access::Allowed);
        assert_eq!(
            AccessGate::require_roles(Some(&supplier), &[UserRole::Admin]),
            Access::Denied(LandingRoute::AccessDenied)
        );
        assert_eq!(
            AccessGate::require_roles(None, &allowed),
            Access::Denied(LandingRoute::Login)
        );
    }

    #[test]
    fn test_landing_for() {
        assert_eq!(AccessGate::landing_for(None), LandingRoute::Login);
        assert_eq!(
            AccessGate::landing_for(Some(UserRole::Admin)),
            LandingRoute::ManagerDashboard
        );
    }
}
