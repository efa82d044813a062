//! Client session model.

use serde::{Deserialize, Serialize};

use crate::route::LandingRoute;
use crate::user::{UserProfile, UserRole};

/// Proof of authentication held by the client: the bearer token plus the
/// cached profile of the user it was issued to.
///
/// The two halves are only ever stored and cleared together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token.
    pub token: String,
    /// Profile of the signed-in user.
    pub user: UserProfile,
}

impl Session {
    /// Creates a session from a token and profile.
    pub fn new(token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    /// The parsed role of the session owner.
    pub fn role(&self) -> UserRole {
        self.user.user_role()
    }

    /// Where this session should land after authentication.
    pub fn landing(&self) -> LandingRoute {
        self.role().landing()
    }

    /// `Authorization` header value for outbound requests.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}
