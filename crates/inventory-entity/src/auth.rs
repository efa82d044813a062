//! Authentication request and response bodies exchanged with the user service.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::user::UserProfile;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Reply of `POST /api/auth/login`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Whether the credentials were accepted.
    #[serde(default)]
    pub success: bool,
    /// Bearer token on success.
    #[serde(default)]
    pub token: Option<String>,
    /// Profile of the authenticated user on success.
    #[serde(default)]
    pub user: Option<UserProfile>,
    /// Informational message.
    #[serde(default)]
    pub message: Option<String>,
    /// Error description on failure.
    #[serde(default)]
    pub error: Option<String>,
}

impl LoginResponse {
    /// The best available failure description.
    pub fn failure_message(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "Login failed".to_string())
    }
}

/// Sign-up request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// Desired username.
    #[validate(length(min = 3, max = 100))]
    pub username: String,
    /// Password.
    #[validate(length(min = 8))]
    pub password: String,
    /// Email address.
    #[validate(email)]
    pub email: String,
    /// Full name.
    #[validate(length(min = 1))]
    pub full_name: String,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Date of birth (ISO date).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
}
