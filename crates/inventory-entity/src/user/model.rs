//! User profile model.

use serde::{Deserialize, Deserializer, Serialize};

use super::role::UserRole;

/// The user profile returned by the user service and cached in the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User identifier. Numeric ids from the backend are kept as text.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Login name.
    pub username: String,
    /// Full display name.
    #[serde(default)]
    pub full_name: String,
    /// Raw role string as sent by the backend.
    #[serde(default)]
    pub role: String,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    /// Account status (e.g. `ACTIVE`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_status: Option<String>,
    /// Whether the email address was verified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
    /// Creation timestamp as sent by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl UserProfile {
    /// The parsed role of this user.
    pub fn user_role(&self) -> UserRole {
        UserRole::parse(&self.role)
    }

    /// Loose role check: exact match or substring of the raw role string.
    pub fn has_role(&self, role: &str) -> bool {
        !self.role.is_empty() && (self.role == role || self.role.contains(role))
    }

    /// Whether any of `roles` matches under [`UserProfile::has_role`].
    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|role| self.has_role(role))
    }

    /// Whether the user may reach the supplier service screens.
    pub fn can_access_supplier_service(&self) -> bool {
        self.has_role("Store Keeper") || self.has_role("MANAGER")
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_id_is_accepted() {
        let user: UserProfile = serde_json::from_value(serde_json::json!({
            "id": 42,
            "username": "sam",
            "fullName": "Sam Keeper",
            "role": "Store Keeper"
        }))
        .unwrap();

        assert_eq!(user.id, "42");
        assert_eq!(user.full_name, "Sam Keeper");
        assert_eq!(user.user_role(), UserRole::StoreKeeper);
        assert!(user.can_access_supplier_service());
    }

    #[test]
    fn test_has_role_uses_containment() {
        let user: UserProfile = serde_json::from_value(serde_json::json!({
            "id": "u-1",
            "username": "m",
            "role": "ROLE_MANAGER"
        }))
        .unwrap();

        assert!(user.has_role("MANAGER"));
        assert!(!user.has_role("SUPPLIER"));
        assert!(user.has_any_role(&["SUPPLIER", "MANAGER"]));
        assert_eq!(user.user_role(), UserRole::Unknown);
    }
}
