//! User role enumeration.

use std::fmt;

use crate::route::LandingRoute;

/// Roles recognised by the portal.
///
/// The backend sends roles as free-form strings; [`UserRole::parse`] maps
/// any string onto this closed set, with [`UserRole::Unknown`] as the
/// catch-all, so every role has exactly one landing route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserRole {
    /// Full system administrator.
    Admin,
    /// Store manager.
    Manager,
    /// External supplier.
    Supplier,
    /// Warehouse / store keeper.
    StoreKeeper,
    /// Plain registered user without a dashboard.
    User,
    /// Anything the portal does not recognise (including an empty role).
    Unknown,
}

impl UserRole {
    /// All recognised roles, in privilege order.
    pub const ALL: [UserRole; 5] = [
        Self::Admin,
        Self::Manager,
        Self::Supplier,
        Self::StoreKeeper,
        Self::User,
    ];

    /// Parse a backend role string. Case-insensitive and total.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "ADMIN" => Self::Admin,
            "MANAGER" => Self::Manager,
            "SUPPLIER" => Self::Supplier,
            "STORE KEEPER" | "STOREKEEPER" => Self::StoreKeeper,
            "USER" => Self::User,
            _ => Self::Unknown,
        }
    }

    /// The route this role is sent to after authentication.
    pub fn landing(&self) -> LandingRoute {
        match self {
            Self::Admin | Self::Manager => LandingRoute::ManagerDashboard,
            Self::Supplier => LandingRoute::SupplierDashboard,
            Self::StoreKeeper => LandingRoute::StoreKeeperDashboard,
            Self::User | Self::Unknown => LandingRoute::AccessDenied,
        }
    }

    /// Whether this role is a manager or administrator.
    pub fn is_manager_or_above(&self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }

    /// Canonical backend spelling of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Manager => "MANAGER",
            Self::Supplier => "SUPPLIER",
            Self::StoreKeeper => "Store Keeper",
            Self::User => "USER",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl From<&str> for UserRole {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(UserRole::parse("admin"), UserRole::Admin);
        assert_eq!(UserRole::parse("Manager"), UserRole::Manager);
        assert_eq!(UserRole::parse("SUPPLIER"), UserRole::Supplier);
        assert_eq!(UserRole::parse("storekeeper"), UserRole::StoreKeeper);
        assert_eq!(UserRole::parse("Store Keeper"), UserRole::StoreKeeper);
        assert_eq!(UserRole::parse("user"), UserRole::User);
    }

    #[test]
    fn test_unrecognised_roles_are_unknown() {
        assert_eq!(UserRole::parse("bogus"), UserRole::Unknown);
        assert_eq!(UserRole::parse(""), UserRole::Unknown);
        assert_eq!(UserRole::parse("store-keeper"), UserRole::Unknown);
    }

    #[test]
    fn test_landing_routes() {
        let cases = [
            ("admin", "/dashboard/manager"),
            ("Manager", "/dashboard/manager"),
            ("supplier", "/dashboard/supplier"),
            ("storekeeper", "/dashboard/storekeeper"),
            ("user", "/access-denied"),
            ("bogus", "/access-denied"),
        ];

        for (raw, expected) in cases {
            assert_eq!(UserRole::parse(raw).landing().path(), expected, "role {raw}");
        }
    }

    #[test]
    fn test_canonical_names_round_trip() {
        for role in UserRole::ALL {
            assert_eq!(UserRole::parse(role.as_str()), role);
        }
    }
}
