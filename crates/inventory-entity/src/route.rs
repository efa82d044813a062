//! Portal routes the access gate can redirect to.

use std::fmt;

/// Every destination the access gate may send a browser to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandingRoute {
    /// Sign-in page for visitors without a session.
    Login,
    /// Landing page for administrators and managers.
    ManagerDashboard,
    /// Landing page for suppliers.
    SupplierDashboard,
    /// Landing page for store keepers.
    StoreKeeperDashboard,
    /// Shown to authenticated users without a dashboard.
    AccessDenied,
}

impl LandingRoute {
    /// URL path of the route.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::ManagerDashboard => "/dashboard/manager",
            Self::SupplierDashboard => "/dashboard/supplier",
            Self::StoreKeeperDashboard => "/dashboard/storekeeper",
            Self::AccessDenied => "/access-denied",
        }
    }
}

impl fmt::Display for LandingRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
