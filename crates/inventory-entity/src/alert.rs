//! Stock alert model served by the inventory service.

use serde::{Deserialize, Serialize};

/// A low-stock or out-of-stock alert for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAlert {
    /// Alert identifier.
    pub alert_id: i64,
    /// Product the alert is about.
    pub product_id: i64,
    /// `LOW_STOCK`, `OUT_OF_STOCK` or another backend-defined type.
    pub alert_type: String,
    /// Human-readable alert text.
    #[serde(default)]
    pub message: String,
    /// Whether the alert has been resolved.
    #[serde(default)]
    pub is_resolved: bool,
    /// Creation timestamp as sent by the backend.
    #[serde(default)]
    pub created_at: String,
}

impl StockAlert {
    /// Whether the product has run out entirely.
    pub fn is_out_of_stock(&self) -> bool {
        self.alert_type.eq_ignore_ascii_case("OUT_OF_STOCK")
    }
}
