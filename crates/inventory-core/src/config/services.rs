//! Backend microservice and proxy upstream configuration.

use serde::{Deserialize, Serialize};

/// Base URLs of the backend microservices the portal talks to.
///
/// Every URL falls back to a localhost port when unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    /// User service (login, signup).
    #[serde(default = "default_user_url")]
    pub user_url: String,
    /// ML service (translation, predictions).
    #[serde(default = "default_ml_url")]
    pub ml_url: String,
    /// Supplier service.
    #[serde(default = "default_supplier_url")]
    pub supplier_url: String,
    /// Product service.
    #[serde(default = "default_product_url")]
    pub product_url: String,
    /// Order service.
    #[serde(default = "default_order_url")]
    pub order_url: String,
    /// Inventory service (stock, stock alerts).
    #[serde(default = "default_inventory_url")]
    pub inventory_url: String,
    /// Resource service (drivers, vehicles).
    #[serde(default = "default_resource_url")]
    pub resource_url: String,
    /// Notification service.
    #[serde(default = "default_notification_url")]
    pub notification_url: String,
    /// API gateway (current-user verification, revenue).
    #[serde(default = "default_api_gateway_url")]
    pub api_gateway_url: String,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            user_url: default_user_url(),
            ml_url: default_ml_url(),
            supplier_url: default_supplier_url(),
            product_url: default_product_url(),
            order_url: default_order_url(),
            inventory_url: default_inventory_url(),
            resource_url: default_resource_url(),
            notification_url: default_notification_url(),
            api_gateway_url: default_api_gateway_url(),
        }
    }
}

/// Upstream targets for the same-origin proxy routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Base URL for the orders proxy. Derived from `services.order_url`
    /// when unset.
    #[serde(default)]
    pub orders_base_url: Option<String>,
    /// Path suffix appended to the orders base URL.
    #[serde(default = "default_orders_path")]
    pub orders_path: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            orders_base_url: None,
            orders_path: default_orders_path(),
        }
    }
}

impl ProxyConfig {
    /// Resolves the full orders upstream URL.
    pub fn orders_upstream(&self, services: &ServicesConfig) -> String {
        let base = match &self.orders_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("{}/api/orders", services.order_url.trim_end_matches('/')),
        };
        format!("{base}{}", self.orders_path)
    }
}

fn default_user_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_ml_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_supplier_url() -> String {
    "http://localhost:8082".to_string()
}

fn default_product_url() -> String {
    "http://localhost:8083".to_string()
}

fn default_order_url() -> String {
    "http://localhost:8084".to_string()
}

fn default_inventory_url() -> String {
    "http://localhost:8085".to_string()
}

fn default_resource_url() -> String {
    "http://localhost:8086".to_string()
}

fn default_notification_url() -> String {
    "http://localhost:8087".to_string()
}

fn default_api_gateway_url() -> String {
    "http://localhost:8090".to_string()
}

fn default_orders_path() -> String {
    "/all".to_string()
}
