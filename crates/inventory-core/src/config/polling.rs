//! Dashboard polling configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Fixed refresh intervals for periodically polled dashboard data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Stock alert refresh interval in seconds.
    #[serde(default = "default_stock_alerts")]
    pub stock_alerts_interval_seconds: u64,
    /// Notification refresh interval in seconds.
    #[serde(default = "default_notifications")]
    pub notifications_interval_seconds: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            stock_alerts_interval_seconds: default_stock_alerts(),
            notifications_interval_seconds: default_notifications(),
        }
    }
}

impl PollingConfig {
    /// Stock alert interval as a `Duration`, never zero.
    pub fn stock_alerts_interval(&self) -> Duration {
        Duration::from_secs(self.stock_alerts_interval_seconds.max(1))
    }

    /// Notification interval as a `Duration`, never zero.
    pub fn notifications_interval(&self) -> Duration {
        Duration::from_secs(self.notifications_interval_seconds.max(1))
    }
}

fn default_stock_alerts() -> u64 {
    30
}

fn default_notifications() -> u64 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intervals_default_and_never_zero() {
        let config = PollingConfig::default();
        assert_eq!(config.stock_alerts_interval(), Duration::from_secs(30));
        assert_eq!(config.notifications_interval(), Duration::from_secs(20));

        let config: PollingConfig =
            serde_json::from_str(r#"{ "notifications_interval_seconds": 0 }"#).unwrap();
        assert_eq!(config.notifications_interval(), Duration::from_secs(1));
        assert_eq!(config.stock_alerts_interval(), Duration::from_secs(30));
    }
}
