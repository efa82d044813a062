//! # inventory-worker
//!
//! Periodic background fetches for dashboards.
//!
//! - `polling`: cancellable fixed-interval poller with latest-wins state
//! - `alerts`: stock alert client polled by the dashboards
//! - `notifications`: per-user notification client polled by the dashboards

pub mod alerts;
pub mod notifications;
pub mod polling;

pub use alerts::StockAlertClient;
pub use notifications::NotificationClient;
pub use polling::{PollHandle, PollState, PollingTask};
