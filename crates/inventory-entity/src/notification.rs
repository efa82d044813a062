//! User notification model served by the notification service.

use serde::{Deserialize, Serialize};

/// A notification addressed to one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Notification identifier.
    pub notification_id: i64,
    /// Recipient.
    pub user_id: i64,
    /// Notification text.
    #[serde(default)]
    pub message: String,
    /// Backend-defined category.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Whether the user has read it.
    #[serde(default, alias = "isRead")]
    pub read: bool,
    /// Creation timestamp as sent by the backend.
    #[serde(default)]
    pub created_at: String,
}

/// Number of unread notifications in `items`.
pub fn unread_count(items: &[Notification]) -> usize {
    items.iter().filter(|n| !n.read).count()
}
