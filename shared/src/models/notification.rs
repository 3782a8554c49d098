//! Notification DTOs
//!
//! Ephemeral value objects — nothing here is persisted. The dispatcher is a
//! fire-and-forget collaborator that only reports a delivery count.

use serde::{Deserialize, Serialize};

/// Recipient selection rule, used when no explicit recipient list is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientSelection {
    All,
    Active,
    Cancelled,
    Dormant,
}

/// POST /api/notifications/send body
///
/// Either `recipients` (explicit names) or `selection` (a status rule) must
/// be present; `recipients` wins when both are.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRequest {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub recipients: Option<Vec<String>>,
    #[serde(default)]
    pub selection: Option<RecipientSelection>,
    pub title: String,
    pub message: String,
}

/// Dispatch result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationReceipt {
    pub sent: usize,
}
