//! Payment Model
//!
//! Append-only ledger entries; no state machine of their own.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Settlement state of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    Pending,
    Overdue,
}

/// Direction of a manual payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Subscription,
    Refund,
}

/// Payment entity (支付记录)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub gym_id: String,
    pub member_id: String,
    pub member_name: Option<String>,
    /// Signed by type: refunds are stored negative
    pub amount: f64,
    pub method: String,
    pub payment_type: PaymentType,
    pub status: PaymentStatus,
    pub description: Option<String>,
    pub payment_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// POST /api/payments/manual body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualPaymentRequest {
    pub member_id: String,
    pub member_name: Option<String>,
    pub amount: f64,
    pub method: String,
    #[serde(rename = "type")]
    pub payment_type: PaymentType,
    pub description: Option<String>,
}
