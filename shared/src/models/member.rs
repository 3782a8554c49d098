//! Member Model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Membership lifecycle state (会员状态)
///
/// `Dormant` is the canonical name for lapsed memberships; older UI builds
/// labelled the same state "Expired", so that spelling is accepted on input
/// but never written back.
///
/// `Pending` is reserved: no current flow targets or leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberStatus {
    Active,
    Cancelled,
    #[serde(alias = "Expired")]
    Dormant,
    Pending,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "Active",
            MemberStatus::Cancelled => "Cancelled",
            MemberStatus::Dormant => "Dormant",
            MemberStatus::Pending => "Pending",
        }
    }
}

impl std::fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Member entity (会员)
///
/// Tenant-owned: every row belongs to exactly one gym (`gym_id`) and all
/// reads/writes are filtered by it. `id` and `gym_id` are immutable after
/// creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub gym_id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_joining: NaiveDate,
    pub emergency_contact: Option<String>,
    pub govt_id_type: Option<String>,
    pub govt_id_num: Option<String>,
    #[serde(default)]
    pub personal_trainer: bool,
    pub status: MemberStatus,
    pub package_name: Option<String>,
    pub package_end_date: Option<NaiveDate>,
    /// Set only while status == Cancelled, cleared on reactivation
    pub cancellation_reason: Option<String>,
    /// Paired with cancellation_reason
    pub cancellation_date: Option<NaiveDate>,
    pub reactivation_date: Option<NaiveDate>,
    /// 0-5 stars, mutable at any time
    #[serde(default)]
    pub rating: u8,
    /// Signed currency amount; positive = owed to the gym
    #[serde(default)]
    pub balance: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create member payload
///
/// `status`, `date_of_joining`, `id` and both timestamps are server-assigned;
/// the form cannot influence them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberCreate {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub emergency_contact: Option<String>,
    pub govt_id_type: Option<String>,
    pub govt_id_num: Option<String>,
    #[serde(default)]
    pub personal_trainer: bool,
    pub package_name: Option<String>,
    pub package_end_date: Option<NaiveDate>,
}

/// POST /api/members/:id/cancel-membership body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelMembershipRequest {
    pub reason: String,
    /// May be back- or future-dated; not validated against date_of_joining
    pub effective_date: NaiveDate,
}

/// POST /api/members/:id/reactivate body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactivateRequest {
    /// Package catalog reference; existence is the catalog's concern
    pub package_id: String,
    pub start_date: NaiveDate,
}

/// PATCH /api/members/:id/rating body
///
/// Wide integer on purpose: out-of-range values must reach the engine's
/// bounds check instead of failing JSON deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingUpdateRequest {
    pub rating: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_canonical_names() {
        assert_eq!(
            serde_json::to_string(&MemberStatus::Dormant).expect("serialize"),
            "\"Dormant\""
        );
        assert_eq!(
            serde_json::to_string(&MemberStatus::Active).expect("serialize"),
            "\"Active\""
        );
    }

    #[test]
    fn status_accepts_legacy_expired_label() {
        let status: MemberStatus = serde_json::from_str("\"Expired\"").expect("deserialize");
        assert_eq!(status, MemberStatus::Dormant);
    }

    #[test]
    fn cancel_request_uses_camel_case_keys() {
        let req: CancelMembershipRequest = serde_json::from_str(
            r#"{"reason":"Financial constraints","effectiveDate":"2024-03-01"}"#,
        )
        .expect("deserialize");
        assert_eq!(req.reason, "Financial constraints");
        assert_eq!(req.effective_date.to_string(), "2024-03-01");
    }
}
