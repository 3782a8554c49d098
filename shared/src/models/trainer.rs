//! Trainer Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trainer entity (教练)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trainer {
    pub id: String,
    pub gym_id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub specialization: Option<String>,
    /// "Active" on creation; no lifecycle beyond that
    pub status: String,
    #[serde(default)]
    pub rating: u8,
    pub created_at: DateTime<Utc>,
}

/// Create trainer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerCreate {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub specialization: Option<String>,
}
