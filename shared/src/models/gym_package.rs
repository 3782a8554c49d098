//! Package Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Membership package entity (套餐)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GymPackage {
    pub id: String,
    pub gym_id: String,
    pub name: String,
    pub price: f64,
    pub duration_months: u32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Create package payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GymPackageCreate {
    pub name: String,
    pub price: f64,
    pub duration_months: u32,
}
