//! Auth DTOs

use serde::{Deserialize, Serialize};

/// Login request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Signup request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub gym_name: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub gym: GymInfo,
}

/// Gym (tenant) information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GymInfo {
    pub id: String,
    pub email: String,
    pub gym_name: String,
    /// True when the token was issued without a configured backend
    #[serde(default)]
    pub demo: bool,
}
