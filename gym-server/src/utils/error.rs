//! 统一错误处理
//!
//! 应用级错误类型 [`AppError`] 及其 HTTP 映射。
//!
//! # 传播策略
//!
//! | 错误 | HTTP 状态码 | 是否被掩盖 |
//! |------|------------|-----------|
//! | Unauthorized / TokenExpired / InvalidToken | 401 | 否 — 唯一不被降级掩盖的失败 |
//! | Validation | 400 | 否 |
//! | NotFound | 404 | 否 (状态转换); delete 在 handler 层吞掉 |
//! | InvalidTransition | 422 | 否 |
//! | Gateway / Internal | 500 | 可掩盖的网关错误在到达这里之前已被降级 |
//!
//! 错误体固定为 `{"error": "..."}`，与前端约定一致。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::backend::GatewayError;
use crate::membership::LifecycleError;

/// 错误响应体
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 认证错误 (401) ==========
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken(String),

    // ========== 业务逻辑错误 (4xx) ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    // ========== 系统错误 (5xx) ==========
    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AppError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired".to_string()),
            AppError::InvalidToken(_) => (StatusCode::UNAUTHORIZED, "Invalid token".to_string()),

            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, format!("{} not found", msg)),

            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),

            AppError::InvalidTransition(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, msg.clone())
            }

            AppError::Gateway(msg) => {
                error!(target: "gateway", error = %msg, "Gateway error reached response layer");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }

            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }

    pub fn token_expired() -> Self {
        Self::TokenExpired
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::InvalidToken(msg.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<GatewayError> for AppError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::NotFound(resource) => AppError::NotFound(resource),
            GatewayError::BadRequest(msg) => AppError::Validation(msg),
            GatewayError::AuthRejected(msg) => AppError::Validation(msg),
            other => AppError::Gateway(other.to_string()),
        }
    }
}

impl From<LifecycleError> for AppError {
    fn from(e: LifecycleError) -> Self {
        match e {
            LifecycleError::InvalidTransition { .. } => AppError::InvalidTransition(e.to_string()),
            LifecycleError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

/// Application-level Result type
pub type AppResult<T> = Result<T, AppError>;
