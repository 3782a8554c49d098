//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] / [`AppResult`] - 应用错误类型
//! - [`DataResponse`] / [`ActionResponse`] - API 响应结构
//! - 日志、输入校验

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{AppError, AppResult};

use serde::{Deserialize, Serialize};

/// 集合/创建类接口的响应结构
///
/// ```json
/// { "data": [...], "error": null }
/// ```
///
/// `degraded` 仅在响应来自演示数据或被掩盖的存储失败时出现，
/// 前端可借此显示非阻塞警告而不是误以为已持久化。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: Option<T>,
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded: Option<bool>,
}

impl<T> DataResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            degraded: None,
        }
    }

    /// 创建带降级标记的成功响应
    pub fn success_degraded(data: T, degraded: Option<bool>) -> Self {
        Self {
            data: Some(data),
            error: None,
            degraded,
        }
    }
}

/// 动作类接口的响应结构 (cancel / reactivate / delete / rating)
///
/// ```json
/// { "success": true, "data": { ... } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded: Option<bool>,
}

impl<T> ActionResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            degraded: None,
        }
    }

    /// 创建带降级标记的成功响应
    pub fn success_degraded(data: T, degraded: Option<bool>) -> Self {
        Self {
            success: true,
            data: Some(data),
            degraded,
        }
    }
}

impl ActionResponse<()> {
    /// 创建无数据的成功响应
    pub fn ok() -> Self {
        Self {
            success: true,
            data: None,
            degraded: None,
        }
    }

    /// 创建无数据、带降级标记的成功响应
    pub fn ok_degraded(degraded: Option<bool>) -> Self {
        Self {
            success: true,
            data: None,
            degraded,
        }
    }
}
