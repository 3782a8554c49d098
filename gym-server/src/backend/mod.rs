//! Persistence Gateway
//!
//! 托管数据服务 (PostgREST 风格 REST 接口) 的客户端封装。
//!
//! # 配置
//!
//! `BACKEND_URL` + `BACKEND_API_KEY` 同时存在时 [`BackendClient::from_config`]
//! 返回 `Some`，否则整个服务进入演示模式。客户端在启动时创建一次并放进
//! `ServerState`，不做任何按请求的重新探测。
//!
//! # 错误分类
//!
//! [`GatewayError`] 把失败分成两类：
//!
//! - **可掩盖** (网络不可达、超时、5xx、响应解码失败)：回退策略会把它们
//!   替换成合成响应，只在服务端日志里留下记录
//! - **必须上浮** (`NotFound`、`BadRequest`、`AuthRejected`)：这些是业务
//!   语义的一部分，掩盖它们会让调用方拿到错误的结论

pub mod catalog;
pub mod members;
pub mod payments;

use serde::Deserialize;
use thiserror::Error;

use crate::core::Config;

/// 网关错误类型
#[derive(Debug, Error)]
pub enum GatewayError {
    /// 网络层失败：连接拒绝、DNS、超时
    #[error("Backend unreachable: {0}")]
    Unreachable(String),

    /// 后端返回了非预期的状态码 (主要是 5xx)
    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// 响应体无法解码成期望的模型
    #[error("Failed to decode backend response: {0}")]
    Decode(String),

    /// 租户范围内查不到目标行 —— 故意不区分"不存在"和"属于别的租户"
    #[error("Not found: {0}")]
    NotFound(String),

    /// 后端拒绝了请求内容 (400/422)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 托管认证服务拒绝了凭证
    #[error("Auth rejected: {0}")]
    AuthRejected(String),
}

impl GatewayError {
    /// 该错误是否可以被回退策略掩盖
    pub fn is_maskable(&self) -> bool {
        matches!(
            self,
            GatewayError::Unreachable(_) | GatewayError::Status { .. } | GatewayError::Decode(_)
        )
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            GatewayError::Decode(e.to_string())
        } else {
            GatewayError::Unreachable(e.to_string())
        }
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// 托管数据服务客户端
///
/// 一个 `reqwest::Client` 搭配默认请求头 (`apikey` + `Authorization`)，
/// 所有请求共享同一个带上限的超时。
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// 从配置创建客户端
    ///
    /// 任意一个网关变量缺失时返回 `None` (演示模式的唯一开关)
    pub fn from_config(config: &Config) -> Option<Self> {
        let url = config.backend_url.as_deref()?;
        let key = config.backend_api_key.as_deref()?;
        Some(Self::new(url, key, config.request_timeout_ms))
    }

    /// 手动构造 (测试场景)
    pub fn new(base_url: &str, api_key: &str, timeout_ms: u64) -> Self {
        use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(api_key) {
            headers.insert("apikey", value);
        }
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", api_key)) {
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// 统一的状态码检查
    ///
    /// 2xx 原样返回；400/422 上浮为 `BadRequest`；其余映射为 `Status`。
    pub(crate) async fn check(resp: reqwest::Response) -> GatewayResult<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        match status.as_u16() {
            400 | 422 => Err(GatewayError::BadRequest(body)),
            code => Err(GatewayError::Status { status: code, body }),
        }
    }
}

// ── Hosted auth ─────────────────────────────────────────────────────

/// 托管认证服务返回的用户；`id` 就是租户 ID
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub user_metadata: serde_json::Value,
}

impl AuthUser {
    /// 注册时随用户元数据存储的健身房名称
    pub fn gym_name(&self) -> String {
        self.user_metadata
            .get("gym_name")
            .and_then(|v| v.as_str())
            .unwrap_or("My Gym")
            .to_string()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    user: AuthUser,
}

impl BackendClient {
    /// 密码登录
    ///
    /// 凭证被拒时返回 [`GatewayError::AuthRejected`] —— 这个错误必须上浮，
    /// 否则调用方会拿到一个并不存在的会话。
    pub async fn sign_in(&self, email: &str, password: &str) -> GatewayResult<AuthUser> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        let status = resp.status();
        if status.as_u16() == 400 || status.as_u16() == 401 {
            tracing::warn!(email = %email, "Sign-in rejected by auth service");
            return Err(GatewayError::AuthRejected(
                "Invalid email or password".to_string(),
            ));
        }

        let resp = Self::check(resp).await?;
        let token: TokenResponse = resp.json().await?;
        Ok(token.user)
    }

    /// 注册新租户
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        gym_name: &str,
    ) -> GatewayResult<AuthUser> {
        let url = format!("{}/auth/v1/signup", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "data": { "gym_name": gym_name },
            }))
            .send()
            .await?;

        let status = resp.status();
        if status.as_u16() == 400 || status.as_u16() == 422 {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(email = %email, body = %body, "Sign-up rejected by auth service");
            return Err(GatewayError::AuthRejected(
                "Sign-up rejected by auth service".to_string(),
            ));
        }

        let resp = Self::check(resp).await?;
        let user: TokenResponse = resp.json().await?;
        Ok(user.user)
    }
}
