//! 认证中间件
//!
//! 每个请求只构造一次 [`RequestContext`]（租户 + 运行模式），
//! 之后的 handler 不再各自重新推导配置状态。

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::JwtService;
use crate::core::ServerState;
use crate::demo;
use crate::security_log;
use crate::utils::AppError;

/// 每请求的租户上下文
///
/// 由认证中间件创建并注入请求扩展 (`req.extensions_mut().insert(ctx)`)。
///
/// # 两种来源
///
/// - 演示模式 (后端未配置)：固定的演示租户，无需任何凭证 ——
///   整个系统必须在零配置下可完整演示
/// - 在线模式：`Authorization: Bearer <token>` 中的 JWT，
///   缺失或无效一律 401，这是唯一不被降级掩盖的失败
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// 租户 ID，所有数据访问的过滤条件
    pub gym_id: String,
    /// 登录邮箱 (来自令牌或演示数据)
    pub email: String,
    /// 健身房名称 (来自令牌或演示数据)
    pub gym_name: String,
    /// 是否演示租户
    pub demo: bool,
}

impl RequestContext {
    /// 演示租户上下文
    pub fn demo() -> Self {
        Self {
            gym_id: demo::DEMO_GYM_ID.to_string(),
            email: demo::DEMO_GYM_EMAIL.to_string(),
            gym_name: demo::DEMO_GYM_NAME.to_string(),
            demo: true,
        }
    }
}

/// 认证中间件 - 解析租户上下文
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径
/// - `/api/health`
/// - `/api/auth/login`, `/api/auth/signup` (登录/注册接口)
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 在线模式无 Authorization 头 | 401 Unauthorized |
/// | 令牌过期 | 401 TokenExpired |
/// | 无效令牌 | 401 InvalidToken |
pub async fn resolve_context(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // 非 API 路由跳过认证 (让它们正常返回 404)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    // 公共 API 路由跳过认证
    let is_public_api_route =
        path == "/api/health" || path == "/api/auth/login" || path == "/api/auth/signup";
    if is_public_api_route {
        return Ok(next.run(req).await);
    }

    // 演示模式：注入固定的演示租户，不要求凭证
    if !state.is_live() {
        req.extensions_mut().insert(RequestContext::demo());
        return Ok(next.run(req).await);
    }

    let jwt_service = state.get_jwt_service();
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    // 验证令牌
    match jwt_service.validate_token(token) {
        Ok(claims) => {
            let ctx = RequestContext {
                gym_id: claims.sub,
                email: claims.email,
                gym_name: claims.gym_name,
                demo: false,
            };
            req.extensions_mut().insert(ctx);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );

            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}
