//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 登录/注册/当前租户
//! - [`members`] - 会员管理与生命周期转换
//! - [`payments`] - 支付流水
//! - [`packages`] - 套餐目录
//! - [`trainers`] - 教练管理
//! - [`notifications`] - 通知派发 (mock 协作方)

pub mod auth;
pub mod health;
pub mod members;
pub mod notifications;
pub mod packages;
pub mod payments;
pub mod trainers;

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::resolve_context;
use crate::core::ServerState;

/// 组装完整的应用路由
///
/// 认证中间件对所有 `/api/` 路由生效 (公共路由在中间件内部放行)，
/// 每个请求注入一次 [`crate::auth::RequestContext`]。
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(members::router())
        .merge(payments::router())
        .merge(packages::router())
        .merge(trainers::router())
        .merge(notifications::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            resolve_context,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
