//! Authentication Handlers
//!
//! 登录/注册委托给托管认证服务，成功后签发本地 JWT (`sub` = 租户 ID)。
//! 演示模式下任何凭证都换取演示租户令牌 —— 系统必须零配置可演示。
//!
//! 认证是唯一不走降级掩盖的路径：合成一个不存在的会话比返回错误更糟。

use axum::{
    Json,
    extract::{Extension, State},
};

use crate::auth::RequestContext;
use crate::core::ServerState;
use crate::demo;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, validate_required_text,
};
use crate::utils::{AppError, AppResult, DataResponse};
use shared::models::{GymInfo, LoginRequest, LoginResponse, SignupRequest};

/// POST /api/auth/login - 登录
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<LoginResponse>>> {
    validate_required_text(&req.email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(&req.password, "password", MAX_PASSWORD_LEN)?;

    let Some(client) = &state.backend else {
        tracing::info!(email = %req.email, "Demo mode - issuing demo tenant session");
        return Ok(Json(DataResponse::success_degraded(
            demo_session(&state, &req.email)?,
            Some(true),
        )));
    };

    let user = client.sign_in(&req.email, &req.password).await?;
    let gym_name = user.gym_name();

    let token = state
        .jwt_service
        .generate_token(&user.id, &user.email, &gym_name)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(gym_id = %user.id, email = %user.email, "Gym owner logged in");

    Ok(Json(DataResponse::success(LoginResponse {
        token,
        gym: GymInfo {
            id: user.id,
            email: user.email,
            gym_name,
            demo: false,
        },
    })))
}

/// POST /api/auth/signup - 注册新租户
pub async fn signup(
    State(state): State<ServerState>,
    Json(req): Json<SignupRequest>,
) -> AppResult<Json<DataResponse<LoginResponse>>> {
    validate_required_text(&req.email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(&req.password, "password", MAX_PASSWORD_LEN)?;
    validate_required_text(&req.gym_name, "gym_name", MAX_NAME_LEN)?;

    let Some(client) = &state.backend else {
        tracing::info!(email = %req.email, "Demo mode - issuing demo tenant session");
        return Ok(Json(DataResponse::success_degraded(
            demo_session(&state, &req.email)?,
            Some(true),
        )));
    };

    let user = client.sign_up(&req.email, &req.password, &req.gym_name).await?;

    let token = state
        .jwt_service
        .generate_token(&user.id, &user.email, &req.gym_name)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(gym_id = %user.id, email = %user.email, "New gym registered");

    Ok(Json(DataResponse::success(LoginResponse {
        token,
        gym: GymInfo {
            id: user.id,
            email: user.email,
            gym_name: req.gym_name,
            demo: false,
        },
    })))
}

/// GET /api/auth/me - 当前租户信息
pub async fn me(
    Extension(ctx): Extension<RequestContext>,
) -> AppResult<Json<DataResponse<GymInfo>>> {
    Ok(Json(DataResponse::success(GymInfo {
        id: ctx.gym_id,
        email: ctx.email,
        gym_name: ctx.gym_name,
        demo: ctx.demo,
    })))
}

fn demo_session(state: &ServerState, email: &str) -> AppResult<LoginResponse> {
    let token = state
        .jwt_service
        .generate_token(demo::DEMO_GYM_ID, email, demo::DEMO_GYM_NAME)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    Ok(LoginResponse {
        token,
        gym: GymInfo {
            id: demo::DEMO_GYM_ID.to_string(),
            email: email.to_string(),
            gym_name: demo::DEMO_GYM_NAME.to_string(),
            demo: true,
        },
    })
}
