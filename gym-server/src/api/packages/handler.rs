//! Package API Handlers

use axum::{
    Json,
    extract::{Extension, State},
};
use chrono::Utc;

use crate::auth::RequestContext;
use crate::backend::catalog;
use crate::core::ServerState;
use crate::demo;
use crate::fallback::with_fallback;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, DataResponse};
use shared::models::{GymPackage, GymPackageCreate};

/// GET /api/packages - 获取套餐目录 (created_at 倒序)
pub async fn list(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RequestContext>,
) -> AppResult<Json<DataResponse<Vec<GymPackage>>>> {
    let result = with_fallback(
        state.backend.as_ref(),
        "list_packages",
        |client| catalog::list_packages(client, &ctx.gym_id),
        demo::demo_packages,
    )
    .await?;

    let (packages, degraded) = result.into_parts();
    Ok(Json(DataResponse::success_degraded(packages, degraded)))
}

/// POST /api/packages - 创建套餐
pub async fn create(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RequestContext>,
    Json(payload): Json<GymPackageCreate>,
) -> AppResult<Json<DataResponse<GymPackage>>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    if !payload.price.is_finite() || payload.price < 0.0 {
        return Err(AppError::validation("price must be a non-negative number"));
    }
    if payload.duration_months == 0 {
        return Err(AppError::validation("duration_months must be at least 1"));
    }

    let package = GymPackage {
        id: shared::util::snowflake_id().to_string(),
        gym_id: ctx.gym_id.clone(),
        name: payload.name,
        price: payload.price,
        duration_months: payload.duration_months,
        is_active: true,
        created_at: Utc::now(),
    };

    let synthetic = package.clone();
    let result = with_fallback(
        state.backend.as_ref(),
        "create_package",
        |client| catalog::insert_package(client, &package),
        move || synthetic,
    )
    .await?;

    let (package, degraded) = result.into_parts();
    tracing::info!(package_id = %package.id, gym_id = %ctx.gym_id, "Package created");
    Ok(Json(DataResponse::success_degraded(package, degraded)))
}
