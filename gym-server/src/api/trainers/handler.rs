//! Trainer API Handlers

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
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppResult, DataResponse};
use shared::models::{Trainer, TrainerCreate};

/// GET /api/trainers - 获取教练列表 (created_at 倒序)
pub async fn list(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RequestContext>,
) -> AppResult<Json<DataResponse<Vec<Trainer>>>> {
    let result = with_fallback(
        state.backend.as_ref(),
        "list_trainers",
        |client| catalog::list_trainers(client, &ctx.gym_id),
        demo::demo_trainers,
    )
    .await?;

    let (trainers, degraded) = result.into_parts();
    Ok(Json(DataResponse::success_degraded(trainers, degraded)))
}

/// POST /api/trainers - 创建教练 (status 强制 Active, rating 从 0 开始)
pub async fn create(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RequestContext>,
    Json(payload): Json<TrainerCreate>,
) -> AppResult<Json<DataResponse<Trainer>>> {
    validate_required_text(&payload.full_name, "full_name", MAX_NAME_LEN)?;
    validate_required_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.specialization, "specialization", MAX_NAME_LEN)?;

    let trainer = Trainer {
        id: shared::util::snowflake_id().to_string(),
        gym_id: ctx.gym_id.clone(),
        full_name: payload.full_name,
        email: payload.email,
        phone: payload.phone,
        specialization: payload.specialization,
        status: "Active".to_string(),
        rating: 0,
        created_at: Utc::now(),
    };

    let synthetic = trainer.clone();
    let result = with_fallback(
        state.backend.as_ref(),
        "create_trainer",
        |client| catalog::insert_trainer(client, &trainer),
        move || synthetic,
    )
    .await?;

    let (trainer, degraded) = result.into_parts();
    tracing::info!(trainer_id = %trainer.id, gym_id = %ctx.gym_id, "Trainer created");
    Ok(Json(DataResponse::success_degraded(trainer, degraded)))
}
