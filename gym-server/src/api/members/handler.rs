//! Member API Handlers
//!
//! 会员 CRUD 和生命周期转换入口。所有读写都经过 [`with_fallback`]：
//! 后端未配置或存储失败时返回合成响应，响应里带 `degraded` 标记。

use axum::{
    Json,
    extract::{Extension, Path, State},
};

use crate::auth::RequestContext;
use crate::backend::members;
use crate::core::ServerState;
use crate::demo;
use crate::fallback::{Fallback, Source, with_fallback};
use crate::membership;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{ActionResponse, AppResult, DataResponse};
use shared::models::{
    CancelMembershipRequest, Member, MemberCreate, MemberStatus, RatingUpdateRequest,
    ReactivateRequest,
};

/// GET /api/members - 获取会员列表 (created_at 倒序)
pub async fn list(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RequestContext>,
) -> AppResult<Json<DataResponse<Vec<Member>>>> {
    let result = with_fallback(
        state.backend.as_ref(),
        "list_members",
        |client| members::list(client, &ctx.gym_id),
        demo::demo_members,
    )
    .await?;

    let (members, degraded) = result.into_parts();
    Ok(Json(DataResponse::success_degraded(members, degraded)))
}

/// POST /api/members - 创建会员 (status 强制 Active)
pub async fn create(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RequestContext>,
    Json(payload): Json<MemberCreate>,
) -> AppResult<Json<DataResponse<Member>>> {
    validate_required_text(&payload.full_name, "full_name", MAX_NAME_LEN)?;
    validate_required_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.emergency_contact, "emergency_contact", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.govt_id_num, "govt_id_num", MAX_SHORT_TEXT_LEN)?;

    // 服务端字段 (id / 时间戳 / Active) 在这里统一赋值；
    // 在线插入和合成响应共用同一条记录
    let member = membership::new_member(&ctx.gym_id, payload);

    let synthetic = member.clone();
    let result = with_fallback(
        state.backend.as_ref(),
        "create_member",
        |client| members::insert(client, &member),
        move || synthetic,
    )
    .await?;

    let (member, degraded) = result.into_parts();
    tracing::info!(member_id = %member.id, gym_id = %ctx.gym_id, "Member created");
    Ok(Json(DataResponse::success_degraded(member, degraded)))
}

/// DELETE /api/members/:id - 删除会员
///
/// 对调用方始终幂等：删除不存在的 id 也返回成功。
pub async fn delete(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> AppResult<Json<ActionResponse<()>>> {
    let result = with_fallback(
        state.backend.as_ref(),
        "delete_member",
        |client| members::delete(client, &ctx.gym_id, &id),
        || (),
    )
    .await?;

    tracing::info!(member_id = %id, gym_id = %ctx.gym_id, "Member deleted");
    Ok(Json(ActionResponse::ok_degraded(result.degraded_flag())))
}

/// POST /api/members/:id/cancel-membership - 取消会籍
pub async fn cancel_membership(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
    Json(payload): Json<CancelMembershipRequest>,
) -> AppResult<Json<ActionResponse<Member>>> {
    validate_required_text(&payload.reason, "reason", MAX_NOTE_LEN)?;

    let fetched = load_member(&state, &ctx, &id).await?;
    let source_status = transition_source(&fetched, MemberStatus::Active);
    let member = fetched.value;

    let patch = membership::cancel(source_status, &payload)?;

    let synthetic_base = member.clone();
    let result = with_fallback(
        state.backend.as_ref(),
        "cancel_membership",
        |client| members::update_status(client, &ctx.gym_id, &id, &patch),
        || {
            let mut m = synthetic_base;
            membership::apply_status(&mut m, &patch);
            m
        },
    )
    .await?;

    let (member, degraded) = result.into_parts();
    tracing::info!(
        member_id = %id,
        gym_id = %ctx.gym_id,
        reason = %payload.reason,
        "Membership cancelled"
    );
    Ok(Json(ActionResponse::success_degraded(member, degraded)))
}

/// POST /api/members/:id/reactivate - 恢复会籍
pub async fn reactivate(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
    Json(payload): Json<ReactivateRequest>,
) -> AppResult<Json<ActionResponse<Member>>> {
    let fetched = load_member(&state, &ctx, &id).await?;
    let source_status = transition_source(&fetched, MemberStatus::Cancelled);
    let member = fetched.value;

    let patch = membership::reactivate(source_status, &payload)?;

    let synthetic_base = member.clone();
    let result = with_fallback(
        state.backend.as_ref(),
        "reactivate_membership",
        |client| members::update_status(client, &ctx.gym_id, &id, &patch),
        || {
            let mut m = synthetic_base;
            membership::apply_status(&mut m, &patch);
            m
        },
    )
    .await?;

    let (member, degraded) = result.into_parts();
    tracing::info!(
        member_id = %id,
        gym_id = %ctx.gym_id,
        package_id = %payload.package_id,
        "Membership reactivated"
    );
    Ok(Json(ActionResponse::success_degraded(member, degraded)))
}

/// PATCH /api/members/:id/rating - 更新评分 (0-5)
pub async fn update_rating(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
    Json(payload): Json<RatingUpdateRequest>,
) -> AppResult<Json<ActionResponse<()>>> {
    let patch = membership::rate(payload.rating)?;

    let result = with_fallback(
        state.backend.as_ref(),
        "update_rating",
        |client| async move {
            members::update_rating(client, &ctx.gym_id, &id, &patch)
                .await
                .map(|_| ())
        },
        || (),
    )
    .await?;

    Ok(Json(ActionResponse::ok_degraded(result.degraded_flag())))
}

// ── Shared transition plumbing ──────────────────────────────────────

/// 读出当前会员用于转换校验
///
/// 在线模式下租户范围内查不到 → 404；读取被掩盖时返回占位数据。
async fn load_member(
    state: &ServerState,
    ctx: &RequestContext,
    id: &str,
) -> AppResult<Fallback<Member>> {
    with_fallback(
        state.backend.as_ref(),
        "find_member",
        |client| members::find_by_id(client, &ctx.gym_id, id),
        || {
            let mut m = demo::member_or_placeholder(id);
            m.gym_id = ctx.gym_id.clone();
            m
        },
    )
    .await
}

/// 转换校验用的源状态
///
/// 读取被掩盖时看不到真实状态：此时按掩盖策略放行，假定转换期望的
/// 源状态，只保留输入校验。其余情况用读到的真实状态做严格校验。
fn transition_source(fetched: &Fallback<Member>, assumed: MemberStatus) -> MemberStatus {
    if fetched.source == Source::Degraded {
        assumed
    } else {
        fetched.value.status
    }
}
