//! Notification API Handlers
//!
//! 通知派发是被 mock 的外部协作方：接受收件人 (或选择规则)、标题、
//! 正文，记录日志并报告投递数量。即发即忘，不落任何存储。

use axum::{
    Json,
    extract::{Extension, State},
};

use crate::auth::RequestContext;
use crate::backend::members;
use crate::core::ServerState;
use crate::demo;
use crate::fallback::with_fallback;
use crate::utils::validation::{MAX_MESSAGE_LEN, MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, DataResponse};
use shared::models::{MemberStatus, NotificationReceipt, NotificationRequest, RecipientSelection};

/// POST /api/notifications/send - 派发通知
pub async fn send(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RequestContext>,
    Json(payload): Json<NotificationRequest>,
) -> AppResult<Json<DataResponse<NotificationReceipt>>> {
    validate_required_text(&payload.title, "title", MAX_NAME_LEN)?;
    validate_required_text(&payload.message, "message", MAX_MESSAGE_LEN)?;

    // 显式收件人优先；否则按选择规则对会员表计数
    let (sent, degraded) = match (&payload.recipients, payload.selection) {
        (Some(recipients), _) if !recipients.is_empty() => (recipients.len(), None),
        (_, Some(selection)) => {
            let result = with_fallback(
                state.backend.as_ref(),
                "count_notification_recipients",
                |client| members::list(client, &ctx.gym_id),
                demo::demo_members,
            )
            .await?;

            let flag = result.degraded_flag();
            let count = result
                .value
                .iter()
                .filter(|m| matches_selection(m.status, selection))
                .count();
            (count, flag)
        }
        _ => {
            return Err(AppError::validation(
                "either recipients or selection must be provided",
            ));
        }
    };

    tracing::info!(
        target: "notifications",
        kind = %payload.kind,
        title = %payload.title,
        sent,
        gym_id = %ctx.gym_id,
        "Notification dispatched"
    );

    Ok(Json(DataResponse::success_degraded(
        NotificationReceipt { sent },
        degraded,
    )))
}

fn matches_selection(status: MemberStatus, selection: RecipientSelection) -> bool {
    match selection {
        RecipientSelection::All => true,
        RecipientSelection::Active => status == MemberStatus::Active,
        RecipientSelection::Cancelled => status == MemberStatus::Cancelled,
        RecipientSelection::Dormant => status == MemberStatus::Dormant,
    }
}
