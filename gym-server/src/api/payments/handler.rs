//! Payment API Handlers
//!
//! 流水列表 + 手动支付登记。登记写两条：流水行本身和会员余额副作用。
//! 两条写入没有事务包裹 (低频管理工具，最后写入者胜)，各自独立降级。

use axum::{
    Json,
    extract::{Extension, State},
};
use chrono::Utc;

use crate::auth::RequestContext;
use crate::backend::{members, payments};
use crate::core::ServerState;
use crate::demo;
use crate::fallback::{Source, with_fallback};
use crate::utils::validation::{
    MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, DataResponse};
use shared::models::{ManualPaymentRequest, Payment, PaymentStatus, PaymentType};

/// GET /api/payments - 获取支付流水 (created_at 倒序)
pub async fn list(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RequestContext>,
) -> AppResult<Json<DataResponse<Vec<Payment>>>> {
    let result = with_fallback(
        state.backend.as_ref(),
        "list_payments",
        |client| payments::list(client, &ctx.gym_id),
        demo::demo_payments,
    )
    .await?;

    let (payments, degraded) = result.into_parts();
    Ok(Json(DataResponse::success_degraded(payments, degraded)))
}

/// POST /api/payments/manual - 手动登记一笔支付/退款
pub async fn manual(
    State(state): State<ServerState>,
    Extension(ctx): Extension<RequestContext>,
    Json(payload): Json<ManualPaymentRequest>,
) -> AppResult<Json<DataResponse<Payment>>> {
    validate_required_text(&payload.member_id, "memberId", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.method, "method", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    if !payload.amount.is_finite() || payload.amount <= 0.0 {
        return Err(AppError::validation("amount must be a positive number"));
    }

    // 会员必须在本租户名下；在线模式查不到 → 404
    let fetched = with_fallback(
        state.backend.as_ref(),
        "find_member_for_payment",
        |client| members::find_by_id(client, &ctx.gym_id, &payload.member_id),
        || demo::member_or_placeholder(&payload.member_id),
    )
    .await?;

    let payment = new_payment(&ctx.gym_id, &payload);

    let synthetic = payment.clone();
    let inserted = with_fallback(
        state.backend.as_ref(),
        "insert_payment",
        |client| payments::insert(client, &payment),
        move || synthetic,
    )
    .await?;

    // 余额副作用：正余额 = 欠健身房的钱，收款减少欠款，退款增加。
    // 读取被掩盖时没有可信的余额基数，跳过而不是写入猜测值。
    if fetched.source != Source::Degraded {
        let new_balance = fetched.value.balance - payment.amount;
        let gym_id = ctx.gym_id.clone();
        let member_id = payload.member_id.clone();
        let balance_result = with_fallback(
            state.backend.as_ref(),
            "update_member_balance",
            |client| async move {
                members::update_balance(client, &gym_id, &member_id, new_balance)
                    .await
                    .map(|_| ())
            },
            || (),
        )
        .await?;
        if balance_result.source == Source::Degraded {
            tracing::warn!(
                member_id = %payload.member_id,
                "Payment recorded but balance update was masked"
            );
        }
    }

    let (payment, degraded) = inserted.into_parts();
    tracing::info!(
        payment_id = %payment.id,
        member_id = %payment.member_id,
        amount = payment.amount,
        gym_id = %ctx.gym_id,
        "Manual payment logged"
    );
    Ok(Json(DataResponse::success_degraded(payment, degraded)))
}

/// 构造一条流水行；退款按负数入账
fn new_payment(gym_id: &str, req: &ManualPaymentRequest) -> Payment {
    let signed_amount = match req.payment_type {
        PaymentType::Subscription => req.amount,
        PaymentType::Refund => -req.amount,
    };

    Payment {
        id: shared::util::snowflake_id().to_string(),
        gym_id: gym_id.to_string(),
        member_id: req.member_id.clone(),
        member_name: req.member_name.clone(),
        amount: signed_amount,
        method: req.method.clone(),
        payment_type: req.payment_type,
        status: PaymentStatus::Paid,
        description: req.description.clone(),
        payment_date: shared::util::today(),
        created_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(payment_type: PaymentType) -> ManualPaymentRequest {
        ManualPaymentRequest {
            member_id: "1001".to_string(),
            member_name: Some("Sarah Kim".to_string()),
            amount: 49.99,
            method: "card".to_string(),
            payment_type,
            description: None,
        }
    }

    #[test]
    fn subscription_amount_stays_positive() {
        let payment = new_payment("gym-1", &request(PaymentType::Subscription));
        assert_eq!(payment.amount, 49.99);
        assert_eq!(payment.status, PaymentStatus::Paid);
        assert_eq!(payment.gym_id, "gym-1");
    }

    #[test]
    fn refund_amount_is_negated() {
        let payment = new_payment("gym-1", &request(PaymentType::Refund));
        assert_eq!(payment.amount, -49.99);
    }
}
