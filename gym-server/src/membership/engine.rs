//! Membership Lifecycle Engine
//!
//! 会员状态机：Active / Cancelled / Dormant / Pending 之间的转换规则、
//! 每个转换必须携带的数据、以及它产生的字段副作用。
//!
//! 引擎是纯函数：输入当前状态和转换请求，输出一个字段补丁或一个类型化
//! 错误，不做任何 I/O。同一个补丁既交给网关 PATCH 到托管数据库，也在
//! 演示模式下直接折叠进内存对象 —— 两条路径不可能发散。
//!
//! # 转换表
//!
//! | From | Event | To | 副作用 |
//! |------|-------|----|--------|
//! | Active | Cancel | Cancelled | 写入 reason + date |
//! | Cancelled / Dormant | Reactivate | Active | 清空 reason + date，记录 reactivation_date |
//! | 任意 | RatingUpdate | 不变 | 只改 rating |
//! | 任意 | Delete | (终态) | 行删除 |
//!
//! 源状态不匹配的 Cancel / Reactivate 会被拒绝 (422)。早期版本对此不做
//! 检查、盲目写入；拒绝是有意的行为收紧，不是疏漏。
//!
//! 不变量：`status == Cancelled` 当且仅当两个 cancellation 字段都非空。
//! 两个转换补丁都同时写 status 和两个字段，所以这条不变量在构造层面
//! 就成立，不依赖调用方配合。

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use thiserror::Error;

use shared::models::{
    CancelMembershipRequest, Member, MemberCreate, MemberStatus, ReactivateRequest,
};

/// 评分上限 (0-5 星)
pub const MAX_RATING: i64 = 5;

/// 生命周期错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("cannot {event} a member in status {from}")]
    InvalidTransition {
        from: MemberStatus,
        event: &'static str,
    },

    #[error("{0}")]
    Validation(String),
}

/// 状态转换补丁 (cancel / reactivate)
///
/// 两个 cancellation 字段总是被序列化：reactivate 需要写出显式的 null
/// 才能清掉旧值。`reactivation_date` 只在 reactivate 时出现。
#[derive(Debug, Clone, Serialize)]
pub struct StatusPatch {
    pub status: MemberStatus,
    pub cancellation_reason: Option<String>,
    pub cancellation_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reactivation_date: Option<NaiveDate>,
    pub updated_at: DateTime<Utc>,
}

/// 评分补丁，与状态无关
#[derive(Debug, Clone, Serialize)]
pub struct RatingPatch {
    pub rating: u8,
    pub updated_at: DateTime<Utc>,
}

/// Cancel 转换
///
/// 要求源状态 Active、理由非空。`effective_date` 允许回填或未来日期，
/// 不与 `date_of_joining` 交叉校验。
pub fn cancel(
    current: MemberStatus,
    req: &CancelMembershipRequest,
) -> Result<StatusPatch, LifecycleError> {
    if req.reason.trim().is_empty() {
        return Err(LifecycleError::Validation(
            "Cancellation reason must not be empty".to_string(),
        ));
    }

    if current != MemberStatus::Active {
        return Err(LifecycleError::InvalidTransition {
            from: current,
            event: "cancel",
        });
    }

    Ok(StatusPatch {
        status: MemberStatus::Cancelled,
        cancellation_reason: Some(req.reason.clone()),
        cancellation_date: Some(req.effective_date),
        reactivation_date: None,
        updated_at: Utc::now(),
    })
}

/// Reactivate 转换
///
/// 要求源状态 Cancelled 或 Dormant。`package_id` 只要求非空 ——
/// 套餐是否存在由套餐目录负责，引擎不做跨目录校验；套餐归属
/// (`package_name` / `package_end_date`) 也由调用方另行设置。
pub fn reactivate(
    current: MemberStatus,
    req: &ReactivateRequest,
) -> Result<StatusPatch, LifecycleError> {
    if req.package_id.trim().is_empty() {
        return Err(LifecycleError::Validation(
            "packageId must not be empty".to_string(),
        ));
    }

    match current {
        MemberStatus::Cancelled | MemberStatus::Dormant => Ok(StatusPatch {
            status: MemberStatus::Active,
            cancellation_reason: None,
            cancellation_date: None,
            reactivation_date: Some(req.start_date),
            updated_at: Utc::now(),
        }),
        other => Err(LifecycleError::InvalidTransition {
            from: other,
            event: "reactivate",
        }),
    }
}

/// RatingUpdate 转换，0-5 之外一律拒绝
pub fn rate(rating: i64) -> Result<RatingPatch, LifecycleError> {
    if !(0..=MAX_RATING).contains(&rating) {
        return Err(LifecycleError::Validation(format!(
            "rating must be between 0 and {MAX_RATING}, got {rating}"
        )));
    }

    Ok(RatingPatch {
        rating: rating as u8,
        updated_at: Utc::now(),
    })
}

/// 把状态补丁折叠进内存中的会员对象 (演示模式 / 测试)
pub fn apply_status(member: &mut Member, patch: &StatusPatch) {
    member.status = patch.status;
    member.cancellation_reason = patch.cancellation_reason.clone();
    member.cancellation_date = patch.cancellation_date;
    if let Some(date) = patch.reactivation_date {
        member.reactivation_date = Some(date);
    }
    member.updated_at = patch.updated_at;
}

/// 把评分补丁折叠进内存中的会员对象
pub fn apply_rating(member: &mut Member, patch: &RatingPatch) {
    member.rating = patch.rating;
    member.updated_at = patch.updated_at;
}

/// 构造一条新的会员行
///
/// 服务端强制的字段在这里统一赋值：`status = Active`、
/// `date_of_joining = 今天`、snowflake `id`、两个时间戳。
/// 在线插入和演示合成共用这一个构造，保证两种响应形状一致。
pub fn new_member(gym_id: &str, payload: MemberCreate) -> Member {
    let now = shared::util::now();
    Member {
        id: shared::util::snowflake_id().to_string(),
        gym_id: gym_id.to_string(),
        full_name: payload.full_name,
        email: payload.email,
        phone: payload.phone,
        gender: payload.gender,
        date_of_birth: payload.date_of_birth,
        date_of_joining: shared::util::today(),
        emergency_contact: payload.emergency_contact,
        govt_id_type: payload.govt_id_type,
        govt_id_num: payload.govt_id_num,
        personal_trainer: payload.personal_trainer,
        status: MemberStatus::Active,
        package_name: payload.package_name,
        package_end_date: payload.package_end_date,
        cancellation_reason: None,
        cancellation_date: None,
        reactivation_date: None,
        rating: 0,
        balance: 0.0,
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cancel_req(reason: &str, date: &str) -> CancelMembershipRequest {
        CancelMembershipRequest {
            reason: reason.to_string(),
            effective_date: date.parse().expect("valid date"),
        }
    }

    fn reactivate_req(package_id: &str, date: &str) -> ReactivateRequest {
        ReactivateRequest {
            package_id: package_id.to_string(),
            start_date: date.parse().expect("valid date"),
        }
    }

    fn member(gym_id: &str) -> Member {
        new_member(
            gym_id,
            MemberCreate {
                full_name: "Jane Doe".to_string(),
                email: "jane@x.com".to_string(),
                phone: "+1 555 0100".to_string(),
                gender: Some("Female".to_string()),
                date_of_birth: Some("1990-01-01".parse().expect("valid date")),
                emergency_contact: None,
                govt_id_type: None,
                govt_id_num: None,
                personal_trainer: false,
                package_name: None,
                package_end_date: None,
            },
        )
    }

    #[test]
    fn new_member_is_forced_active_with_joining_date() {
        let m = member("gym-1");
        assert_eq!(m.status, MemberStatus::Active);
        assert_eq!(m.date_of_joining, shared::util::today());
        assert!(!m.id.is_empty());
        assert_eq!(m.gym_id, "gym-1");
        assert!(m.updated_at >= m.created_at);
    }

    #[test]
    fn cancel_active_sets_reason_and_date() {
        let patch = cancel(
            MemberStatus::Active,
            &cancel_req("Financial constraints", "2024-03-01"),
        )
        .expect("cancel should succeed from Active");

        assert_eq!(patch.status, MemberStatus::Cancelled);
        assert_eq!(
            patch.cancellation_reason.as_deref(),
            Some("Financial constraints")
        );
        assert_eq!(
            patch.cancellation_date,
            Some("2024-03-01".parse().expect("valid date"))
        );
    }

    #[test]
    fn cancel_accepts_backdated_and_future_dates() {
        assert!(cancel(MemberStatus::Active, &cancel_req("Moving", "2020-01-01")).is_ok());
        assert!(cancel(MemberStatus::Active, &cancel_req("Moving", "2099-01-01")).is_ok());
    }

    #[test]
    fn cancel_rejects_empty_reason() {
        let err = cancel(MemberStatus::Active, &cancel_req("  ", "2024-03-01"))
            .expect_err("empty reason must be rejected");
        assert!(matches!(err, LifecycleError::Validation(_)));
    }

    #[test]
    fn cancel_rejects_non_active_sources() {
        for from in [
            MemberStatus::Cancelled,
            MemberStatus::Dormant,
            MemberStatus::Pending,
        ] {
            let err = cancel(from, &cancel_req("Moving", "2024-03-01"))
                .expect_err("cancel must require Active");
            assert_eq!(
                err,
                LifecycleError::InvalidTransition {
                    from,
                    event: "cancel"
                }
            );
        }
    }

    #[test]
    fn reactivate_clears_cancellation_state() {
        // P3: reactivation must null both fields regardless of prior values
        let mut m = member("gym-1");
        let cancel_patch = cancel(m.status, &cancel_req("Health issues", "2024-03-01"))
            .expect("cancel should succeed");
        apply_status(&mut m, &cancel_patch);
        assert_eq!(m.status, MemberStatus::Cancelled);

        let patch = reactivate(m.status, &reactivate_req("2", "2024-04-01"))
            .expect("reactivate should succeed from Cancelled");
        apply_status(&mut m, &patch);

        assert_eq!(m.status, MemberStatus::Active);
        assert!(m.cancellation_reason.is_none());
        assert!(m.cancellation_date.is_none());
        assert_eq!(
            m.reactivation_date,
            Some("2024-04-01".parse().expect("valid date"))
        );
    }

    #[test]
    fn reactivate_allows_dormant_source() {
        assert!(reactivate(MemberStatus::Dormant, &reactivate_req("1", "2024-04-01")).is_ok());
    }

    #[test]
    fn reactivate_rejects_active_and_pending() {
        for from in [MemberStatus::Active, MemberStatus::Pending] {
            let err = reactivate(from, &reactivate_req("1", "2024-04-01"))
                .expect_err("reactivate must require Cancelled or Dormant");
            assert!(matches!(err, LifecycleError::InvalidTransition { .. }));
        }
    }

    #[test]
    fn reactivate_rejects_empty_package() {
        let err = reactivate(MemberStatus::Cancelled, &reactivate_req("", "2024-04-01"))
            .expect_err("empty packageId must be rejected");
        assert!(matches!(err, LifecycleError::Validation(_)));
    }

    #[test]
    fn reactivate_does_not_touch_package_end_date() {
        let mut m = member("gym-1");
        m.package_end_date = Some("2024-06-30".parse().expect("valid date"));
        let cancel_patch =
            cancel(m.status, &cancel_req("Temporary break", "2024-03-01")).expect("cancel");
        apply_status(&mut m, &cancel_patch);

        let patch = reactivate(m.status, &reactivate_req("3", "2024-04-01")).expect("reactivate");
        apply_status(&mut m, &patch);
        assert_eq!(
            m.package_end_date,
            Some("2024-06-30".parse().expect("valid date"))
        );
    }

    #[test]
    fn mutual_exclusivity_invariant_holds_through_transitions() {
        // P1: status == Cancelled <=> both cancellation fields set
        let mut m = member("gym-1");
        let check = |m: &Member| {
            let cancelled = m.status == MemberStatus::Cancelled;
            assert_eq!(
                cancelled,
                m.cancellation_reason.is_some() && m.cancellation_date.is_some()
            );
            if !cancelled {
                assert!(m.cancellation_reason.is_none());
                assert!(m.cancellation_date.is_none());
            }
        };

        check(&m);
        let patch = cancel(m.status, &cancel_req("Found alternative gym", "2024-03-01"))
            .expect("cancel");
        apply_status(&mut m, &patch);
        check(&m);
        let patch = reactivate(m.status, &reactivate_req("4", "2024-04-01")).expect("reactivate");
        apply_status(&mut m, &patch);
        check(&m);
    }

    #[test]
    fn rating_bounds_enforced() {
        // P6
        assert!(rate(0).is_ok());
        assert!(rate(5).is_ok());
        assert!(rate(6).is_err());
        assert!(rate(-1).is_err());
    }

    #[test]
    fn rating_leaves_status_alone() {
        let mut m = member("gym-1");
        let patch = rate(4).expect("valid rating");
        apply_rating(&mut m, &patch);
        assert_eq!(m.rating, 4);
        assert_eq!(m.status, MemberStatus::Active);
    }

    #[test]
    fn status_patch_serializes_explicit_nulls_on_reactivate() {
        let patch = reactivate(MemberStatus::Cancelled, &reactivate_req("2", "2024-04-01"))
            .expect("reactivate");
        let json = serde_json::to_value(&patch).expect("serialize");
        // 显式 null 才能在 PATCH 里清掉旧值
        assert!(json.get("cancellation_reason").expect("key present").is_null());
        assert!(json.get("cancellation_date").expect("key present").is_null());
        assert_eq!(json["status"], "Active");
    }

    #[test]
    fn status_patch_omits_reactivation_date_on_cancel() {
        let patch =
            cancel(MemberStatus::Active, &cancel_req("Other", "2024-03-01")).expect("cancel");
        let json = serde_json::to_value(&patch).expect("serialize");
        assert!(json.get("reactivation_date").is_none());
    }
}
