//! 演示数据
//!
//! 后端未配置或查询失败时，所有读取入口返回这里的固定数据集。
//! 数据刻意覆盖每个生命周期状态，让零配置环境也能完整演示
//! 取消/恢复/评分流程。

use chrono::{DateTime, NaiveDate, Utc};
use shared::models::{
    GymPackage, Member, MemberStatus, Payment, PaymentStatus, PaymentType, Trainer,
};

/// 演示租户 ID
pub const DEMO_GYM_ID: &str = "demo-gym";
/// 演示租户名称
pub const DEMO_GYM_NAME: &str = "Demo Fitness Club";
/// 演示租户邮箱
pub const DEMO_GYM_EMAIL: &str = "demo@example.com";

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap_or_default()
}

fn ts(s: &str) -> DateTime<Utc> {
    s.parse().unwrap_or_default()
}

/// 固定的演示会员数据集 (created_at 倒序)
pub fn demo_members() -> Vec<Member> {
    vec![
        Member {
            id: "1005".to_string(),
            gym_id: DEMO_GYM_ID.to_string(),
            full_name: "Priya Sharma".to_string(),
            email: "priya.sharma@example.com".to_string(),
            phone: "+1 555 0105".to_string(),
            gender: Some("Female".to_string()),
            date_of_birth: Some(date("1995-07-22")),
            date_of_joining: date("2024-05-10"),
            emergency_contact: Some("+1 555 0205".to_string()),
            govt_id_type: Some("Passport".to_string()),
            govt_id_num: Some("P4821troppa".to_string()),
            personal_trainer: true,
            status: MemberStatus::Active,
            package_name: Some("Premium Monthly".to_string()),
            package_end_date: Some(date("2024-07-10")),
            cancellation_reason: None,
            cancellation_date: None,
            reactivation_date: None,
            rating: 5,
            balance: 0.0,
            created_at: ts("2024-05-10T10:15:00Z"),
            updated_at: ts("2024-05-10T10:15:00Z"),
        },
        Member {
            id: "1004".to_string(),
            gym_id: DEMO_GYM_ID.to_string(),
            full_name: "Marcus Webb".to_string(),
            email: "marcus.webb@example.com".to_string(),
            phone: "+1 555 0104".to_string(),
            gender: Some("Male".to_string()),
            date_of_birth: Some(date("1988-11-03")),
            date_of_joining: date("2024-04-02"),
            emergency_contact: None,
            govt_id_type: None,
            govt_id_num: None,
            personal_trainer: false,
            status: MemberStatus::Active,
            package_name: Some("Basic Monthly".to_string()),
            package_end_date: Some(date("2024-06-02")),
            cancellation_reason: None,
            cancellation_date: None,
            reactivation_date: None,
            rating: 3,
            balance: 49.99,
            created_at: ts("2024-04-02T14:40:00Z"),
            updated_at: ts("2024-05-01T09:00:00Z"),
        },
        Member {
            id: "1003".to_string(),
            gym_id: DEMO_GYM_ID.to_string(),
            full_name: "Elena Rodriguez".to_string(),
            email: "elena.rodriguez@example.com".to_string(),
            phone: "+1 555 0103".to_string(),
            gender: Some("Female".to_string()),
            date_of_birth: Some(date("1992-02-14")),
            date_of_joining: date("2024-01-15"),
            emergency_contact: Some("+1 555 0203".to_string()),
            govt_id_type: Some("Driver License".to_string()),
            govt_id_num: Some("DL-99-1204".to_string()),
            personal_trainer: false,
            status: MemberStatus::Cancelled,
            package_name: Some("Basic Quarterly".to_string()),
            package_end_date: Some(date("2024-04-15")),
            cancellation_reason: Some("Moving to different location".to_string()),
            cancellation_date: Some(date("2024-03-20")),
            reactivation_date: None,
            rating: 4,
            balance: 0.0,
            created_at: ts("2024-01-15T08:30:00Z"),
            updated_at: ts("2024-03-20T16:05:00Z"),
        },
        Member {
            id: "1002".to_string(),
            gym_id: DEMO_GYM_ID.to_string(),
            full_name: "Tom Okafor".to_string(),
            email: "tom.okafor@example.com".to_string(),
            phone: "+1 555 0102".to_string(),
            gender: Some("Male".to_string()),
            date_of_birth: Some(date("1979-06-30")),
            date_of_joining: date("2023-11-20"),
            emergency_contact: None,
            govt_id_type: None,
            govt_id_num: None,
            personal_trainer: false,
            status: MemberStatus::Dormant,
            package_name: Some("Premium Annual".to_string()),
            package_end_date: Some(date("2024-02-20")),
            cancellation_reason: None,
            cancellation_date: None,
            reactivation_date: None,
            rating: 2,
            balance: 120.50,
            created_at: ts("2023-11-20T11:00:00Z"),
            updated_at: ts("2024-02-21T07:45:00Z"),
        },
        Member {
            id: "1001".to_string(),
            gym_id: DEMO_GYM_ID.to_string(),
            full_name: "Sarah Kim".to_string(),
            email: "sarah.kim@example.com".to_string(),
            phone: "+1 555 0101".to_string(),
            gender: Some("Female".to_string()),
            date_of_birth: Some(date("1990-09-09")),
            date_of_joining: date("2023-08-01"),
            emergency_contact: Some("+1 555 0201".to_string()),
            govt_id_type: None,
            govt_id_num: None,
            personal_trainer: true,
            status: MemberStatus::Active,
            package_name: Some("Premium Annual".to_string()),
            package_end_date: Some(date("2024-08-01")),
            cancellation_reason: None,
            cancellation_date: None,
            reactivation_date: Some(date("2023-12-01")),
            rating: 5,
            balance: -25.00,
            created_at: ts("2023-08-01T09:20:00Z"),
            updated_at: ts("2023-12-01T10:10:00Z"),
        },
    ]
}

/// 按 id 查找演示会员；找不到时合成一个占位会员
///
/// 演示模式下对任意 id 的生命周期操作都要返回合成成功，
/// 占位保证响应仍然是完整的会员对象。
pub fn member_or_placeholder(id: &str) -> Member {
    demo_members()
        .into_iter()
        .find(|m| m.id == id)
        .unwrap_or_else(|| {
            let now = shared::util::now();
            Member {
                id: id.to_string(),
                gym_id: DEMO_GYM_ID.to_string(),
                full_name: "Demo Member".to_string(),
                email: "demo.member@example.com".to_string(),
                phone: "+1 555 0100".to_string(),
                gender: None,
                date_of_birth: None,
                date_of_joining: shared::util::today(),
                emergency_contact: None,
                govt_id_type: None,
                govt_id_num: None,
                personal_trainer: false,
                status: MemberStatus::Active,
                package_name: None,
                package_end_date: None,
                cancellation_reason: None,
                cancellation_date: None,
                reactivation_date: None,
                rating: 0,
                balance: 0.0,
                created_at: now,
                updated_at: now,
            }
        })
}

/// 固定的演示支付数据集
pub fn demo_payments() -> Vec<Payment> {
    vec![
        Payment {
            id: "2003".to_string(),
            gym_id: DEMO_GYM_ID.to_string(),
            member_id: "1005".to_string(),
            member_name: Some("Priya Sharma".to_string()),
            amount: 89.99,
            method: "card".to_string(),
            payment_type: PaymentType::Subscription,
            status: PaymentStatus::Paid,
            description: Some("Premium Monthly renewal".to_string()),
            payment_date: date("2024-05-10"),
            created_at: ts("2024-05-10T10:16:00Z"),
        },
        Payment {
            id: "2002".to_string(),
            gym_id: DEMO_GYM_ID.to_string(),
            member_id: "1004".to_string(),
            member_name: Some("Marcus Webb".to_string()),
            amount: 49.99,
            method: "cash".to_string(),
            payment_type: PaymentType::Subscription,
            status: PaymentStatus::Overdue,
            description: None,
            payment_date: date("2024-05-02"),
            created_at: ts("2024-05-02T14:00:00Z"),
        },
        Payment {
            id: "2001".to_string(),
            gym_id: DEMO_GYM_ID.to_string(),
            member_id: "1001".to_string(),
            member_name: Some("Sarah Kim".to_string()),
            amount: -25.00,
            method: "card".to_string(),
            payment_type: PaymentType::Refund,
            status: PaymentStatus::Paid,
            description: Some("Overcharge correction".to_string()),
            payment_date: date("2024-04-18"),
            created_at: ts("2024-04-18T12:30:00Z"),
        },
    ]
}

/// 固定的演示套餐数据集 (与恢复会籍对话框的目录一致)
pub fn demo_packages() -> Vec<GymPackage> {
    vec![
        GymPackage {
            id: "1".to_string(),
            gym_id: DEMO_GYM_ID.to_string(),
            name: "Basic Monthly".to_string(),
            price: 49.99,
            duration_months: 1,
            is_active: true,
            created_at: ts("2023-07-01T00:00:00Z"),
        },
        GymPackage {
            id: "2".to_string(),
            gym_id: DEMO_GYM_ID.to_string(),
            name: "Premium Monthly".to_string(),
            price: 89.99,
            duration_months: 1,
            is_active: true,
            created_at: ts("2023-07-01T00:00:00Z"),
        },
        GymPackage {
            id: "3".to_string(),
            gym_id: DEMO_GYM_ID.to_string(),
            name: "Basic Quarterly".to_string(),
            price: 129.99,
            duration_months: 3,
            is_active: true,
            created_at: ts("2023-07-01T00:00:00Z"),
        },
        GymPackage {
            id: "4".to_string(),
            gym_id: DEMO_GYM_ID.to_string(),
            name: "Premium Annual".to_string(),
            price: 899.99,
            duration_months: 12,
            is_active: true,
            created_at: ts("2023-07-01T00:00:00Z"),
        },
    ]
}

/// 固定的演示教练数据集
pub fn demo_trainers() -> Vec<Trainer> {
    vec![
        Trainer {
            id: "3002".to_string(),
            gym_id: DEMO_GYM_ID.to_string(),
            full_name: "Diego Fuentes".to_string(),
            email: "diego.fuentes@example.com".to_string(),
            phone: "+1 555 0302".to_string(),
            specialization: Some("Strength & Conditioning".to_string()),
            status: "Active".to_string(),
            rating: 5,
            created_at: ts("2023-09-12T08:00:00Z"),
        },
        Trainer {
            id: "3001".to_string(),
            gym_id: DEMO_GYM_ID.to_string(),
            full_name: "Amy Chen".to_string(),
            email: "amy.chen@example.com".to_string(),
            phone: "+1 555 0301".to_string(),
            specialization: Some("Yoga".to_string()),
            status: "Active".to_string(),
            rating: 4,
            created_at: ts("2023-08-05T08:00:00Z"),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_members_cover_lifecycle_states() {
        let members = demo_members();
        assert!(members.iter().any(|m| m.status == MemberStatus::Active));
        assert!(members.iter().any(|m| m.status == MemberStatus::Cancelled));
        assert!(members.iter().any(|m| m.status == MemberStatus::Dormant));
    }

    #[test]
    fn demo_members_uphold_cancellation_invariant() {
        // P1 must hold in fixture data too
        for m in demo_members() {
            let cancelled = m.status == MemberStatus::Cancelled;
            assert_eq!(
                cancelled,
                m.cancellation_reason.is_some() && m.cancellation_date.is_some(),
                "invariant violated for demo member {}",
                m.id
            );
        }
    }

    #[test]
    fn demo_members_sorted_newest_first() {
        let members = demo_members();
        for pair in members.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[test]
    fn placeholder_used_for_unknown_ids() {
        let m = member_or_placeholder("does-not-exist");
        assert_eq!(m.id, "does-not-exist");
        assert_eq!(m.status, MemberStatus::Active);

        let known = member_or_placeholder("1003");
        assert_eq!(known.full_name, "Elena Rodriguez");
    }

    #[test]
    fn demo_catalog_matches_reactivation_dialog() {
        let packages = demo_packages();
        assert_eq!(packages.len(), 4);
        assert!(packages.iter().any(|p| p.name == "Premium Annual" && p.price == 899.99));
    }
}
