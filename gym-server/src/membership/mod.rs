//! 会员生命周期模块

pub mod engine;

pub use engine::{
    LifecycleError, RatingPatch, StatusPatch, apply_rating, apply_status, cancel, new_member,
    rate, reactivate,
};
