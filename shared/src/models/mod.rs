//! Data models
//!
//! Shared between gym-server and frontend (via API).
//! All IDs are server-assigned snowflake values rendered as opaque strings;
//! timestamps are ISO-8601 UTC, calendar fields are plain dates.

pub mod auth;
pub mod gym_package;
pub mod member;
pub mod notification;
pub mod payment;
pub mod trainer;

// Re-exports
pub use auth::*;
pub use gym_package::*;
pub use member::*;
pub use notification::*;
pub use payment::*;
pub use trainer::*;
