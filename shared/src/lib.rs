//! Shared types for the gym management platform
//!
//! Model types exchanged between gym-server and its clients (via API),
//! plus ID/time utilities.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
