//! SQLite persistence for users, daily usage counters and command limits
//!
//! All state lives in three tables:
//! - `users`: one row per registered chat, with the blocked flag
//! - `usage`: one row per (chat, command, day), the daily counter
//! - `limits`: one row per metered command, the daily maximum

pub mod manager;
pub mod types;

pub use manager::Store;
pub use types::{UsageRecord, User, UserStats};
