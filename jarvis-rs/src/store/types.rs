use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered bot user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub chat_id: i64,
    pub username: String,
    pub name: String,
    pub blocked: bool,
}

/// One day's usage of one metered command by one user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UsageRecord {
    pub chat_id: i64,
    pub cmd: String,
    /// Local calendar date, ISO-8601 (`YYYY-MM-DD`)
    pub day: String,
    pub count: i64,
}

/// Aggregate counts for the admin stats view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub total: i64,
    pub blocked: i64,
}
