//! Store - SQLite persistence and schema management

use sqlx::SqlitePool;

use super::types::{UsageRecord, User, UserStats};
use crate::error::Result;

/// Daily limits seeded at initialization
const DEFAULT_LIMITS: [(&str, i64); 3] = [("chat", 20), ("img", 5), ("video", 2)];

/// Durable CRUD over the three tables. Cheap to clone; the pool handle is
/// safe under concurrent command handlers.
#[derive(Clone)]
pub struct Store {
    db: SqlitePool,
}

impl Store {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Initialize database tables and seed default limits
    pub async fn init_db(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                chat_id INTEGER PRIMARY KEY,
                username TEXT,
                name TEXT,
                blocked INTEGER DEFAULT 0
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS usage (
                chat_id INTEGER,
                cmd TEXT,
                day TEXT,
                count INTEGER,
                PRIMARY KEY (chat_id, cmd, day)
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS limits (
                cmd TEXT PRIMARY KEY,
                max INTEGER
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        for (cmd, max) in DEFAULT_LIMITS {
            sqlx::query("INSERT OR IGNORE INTO limits (cmd, max) VALUES (?, ?)")
                .bind(cmd)
                .bind(max)
                .execute(&self.db)
                .await?;
        }

        Ok(())
    }

    /// Register a user on first contact. Re-registration is a no-op and
    /// preserves the fields from the first call.
    pub async fn add_user(&self, chat_id: i64, username: &str, name: &str) -> Result<()> {
        sqlx::query(
            "INSERT OR IGNORE INTO users (chat_id, username, name, blocked) VALUES (?, ?, ?, 0)",
        )
        .bind(chat_id)
        .bind(username)
        .bind(name)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    pub async fn get_user(&self, chat_id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT chat_id, username, name, blocked FROM users WHERE chat_id = ?",
        )
        .bind(chat_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    /// Unknown users are not blocked.
    pub async fn is_blocked(&self, chat_id: i64) -> Result<bool> {
        let blocked: Option<bool> =
            sqlx::query_scalar("SELECT blocked FROM users WHERE chat_id = ?")
                .bind(chat_id)
                .fetch_optional(&self.db)
                .await?;

        Ok(blocked.unwrap_or(false))
    }

    /// Write the blocked flag. For an unregistered chat id this affects zero
    /// rows and the user stays unknown.
    pub async fn set_blocked(&self, chat_id: i64, blocked: bool) -> Result<()> {
        sqlx::query("UPDATE users SET blocked = ? WHERE chat_id = ?")
            .bind(blocked)
            .bind(chat_id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// Commands without a configured limit get 0 (deny by default).
    pub async fn get_limit(&self, cmd: &str) -> Result<i64> {
        let max: Option<i64> = sqlx::query_scalar("SELECT max FROM limits WHERE cmd = ?")
            .bind(cmd)
            .fetch_optional(&self.db)
            .await?;

        Ok(max.unwrap_or(0))
    }

    pub async fn set_limit(&self, cmd: &str, max_per_day: i64) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO limits (cmd, max) VALUES (?, ?)")
            .bind(cmd)
            .bind(max_per_day)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// Today's counter for (chat, command), `None` when the command has not
    /// been used on that day.
    pub async fn usage_count(&self, chat_id: i64, cmd: &str, day: &str) -> Result<Option<i64>> {
        let count: Option<i64> =
            sqlx::query_scalar("SELECT count FROM usage WHERE chat_id = ? AND cmd = ? AND day = ?")
                .bind(chat_id)
                .bind(cmd)
                .bind(day)
                .fetch_optional(&self.db)
                .await?;

        Ok(count)
    }

    /// Insert-or-increment the day's counter as a single atomic statement.
    pub async fn increment_usage(&self, chat_id: i64, cmd: &str, day: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO usage (chat_id, cmd, day, count) VALUES (?, ?, ?, 1)
            ON CONFLICT (chat_id, cmd, day) DO UPDATE SET count = count + 1
            "#,
        )
        .bind(chat_id)
        .bind(cmd)
        .bind(day)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    pub async fn usage_record(&self, chat_id: i64, cmd: &str, day: &str) -> Result<Option<UsageRecord>> {
        let record = sqlx::query_as::<_, UsageRecord>(
            "SELECT chat_id, cmd, day, count FROM usage WHERE chat_id = ? AND cmd = ? AND day = ?",
        )
        .bind(chat_id)
        .bind(cmd)
        .bind(day)
        .fetch_optional(&self.db)
        .await?;

        Ok(record)
    }

    pub async fn stats(&self) -> Result<UserStats> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.db)
            .await?;

        let blocked: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE blocked = 1")
            .fetch_one(&self.db)
            .await?;

        Ok(UserStats { total, blocked })
    }

    /// Snapshot of broadcast recipients. Taken once per broadcast; later
    /// block-flag changes do not alter an in-flight snapshot.
    pub async fn unblocked_user_ids(&self) -> Result<Vec<i64>> {
        let ids: Vec<i64> = sqlx::query_scalar("SELECT chat_id FROM users WHERE blocked = 0")
            .fetch_all(&self.db)
            .await?;

        Ok(ids)
    }
}
