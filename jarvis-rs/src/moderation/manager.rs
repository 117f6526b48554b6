//! Moderation manager - admin operations over the store

use std::sync::Arc;

use tracing::info;

use crate::error::Result;
use crate::store::{Store, UserStats};

pub struct ModerationManager {
    store: Arc<Store>,
}

impl ModerationManager {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Block or unblock a user. Idempotent; writing the flag for a chat id
    /// that never registered is a silent no-op.
    pub async fn set_blocked(&self, chat_id: i64, blocked: bool) -> Result<()> {
        info!(chat_id, blocked, "updating blocked flag");
        self.store.set_blocked(chat_id, blocked).await
    }

    /// Unknown users are never blocked.
    pub async fn is_blocked(&self, chat_id: i64) -> Result<bool> {
        self.store.is_blocked(chat_id).await
    }

    /// Replace the daily limit for a command, effective for the next
    /// quota check.
    pub async fn set_limit(&self, cmd: &str, max_per_day: i64) -> Result<()> {
        info!(cmd, max_per_day, "updating limit");
        self.store.set_limit(cmd, max_per_day).await
    }

    /// Total and blocked user counts.
    pub async fn stats(&self) -> Result<UserStats> {
        self.store.stats().await
    }
}
