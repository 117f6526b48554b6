//! Quota manager - daily per-user, per-command usage accounting

use std::sync::Arc;

use chrono::Local;

use crate::error::Result;
use crate::store::Store;

/// Local calendar date as an ISO-8601 string, the on-disk day key.
fn today() -> String {
    Local::now().date_naive().to_string()
}

pub struct QuotaManager {
    store: Arc<Store>,
}

impl QuotaManager {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Whether the user may invoke the command today. A day with no usage
    /// record is always allowed; otherwise the stored count is compared
    /// against the current limit, so limit changes apply immediately.
    pub async fn can_use(&self, chat_id: i64, cmd: &str) -> Result<bool> {
        match self.store.usage_count(chat_id, cmd, &today()).await? {
            None => Ok(true),
            Some(count) => Ok(count < self.store.get_limit(cmd).await?),
        }
    }

    /// Record one successful invocation. Expected to run after a passing
    /// [`can_use`](Self::can_use) check and a completed external call; the
    /// increment itself is a single atomic upsert.
    pub async fn record_use(&self, chat_id: i64, cmd: &str) -> Result<()> {
        self.store.increment_usage(chat_id, cmd, &today()).await
    }

    /// Current configured daily maximum for the command (0 when unset).
    pub async fn limit(&self, cmd: &str) -> Result<i64> {
        self.store.get_limit(cmd).await
    }
}
