//! Broadcaster - sequential fan-out with auto-block on delivery failure

use std::sync::Arc;

use tracing::{info, warn};

use super::types::BroadcastReport;
use super::MessageRelay;
use crate::error::Result;
use crate::store::Store;

pub struct Broadcaster {
    store: Arc<Store>,
}

impl Broadcaster {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Relay one message to every user that was non-blocked when the run
    /// started. Deliveries are sequential; any failure blocks that user
    /// immediately and the run continues with the rest of the snapshot.
    pub async fn broadcast(&self, relay: &dyn MessageRelay) -> Result<BroadcastReport> {
        let targets = self.store.unblocked_user_ids().await?;
        info!("broadcasting to {} users", targets.len());

        let mut report = BroadcastReport::default();

        for chat_id in targets {
            match relay.relay_to(chat_id).await {
                Ok(()) => report.sent += 1,
                Err(e) => {
                    warn!(chat_id, "delivery failed, blocking user: {e}");
                    report.failed_and_blocked += 1;
                    self.store.set_blocked(chat_id, true).await?;
                }
            }
        }

        info!(
            sent = report.sent,
            failed_and_blocked = report.failed_and_blocked,
            "broadcast finished"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BotError;
    use sqlx::SqlitePool;
    use std::sync::Mutex;

    /// Scripted relay: fails for a fixed set of chat ids, records the
    /// attempt order.
    struct ScriptedRelay {
        fail_for: Vec<i64>,
        attempted: Mutex<Vec<i64>>,
    }

    impl ScriptedRelay {
        fn new(fail_for: Vec<i64>) -> Self {
            Self {
                fail_for,
                attempted: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl MessageRelay for ScriptedRelay {
        async fn relay_to(&self, chat_id: i64) -> Result<()> {
            self.attempted.lock().unwrap().push(chat_id);
            if self.fail_for.contains(&chat_id) {
                Err(BotError::Delivery(format!("chat {chat_id} unreachable")))
            } else {
                Ok(())
            }
        }
    }

    async fn setup() -> (Arc<Store>, Broadcaster) {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        let store = Arc::new(Store::new(pool));
        store.init_db().await.unwrap();
        let broadcaster = Broadcaster::new(Arc::clone(&store));
        (store, broadcaster)
    }

    #[tokio::test]
    async fn test_broadcast_all_delivered() {
        let (store, broadcaster) = setup().await;
        for id in 1..=3 {
            store.add_user(id, "", "").await.unwrap();
        }

        let relay = ScriptedRelay::new(vec![]);
        let report = broadcaster.broadcast(&relay).await.unwrap();

        assert_eq!(report, BroadcastReport { sent: 3, failed_and_blocked: 0 });
        assert_eq!(relay.attempted.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_broadcast_failure_blocks_only_the_failed_user() {
        let (store, broadcaster) = setup().await;
        for id in 1..=3 {
            store.add_user(id, "", "").await.unwrap();
        }

        let relay = ScriptedRelay::new(vec![2]);
        let report = broadcaster.broadcast(&relay).await.unwrap();

        assert_eq!(report.sent, 2);
        assert_eq!(report.failed_and_blocked, 1);

        assert!(!store.is_blocked(1).await.unwrap());
        assert!(store.is_blocked(2).await.unwrap());
        assert!(!store.is_blocked(3).await.unwrap());
    }

    #[tokio::test]
    async fn test_broadcast_skips_already_blocked_users() {
        let (store, broadcaster) = setup().await;
        for id in 1..=3 {
            store.add_user(id, "", "").await.unwrap();
        }
        store.set_blocked(2, true).await.unwrap();

        let relay = ScriptedRelay::new(vec![]);
        let report = broadcaster.broadcast(&relay).await.unwrap();

        assert_eq!(report.sent, 2);
        let attempted = relay.attempted.lock().unwrap();
        assert!(!attempted.contains(&2));
    }

    #[tokio::test]
    async fn test_broadcast_with_no_users() {
        let (_store, broadcaster) = setup().await;

        let relay = ScriptedRelay::new(vec![]);
        let report = broadcaster.broadcast(&relay).await.unwrap();

        assert_eq!(report, BroadcastReport::default());
    }

    #[tokio::test]
    async fn test_broadcast_all_failures() {
        let (store, broadcaster) = setup().await;
        for id in 1..=2 {
            store.add_user(id, "", "").await.unwrap();
        }

        let relay = ScriptedRelay::new(vec![1, 2]);
        let report = broadcaster.broadcast(&relay).await.unwrap();

        assert_eq!(report, BroadcastReport { sent: 0, failed_and_blocked: 2 });
        let stats = store.stats().await.unwrap();
        assert_eq!(stats.blocked, 2);
    }
}
