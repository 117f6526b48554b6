//! Broadcast fan-out to all non-blocked users
//!
//! Recipients are captured in a snapshot before the first delivery and the
//! list is never re-queried mid-run. A failed delivery is treated as a
//! permanent unreachability signal: the counter goes up and the user is
//! blocked on the spot.

use crate::error::Result;

pub mod manager;
pub mod types;

pub use manager::Broadcaster;
pub use types::BroadcastReport;

/// Delivery seam for the messaging platform.
#[async_trait::async_trait]
pub trait MessageRelay: Send + Sync {
    /// Relay the source message to one recipient chat.
    async fn relay_to(&self, chat_id: i64) -> Result<()>;
}
