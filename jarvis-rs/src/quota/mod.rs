//! Daily quota enforcement for metered commands
//!
//! A metered command may be used up to its configured limit per user and
//! per local calendar day. The check and the increment are two separate
//! store operations; callers check first, run the external side effect,
//! then record.

pub mod manager;

pub use manager::QuotaManager;
