//! Administrative moderation: blocking users, adjusting limits, stats

pub mod manager;

pub use manager::ModerationManager;
