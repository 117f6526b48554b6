//! jarvis-rs: Telegram AI assistant bot
//!
//! A small bot front-end that relays user commands to external AI services
//! and keeps per-user daily usage quotas in SQLite.
//!
//! # Features
//!
//! - **Metered commands**: `/chat`, `/img` and `/video` are capped per user
//!   and per calendar day
//! - **Moderation**: admins can block users, adjust limits and read stats
//! - **Broadcast**: admins relay one message to every non-blocked user;
//!   unreachable users are blocked automatically
//! - **Storage**: SQLite via sqlx, with an in-memory fallback when the
//!   database file cannot be opened
//!
//! # Modules
//!
//! - [`config`]: Configuration management
//! - [`error`]: Error types and handling
//! - [`store`]: SQLite persistence
//! - [`quota`]: Daily quota enforcement
//! - [`moderation`]: Admin operations
//! - [`broadcast`]: Message fan-out
//! - [`providers`]: AI provider clients
//! - [`telegram`]: Transport adapter

pub mod broadcast;
pub mod config;
pub mod error;
pub mod moderation;
pub mod providers;
pub mod quota;
pub mod store;
pub mod telegram;

// Re-export commonly used types
pub use config::Config;
pub use error::{BotError, Result};
