//! Telegram transport adapter
//!
//! Everything that knows about the Telegram API lives here: the command
//! surface, the update handlers and the broadcast relay. The managers it
//! calls into are transport-free.

use std::sync::Arc;

use teloxide::{dptree, prelude::*};
use tracing::error;

pub mod commands;
pub mod handlers;
pub mod relay;

pub use commands::Command;
pub use relay::TelegramRelay;

use crate::broadcast::Broadcaster;
use crate::moderation::ModerationManager;
use crate::providers::{ImageProvider, TextProvider, VideoProvider};
use crate::quota::QuotaManager;
use crate::store::Store;

/// Shared state handed to every handler invocation.
pub struct AppState {
    pub store: Arc<Store>,
    pub quota: QuotaManager,
    pub moderation: ModerationManager,
    pub broadcaster: Broadcaster,
    pub text: Arc<dyn TextProvider>,
    pub image: Arc<dyn ImageProvider>,
    pub video: Arc<dyn VideoProvider>,
    pub admin_ids: Vec<i64>,
}

impl AppState {
    pub fn is_admin(&self, chat_id: i64) -> bool {
        self.admin_ids.contains(&chat_id)
    }
}

/// Long-poll updates until shutdown. Handler errors are logged, never fatal.
pub async fn run(bot: Bot, state: Arc<AppState>) {
    let handler = Update::filter_message().filter_command::<Command>().endpoint(
        |bot: Bot, state: Arc<AppState>, msg: Message, cmd: Command| async move {
            if let Err(e) = handlers::dispatch(&bot, &state, &msg, cmd).await {
                error!("handler error: {e}");
            }
            Ok::<(), anyhow::Error>(())
        },
    );

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
