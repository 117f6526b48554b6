//! Telegram delivery of broadcast messages

use teloxide::prelude::*;
use teloxide::types::{ChatId, MessageId};

use crate::broadcast::MessageRelay;
use crate::error::{BotError, Result};

/// Copies one source message to recipients, preserving media and formatting.
pub struct TelegramRelay {
    bot: Bot,
    from_chat: ChatId,
    message_id: MessageId,
}

impl TelegramRelay {
    pub fn new(bot: Bot, from_chat: ChatId, message_id: MessageId) -> Self {
        Self {
            bot,
            from_chat,
            message_id,
        }
    }
}

#[async_trait::async_trait]
impl MessageRelay for TelegramRelay {
    async fn relay_to(&self, chat_id: i64) -> Result<()> {
        self.bot
            .copy_message(ChatId(chat_id), self.from_chat, self.message_id)
            .await
            .map_err(|e| BotError::Delivery(e.to_string()))?;
        Ok(())
    }
}
