//! Outbound surface transport
//!
//! The seam between the broadcast fan-out and Telegram: updating one rendered
//! surface is a single edit call, addressed either by chat/message id or by an
//! inline message id.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, MessageId};

use crate::models::SurfaceHandle;
use crate::utils::errors::Result;

#[async_trait]
pub trait SurfaceTransport: Send + Sync {
    /// Replace the card shown on the given surface with the new payload.
    async fn update_surface(
        &self,
        handle: &SurfaceHandle,
        text: &str,
        keyboard: InlineKeyboardMarkup,
    ) -> Result<()>;
}

/// Production transport backed by the Telegram Bot API.
#[derive(Debug, Clone)]
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl SurfaceTransport for TelegramTransport {
    async fn update_surface(
        &self,
        handle: &SurfaceHandle,
        text: &str,
        keyboard: InlineKeyboardMarkup,
    ) -> Result<()> {
        match handle {
            SurfaceHandle::ChatMessage { chat_id, message_id } => {
                self.bot
                    .edit_message_text(ChatId(*chat_id), MessageId(*message_id), text)
                    .reply_markup(keyboard)
                    .await?;
            }
            SurfaceHandle::Inline { inline_message_id } => {
                self.bot
                    .edit_message_text_inline(inline_message_id.clone(), text)
                    .reply_markup(keyboard)
                    .await?;
            }
        }
        Ok(())
    }
}
