//! Wraps teloxide::Bot and implements [`anon_core::Bot`]. The relay dispatcher sends through it;
//! tests substitute a recording Bot.

use anon_core::{Bot as CoreBot, ChatError, Menu, Result, UserId};
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId, FileId, InputFile};

use crate::keyboard;

/// Thin wrapper around teloxide::Bot.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat_id: UserId, text: &str, menu: Option<&Menu>) -> Result<()> {
        let mut request = self.bot.send_message(ChatId(chat_id), text.to_string());
        if let Some(menu) = menu {
            request = request.reply_markup(keyboard::render(menu));
        }
        request
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn send_photo(&self, chat_id: UserId, file_id: &str, caption: Option<&str>) -> Result<()> {
        let mut request = self
            .bot
            .send_photo(ChatId(chat_id), InputFile::file_id(FileId(file_id.to_string())));
        if let Some(caption) = caption {
            request = request.caption(caption.to_string());
        }
        request
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;
        Ok(())
    }
}
