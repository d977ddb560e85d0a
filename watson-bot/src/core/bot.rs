//! Bot abstraction for sending and editing messages.
//!
//! [`Bot`] trait is transport-agnostic; [`TelegramBot`] implements it via teloxide.
//! Handlers only ever see the trait, so tests can substitute a recording mock.

use crate::core::error::{Result, WatsonError};
use crate::core::types::{Chat, Message};
use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{ChatAction, ChatId, MessageId},
};

/// Abstraction for outbound chat-platform calls. All failures map to
/// [`WatsonError::Delivery`].
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
    /// Sends a message and returns its id, for later [`Bot::edit_message`]
    /// calls while a response is in flight.
    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String>;
    /// Edits an already-sent message. `message_id` is transport-specific
    /// (Telegram numeric string).
    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()>;
    /// Shows the "typing..." indicator in the chat.
    async fn send_typing(&self, chat: &Chat) -> Result<()>;
}

/// Parses a message id string into an i32. Used by edit_message.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| WatsonError::Delivery(format!("Invalid message_id for edit: {}", s)))
}

/// Teloxide-based implementation of [`Bot`].
pub struct TelegramBot {
    bot: teloxide::Bot,
}

impl TelegramBot {
    /// Wraps an existing teloxide Bot (shared with the REPL runner).
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Creates a bot using the given Telegram bot token.
    pub fn from_token(token: &str) -> Self {
        Self {
            bot: teloxide::Bot::new(token),
        }
    }
}

#[async_trait]
impl Bot for TelegramBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text)
            .await
            .map_err(|e| WatsonError::Delivery(e.to_string()))?;
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }

    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String> {
        let sent = self
            .bot
            .send_message(ChatId(chat.id), text)
            .await
            .map_err(|e| WatsonError::Delivery(e.to_string()))?;
        Ok(sent.id.to_string())
    }

    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        let id = parse_message_id(message_id)?;
        self.bot
            .edit_message_text(ChatId(chat.id), MessageId(id), text)
            .await
            .map_err(|e| WatsonError::Delivery(e.to_string()))?;
        Ok(())
    }

    async fn send_typing(&self, chat: &Chat) -> Result<()> {
        self.bot
            .send_chat_action(ChatId(chat.id), ChatAction::Typing)
            .await
            .map_err(|e| WatsonError::Delivery(e.to_string()))?;
        Ok(())
    }
}
