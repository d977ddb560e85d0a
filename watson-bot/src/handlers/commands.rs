//! /start and /help: fixed replies, no inference calls.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use crate::core::{Bot, Handler, HandlerResponse, Message, Result};

use super::command_args;

/// Static command list shown by /help.
pub const HELP_TEXT: &str = "Available commands:\n\
/start - start the bot\n\
/help - show this help message\n\
/live_search <query> - run a live web and X search";

/// Handles /start and /help with fixed replies.
pub struct CommandHandler {
    bot: Arc<dyn Bot>,
    bot_username: Arc<RwLock<Option<String>>>,
}

impl CommandHandler {
    pub fn new(bot: Arc<dyn Bot>, bot_username: Arc<RwLock<Option<String>>>) -> Self {
        Self { bot, bot_username }
    }

    /// Greeting for /start, addressing the caller by display name.
    pub fn greeting(message: &Message) -> String {
        format!(
            "whats up {}, what can i help you with today?",
            message.user.display_name()
        )
    }
}

#[async_trait]
impl Handler for CommandHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let username = self.bot_username.read().await.clone();
        let username = username.as_deref();

        let reply = if command_args(&message.content, "start", username).is_some() {
            Self::greeting(message)
        } else if command_args(&message.content, "help", username).is_some() {
            HELP_TEXT.to_string()
        } else {
            return Ok(HandlerResponse::Continue);
        };

        info!(user_id = message.user.id, command = %message.content, "command handled");
        self.bot.reply_to(message, &reply).await?;
        Ok(HandlerResponse::Reply(reply))
    }
}
