//! Fallback for plain text: one-shot personal-assistant call.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};
use xai_client::{system, user, ChatRequest};

use crate::core::{Bot, Handler, HandlerResponse, Message, Result};
use crate::llm::LlmClient;

/// Fixed system preamble for the assistant persona.
pub const SYSTEM_PROMPT: &str =
    "you are a personal assistant called 'watson', help the user out with his queries";

/// Reply sent when the one-shot call fails.
pub const ERROR_REPLY: &str = "sorry, an error has occured";

/// Terminal handler: any plain (non-command) text goes to the chat model once
/// and the raw response text is sent back.
pub struct AssistantHandler {
    bot: Arc<dyn Bot>,
    llm: Arc<dyn LlmClient>,
    model: String,
}

impl AssistantHandler {
    pub fn new(bot: Arc<dyn Bot>, llm: Arc<dyn LlmClient>, model: String) -> Self {
        Self { bot, llm, model }
    }
}

#[async_trait]
impl Handler for AssistantHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.content.is_empty() {
            return Ok(HandlerResponse::Stop);
        }
        // Unknown commands fall through to here and get no reply.
        if message.content.starts_with('/') {
            return Ok(HandlerResponse::Stop);
        }

        self.bot.send_typing(&message.chat).await?;

        let request = ChatRequest::new(&self.model)
            .message(system(SYSTEM_PROMPT))
            .message(user(&message.content));

        match self.llm.sample(request).await {
            Ok(response) => {
                info!(
                    user_id = message.user.id,
                    response_len = response.content.len(),
                    "assistant reply"
                );
                self.bot.reply_to(message, &response.content).await?;
                Ok(HandlerResponse::Reply(response.content))
            }
            Err(e) => {
                error!(error = %e, user_id = message.user.id, "assistant call failed");
                self.bot.reply_to(message, ERROR_REPLY).await?;
                Ok(HandlerResponse::Reply(ERROR_REPLY.to_string()))
            }
        }
    }
}
