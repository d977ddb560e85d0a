//! /live_search: streams a tool-enabled model response, rendering progress
//! into one status message and splitting the final answer across messages
//! when it exceeds the platform limit.

use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::sync::RwLock;
use tracing::{error, info};
use xai_client::{user, ChatRequest, Tool};

use crate::aggregator::{split_message, truncate_chars, StreamAggregator, TELEGRAM_MESSAGE_LIMIT};
use crate::core::{Bot, Handler, HandlerResponse, Message, Result, WatsonError};
use crate::llm::LlmClient;

use super::command_args;

/// Prompt shown when /live_search is called without a query.
pub const MISSING_QUERY_REPLY: &str = "pls provide a search query";

/// Initial status message, replaced as the stream progresses.
pub const SEARCHING_STATUS: &str = "performing live search...";

/// How much of an error message is surfaced to the user.
const ERROR_PREVIEW_CHARS: usize = 100;

/// Handles /live_search by driving a [`StreamAggregator`] over the model's
/// event stream.
pub struct LiveSearchHandler {
    bot: Arc<dyn Bot>,
    llm: Arc<dyn LlmClient>,
    model: String,
    bot_username: Arc<RwLock<Option<String>>>,
}

impl LiveSearchHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        llm: Arc<dyn LlmClient>,
        model: String,
        bot_username: Arc<RwLock<Option<String>>>,
    ) -> Self {
        Self {
            bot,
            llm,
            model,
            bot_username,
        }
    }

    /// Consumes the event stream, editing the status message as the phase
    /// advances, then delivers the final message: the first part replaces the
    /// status message, any remaining parts are sent as new messages in order.
    ///
    /// Any inference or delivery failure aborts the pass; partially
    /// accumulated text is dropped with the aggregator.
    async fn run_search(&self, message: &Message, status_id: &str, query: &str) -> Result<()> {
        let request = ChatRequest::new(&self.model)
            .tool(Tool::web_search())
            .tool(Tool::x_search())
            .message(user(query));

        let mut events = self
            .llm
            .stream_events(request)
            .await
            .map_err(|e| WatsonError::Inference(e.to_string()))?;

        let mut aggregator = StreamAggregator::new();
        while let Some(event) = events.next().await {
            let event = event.map_err(|e| WatsonError::Inference(e.to_string()))?;
            for call in &event.tool_calls {
                info!(tool = %call.name, "tool call");
            }
            for status in aggregator.apply(&event) {
                self.bot
                    .edit_message(&message.chat, status_id, &status)
                    .await?;
            }
        }

        if let Some(usage) = aggregator.usage() {
            info!(
                reasoning_tokens = ?usage.reasoning_tokens,
                total_tokens = usage.total_tokens,
                "live search usage"
            );
        }

        let final_message = aggregator.final_message();
        let mut parts = split_message(&final_message, TELEGRAM_MESSAGE_LIMIT).into_iter();
        if let Some(first) = parts.next() {
            self.bot
                .edit_message(&message.chat, status_id, &first)
                .await?;
        }
        for part in parts {
            self.bot.send_message(&message.chat, &part).await?;
        }

        Ok(())
    }
}

#[async_trait]
impl Handler for LiveSearchHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let username = self.bot_username.read().await.clone();
        let Some(args) = command_args(&message.content, "live_search", username.as_deref())
        else {
            return Ok(HandlerResponse::Continue);
        };

        let query = args.split_whitespace().collect::<Vec<_>>().join(" ");
        if query.is_empty() {
            self.bot.reply_to(message, MISSING_QUERY_REPLY).await?;
            return Ok(HandlerResponse::Reply(MISSING_QUERY_REPLY.to_string()));
        }

        info!(user_id = message.user.id, query = %query, "live search started");

        let status_id = self
            .bot
            .send_message_and_return_id(&message.chat, SEARCHING_STATUS)
            .await?;

        if let Err(e) = self.run_search(message, &status_id, &query).await {
            error!(error = %e, user_id = message.user.id, "live search failed");
            let report = format!(
                "❌ Sorry, I encountered an error: {}",
                truncate_chars(&e.to_string(), ERROR_PREVIEW_CHARS)
            );
            // No reliable reply channel is left if this edit also fails.
            if let Err(edit_err) = self.bot.edit_message(&message.chat, &status_id, &report).await {
                error!(error = %edit_err, "failed to report live search error");
            }
        }

        Ok(HandlerResponse::Stop)
    }
}
