//! # Handler chain
//!
//! Runs handlers in registration order; the first Stop or Reply ends the pass.
//! This is the whole of command dispatch: each handler decides from the
//! message text whether the message is its to consume.

use crate::core::{Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Ordered chain of handlers.
#[derive(Clone)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Appends a handler.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Runs handlers until one returns Stop or Reply.
    #[instrument(skip(self, message))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        for handler in &self.handlers {
            let name = std::any::type_name_of_val(handler.as_ref());
            let response = handler.handle(message).await?;
            debug!(handler = %name, response = ?response, "handler processed");

            match response {
                HandlerResponse::Stop | HandlerResponse::Reply(_) => {
                    info!(
                        user_id = message.user.id,
                        chat_id = message.chat.id,
                        handler = %name,
                        "chain stopped by handler"
                    );
                    return Ok(response);
                }
                HandlerResponse::Continue => {}
            }
        }
        Ok(HandlerResponse::Continue)
    }
}

impl Default for HandlerChain {
    fn default() -> Self {
        Self::new()
    }
}
