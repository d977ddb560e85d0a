//! Core types and traits: Handler, Bot, Message, error, logger.
//! Transport-agnostic; the Telegram layer adapts to these.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot, TelegramBot};
pub use error::{Result, WatsonError};
pub use logger::init_tracing;
pub use types::{Chat, Handler, HandlerResponse, Message, ToCoreMessage, ToCoreUser, User};
