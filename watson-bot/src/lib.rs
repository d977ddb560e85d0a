//! # watson-bot
//!
//! Telegram assistant bot backed by the xAI API. Plain text goes to a
//! one-shot "watson" persona call; /live_search streams a tool-enabled
//! response through the [`aggregator::StreamAggregator`], editing a status
//! message as the model thinks and splitting long answers across messages.

pub mod aggregator;
pub mod chain;
pub mod cli;
pub mod config;
pub mod core;
pub mod handlers;
pub mod llm;
pub mod runner;
pub mod telegram;

pub use cli::{load_config, Cli, Commands};

pub use core::{
    init_tracing, parse_message_id, Bot, Chat, Handler, HandlerResponse, Message, Result,
    TelegramBot, ToCoreMessage, ToCoreUser, User, WatsonError,
};

pub use aggregator::{split_message, truncate_chars, Phase, StreamAggregator, TELEGRAM_MESSAGE_LIMIT};
pub use chain::HandlerChain;
pub use config::WatsonConfig;
pub use handlers::{AssistantHandler, CommandHandler, LiveSearchHandler};
pub use llm::LlmClient;
pub use runner::{build_handler_chain, run_bot, BotUsername};
pub use telegram::{run_repl, TelegramMessageWrapper, TelegramUserWrapper};
