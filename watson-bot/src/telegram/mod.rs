//! Telegram transport layer: adapters and the REPL runner.

mod adapters;
mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use runner::run_repl;
