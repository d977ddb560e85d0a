//! Error types for the bot core.
//!
//! Two kinds of failure exist at the handler boundary: the model API call (or
//! its stream) failing, and a Telegram send/edit failing. Both are caught
//! there, logged with context, and turned into short user-visible messages.

use thiserror::Error;

/// Top-level error for bot operations.
#[derive(Error, Debug)]
pub enum WatsonError {
    /// The model API call or its stream failed.
    #[error("Inference error: {0}")]
    Inference(String),

    /// A chat-platform send/edit failed.
    #[error("Delivery error: {0}")]
    Delivery(String),
}

/// Result type for core operations; uses [`WatsonError`].
pub type Result<T> = std::result::Result<T, WatsonError>;
