//! Bot config: Telegram token, xAI credentials and models, logging. Loaded from env.

use anyhow::Result;
use std::env;

/// Model used for the plain-chat assistant fallback.
pub const DEFAULT_CHAT_MODEL: &str = "grok-4";
/// Model used for /live_search (reasoning disabled, server-side tools).
pub const DEFAULT_SEARCH_MODEL: &str = "grok-4-fast-non-reasoning";
/// Generous whole-request timeout; streams have no tighter bound.
pub const DEFAULT_TIMEOUT_SECS: u64 = 3600;

/// Runtime config, loaded once at startup.
#[derive(Debug, Clone)]
pub struct WatsonConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// XAI_API_KEY
    pub xai_api_key: String,
    /// XAI_API_URL; default xAI public endpoint when unset
    pub xai_api_url: Option<String>,
    /// XAI_CHAT_MODEL
    pub chat_model: String,
    /// XAI_SEARCH_MODEL
    pub search_model: String,
    /// XAI_TIMEOUT_SECS
    pub timeout_secs: u64,
    /// LOG_FILE
    pub log_file: String,
}

impl WatsonConfig {
    /// Loads from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN")
                .map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let xai_api_key =
            env::var("XAI_API_KEY").map_err(|_| anyhow::anyhow!("XAI_API_KEY not set"))?;
        let xai_api_url = env::var("XAI_API_URL").ok();
        let chat_model =
            env::var("XAI_CHAT_MODEL").unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string());
        let search_model =
            env::var("XAI_SEARCH_MODEL").unwrap_or_else(|_| DEFAULT_SEARCH_MODEL.to_string());
        let timeout_secs = env::var("XAI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/watson-bot.log".to_string());

        Ok(Self {
            bot_token,
            xai_api_key,
            xai_api_url,
            chat_model,
            search_model,
            timeout_secs,
            log_file,
        })
    }

    /// Validates config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if self.xai_api_key.is_empty() {
            anyhow::bail!("XAI_API_KEY is empty");
        }
        if let Some(ref url) = self.xai_api_url {
            if reqwest::Url::parse(url).is_err() {
                anyhow::bail!("XAI_API_URL is set but not a valid URL: {}", url);
            }
        }
        Ok(())
    }
}
