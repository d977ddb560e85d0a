//! Wiring: builds the xAI client, the Telegram adapter, and the handler
//! chain, then hands control to the REPL.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;
use tracing::info;
use xai_client::XaiClient;

use crate::chain::HandlerChain;
use crate::config::WatsonConfig;
use crate::core::{init_tracing, Bot, TelegramBot};
use crate::handlers::{AssistantHandler, CommandHandler, LiveSearchHandler};
use crate::llm::LlmClient;
use crate::telegram::run_repl;

/// Shared cache of the bot's own username, populated by the runner at startup.
pub type BotUsername = Arc<RwLock<Option<String>>>;

/// Assembles the dispatch chain: commands, then live search, then the
/// assistant fallback. Exposed so tests can drive the chain with mocks.
pub fn build_handler_chain(
    bot: Arc<dyn Bot>,
    llm: Arc<dyn LlmClient>,
    config: &WatsonConfig,
    bot_username: BotUsername,
) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(CommandHandler::new(
            bot.clone(),
            bot_username.clone(),
        )))
        .add_handler(Arc::new(LiveSearchHandler::new(
            bot.clone(),
            llm.clone(),
            config.search_model.clone(),
            bot_username,
        )))
        .add_handler(Arc::new(AssistantHandler::new(
            bot,
            llm,
            config.chat_model.clone(),
        )))
}

/// Main entry: validate config, init logging, build components, run the REPL.
pub async fn run_bot(config: WatsonConfig) -> Result<()> {
    config.validate()?;
    init_tracing(&config.log_file)?;

    info!(
        chat_model = %config.chat_model,
        search_model = %config.search_model,
        "initializing bot"
    );

    let base_url = config
        .xai_api_url
        .clone()
        .unwrap_or_else(|| xai_client::DEFAULT_BASE_URL.to_string());
    let llm: Arc<dyn LlmClient> = Arc::new(XaiClient::with_options(
        config.xai_api_key.clone(),
        base_url,
        config.timeout_secs,
    )?);

    let teloxide_bot = teloxide::Bot::new(&config.bot_token);
    let bot: Arc<dyn Bot> = Arc::new(TelegramBot::new(teloxide_bot.clone()));
    let bot_username: BotUsername = Arc::new(RwLock::new(None));

    let chain = build_handler_chain(bot, llm, &config, bot_username.clone());

    info!("bot started");
    run_repl(teloxide_bot, chain, bot_username).await
}
