//! CLI: argument parsing and config loading for the bot binary.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::WatsonConfig;

#[derive(Parser)]
#[command(name = "watson-bot")]
#[command(about = "Telegram assistant bot backed by the xAI API", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
}

/// Loads config from env with an optional token override.
pub fn load_config(token: Option<String>) -> Result<WatsonConfig> {
    WatsonConfig::load(token)
}
