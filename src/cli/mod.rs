//! CLI module for the Gemini chat relay
//!
//! Provides subcommands:
//! - `serve`: HTTP chat API
//! - `ask`: one-shot relay from the terminal

pub mod ask;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Gemini Chat Relay - chat API in front of Gemini generateContent
#[derive(Parser)]
#[command(name = "gemini-chat-relay")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP chat API
    Serve,

    /// Send one message and print the answer
    Ask(ask::AskArgs),
}

/// Load `.env` and layered configuration
fn load_config() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();
    Ok(AppConfig::load()?)
}

fn init_logging(config: &AppConfig) {
    logging::init_logging(&config.logging);
}
