//! Gemini Chat Relay
//!
//! Relays chat turns to the Gemini `generateContent` API with:
//! - Single-message and multi-turn conversation modes
//! - Paced word-by-word streaming of completed answers
//! - Uniform masking of upstream failures

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::llm::{GeminiProvider, HttpClient};
use infrastructure::services::ChatService;
use tracing::info;

/// Create the application state from validated configuration
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    Ok(AppState::new(create_chat_service(config)?))
}

/// Build the chat service backed by the configured Gemini provider
pub fn create_chat_service(config: &AppConfig) -> anyhow::Result<ChatService> {
    config.validate()?;

    let provider = GeminiProvider::from_config(HttpClient::new(), &config.gemini);

    info!(
        model = %config.gemini.model,
        timeout_ms = config.gemini.timeout_ms,
        "Gemini provider configured"
    );

    Ok(ChatService::new(Arc::new(provider)).with_stream_delay(config.gemini.stream_delay()))
}
