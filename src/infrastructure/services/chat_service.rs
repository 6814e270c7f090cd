//! Chat service - relays chat turns to the generative provider

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error, warn};

use crate::domain::chat::DEFAULT_CHUNK_DELAY;
use crate::domain::{
    ChatResult, ChatStream, ConversationHistory, DomainError, Extraction, GenerateContentRequest,
    GenerativeProvider, flatten_conversation,
};

/// Relay pipeline shared by every chat entry point
///
/// The service keeps no per-request state, so a single instance behind an
/// `Arc` serves all concurrent requests.
pub struct ChatService {
    provider: Arc<dyn GenerativeProvider>,
    stream_delay: Duration,
}

impl ChatService {
    pub fn new(provider: Arc<dyn GenerativeProvider>) -> Self {
        Self {
            provider,
            stream_delay: DEFAULT_CHUNK_DELAY,
        }
    }

    pub fn with_stream_delay(mut self, delay: Duration) -> Self {
        self.stream_delay = delay;
        self
    }

    /// Relay one message as the whole prompt
    pub async fn send_single_message(&self, message: &str) -> ChatResult {
        debug!(message_len = message.len(), "Generating response for single message");

        let outcome = self.generate(message.to_string()).await;
        ChatResult::from_generated(mask_failure("single_message", outcome))
    }

    /// Relay a conversation, flattened into one prompt
    pub async fn send_conversation(&self, history: &ConversationHistory) -> ChatResult {
        debug!(messages = history.len(), "Generating response for conversation");

        let prompt = flatten_conversation(history);
        let outcome = self.generate(prompt).await;
        ChatResult::from_generated(mask_failure("conversation", outcome))
    }

    /// Generate the full answer, then pace it out word by word.
    ///
    /// A failed provider call yields an empty, already-terminated stream.
    pub async fn stream_message(&self, message: &str) -> ChatStream {
        debug!(message_len = message.len(), "Generating response for stream");

        let outcome = self.generate(message.to_string()).await;

        match mask_failure("stream", outcome) {
            Some(text) => ChatStream::synthesized(&text, self.stream_delay),
            None => ChatStream::aborted(),
        }
    }

    async fn generate(&self, prompt: String) -> Result<String, DomainError> {
        let start = Instant::now();
        let request = GenerateContentRequest::from_prompt(prompt);
        let response = self.provider.generate_content(request).await?;

        let extraction = Extraction::from_response(&response);

        if extraction.is_fallback() {
            warn!("Provider response carried no text, using fallback");
        }

        debug!(
            latency_ms = start.elapsed().as_millis() as u64,
            "Generated response"
        );

        Ok(extraction.into_text())
    }
}

impl std::fmt::Debug for ChatService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatService")
            .field("stream_delay", &self.stream_delay)
            .finish_non_exhaustive()
    }
}

/// Boundary of every public operation: the error is logged here and
/// nothing about it travels further.
fn mask_failure(operation: &'static str, outcome: Result<String, DomainError>) -> Option<String> {
    match outcome {
        Ok(text) => Some(text),
        Err(e) => {
            error!(
                operation,
                upstream = e.is_upstream(),
                error = %e,
                "Error generating response"
            );
            None
        }
    }
}
