//! Chat endpoint request types

use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::domain::{Message, MessageRole};

/// Body of `/message` and `/stream`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

impl ChatRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.message.trim().is_empty() {
            return Err(
                ApiError::bad_request("Message cannot be blank").with_code("blank_message")
            );
        }

        Ok(())
    }
}

/// Body of `/conversation`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationRequest {
    #[serde(default)]
    pub messages: Vec<ConversationMessage>,
}

/// One turn of a conversation as sent by the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ConversationRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        for (index, message) in self.messages.iter().enumerate() {
            if message.content.trim().is_empty() {
                return Err(ApiError::bad_request(format!(
                    "messages[{}].content cannot be blank",
                    index
                ))
                .with_code("blank_message"));
            }
        }

        Ok(())
    }

    pub fn into_history(self) -> Vec<Message> {
        self.messages
            .into_iter()
            .map(|m| Message::new(m.role, m.content))
            .collect()
    }
}
