use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Message returned to callers in place of any upstream failure detail
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate response";

/// Outcome of a non-streaming chat operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResult {
    #[serde(rename = "response")]
    text: Option<String>,
    success: bool,
    error: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    timestamp: DateTime<Utc>,
}

impl ChatResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            success: true,
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn failure() -> Self {
        Self {
            text: None,
            success: false,
            error: Some(GENERATION_FAILED_MESSAGE.to_string()),
            timestamp: Utc::now(),
        }
    }

    /// Build a result from generated text, or the masked failure when there is none
    pub fn from_generated(text: Option<String>) -> Self {
        text.map_or_else(Self::failure, Self::success)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
