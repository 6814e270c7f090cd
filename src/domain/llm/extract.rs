//! Generated-text extraction from provider responses

use super::GenerateContentResponse;

/// Placeholder text used when the provider returned no usable text
pub const NO_RESPONSE_GENERATED: &str = "No response generated";

/// Result of walking a response envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Text(String),
    /// A level of the envelope is missing, or a list along the path is empty
    Fallback,
}

impl Extraction {
    pub fn from_response(response: &GenerateContentResponse) -> Self {
        response
            .first_text()
            .map_or(Self::Fallback, |text| Self::Text(text.to_string()))
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback)
    }

    /// The generated text, or [`NO_RESPONSE_GENERATED`] for a fallback
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Fallback => NO_RESPONSE_GENERATED.to_string(),
        }
    }
}
