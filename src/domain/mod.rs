//! Domain layer - Core chat relay logic and entities

pub mod chat;
pub mod error;
pub mod llm;

pub use chat::{
    ChatResult, ChatStream, ConversationHistory, Message, MessageRole, StreamChunk, StreamOrigin,
    flatten_conversation,
};
pub use error::DomainError;
pub use llm::{Extraction, GenerateContentRequest, GenerateContentResponse, GenerativeProvider};
