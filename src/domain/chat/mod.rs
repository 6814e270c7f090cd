//! Chat domain: conversation turns, results and paced streams

mod context;
mod message;
mod result;
mod stream;

pub use context::flatten_conversation;
pub use message::{ConversationHistory, Message, MessageRole};
pub use result::{ChatResult, GENERATION_FAILED_MESSAGE};
pub use stream::{ChatStream, DEFAULT_CHUNK_DELAY, StreamChunk, StreamOrigin};
