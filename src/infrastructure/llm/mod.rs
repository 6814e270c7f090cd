//! Generative provider implementations

mod gemini;
mod http_client;

pub use gemini::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_TIMEOUT, GeminiProvider};
pub use http_client::{DEFAULT_MAX_BODY_BYTES, HttpClient, HttpClientTrait};
