//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::services::ChatService;

/// Application state shared by every handler
#[derive(Clone, Debug)]
pub struct AppState {
    pub chat_service: Arc<ChatService>,
}

impl AppState {
    pub fn new(chat_service: ChatService) -> Self {
        Self {
            chat_service: Arc::new(chat_service),
        }
    }
}
