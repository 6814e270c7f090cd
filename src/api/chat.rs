//! Chat endpoint handlers

use std::convert::Infallible;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{
        IntoResponse, Response,
        sse::{Event, Sse},
    },
    routing::{get, post},
};
use futures::stream::{Stream, StreamExt};
use tracing::info;

use crate::api::health;
use crate::api::state::AppState;
use crate::api::types::{ApiError, ChatRequest, ConversationRequest, Json};
use crate::domain::ChatResult;

/// Create the `/api/chat` router
pub fn create_chat_router() -> Router<AppState> {
    Router::new()
        .route("/message", post(send_message))
        .route("/conversation", post(send_conversation))
        .route("/stream", post(stream_message))
        .route("/health", get(health::chat_health))
}

/// POST /api/chat/message
pub async fn send_message(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Response, ApiError> {
    request.validate()?;

    info!(message_len = request.message.len(), "Processing chat message");

    let result = state.chat_service.send_single_message(&request.message).await;
    Ok(chat_result_response(result))
}

/// POST /api/chat/conversation
pub async fn send_conversation(
    State(state): State<AppState>,
    Json(request): Json<ConversationRequest>,
) -> Result<Response, ApiError> {
    request.validate()?;

    info!(messages = request.messages.len(), "Processing conversation");

    let history = request.into_history();
    let result = state.chat_service.send_conversation(&history).await;
    Ok(chat_result_response(result))
}

/// POST /api/chat/stream
///
/// The answer is generated before the event stream opens; a failed call
/// produces an event stream that ends without any data.
pub async fn stream_message(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    request.validate()?;

    let stream = state.chat_service.stream_message(&request.message).await;

    info!(origin = ?stream.origin(), "Opening chat stream");

    Ok(Sse::new(
        stream.map(|chunk| Ok(Event::default().data(chunk.into_inner()))),
    ))
}

fn chat_result_response(result: ChatResult) -> Response {
    let status = if result.is_success() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };

    (status, Json(result)).into_response()
}
