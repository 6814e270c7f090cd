use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware,
    routing::get,
};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::chat;
use super::health;
use super::middleware::logging_middleware;
use super::state::AppState;
use crate::config::CorsConfig;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState, cors: &CorsConfig) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        // Chat API
        .nest("/api/chat", chat::create_chat_router())
        // Add state and middleware
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(cors_layer(cors))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::llm::{GenerateContentResponse, MockGenerativeProvider};
    use crate::domain::DomainError;
    use crate::infrastructure::services::ChatService;

    fn app_with(provider: MockGenerativeProvider) -> Router {
        let service =
            ChatService::new(Arc::new(provider)).with_stream_delay(Duration::from_millis(1));
        create_router_with_state(AppState::new(service), &CorsConfig::default())
    }

    fn replying(text: &'static str) -> MockGenerativeProvider {
        let mut provider = MockGenerativeProvider::new();
        provider
            .expect_generate_content()
            .returning(move |_| Ok(GenerateContentResponse::with_text(text)));
        provider
    }

    fn failing() -> MockGenerativeProvider {
        let mut provider = MockGenerativeProvider::new();
        provider
            .expect_generate_content()
            .returning(|_| Err(DomainError::upstream_timeout("gemini", 30000)));
        provider
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_send_message() {
        let response = app_with(replying("Hello!"))
            .oneshot(post_json(
                "/api/chat/message",
                serde_json::json!({"message": "Hi"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));

        let json = body_json(response).await;
        assert_eq!(json["response"], "Hello!");
        assert_eq!(json["success"], true);
        assert!(json["error"].is_null());
        assert!(json["timestamp"].is_i64());
    }

    #[tokio::test]
    async fn test_send_message_failure_is_masked() {
        let response = app_with(failing())
            .oneshot(post_json(
                "/api/chat/message",
                serde_json::json!({"message": "Hi"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert!(json["response"].is_null());
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Failed to generate response");
    }

    #[tokio::test]
    async fn test_blank_message_is_rejected() {
        let response = app_with(MockGenerativeProvider::new())
            .oneshot(post_json(
                "/api/chat/message",
                serde_json::json!({"message": "   "}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["error"]["type"], "invalid_request_error");
        assert_eq!(json["error"]["message"], "Message cannot be blank");
        assert_eq!(json["error"]["code"], "blank_message");
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/chat/message")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{oops"))
            .unwrap();

        let response = app_with(MockGenerativeProvider::new())
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "json_parse_error");
    }

    #[tokio::test]
    async fn test_send_conversation() {
        let mut provider = MockGenerativeProvider::new();
        provider
            .expect_generate_content()
            .withf(|request| {
                request.prompt() == Some("Previous conversation:\nUSER: hi\nASSISTANT: hello\n")
            })
            .times(1)
            .returning(|_| Ok(GenerateContentResponse::with_text("Anything else?")));

        let response = app_with(provider)
            .oneshot(post_json(
                "/api/chat/conversation",
                serde_json::json!({"messages": [
                    {"role": "user", "content": "hi"},
                    {"role": "assistant", "content": "hello"}
                ]}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["response"], "Anything else?");
    }

    #[tokio::test]
    async fn test_conversation_unknown_role_is_rejected() {
        let response = app_with(MockGenerativeProvider::new())
            .oneshot(post_json(
                "/api/chat/conversation",
                serde_json::json!({"messages": [{"role": "system", "content": "hi"}]}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_stream_message() {
        let response = app_with(replying("a b c"))
            .oneshot(post_json(
                "/api/chat/stream",
                serde_json::json!({"message": "Hi"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/event-stream"
        );

        let body = body_text(response).await;
        assert_eq!(body, "data: a \n\ndata: b \n\ndata: c \n\n");
    }

    #[tokio::test]
    async fn test_stream_failure_has_no_events() {
        let response = app_with(failing())
            .oneshot(post_json(
                "/api/chat/stream",
                serde_json::json!({"message": "Hi"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "");
    }

    #[tokio::test]
    async fn test_chat_health() {
        let request = Request::builder()
            .uri("/api/chat/health")
            .body(Body::empty())
            .unwrap();

        let response = app_with(MockGenerativeProvider::new())
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "UP");
        assert_eq!(json["service"], "Chat Service");
    }

    #[tokio::test]
    async fn test_cors_preflight_for_allowed_origin() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/chat/message")
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();

        let response = app_with(MockGenerativeProvider::new())
            .oneshot(request)
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:3000"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
    }

    #[tokio::test]
    async fn test_cors_rejects_unknown_origin() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/chat/message")
            .header(header::ORIGIN, "http://evil.example")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = app_with(MockGenerativeProvider::new())
            .oneshot(request)
            .await
            .unwrap();

        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
