pub mod chat;
pub mod health;
pub mod mood;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::services::ConversationOrchestrator;

pub fn router(orchestrator: Arc<ConversationOrchestrator>) -> Router {
    Router::new()
        .route("/", get(health::status_check))
        .route("/health", get(health::health_check))
        .route("/chat", post(chat::chat_handler))
        .route("/reset", post(chat::reset_handler))
        .route("/detect_mood", post(mood::detect_mood_handler))
        .route("/detect_meditation", post(mood::detect_meditation_handler))
        .layer(Extension(orchestrator))
        // CORS
        .layer(CorsLayer::permissive())
        // Tracing
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::ChatConfig;
    use crate::models::chat::Role;
    use crate::services::generation::MockGenerationProvider;

    const VALID_REPLY: &str = r#"{"reply":"I hear you 💜","emotion":"joy","meme_url":"https://placehold.co/400x300?text=Yay"}"#;

    fn test_orchestrator(provider: MockGenerationProvider) -> Arc<ConversationOrchestrator> {
        Arc::new(ConversationOrchestrator::new(
            Arc::new(provider),
            "You are a test persona.".to_string(),
            &ChatConfig {
                window_size: 10,
                session_ttl_seconds: 3600,
            },
        ))
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn response_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn root_reports_liveness() {
        let app = router(test_orchestrator(MockGenerationProvider::new()));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["status"], "ok");
        assert!(body["message"].as_str().unwrap().contains("running"));
    }

    #[tokio::test]
    async fn chat_round_trip_returns_structured_reply() {
        let mut provider = MockGenerationProvider::new();
        provider
            .expect_generate()
            .returning(|_| Ok(VALID_REPLY.to_string()));

        let orchestrator = test_orchestrator(provider);
        let app = router(orchestrator.clone());

        let response = app
            .oneshot(json_request(
                "/chat",
                json!({"message": "good news!", "session_id": "s1"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["session_id"], "s1");
        assert_eq!(body["reply"], "I hear you 💜");
        assert_eq!(body["emotion"], "joy");
        assert!(body["meme_url"].as_str().unwrap().starts_with("https://"));

        let turns = orchestrator.history_window("s1", 10);
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[1].role, Role::Assistant);
    }

    #[tokio::test]
    async fn chat_generates_session_id_when_missing() {
        let mut provider = MockGenerationProvider::new();
        provider
            .expect_generate()
            .returning(|_| Ok(VALID_REPLY.to_string()));

        let app = router(test_orchestrator(provider));
        let response = app
            .oneshot(json_request("/chat", json!({"message": "hello"})))
            .await
            .unwrap();

        let body = response_json(response).await;
        assert!(!body["session_id"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_message_is_a_bad_request() {
        let app = router(test_orchestrator(MockGenerationProvider::new()));

        let response = app
            .oneshot(json_request("/chat", json!({"message": ""})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert_eq!(body["error"], "No message provided");
    }

    #[tokio::test(start_paused = true)]
    async fn provider_failure_returns_fallback_and_keeps_user_turn() {
        let mut provider = MockGenerationProvider::new();
        provider
            .expect_generate()
            .returning(|_| Err(crate::utils::error::ApiError::ProviderUnreachable(
                "timed out".to_string(),
            )));

        let orchestrator = test_orchestrator(provider);
        let app = router(orchestrator.clone());

        let response = app
            .oneshot(json_request(
                "/chat",
                json!({"message": "hello?", "session_id": "s1"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response_json(response).await;
        assert_eq!(body["emotion"], "sadness");
        assert_eq!(
            body["meme_url"],
            "https://placehold.co/400x300/FF0000/FFFFFF?text=Connection+Error"
        );

        // The fallback reply is never recorded; the user turn stays.
        let turns = orchestrator.history_window("s1", 10);
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].role, Role::User);
    }

    #[tokio::test]
    async fn reset_with_empty_body_clears_history() {
        let mut provider = MockGenerationProvider::new();
        provider
            .expect_generate()
            .returning(|_| Ok(VALID_REPLY.to_string()));

        let orchestrator = test_orchestrator(provider);
        let app = router(orchestrator.clone());

        app.clone()
            .oneshot(json_request(
                "/chat",
                json!({"message": "hi", "session_id": "s1"}),
            ))
            .await
            .unwrap();
        assert_eq!(orchestrator.history_window("s1", 10).len(), 2);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/reset")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["message"], "Chat history cleared");
        assert!(orchestrator.history_window("s1", 10).is_empty());
    }

    #[tokio::test]
    async fn detect_mood_returns_playlist() {
        let app = router(test_orchestrator(MockGenerationProvider::new()));

        let response = app
            .oneshot(json_request(
                "/detect_mood",
                json!({"text": "I am so happy, today was great and wonderful!"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["mood"], "happy");
        assert!(body["playlist"]
            .as_str()
            .unwrap()
            .starts_with("https://open.spotify.com/embed/playlist/"));
    }

    #[tokio::test]
    async fn detect_meditation_returns_video_and_audio() {
        let app = router(test_orchestrator(MockGenerationProvider::new()));

        let response = app
            .oneshot(json_request(
                "/detect_meditation",
                json!({"text": "The table is brown."}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["mood"], "neutral");
        assert!(body["video"]
            .as_str()
            .unwrap()
            .starts_with("https://www.youtube.com/embed/"));
        assert!(body["audio"]
            .as_str()
            .unwrap()
            .starts_with("https://www.youtube.com/embed/"));
    }
}
