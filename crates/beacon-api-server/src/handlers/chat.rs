use std::sync::Arc;

use axum::{body::Bytes, extract::Extension, Json};
use tracing::info;

use crate::models::chat::{ChatRequest, ChatResponse, ResetRequest, ResetResponse};
use crate::services::ConversationOrchestrator;
use crate::utils::error::ApiError;

pub async fn chat_handler(
    Extension(orchestrator): Extension<Arc<ConversationOrchestrator>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let session_id = request
        .session_id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    info!(
        "Chat request: session={}, message_len={}",
        session_id,
        request.message.len()
    );

    let reply = orchestrator
        .handle_message(&session_id, &request.message)
        .await?;

    Ok(Json(ChatResponse {
        session_id,
        reply: reply.reply,
        emotion: reply.emotion,
        meme_url: reply.meme_url,
    }))
}

/// Reset accepts an empty body (clear everything) or `{"session_id": ...}`
/// to clear one session.
pub async fn reset_handler(
    Extension(orchestrator): Extension<Arc<ConversationOrchestrator>>,
    body: Bytes,
) -> Result<Json<ResetResponse>, ApiError> {
    let request: ResetRequest = if body.is_empty() {
        ResetRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::BadRequest(format!("invalid reset payload: {}", e)))?
    };

    orchestrator.reset(request.session_id.as_deref());

    Ok(Json(ResetResponse {
        status: "success".to_string(),
        message: "Chat history cleared".to_string(),
    }))
}
