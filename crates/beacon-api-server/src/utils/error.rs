use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::models::chat::{Emotion, StructuredReply};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Generation provider unreachable: {0}")]
    ProviderUnreachable(String),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Error body for generation failures. Carries the same three reply fields
/// as a successful response so clients never have to special-case the error
/// shape.
#[derive(Serialize)]
struct FallbackResponse {
    error: String,
    reply: String,
    emotion: Emotion,
    meme_url: String,
}

impl FallbackResponse {
    fn new(error: &str) -> Self {
        let fallback = StructuredReply::connection_fallback();
        Self {
            error: error.to_string(),
            reply: fallback.reply,
            emotion: fallback.emotion,
            meme_url: fallback.meme_url,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse { error: msg }),
                )
                    .into_response()
            }
            // Transport detail stays in the logs; the body gets the fixed
            // schema-valid fallback payload.
            ApiError::ProviderUnreachable(msg) => {
                tracing::error!("Generation provider unreachable: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(FallbackResponse::new("The generation service is unavailable")),
                )
                    .into_response()
            }
            ApiError::MalformedResponse(msg) => {
                tracing::error!("Malformed provider response: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(FallbackResponse::new(
                        "The generation service returned an unusable response",
                    )),
                )
                    .into_response()
            }
        }
    }
}
