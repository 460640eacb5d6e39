use serde_json::Value;
use tracing::warn;

use crate::models::chat::{Emotion, StructuredReply};
use crate::utils::error::ApiError;

const REQUIRED_FIELDS: [&str; 3] = ["reply", "emotion", "meme_url"];

/// Check the parsed provider output against the reply contract: all three
/// required keys present with string values. The error names the offending
/// field and what was received, for the logs only — the caller sees the
/// fixed fallback payload, never this detail.
pub fn validate_reply(value: &Value) -> Result<StructuredReply, ApiError> {
    let object = value.as_object().ok_or_else(|| {
        ApiError::MalformedResponse(format!("expected JSON object, got {}", type_name(value)))
    })?;

    for field in REQUIRED_FIELDS {
        match object.get(field) {
            None => {
                return Err(ApiError::MalformedResponse(format!(
                    "missing required field `{}`",
                    field
                )))
            }
            Some(v) if !v.is_string() => {
                return Err(ApiError::MalformedResponse(format!(
                    "field `{}`: expected string, got {}",
                    field,
                    type_name(v)
                )))
            }
            Some(_) => {}
        }
    }

    let reply = object["reply"].as_str().unwrap_or_default().to_string();
    let meme_url = object["meme_url"].as_str().unwrap_or_default().to_string();
    let label = object["emotion"].as_str().unwrap_or_default();

    // The provider is only prompted toward the closed vocabulary, not
    // structurally constrained. Normalize strays instead of failing the
    // whole reply.
    let emotion = Emotion::from_label(label).unwrap_or_else(|| {
        warn!("Out-of-vocabulary emotion `{}`, normalizing to neutral", label);
        Emotion::Neutral
    });

    Ok(StructuredReply {
        reply,
        emotion,
        meme_url,
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
