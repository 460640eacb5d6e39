use serde::{Deserialize, Serialize};

/// Opaque session identifier. Callers may supply their own; the chat handler
/// generates a UUID when none is given.
pub type SessionId = String;

/// Speaker role of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message in a conversation, in the wire shape the generation provider
/// expects (`{role, content}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Closed emotion vocabulary the persona prompt instructs the provider to
/// use. Unknown labels coming back from the provider are normalized to
/// `Neutral` during schema validation rather than passed through verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Fear,
    Disgust,
    Neutral,
}

impl Emotion {
    /// Case-insensitive lookup; `None` for out-of-vocabulary labels.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "joy" => Some(Self::Joy),
            "sadness" => Some(Self::Sadness),
            "anger" => Some(Self::Anger),
            "fear" => Some(Self::Fear),
            "disgust" => Some(Self::Disgust),
            "neutral" => Some(Self::Neutral),
            _ => None,
        }
    }
}

/// Validated provider output for one chat exchange. The `reply` text is what
/// gets recorded as the assistant turn; the full object goes back to the
/// caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredReply {
    pub reply: String,
    pub emotion: Emotion,
    pub meme_url: String,
}

impl StructuredReply {
    /// Fixed payload substituted when the provider is unreachable or its
    /// output fails extraction/validation. Always schema-valid, never
    /// recorded in history.
    pub fn connection_fallback() -> Self {
        Self {
            reply: "I'm having trouble connecting right now 💔".to_string(),
            emotion: Emotion::Sadness,
            meme_url: "https://placehold.co/400x300/FF0000/FFFFFF?text=Connection+Error"
                .to_string(),
        }
    }
}

// ===== REQUEST MODELS =====

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub session_id: Option<SessionId>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResetRequest {
    #[serde(default)]
    pub session_id: Option<SessionId>,
}

// ===== RESPONSE MODELS =====

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub session_id: SessionId,
    pub reply: String,
    pub emotion: Emotion,
    pub meme_url: String,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}
