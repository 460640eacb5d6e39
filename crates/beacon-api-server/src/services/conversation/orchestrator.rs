use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::config::ChatConfig;
use crate::models::chat::{ChatMessage, StructuredReply};
use crate::services::generation::GenerationProvider;
use crate::utils::error::ApiError;

use super::extract::extract_json;
use super::schema::validate_reply;
use super::store::SessionStore;

/// Drives one chat exchange end to end: validate input, record the user
/// turn, build the provider context, call the provider, extract and
/// validate the structured reply, record the assistant turn. Failures after
/// the user turn leave exactly that turn in history; the caller receives
/// the error (and, at the HTTP boundary, the fixed fallback payload).
pub struct ConversationOrchestrator {
    store: SessionStore,
    provider: Arc<dyn GenerationProvider>,
    system_prompt: String,
    window_size: usize,
}

impl ConversationOrchestrator {
    pub fn new(
        provider: Arc<dyn GenerationProvider>,
        system_prompt: String,
        config: &ChatConfig,
    ) -> Self {
        Self {
            store: SessionStore::new(Duration::from_secs(config.session_ttl_seconds)),
            provider,
            system_prompt,
            window_size: config.window_size,
        }
    }

    pub async fn handle_message(
        &self,
        session_id: &str,
        message: &str,
    ) -> Result<StructuredReply, ApiError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ApiError::BadRequest("No message provided".to_string()));
        }

        // Append + snapshot happen under the session's lock; the snapshot
        // already contains the turn just appended.
        let (window, generation) =
            self.store
                .append_user(session_id, message.to_string(), self.window_size);

        let mut context = Vec::with_capacity(window.len() + 1);
        context.push(ChatMessage::system(self.system_prompt.as_str()));
        context.extend(window);

        debug!(
            "Session {}: sending {} messages to provider",
            session_id,
            context.len()
        );

        let raw = self.generate_with_retry(&context).await?;
        let value = extract_json(&raw)?;
        let reply = validate_reply(&value)?;

        // Only the natural-language reply is retained in history; the full
        // structured object goes back to the caller.
        if !self
            .store
            .commit_assistant(session_id, generation, reply.reply.clone())
        {
            info!(
                "Session {} was reset during generation, reply returned but not recorded",
                session_id
            );
        }

        Ok(reply)
    }

    /// Clear one session, or every session when none is given.
    pub fn reset(&self, session_id: Option<&str>) {
        match session_id {
            Some(id) => {
                info!("Resetting chat history for session {}", id);
                self.store.reset(id);
            }
            None => {
                info!("Resetting chat history for all sessions");
                self.store.reset_all();
            }
        }
    }

    /// Last `n` recorded turns of a session, in insertion order.
    pub fn history_window(&self, session_id: &str, n: usize) -> Vec<ChatMessage> {
        self.store.window(session_id, n)
    }

    pub fn cleanup_expired_sessions(&self) -> usize {
        self.store.cleanup_expired()
    }

    /// Bounded retry around transport failures only. A reply that arrived
    /// but fails extraction or validation is never retried.
    async fn generate_with_retry(&self, messages: &[ChatMessage]) -> Result<String, ApiError> {
        const MAX_ATTEMPTS: u32 = 3;

        let mut last_error = None;
        for attempt in 1..=MAX_ATTEMPTS {
            match self.provider.generate(messages).await {
                Ok(raw) => return Ok(raw),
                Err(e @ ApiError::ProviderUnreachable(_)) => {
                    if attempt < MAX_ATTEMPTS {
                        debug!("Provider attempt {}/{} failed: {}", attempt, MAX_ATTEMPTS, e);
                        tokio::time::sleep(Duration::from_secs(attempt as u64)).await;
                    } else {
                        error!("Provider unreachable after {} attempts: {}", MAX_ATTEMPTS, e);
                    }
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ApiError::ProviderUnreachable("provider call never attempted".to_string())
        }))
    }
}
