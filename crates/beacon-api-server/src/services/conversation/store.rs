use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::{debug, info};

use crate::models::chat::{ChatMessage, SessionId};

/// Turns exchanged within one session. The persona system prompt is never
/// stored here; it is prepended at request-construction time, so trimming
/// the window can never drop it.
#[derive(Debug, Clone)]
pub struct SessionHistory {
    turns: Vec<ChatMessage>,
    /// Bumped on every reset. An in-flight request that captured an older
    /// generation must not commit its assistant turn.
    generation: u64,
    created_at: Instant,
    last_activity: Instant,
}

impl SessionHistory {
    fn new() -> Self {
        let now = Instant::now();
        Self {
            turns: Vec::new(),
            generation: 0,
            created_at: now,
            last_activity: now,
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }

    fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    fn window(&self, n: usize) -> Vec<ChatMessage> {
        let start = self.turns.len().saturating_sub(n);
        self.turns[start..].to_vec()
    }
}

/// Thread-safe session-keyed history store. Each entry operation holds the
/// session's shard lock, so a request's append-and-snapshot is atomic with
/// respect to other requests on the same session.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<DashMap<SessionId, SessionHistory>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        info!("Initializing session store (ttl: {:?})", ttl);
        Self {
            storage: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Append the user turn and snapshot the last `window` turns (including
    /// the one just appended) in one locked step. Returns the snapshot plus
    /// the session generation to be checked at commit time.
    pub fn append_user(
        &self,
        session_id: &str,
        content: String,
        window: usize,
    ) -> (Vec<ChatMessage>, u64) {
        let mut entry = self
            .storage
            .entry(session_id.to_string())
            .or_insert_with(SessionHistory::new);

        // Lazy expiry, as with cache entries: an expired session restarts
        // empty under the same id.
        if entry.is_expired(self.ttl) {
            debug!("Session {} expired, starting fresh history", session_id);
            *entry = SessionHistory::new();
        }

        entry.turns.push(ChatMessage::user(content));
        entry.touch();
        (entry.window(window), entry.generation)
    }

    /// Record the assistant turn for a completed exchange. Returns false —
    /// and records nothing — if the session was reset (or dropped) after the
    /// user turn was appended.
    pub fn commit_assistant(&self, session_id: &str, generation: u64, content: String) -> bool {
        match self.storage.get_mut(session_id) {
            Some(mut entry) if entry.generation == generation => {
                entry.turns.push(ChatMessage::assistant(content));
                entry.touch();
                true
            }
            Some(_) => {
                debug!(
                    "Session {} was reset mid-flight, dropping assistant turn",
                    session_id
                );
                false
            }
            None => false,
        }
    }

    /// Last `n` turns in insertion order; fewer if the history is shorter,
    /// empty for unknown sessions. Pure read.
    pub fn window(&self, session_id: &str, n: usize) -> Vec<ChatMessage> {
        self.storage
            .get(session_id)
            .map(|entry| entry.window(n))
            .unwrap_or_default()
    }

    /// Clear one session's turns. Idempotent; the entry stays in place with
    /// a bumped generation so stale in-flight commits are rejected.
    pub fn reset(&self, session_id: &str) {
        if let Some(mut entry) = self.storage.get_mut(session_id) {
            entry.turns.clear();
            entry.generation += 1;
            entry.touch();
        }
    }

    /// Clear every session. Same generation discipline as `reset`.
    pub fn reset_all(&self) {
        self.storage.alter_all(|_, mut history| {
            history.turns.clear();
            history.generation += 1;
            history
        });
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Drop expired sessions. Returns the number removed.
    pub fn cleanup_expired(&self) -> usize {
        let before = self.storage.len();
        let ttl = self.ttl;
        self.storage.retain(|_, history| !history.is_expired(ttl));
        let removed = before.saturating_sub(self.storage.len());
        if removed > 0 {
            info!("Cleaned up {} expired sessions", removed);
        }
        removed
    }
}
