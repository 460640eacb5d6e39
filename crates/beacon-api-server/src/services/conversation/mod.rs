//! Conversation orchestration module
//!
//! Per-session in-memory history with:
//! - Thread-safe session store (DashMap)
//! - Bounded context window assembly
//! - Tolerant JSON extraction from provider output
//! - Reply schema validation with a closed emotion vocabulary

mod extract;
mod orchestrator;
mod schema;
mod store;

pub use orchestrator::ConversationOrchestrator;
pub use store::SessionStore;
