pub mod conversation;
pub mod generation;
pub mod mood;

pub use conversation::ConversationOrchestrator;
pub use generation::{GenerationProvider, OllamaClient};
