//! Service layer orchestrating the retrieval engine and the chat backends.

#[cfg(feature = "llm-backend")]
mod conversation_service;
mod match_policy;
mod retrieval_session;

#[cfg(feature = "llm-backend")]
pub use conversation_service::{ChatCompletionApi, ConversationService, CHAT_FALLBACK_MESSAGE};
pub use match_policy::{MatchPolicy, FALLBACK_MESSAGE};
pub use retrieval_session::{
    ChatBackend, LexicalModel, RetrievalSession, SessionConfig, VALIDATION_MESSAGE,
};
