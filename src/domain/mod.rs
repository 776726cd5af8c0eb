//! Domain layer: core entities and value objects for the grievance chatbot.

pub mod errors;
pub mod models;

pub use errors::{DatasetError, DatasetErrorKind, DomainError};
#[cfg(feature = "llm-backend")]
pub use models::{ChatMessage, ChatRole};
pub use models::{Corpus, CorpusEntry, MatchResult, QueryVector};
