//! Application layer wiring DTOs and services for the grievance chatbot.

pub mod dtos;
pub mod services;

pub use dtos::AnswerResponse;
#[cfg(feature = "llm-backend")]
pub use services::ConversationService;
pub use services::{ChatBackend, RetrievalSession, SessionConfig};
