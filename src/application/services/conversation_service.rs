use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;

use crate::application::services::retrieval_session::{ChatBackend, VALIDATION_MESSAGE};
use crate::domain::{ChatMessage, ChatRole, DomainError};

/// Reply served when the chat API cannot be reached or returns garbage.
pub const CHAT_FALLBACK_MESSAGE: &str =
    "I'm having trouble processing your request. Please try again later.";

const SYSTEM_PROMPT: &str = "You are a helpful assistant for a Citizen Grievance Redressal System. Your purpose is to help citizens with their grievances related to government services, especially pension-related issues. Provide clear, concise, and accurate information. If you don't know something, admit it and suggest where they might find the information. Be empathetic and professional.";

const SUGGESTED_QUESTIONS: [&str; 10] = [
    "How do I submit my life certificate?",
    "Why is my pension payment delayed?",
    "How do I update my bank details?",
    "What documents are required for family pension?",
    "How can I check my pension status online?",
    "What is the process for filing a grievance?",
    "How long does it take to resolve a grievance?",
    "Can I submit my grievance in my regional language?",
    "What happens after I submit a grievance?",
    "How do I track the status of my grievance?",
];

/// Transport seam for the hosted chat-completion API, satisfied by the HTTP
/// client and by test doubles.
pub trait ChatCompletionApi: Send + Sync {
    fn complete(&self, messages: &[ChatMessage]) -> Result<String, DomainError>;
}

/// Conversational backend: forwards the transcript to a hosted language model
/// and appends each exchange. Presents the same call shape as the retrieval
/// session so the two backends are interchangeable to callers.
///
/// The transcript mutex is the only mutable per-session state in the
/// repository; a failed completion leaves the transcript untouched.
pub struct ConversationService {
    api: Arc<dyn ChatCompletionApi>,
    transcript: Mutex<Vec<ChatMessage>>,
    suggested: Vec<String>,
}

impl ConversationService {
    pub fn new(api: Arc<dyn ChatCompletionApi>) -> Self {
        Self {
            api,
            transcript: Mutex::new(Vec::new()),
            suggested: SUGGESTED_QUESTIONS.iter().map(|q| q.to_string()).collect(),
        }
    }

    pub fn answer(&self, query: &str) -> String {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return VALIDATION_MESSAGE.to_string();
        }

        let mut messages = self.transcript.lock().clone();
        if messages.first().map(|m| m.role) != Some(ChatRole::System) {
            messages.insert(0, ChatMessage::system(SYSTEM_PROMPT));
        }
        messages.push(ChatMessage::user(trimmed));

        match self.api.complete(&messages) {
            Ok(reply) => {
                messages.push(ChatMessage::assistant(reply.clone()));
                *self.transcript.lock() = messages;
                reply
            }
            Err(err) => {
                warn!(
                    target: "sahayak::chat",
                    %err,
                    "chat completion failed; serving fallback"
                );
                CHAT_FALLBACK_MESSAGE.to_string()
            }
        }
    }

    /// Drop all exchanges, retaining the system prompt if one was recorded.
    pub fn clear_history(&self) {
        let mut transcript = self.transcript.lock();
        let keeps_system = transcript
            .first()
            .map(|m| m.role == ChatRole::System)
            .unwrap_or(false);
        if keeps_system {
            transcript.truncate(1);
        } else {
            transcript.clear();
        }
    }

    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.transcript.lock().clone()
    }

    pub fn suggested_questions(&self) -> &[String] {
        &self.suggested
    }
}

impl ChatBackend for ConversationService {
    fn answer(&self, query: &str) -> String {
        ConversationService::answer(self, query)
    }

    fn suggested_questions(&self) -> &[String] {
        ConversationService::suggested_questions(self)
    }
}
