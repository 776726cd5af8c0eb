use std::time::Duration;

use serde_json::json;

use crate::application::services::ChatCompletionApi;
use crate::domain::{ChatMessage, DomainError};
use crate::settings::ChatSettings;

/// HTTP adapter for an OpenAI-compatible `chat/completions` endpoint.
///
/// Holds the resolved API key and model for the lifetime of the process; the
/// agent applies a flat socket timeout so a stalled upstream degrades into
/// the conversational fallback instead of hanging the caller.
pub struct ChatCompletionClient {
    agent: ureq::Agent,
    api_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl ChatCompletionClient {
    pub fn new(settings: &ChatSettings) -> Result<Self, DomainError> {
        let api_key = settings.resolve_api_key().ok_or_else(|| {
            DomainError::chat(format!(
                "no API key configured; set `chat.api_key` or the {} environment variable",
                ChatSettings::API_KEY_ENV
            ))
        })?;

        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(30))
            .build();

        Ok(Self {
            agent,
            api_url: settings.api_url.clone(),
            api_key,
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        })
    }
}

impl ChatCompletionApi for ChatCompletionClient {
    fn complete(&self, messages: &[ChatMessage]) -> Result<String, DomainError> {
        let body = json!({
            "model": self.model,
            "messages": messages,
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
            "stream": false,
        });

        tracing::debug!(
            target: "sahayak::chat",
            model = %self.model,
            turns = messages.len(),
            "requesting chat completion"
        );

        let response = self
            .agent
            .post(&self.api_url)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(body)
            .map_err(|err| DomainError::chat(format!("chat API request failed: {err}")))?;

        let payload: serde_json::Value = response
            .into_json()
            .map_err(|err| DomainError::chat(format!("failed to parse chat API response: {err}")))?;

        payload["choices"][0]["message"]["content"]
            .as_str()
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| DomainError::chat("chat API response carried no message content"))
    }
}
