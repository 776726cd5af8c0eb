use serde::{Deserialize, Serialize};

/// Envelope for a single chatbot reply, serialized as the CLI's stdout
/// payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub response: String,
}

impl AnswerResponse {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_response_wire_shape() {
        let payload = serde_json::to_string(&AnswerResponse::new("Submit Form 14.")).unwrap();
        assert_eq!(payload, r#"{"response":"Submit Form 14."}"#);
    }
}
