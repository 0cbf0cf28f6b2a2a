use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError, Language};

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub language: Language,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            language: Language::default(),
        }
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub language: String,
    pub timestamp: String,
}

impl ApiClient {
    /// Ask the medical assistant a question.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        log::debug!(
            "chat: {} chars, language {}",
            request.message.len(),
            request.language
        );

        let response = self
            .http()
            .post(self.endpoint("/api/chat"))
            .json(request)
            .send()
            .await?;

        Self::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_english() {
        let request = ChatRequest::new("hi");
        assert_eq!(request.language, Language::En);
        assert_eq!(request.message, "hi");
    }

    #[test]
    fn serializes_wire_fields() {
        let body = serde_json::to_value(ChatRequest::new("hi").language(Language::Fr)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"message": "hi", "language": "fr"})
        );
    }
}
