use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError, Language};

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeTextRequest {
    pub text: String,
    pub context: String,
    pub language: Language,
}

impl AnalyzeTextRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: String::new(),
            language: Language::default(),
        }
    }

    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
}

/// Structured analysis of a medical record, as produced by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct MedicalAnalysis {
    pub summary: String,
    pub key_findings: Vec<String>,
    pub recommendations: Vec<String>,
    pub next_steps: Vec<String>,
    pub disclaimer: String,
    pub language: String,
    pub timestamp: String,
}

impl ApiClient {
    /// Analyze medical record text and return the structured result.
    pub async fn analyze_text(
        &self,
        request: &AnalyzeTextRequest,
    ) -> Result<MedicalAnalysis, ApiError> {
        log::debug!(
            "analyze_text: {} chars, context {} chars",
            request.text.len(),
            request.context.len()
        );

        let response = self
            .http()
            .post(self.endpoint("/api/analyze-text"))
            .json(request)
            .send()
            .await?;

        Self::read_json(response).await
    }
}
