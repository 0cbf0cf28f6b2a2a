use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError, Language};

pub const DEFAULT_MAX_RESULTS: u32 = 5;

#[derive(Debug, Clone, Serialize)]
pub struct ResearchRequest {
    pub query: String,
    pub max_results: u32,
    pub language: Language,
}

impl ResearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max_results: DEFAULT_MAX_RESULTS,
            language: Language::default(),
        }
    }

    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResearchResult {
    pub title: String,
    pub url: String,
    pub content: String,
    pub score: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResearchResponse {
    pub query: String,
    pub results: Vec<ResearchResult>,
    pub summary: String,
    pub timestamp: String,
}

impl ApiClient {
    /// Search recent medical literature through the backend.
    pub async fn research(&self, request: &ResearchRequest) -> Result<ResearchResponse, ApiError> {
        log::debug!(
            "research: '{}', max_results {}",
            request.query,
            request.max_results
        );

        let response = self
            .http()
            .post(self.endpoint("/api/research"))
            .json(request)
            .send()
            .await?;

        Self::read_json(response).await
    }
}
