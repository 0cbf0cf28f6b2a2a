pub mod analysis;
pub mod chat;
pub mod image;
pub mod research;

pub use analysis::{AnalyzeTextRequest, MedicalAnalysis};
pub use chat::{ChatRequest, ChatResponse};
pub use image::{ExtractTextResponse, ImageAnalysisRequest, ImageAnalysisResponse};
pub use research::{ResearchRequest, ResearchResponse, ResearchResult};

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AppConfig;

/// Response language supported by the MediCare AI backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::En => write!(f, "en"),
            Language::Fr => write!(f, "fr"),
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "fr" => Ok(Language::Fr),
            other => Err(format!("Unsupported language '{}', expected en or fr", other)),
        }
    }
}

/// Failure of a single API call, carrying only a human-readable message.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::new("Request timed out")
        } else {
            ApiError::new(format!("Request failed: {}", err))
        }
    }
}

// Error bodies from the backend carry the message in "detail" (FastAPI) or
// "message". Values of any other JSON type are ignored.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<serde_json::Value>,
}

fn normalize_error(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(detail) = parsed.detail.as_ref().and_then(|v| v.as_str()) {
            return detail.to_string();
        }
        if let Some(message) = parsed.message.as_ref().and_then(|v| v.as_str()) {
            return message.to_string();
        }
    }
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| "Request failed".to_string())
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Typed client for the MediCare AI backend. One method per endpoint; every
/// call goes through the same timeout and error normalization.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        Self::with_timeout(
            &config.api_base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// The timeout is wired into the transport, so an elapsed deadline
    /// cancels the in-flight request rather than abandoning it.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::new(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::new(normalize_error(status, &body)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::new(format!("Failed to parse response: {}", e)))
    }

    /// Check that the backend is up.
    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        log::debug!("GET {}", self.endpoint("/api/health"));
        let response = self.http.get(self.endpoint("/api/health")).send().await?;
        Self::read_json(response).await
    }
}
