use serde::Deserialize;

use super::{ApiClient, ApiError, Language, MedicalAnalysis};

#[derive(Debug, Clone)]
pub struct ImageAnalysisRequest {
    pub image: Vec<u8>,
    pub file_name: String,
    pub language: Language,
    pub extract_text_only: bool,
}

impl ImageAnalysisRequest {
    pub fn new(image: Vec<u8>, file_name: impl Into<String>) -> Self {
        Self {
            image,
            file_name: file_name.into(),
            language: Language::default(),
            extract_text_only: false,
        }
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn extract_text_only(mut self, extract_text_only: bool) -> Self {
        self.extract_text_only = extract_text_only;
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageAnalysisResponse {
    pub extracted_text: String,
    pub analysis: MedicalAnalysis,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractTextResponse {
    pub extracted_text: String,
    pub timestamp: String,
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        _ => "application/octet-stream",
    }
}

fn image_part(image: Vec<u8>, file_name: &str) -> Result<reqwest::multipart::Part, ApiError> {
    reqwest::multipart::Part::bytes(image)
        .file_name(file_name.to_string())
        .mime_str(mime_for(file_name))
        .map_err(|e| ApiError::new(format!("MIME error: {}", e)))
}

impl ApiClient {
    /// Analyze a medical image (X-ray, prescription, lab report photo).
    pub async fn analyze_image(
        &self,
        request: ImageAnalysisRequest,
    ) -> Result<ImageAnalysisResponse, ApiError> {
        log::debug!(
            "analyze_image: {} ({} bytes), extract_text_only {}",
            request.file_name,
            request.image.len(),
            request.extract_text_only
        );

        let part = image_part(request.image, &request.file_name)?;
        let form = reqwest::multipart::Form::new()
            .text("language", request.language.to_string())
            .text("extract_text_only", request.extract_text_only.to_string())
            .part("file", part);

        let response = self
            .http()
            .post(self.endpoint("/api/analyze-image"))
            .multipart(form)
            .send()
            .await?;

        Self::read_json(response).await
    }

    /// Extract text from a medical document image without analyzing it.
    pub async fn extract_text(
        &self,
        image: Vec<u8>,
        file_name: &str,
    ) -> Result<ExtractTextResponse, ApiError> {
        log::debug!("extract_text: {} ({} bytes)", file_name, image.len());

        let form = reqwest::multipart::Form::new().part("file", image_part(image, file_name)?);

        let response = self
            .http()
            .post(self.endpoint("/api/extract-text"))
            .multipart(form)
            .send()
            .await?;

        Self::read_json(response).await
    }
}
