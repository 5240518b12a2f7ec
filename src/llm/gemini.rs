// ABOUTME: Google Gemini provider for multimodal generation, structured output, and images
// ABOUTME: Speaks the Generative Language REST API generateContent endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors

//! # Gemini Provider
//!
//! Implementation of the `LlmProvider` trait for Google's Gemini models.
//!
//! ## Configuration
//!
//! Set the `GEMINI_API_KEY` environment variable with your API key from
//! Google AI Studio.
//!
//! ## Features Used
//!
//! - inline image input (fridge photos)
//! - `responseMimeType` + `responseSchema` structured JSON output
//! - the `googleSearch` tool with grounding metadata
//! - `responseModalities` image output

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{
    ContentPart, GenerateRequest, GenerateResponse, InlineImage, LlmCapabilities, LlmProvider,
    TokenUsage, WebSource,
};
use crate::constants::{models, service_names};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::utils::http_client;

/// Environment variable for Gemini API key
const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Base URL for the Gemini API
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<GeminiTool>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

/// Part of content; unknown part kinds (thoughts, code) are kept opaque
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum GeminiPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: GeminiBlob,
    },
    Other(serde_json::Value),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiBlob {
    mime_type: String,
    data: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<&'static str>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiTool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    usage_metadata: Option<UsageMetadata>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebChunk>,
}

#[derive(Debug, Deserialize)]
struct WebChunk {
    uri: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount")]
    prompt: Option<u32>,
    #[serde(rename = "candidatesTokenCount")]
    candidates: Option<u32>,
    #[serde(rename = "totalTokenCount")]
    total: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini provider
pub struct GeminiProvider {
    api_key: String,
    client: Client,
    default_model: String,
    base_url: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: http_client::api_client(),
            default_model: models::DEFAULT_TEXT_MODEL.to_owned(),
            base_url: API_BASE_URL.to_owned(),
        }
    }

    /// Create a provider from the `GEMINI_API_KEY` environment variable
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env() -> AppResult<Self> {
        let api_key = env::var(GEMINI_API_KEY_ENV).map_err(|_| {
            AppError::new(
                ErrorCode::ConfigMissing,
                format!("{GEMINI_API_KEY_ENV} environment variable not set"),
            )
        })?;
        Ok(Self::new(api_key))
    }

    /// Set a custom default model
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Point the provider at a different API root (proxies, emulators)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Use a request timeout other than the shared API client's
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = http_client::create_client_with_timeout(
            timeout.as_secs().max(1),
            http_client::DEFAULT_CONNECT_TIMEOUT_SECS,
        );
        self
    }

    fn build_url(&self, model: &str, method: &str) -> String {
        format!(
            "{}/models/{model}:{method}?key={}",
            self.base_url, self.api_key
        )
    }

    fn convert_part(part: &ContentPart) -> GeminiPart {
        match part {
            ContentPart::Text(text) => GeminiPart::Text { text: text.clone() },
            ContentPart::Image(image) => GeminiPart::InlineData {
                inline_data: GeminiBlob {
                    mime_type: image.mime_type.clone(),
                    data: image.data.clone(),
                },
            },
        }
    }

    fn build_gemini_request(request: &GenerateRequest) -> GeminiRequest {
        let contents = vec![GeminiContent {
            role: Some("user".to_owned()),
            parts: request.parts.iter().map(Self::convert_part).collect(),
        }];

        let mut config = GenerationConfig {
            temperature: request.temperature,
            ..GenerationConfig::default()
        };
        if let Some(schema) = &request.response_schema {
            config.response_mime_type = Some("application/json");
            config.response_schema = Some(schema.clone());
        }
        if request.image_output {
            config.response_modalities = Some(vec!["IMAGE", "TEXT"]);
        }
        let has_config = config.temperature.is_some()
            || config.response_mime_type.is_some()
            || config.response_modalities.is_some();

        let tools = request.web_search.then(|| {
            vec![GeminiTool {
                google_search: GoogleSearch {},
            }]
        });

        GeminiRequest {
            contents,
            generation_config: has_config.then_some(config),
            tools,
        }
    }

    fn convert_response(response: GeminiResponse, model: &str) -> AppResult<GenerateResponse> {
        if let Some(error) = response.error {
            return Err(AppError::external_service(
                service_names::GEMINI_API,
                error.message,
            ));
        }

        let candidate = response
            .candidates
            .and_then(|candidates| candidates.into_iter().next())
            .ok_or_else(|| {
                AppError::external_service(service_names::GEMINI_API, "No candidates in response")
            })?;

        let mut texts = Vec::new();
        let mut images = Vec::new();
        for part in candidate.content.map(|c| c.parts).unwrap_or_default() {
            match part {
                GeminiPart::Text { text } => texts.push(text),
                GeminiPart::InlineData { inline_data } => images.push(InlineImage {
                    mime_type: inline_data.mime_type,
                    data: inline_data.data,
                }),
                GeminiPart::Other(_) => {}
            }
        }

        let sources = candidate
            .grounding_metadata
            .map(|metadata| {
                metadata
                    .grounding_chunks
                    .into_iter()
                    .filter_map(|chunk| chunk.web)
                    .filter_map(|web| {
                        web.uri.map(|uri| WebSource {
                            uri,
                            title: web.title.unwrap_or_default(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(GenerateResponse {
            text: (!texts.is_empty()).then(|| texts.concat()),
            images,
            sources,
            model: model.to_owned(),
            usage: response.usage_metadata.as_ref().map(Self::convert_usage),
            finish_reason: candidate.finish_reason,
        })
    }

    fn convert_usage(metadata: &UsageMetadata) -> TokenUsage {
        TokenUsage {
            prompt_tokens: metadata.prompt.unwrap_or(0),
            completion_tokens: metadata.candidates.unwrap_or(0),
            total_tokens: metadata.total.unwrap_or(0),
        }
    }

    /// Map API error status to an error code
    ///
    /// Quota errors (429) expose the retry hint from Gemini.
    fn map_api_error(status: u16, response_text: &str) -> AppError {
        let message = serde_json::from_str::<GeminiResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        match status {
            429 => AppError::new(
                ErrorCode::ExternalRateLimited,
                Self::extract_quota_message(&message),
            ),
            500..=599 => AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                format!("Gemini API unavailable ({status}): {message}"),
            ),
            _ => AppError::external_service(
                service_names::GEMINI_API,
                format!("HTTP {status}: {message}"),
            ),
        }
    }

    /// Turn "Please retry in 6.4s." into a whole-second hint
    fn extract_quota_message(message: &str) -> String {
        const RETRY_PREFIX: &str = "Please retry in ";
        if let Some(retry_pos) = message.find(RETRY_PREFIX) {
            let after_prefix = &message[retry_pos + RETRY_PREFIX.len()..];
            if let Some(s_pos) = after_prefix.find('s') {
                if let Ok(seconds) = after_prefix[..s_pos].parse::<f64>() {
                    let seconds_int = seconds.ceil() as u64;
                    return format!(
                        "AI service quota exceeded. Please try again in {seconds_int} seconds."
                    );
                }
            }
        }
        "AI service quota exceeded. Please wait a moment and try again.".to_owned()
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn display_name(&self) -> &'static str {
        "Google Gemini"
    }

    fn capabilities(&self) -> LlmCapabilities {
        let base = LlmCapabilities::recipe_assistant();
        if self.default_model.contains("image") {
            base.union(LlmCapabilities::IMAGE_OUTPUT)
        } else {
            base
        }
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.default_model)))]
    async fn generate(&self, request: &GenerateRequest) -> AppResult<GenerateResponse> {
        if self.api_key.is_empty() {
            return Err(AppError::new(
                ErrorCode::ConfigMissing,
                format!("{GEMINI_API_KEY_ENV} environment variable not set"),
            ));
        }
        let model = request.model.as_deref().unwrap_or(&self.default_model);
        let url = self.build_url(model, "generateContent");
        let gemini_request = Self::build_gemini_request(request);

        debug!(
            parts = request.parts.len(),
            json = request.response_schema.is_some(),
            web_search = request.web_search,
            image_output = request.image_output,
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(&url)
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| {
                AppError::new(
                    ErrorCode::ExternalServiceUnavailable,
                    format!("HTTP request failed: {e}"),
                )
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            AppError::external_service(
                service_names::GEMINI_API,
                format!("Failed to read response: {e}"),
            )
        })?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                error!(error = %e, "Failed to parse Gemini response");
                AppError::external_service(
                    service_names::GEMINI_API,
                    format!("Failed to parse response: {e}"),
                )
            })?;

        let converted = Self::convert_response(gemini_response, model)?;
        debug!(
            images = converted.images.len(),
            sources = converted.sources.len(),
            "Received Gemini response"
        );
        Ok(converted)
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> AppResult<bool> {
        let url = format!("{}/models?key={}", self.base_url, self.api_key);

        let response = self.client.get(&url).send().await.map_err(|e| {
            AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                format!("Health check failed: {e}"),
            )
        })?;

        Ok(response.status().is_success())
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("default_model", &self.default_model)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_with_schema_sets_json_mime_type() {
        let request = GenerateRequest::text("list ingredients")
            .with_json_schema(json!({"type": "OBJECT"}));
        let body = serde_json::to_value(GeminiProvider::build_gemini_request(&request)).unwrap();

        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "list ingredients");
        assert!(body.get("tools").is_none());
    }

    #[test]
    fn test_request_with_image_and_search() {
        let image = InlineImage::from_bytes(b"jpeg", "image/jpeg");
        let request = GenerateRequest::with_image(image, "what is this").with_web_search();
        let body = serde_json::to_value(GeminiProvider::build_gemini_request(&request)).unwrap();

        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[0]["inlineData"]["data"], "anBlZw==");
        assert_eq!(parts[1]["text"], "what is this");
        assert!(body["tools"][0]["googleSearch"].is_object());
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn test_request_with_image_output_sets_modalities() {
        let request = GenerateRequest::text("a bowl of ramen").with_image_output();
        let body = serde_json::to_value(GeminiProvider::build_gemini_request(&request)).unwrap();
        assert_eq!(
            body["generationConfig"]["responseModalities"],
            json!(["IMAGE", "TEXT"])
        );
    }

    #[test]
    fn test_convert_response_collects_text_images_and_sources() {
        let raw = json!({
            "candidates": [{
                "content": {"role": "model", "parts": [
                    {"text": "Basil is "},
                    {"text": "fragrant."},
                    {"inlineData": {"mimeType": "image/png", "data": "iVBO"}}
                ]},
                "finishReason": "STOP",
                "groundingMetadata": {"groundingChunks": [
                    {"web": {"uri": "https://a.example", "title": "A"}},
                    {"web": {"uri": "https://b.example"}},
                    {"retrievedContext": {}}
                ]}
            }],
            "usageMetadata": {"promptTokenCount": 4, "candidatesTokenCount": 6, "totalTokenCount": 10}
        });
        let response: GeminiResponse = serde_json::from_value(raw).unwrap();
        let converted = GeminiProvider::convert_response(response, "gemini-2.5-flash").unwrap();

        assert_eq!(converted.text.as_deref(), Some("Basil is fragrant."));
        assert_eq!(converted.images.len(), 1);
        assert_eq!(converted.images[0].to_data_url(), "data:image/png;base64,iVBO");
        assert_eq!(converted.sources.len(), 2);
        assert_eq!(converted.sources[1].title, "");
        assert_eq!(converted.usage.unwrap().total_tokens, 10);
        assert_eq!(converted.finish_reason.as_deref(), Some("STOP"));
    }

    #[test]
    fn test_convert_response_without_candidates_is_backend_error() {
        let response: GeminiResponse = serde_json::from_value(json!({})).unwrap();
        let error = GeminiProvider::convert_response(response, "m").unwrap_err();
        assert_eq!(error.code, ErrorCode::ExternalServiceError);
    }

    #[test]
    fn test_rate_limit_maps_to_retry_hint() {
        let body = r#"{"error": {"message": "Quota exceeded. Please retry in 6.406453963s."}}"#;
        let error = GeminiProvider::map_api_error(429, body);
        assert_eq!(error.code, ErrorCode::ExternalRateLimited);
        assert_eq!(
            error.message,
            "AI service quota exceeded. Please try again in 7 seconds."
        );
    }

    #[test]
    fn test_server_error_maps_to_unavailable() {
        let error = GeminiProvider::map_api_error(503, "overloaded");
        assert_eq!(error.code, ErrorCode::ExternalServiceUnavailable);
        assert!(error.message.contains("overloaded"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let provider = GeminiProvider::new("super-secret-key");
        let debug_output = format!("{provider:?}");
        assert!(!debug_output.contains("super-secret-key"));
        assert!(debug_output.contains("[REDACTED]"));
    }
}
