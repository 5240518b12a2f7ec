// ABOUTME: Generative model abstraction used by the recipe gateway and image backends
// ABOUTME: Defines multimodal requests, structured output, grounding sources, and the provider trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors

//! # LLM Provider Interface
//!
//! Every call Cookly makes to the generative backend is a single-turn
//! `generate` call: a list of content parts (text and inline images) plus
//! optional output controls.
//!
//! ## Key Concepts
//!
//! - **`LlmCapabilities`**: bitflags describing what a provider can do
//! - **`GenerateRequest`**: parts, model override, JSON schema, search grounding, image output
//! - **`GenerateResponse`**: text, inline images, and web sources used for grounding
//! - **`LlmProvider`**: async trait implemented by [`GeminiProvider`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use cookly::llm::{GenerateRequest, LlmProvider};
//!
//! async fn example(provider: &dyn LlmProvider) {
//!     let request = GenerateRequest::text("Name three herbs that go with tomatoes.");
//!     let response = provider.generate(&request).await;
//! }
//! ```

mod gemini;
pub mod prompts;

pub use gemini::GeminiProvider;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

// ============================================================================
// Capability Flags
// ============================================================================

bitflags::bitflags! {
    /// Provider capability flags
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LlmCapabilities: u8 {
        /// Accepts inline image input
        const VISION = 0b0000_0001;
        /// Honors a JSON response schema
        const JSON_MODE = 0b0000_0010;
        /// Can ground answers with web search and report sources
        const SEARCH_GROUNDING = 0b0000_0100;
        /// Can return generated images
        const IMAGE_OUTPUT = 0b0000_1000;
    }
}

impl LlmCapabilities {
    /// Everything the recipe assistant needs from a text model
    #[must_use]
    pub const fn recipe_assistant() -> Self {
        Self::VISION
            .union(Self::JSON_MODE)
            .union(Self::SEARCH_GROUNDING)
    }

    /// Check if image input is supported
    #[must_use]
    pub const fn supports_vision(&self) -> bool {
        self.contains(Self::VISION)
    }

    /// Check if schema-constrained JSON output is supported
    #[must_use]
    pub const fn supports_json_mode(&self) -> bool {
        self.contains(Self::JSON_MODE)
    }

    /// Check if web search grounding is supported
    #[must_use]
    pub const fn supports_search_grounding(&self) -> bool {
        self.contains(Self::SEARCH_GROUNDING)
    }

    /// Check if image generation is supported
    #[must_use]
    pub const fn supports_image_output(&self) -> bool {
        self.contains(Self::IMAGE_OUTPUT)
    }
}

// ============================================================================
// Content Types
// ============================================================================

/// Base64-encoded image with its MIME type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineImage {
    /// MIME type, e.g. `image/jpeg`
    pub mime_type: String,
    /// Standard base64 payload without a data-URL prefix
    pub data: String,
}

impl InlineImage {
    /// Encode raw image bytes
    #[must_use]
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: STANDARD.encode(bytes),
        }
    }

    /// Parse a `data:{mime};base64,{payload}` URL
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the URL is not a base64 data URL.
    pub fn from_data_url(data_url: &str) -> AppResult<Self> {
        let rest = data_url
            .strip_prefix("data:")
            .ok_or_else(|| AppError::invalid_input("Image is not a data URL"))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| AppError::invalid_input("Data URL has no payload"))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| AppError::invalid_input("Data URL is not base64 encoded"))?;
        if payload.is_empty() {
            return Err(AppError::invalid_input("Data URL has no payload"));
        }
        Ok(Self {
            mime_type: mime_type.to_owned(),
            data: payload.to_owned(),
        })
    }

    /// Render as a displayable `data:` URL
    #[must_use]
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// One part of a request's content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    /// Plain text
    Text(String),
    /// Inline image
    Image(InlineImage),
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// A single-turn generation request
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    /// Content parts in order
    pub parts: Vec<ContentPart>,
    /// Model identifier override
    pub model: Option<String>,
    /// JSON schema the output must satisfy (implies JSON output)
    pub response_schema: Option<serde_json::Value>,
    /// Ask the provider to ground the answer with web search
    pub web_search: bool,
    /// Ask the provider to return an image
    pub image_output: bool,
    /// Sampling temperature
    pub temperature: Option<f32>,
}

impl GenerateRequest {
    /// Create a request from content parts
    #[must_use]
    pub fn new(parts: Vec<ContentPart>) -> Self {
        Self {
            parts,
            ..Self::default()
        }
    }

    /// Create a text-only request
    #[must_use]
    pub fn text(prompt: impl Into<String>) -> Self {
        Self::new(vec![ContentPart::Text(prompt.into())])
    }

    /// Create an image-plus-instruction request
    #[must_use]
    pub fn with_image(image: InlineImage, prompt: impl Into<String>) -> Self {
        Self::new(vec![ContentPart::Image(image), ContentPart::Text(prompt.into())])
    }

    /// Set the model to use
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Constrain output to JSON matching `schema`
    #[must_use]
    pub fn with_json_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    /// Enable web search grounding
    #[must_use]
    pub const fn with_web_search(mut self) -> Self {
        self.web_search = true;
        self
    }

    /// Request image output
    #[must_use]
    pub const fn with_image_output(mut self) -> Self {
        self.image_output = true;
        self
    }

    /// Set the temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Concatenated text parts, for logging and test assertions
    #[must_use]
    pub fn prompt_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                ContentPart::Text(text) => Some(text.as_str()),
                ContentPart::Image(_) => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether any part is an image
    #[must_use]
    pub fn has_image(&self) -> bool {
        self.parts
            .iter()
            .any(|part| matches!(part, ContentPart::Image(_)))
    }
}

/// A web page the model used to ground its answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSource {
    /// Page URI
    pub uri: String,
    /// Page title, empty when the provider gives none
    pub title: String,
}

/// Token usage statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: u32,
    /// Number of tokens in the completion
    pub completion_tokens: u32,
    /// Total tokens used
    pub total_tokens: u32,
}

/// Response from a generation call
#[derive(Debug, Clone, Default)]
pub struct GenerateResponse {
    /// Concatenated text output
    pub text: Option<String>,
    /// Inline images in output order
    pub images: Vec<InlineImage>,
    /// Grounding sources in the order reported
    pub sources: Vec<WebSource>,
    /// Model used for generation
    pub model: String,
    /// Token usage statistics
    pub usage: Option<TokenUsage>,
    /// Finish reason (STOP, MAX_TOKENS, ...)
    pub finish_reason: Option<String>,
}

impl GenerateResponse {
    /// Create a text response
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Text output, or an error if the model produced none
    ///
    /// # Errors
    ///
    /// Returns `ExternalServiceError` when the response has no text.
    pub fn require_text(&self) -> AppResult<&str> {
        self.text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| AppError::external_service("LLM", "Response contained no text"))
    }

    /// First generated image, if any
    #[must_use]
    pub fn first_image(&self) -> Option<&InlineImage> {
        self.images.first()
    }
}

// ============================================================================
// Provider Trait
// ============================================================================

/// Generative model provider
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Unique provider identifier (e.g., "gemini")
    fn name(&self) -> &'static str;

    /// Human-readable display name for the provider
    fn display_name(&self) -> &'static str;

    /// Provider capabilities
    fn capabilities(&self) -> LlmCapabilities;

    /// Model used when a request does not name one
    fn default_model(&self) -> &str;

    /// Perform a generation call
    async fn generate(&self, request: &GenerateRequest) -> AppResult<GenerateResponse>;

    /// Check if the provider is reachable and the API key is valid
    async fn health_check(&self) -> AppResult<bool>;
}
