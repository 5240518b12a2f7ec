// ABOUTME: Image backends behind the request queue: keyword search URLs and generative images
// ABOUTME: Both turn an English image prompt into a displayable image source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, instrument};

use crate::constants::{image_queue, service_names};
use crate::errors::{AppError, AppResult};
use crate::llm::{prompts, GenerateRequest, LlmProvider};

/// Photo-jargon phrases that make poor search keywords
const JARGON_PATTERN: &str =
    r"photorealistic|food photography|close-up shot|dynamic shot of|a plate of|a bowl of|delicious|a dish of";
const STOP_WORD_PATTERN: &str = r"\b(and|with|on|of|a|the|in|for)\b";
const NON_KEYWORD_PATTERN: &str = r"[^a-z0-9\s]";

/// Something that turns an image prompt into an image source
///
/// The returned string is either an `https://` URL or a `data:` URI.
#[async_trait]
pub trait ImageBackend: Send + Sync {
    /// Short identifier for logs
    fn name(&self) -> &'static str;

    /// Pause the queue takes after each request to this backend
    fn default_delay(&self) -> Duration;

    /// Produce an image source for `prompt`
    async fn generate(&self, prompt: &str) -> AppResult<String>;
}

/// Builds keyword image-search URLs locally; never calls a model
#[derive(Debug, Clone)]
pub struct KeywordImageBackend {
    jargon: Regex,
    stop_words: Regex,
    non_keyword: Regex,
}

impl KeywordImageBackend {
    /// Compile the keyword cleanup patterns
    ///
    /// # Errors
    ///
    /// Returns an internal error if a pattern fails to compile.
    pub fn new() -> AppResult<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern)
                .map_err(|e| AppError::internal(format!("Invalid keyword pattern: {e}")))
        };
        Ok(Self {
            jargon: compile(JARGON_PATTERN)?,
            stop_words: compile(STOP_WORD_PATTERN)?,
            non_keyword: compile(NON_KEYWORD_PATTERN)?,
        })
    }

    /// Comma-separated search keywords for a prompt
    ///
    /// Lowercases, drops jargon, stop words, and punctuation, then keeps the
    /// first four words. Falls back to generic food keywords when nothing is
    /// left.
    #[must_use]
    pub fn keywords_for_prompt(&self, prompt: &str) -> String {
        let lowered = prompt.to_lowercase();
        let without_jargon = self.jargon.replace_all(&lowered, "");
        let without_stop_words = self.stop_words.replace_all(&without_jargon, "");
        let cleaned = self.non_keyword.replace_all(&without_stop_words, "");

        let keywords: Vec<&str> = cleaned
            .split_whitespace()
            .take(image_queue::MAX_KEYWORDS)
            .collect();
        if keywords.is_empty() {
            image_queue::FALLBACK_KEYWORDS.to_owned()
        } else {
            keywords.join(",")
        }
    }

    /// Search URL for a prompt with a fresh cache-busting signature
    #[must_use]
    pub fn url_for_prompt(&self, prompt: &str) -> String {
        let keywords = self.keywords_for_prompt(prompt);
        let signature: f64 = rand::random();
        format!(
            "{}?{}&sig={signature}",
            image_queue::KEYWORD_IMAGE_BASE_URL,
            urlencoding::encode(&keywords)
        )
    }
}

#[async_trait]
impl ImageBackend for KeywordImageBackend {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn default_delay(&self) -> Duration {
        Duration::from_millis(image_queue::KEYWORD_DELAY_MS)
    }

    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let url = self.url_for_prompt(prompt);
        debug!(%url, "Built keyword image URL");
        Ok(url)
    }
}

/// Generates images with an image-capable model and returns `data:` URIs
#[derive(Clone)]
pub struct GenerativeImageBackend {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl GenerativeImageBackend {
    /// Create a backend that calls `model` through `provider`
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }
}

#[async_trait]
impl ImageBackend for GenerativeImageBackend {
    fn name(&self) -> &'static str {
        "generative"
    }

    fn default_delay(&self) -> Duration {
        Duration::from_millis(image_queue::GENERATIVE_DELAY_MS)
    }

    #[instrument(skip(self), fields(model = %self.model))]
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let request = GenerateRequest::text(prompts::recipe_image(prompt))
            .with_model(self.model.clone())
            .with_image_output();
        let response = self.provider.generate(&request).await?;
        response
            .first_image()
            .map(crate::llm::InlineImage::to_data_url)
            .ok_or_else(|| {
                AppError::external_service(
                    service_names::GEMINI_API,
                    "Image model returned no image",
                )
            })
    }
}
