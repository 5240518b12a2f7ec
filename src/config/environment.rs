// ABOUTME: Environment configuration for models, image backend, data directory, and share links
// ABOUTME: Parses COOKLY_* variables with typed defaults and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors

//! Environment-based configuration

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::constants::{image_queue, models, share};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::utils::http_client::DEFAULT_API_TIMEOUT_SECS;

/// Gemini API key
pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
/// Text/vision model override
pub const TEXT_MODEL: &str = "COOKLY_TEXT_MODEL";
/// Image model override
pub const IMAGE_MODEL: &str = "COOKLY_IMAGE_MODEL";
/// `keyword` or `generative`
pub const IMAGE_BACKEND: &str = "COOKLY_IMAGE_BACKEND";
/// Milliseconds between queued image requests
pub const IMAGE_DELAY_MS: &str = "COOKLY_IMAGE_DELAY_MS";
/// Directory for favorites, language, and shopping list
pub const DATA_DIR: &str = "COOKLY_DATA_DIR";
/// Language used when none has been stored
pub const LANG: &str = "COOKLY_LANG";
/// Origin and path that share links point at
pub const SHARE_BASE_URL: &str = "COOKLY_SHARE_BASE_URL";
/// Request timeout for model calls
pub const HTTP_TIMEOUT_SECS: &str = "COOKLY_HTTP_TIMEOUT_SECS";

/// Which image backend serves the image queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageBackendKind {
    /// Keyword search URLs built from the prompt, no API call
    #[default]
    Keyword,
    /// Images generated by the Gemini image model
    Generative,
}

impl ImageBackendKind {
    /// Delay enforced between queued requests for this backend
    #[must_use]
    pub const fn default_delay(self) -> Duration {
        match self {
            Self::Keyword => Duration::from_millis(image_queue::KEYWORD_DELAY_MS),
            Self::Generative => Duration::from_millis(image_queue::GENERATIVE_DELAY_MS),
        }
    }

    /// Configuration value
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Generative => "generative",
        }
    }
}

impl FromStr for ImageBackendKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keyword" | "unsplash" => Ok(Self::Keyword),
            "generative" | "gemini" => Ok(Self::Generative),
            other => Err(AppError::new(
                ErrorCode::ConfigError,
                format!("{IMAGE_BACKEND} must be 'keyword' or 'generative', got '{other}'"),
            )),
        }
    }
}

impl fmt::Display for ImageBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assistant configuration
#[derive(Clone)]
pub struct AssistantConfig {
    /// Gemini API key; only required once an AI call is made
    pub api_key: Option<String>,
    /// Model for analysis, validation, recipes, translation, and facts
    pub text_model: String,
    /// Model used by the generative image backend
    pub image_model: String,
    /// Image backend selection
    pub image_backend: ImageBackendKind,
    /// Delay between queued image requests
    pub image_delay: Duration,
    /// Local store directory
    pub data_dir: PathBuf,
    /// Initial language when the store holds none
    pub initial_language: Option<String>,
    /// Base URL for share links
    pub share_base_url: Url,
    /// Request timeout for model calls
    pub http_timeout: Duration,
}

impl AssistantConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set to an unparseable value.
    pub fn from_env() -> AppResult<Self> {
        let image_backend = match env_var_opt(IMAGE_BACKEND) {
            Some(value) => value.parse()?,
            None => ImageBackendKind::default(),
        };
        let image_delay = env_var_opt(IMAGE_DELAY_MS)
            .map(|v| parse_number::<u64>(IMAGE_DELAY_MS, &v))
            .transpose()?
            .map_or_else(|| image_backend.default_delay(), Duration::from_millis);
        let http_timeout = env_var_opt(HTTP_TIMEOUT_SECS)
            .map(|v| parse_number::<u64>(HTTP_TIMEOUT_SECS, &v))
            .transpose()?
            .unwrap_or(DEFAULT_API_TIMEOUT_SECS);
        let share_base = env_var_or(SHARE_BASE_URL, share::DEFAULT_BASE_URL);
        let share_base_url = Url::parse(&share_base).map_err(|e| {
            AppError::new(
                ErrorCode::ConfigError,
                format!("{SHARE_BASE_URL} is not a valid URL: {e}"),
            )
        })?;

        let config = Self {
            api_key: env_var_opt(GEMINI_API_KEY),
            text_model: env_var_or(TEXT_MODEL, models::DEFAULT_TEXT_MODEL),
            image_model: env_var_or(IMAGE_MODEL, models::DEFAULT_IMAGE_MODEL),
            image_backend,
            image_delay,
            data_dir: env_var_opt(DATA_DIR).map_or_else(default_data_dir, PathBuf::from),
            initial_language: env_var_opt(LANG),
            share_base_url,
            http_timeout: Duration::from_secs(http_timeout),
        };
        debug!(config = ?config, "Loaded assistant configuration");
        Ok(config)
    }

    /// The API key, or a `ConfigMissing` error naming the variable
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when `GEMINI_API_KEY` is unset.
    pub fn require_api_key(&self) -> AppResult<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            AppError::new(
                ErrorCode::ConfigMissing,
                format!("{GEMINI_API_KEY} environment variable not set"),
            )
        })
    }
}

impl fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssistantConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("image_backend", &self.image_backend)
            .field("image_delay", &self.image_delay)
            .field("data_dir", &self.data_dir)
            .field("initial_language", &self.initial_language)
            .field("share_base_url", &self.share_base_url.as_str())
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(crate::constants::service_names::COOKLY)
}

/// Set and non-blank environment variable
fn env_var_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env_var_opt(key).unwrap_or_else(|| default.to_owned())
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> AppResult<T> {
    value.trim().parse().map_err(|_| {
        AppError::new(
            ErrorCode::ConfigError,
            format!("{key} must be a non-negative integer, got '{value}'"),
        )
    })
}
