// ABOUTME: Unified error type and error codes for the Cookly assistant
// ABOUTME: Classifies backend, validation, storage, and share-link failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors

//! # Unified Error Handling
//!
//! Every fallible operation in Cookly returns [`AppResult`]. The [`ErrorCode`]
//! carried by an [`AppError`] tells callers which recovery path applies:
//!
//! - backend failures are shown as a generic message and the user retries
//! - validation failures carry the model's own reason and are shown verbatim
//! - storage failures are logged and otherwise ignored
//! - malformed share links are reported as invalid or corrupted

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Caller supplied malformed input
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// Data could not be parsed in the expected format
    #[serde(rename = "INVALID_FORMAT")]
    InvalidFormat = 3002,
    /// The model judged one or more declared ingredients implausible
    #[serde(rename = "INVALID_INGREDIENTS")]
    InvalidIngredients = 3100,
    /// The model judged an uploaded image not to contain food
    #[serde(rename = "NOT_FOOD")]
    NotFood = 3101,
    /// A shared recipe link could not be decoded
    #[serde(rename = "INVALID_SHARE_LINK")]
    InvalidShareLink = 3102,

    // Resource Management (4000-4999)
    /// Requested resource does not exist
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,

    // External Services (5000-5999)
    /// The generative backend returned an error or unusable output
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    /// The generative backend could not be reached
    #[serde(rename = "EXTERNAL_SERVICE_UNAVAILABLE")]
    ExternalServiceUnavailable = 5001,
    /// The generative backend rejected the request quota
    #[serde(rename = "EXTERNAL_RATE_LIMITED")]
    ExternalRateLimited = 5003,

    // Configuration (6000-6999)
    /// Configuration could not be loaded
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,
    /// Required configuration is missing
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 6001,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Local key-value store failure
    #[serde(rename = "STORAGE_ERROR")]
    StorageError = 9002,
    /// JSON encoding or decoding failure
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::InvalidFormat => "The data format is invalid",
            Self::InvalidIngredients => "Some ingredients are not recognized as food",
            Self::NotFood => "The image does not contain recognizable food",
            Self::InvalidShareLink => "The shared recipe link is invalid or corrupted",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::ExternalServiceUnavailable => "An external service is currently unavailable",
            Self::ExternalRateLimited => "External service rate limit exceeded",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigMissing => "Required configuration is missing",
            Self::InternalError => "An internal error occurred",
            Self::StorageError => "Storage operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether this error came from the generative backend
    #[must_use]
    pub const fn is_backend(&self) -> bool {
        matches!(
            self,
            Self::ExternalServiceError
                | Self::ExternalServiceUnavailable
                | Self::ExternalRateLimited
        )
    }

    /// Whether this error is a model-judged validation rejection
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidIngredients | Self::NotFood)
    }

    /// Whether this error came from the local store
    #[must_use]
    pub const fn is_storage(&self) -> bool {
        matches!(self, Self::StorageError | Self::SerializationError)
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional structured details
    pub details: serde_json::Value,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: serde_json::Value::Null,
            source: None,
        }
    }

    /// Attach structured details
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Resource not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// External service error
    #[must_use]
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// Local store error
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Ingredient list rejected by the model; `invalid_items` are kept in details
    #[must_use]
    pub fn invalid_ingredients(invalid_items: &[String]) -> Self {
        Self::new(ErrorCode::InvalidIngredients, invalid_items.join(", "))
            .with_details(serde_json::json!({ "invalid_items": invalid_items }))
    }

    /// Image rejected by the model as not containing food
    #[must_use]
    pub fn not_food(reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFood, reason)
    }

    /// Shared recipe link could not be decoded
    #[must_use]
    pub fn invalid_share_link(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidShareLink, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::storage(error.to_string()).with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_classification() {
        assert!(ErrorCode::ExternalRateLimited.is_backend());
        assert!(ErrorCode::NotFood.is_validation());
        assert!(ErrorCode::SerializationError.is_storage());
        assert!(!ErrorCode::InvalidShareLink.is_backend());
    }

    #[test]
    fn test_invalid_ingredients_keeps_items() {
        let items = vec!["chair".to_owned(), "asdf".to_owned()];
        let error = AppError::invalid_ingredients(&items);
        assert_eq!(error.code, ErrorCode::InvalidIngredients);
        assert_eq!(error.message, "chair, asdf");
        assert_eq!(error.details["invalid_items"][1], "asdf");
    }

    #[test]
    fn test_serde_error_converts_to_serialization_code() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json");
        let error = AppError::from(parse.unwrap_err());
        assert_eq!(error.code, ErrorCode::SerializationError);
        assert!(error.to_string().starts_with("Data serialization"));
    }
}
