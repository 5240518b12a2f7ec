// ABOUTME: Integration tests for environment configuration loading
// ABOUTME: Covers defaults, overrides, validation errors, and key redaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors
#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use cookly::config::environment::{
    DATA_DIR, GEMINI_API_KEY, HTTP_TIMEOUT_SECS, IMAGE_BACKEND, IMAGE_DELAY_MS, IMAGE_MODEL, LANG,
    SHARE_BASE_URL, TEXT_MODEL,
};
use cookly::config::{AssistantConfig, ImageBackendKind};
use cookly::errors::ErrorCode;
use serial_test::serial;

const ALL_VARS: [&str; 9] = [
    GEMINI_API_KEY,
    TEXT_MODEL,
    IMAGE_MODEL,
    IMAGE_BACKEND,
    IMAGE_DELAY_MS,
    DATA_DIR,
    LANG,
    SHARE_BASE_URL,
    HTTP_TIMEOUT_SECS,
];

fn clear_env() {
    for var in ALL_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults() -> Result<()> {
    clear_env();
    let config = AssistantConfig::from_env()?;

    assert_eq!(config.api_key, None);
    assert_eq!(config.text_model, "gemini-2.5-flash");
    assert_eq!(config.image_backend, ImageBackendKind::Keyword);
    assert_eq!(config.image_delay, Duration::from_millis(2_000));
    assert_eq!(config.initial_language, None);
    assert_eq!(config.share_base_url.as_str(), "https://cookly.app/");
    assert_eq!(config.http_timeout, Duration::from_secs(60));
    assert!(config.data_dir.ends_with("cookly"));

    let error = config.require_api_key().unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigMissing);
    assert!(error.message.contains(GEMINI_API_KEY));
    Ok(())
}

#[test]
#[serial]
fn test_overrides() -> Result<()> {
    clear_env();
    env::set_var(GEMINI_API_KEY, "secret-key");
    env::set_var(IMAGE_BACKEND, "generative");
    env::set_var(IMAGE_MODEL, "image-model-x");
    env::set_var(DATA_DIR, "/tmp/cookly-test-data");
    env::set_var(LANG, "de");
    env::set_var(SHARE_BASE_URL, "https://recipes.example.org/app/");
    env::set_var(HTTP_TIMEOUT_SECS, "15");

    let config = AssistantConfig::from_env()?;
    clear_env();

    assert_eq!(config.require_api_key()?, "secret-key");
    assert_eq!(config.image_backend, ImageBackendKind::Generative);
    assert_eq!(config.image_delay, Duration::from_millis(5_000));
    assert_eq!(config.image_model, "image-model-x");
    assert_eq!(config.data_dir, PathBuf::from("/tmp/cookly-test-data"));
    assert_eq!(config.initial_language.as_deref(), Some("de"));
    assert_eq!(config.share_base_url.path(), "/app/");
    assert_eq!(config.http_timeout, Duration::from_secs(15));
    Ok(())
}

#[test]
#[serial]
fn test_explicit_delay_wins_over_backend_default() -> Result<()> {
    clear_env();
    env::set_var(IMAGE_BACKEND, "unsplash");
    env::set_var(IMAGE_DELAY_MS, "250");

    let config = AssistantConfig::from_env()?;
    clear_env();

    assert_eq!(config.image_backend, ImageBackendKind::Keyword);
    assert_eq!(config.image_delay, Duration::from_millis(250));
    Ok(())
}

#[test]
#[serial]
fn test_blank_values_are_treated_as_unset() -> Result<()> {
    clear_env();
    env::set_var(GEMINI_API_KEY, "   ");
    env::set_var(TEXT_MODEL, "");

    let config = AssistantConfig::from_env()?;
    clear_env();

    assert_eq!(config.api_key, None);
    assert_eq!(config.text_model, "gemini-2.5-flash");
    Ok(())
}

#[test]
#[serial]
fn test_invalid_values_are_config_errors() {
    clear_env();

    env::set_var(IMAGE_BACKEND, "watercolor");
    let error = AssistantConfig::from_env().unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigError);
    env::remove_var(IMAGE_BACKEND);

    env::set_var(IMAGE_DELAY_MS, "soon");
    let error = AssistantConfig::from_env().unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigError);
    assert!(error.message.contains(IMAGE_DELAY_MS));
    env::remove_var(IMAGE_DELAY_MS);

    env::set_var(SHARE_BASE_URL, "not a url");
    let error = AssistantConfig::from_env().unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigError);

    clear_env();
}

#[test]
#[serial]
fn test_debug_output_redacts_api_key() -> Result<()> {
    clear_env();
    env::set_var(GEMINI_API_KEY, "super-secret");
    let config = AssistantConfig::from_env()?;
    clear_env();

    let rendered = format!("{config:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("[REDACTED]"));
    Ok(())
}
