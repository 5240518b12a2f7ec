// ABOUTME: Configuration module for the recipe assistant
// ABOUTME: Environment-only settings: API key, models, image backend, storage, share links
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors

//! Configuration for Cookly.
//!
//! All settings come from environment variables; there is no config file.

/// Environment-based assistant configuration
pub mod environment;

pub use environment::{AssistantConfig, ImageBackendKind};
