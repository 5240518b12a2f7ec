// ABOUTME: HTTP client construction with connection pooling and timeout configuration
// ABOUTME: One pooled client serves every generative backend call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors

use reqwest::{Client, ClientBuilder};
use std::sync::OnceLock;
use std::time::Duration;

/// Request timeout for model calls; recipe generation can take tens of seconds
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 60;

/// Connection timeout shared by every client
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

static API_CLIENT: OnceLock<Client> = OnceLock::new();

fn user_agent() -> String {
    format!("cookly/{}", env!("CARGO_PKG_VERSION"))
}

/// Create a new HTTP client with custom timeout settings
///
/// Falls back to a default `Client` if the builder rejects the settings.
#[must_use]
pub fn create_client_with_timeout(timeout_secs: u64, connect_timeout_secs: u64) -> Client {
    ClientBuilder::new()
        .user_agent(user_agent())
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Shared client for generative API calls
///
/// Cloning a `reqwest::Client` is cheap and shares the connection pool.
#[must_use]
pub fn api_client() -> Client {
    API_CLIENT
        .get_or_init(|| {
            create_client_with_timeout(DEFAULT_API_TIMEOUT_SECS, DEFAULT_CONNECT_TIMEOUT_SECS)
        })
        .clone()
}
