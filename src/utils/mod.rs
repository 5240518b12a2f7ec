// ABOUTME: Utility modules shared across the assistant
// ABOUTME: Currently HTTP client construction for the generative backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors

/// HTTP client configuration and helpers
pub mod http_client;
