// ABOUTME: Share links that carry a whole recipe in a base64 query parameter
// ABOUTME: Builds links without image data and decodes incoming links back into recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors

//! # Share Links
//!
//! A shared link is `{origin}{path}?recipe={payload}` where the payload is the
//! recipe's JSON (without any image URLs), UTF-8 encoded, then standard
//! base64. Nothing is stored server-side; the link is the recipe.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::constants::share::RECIPE_PARAM;
use crate::errors::{AppError, AppResult};
use crate::models::Recipe;

/// Message shown for links that cannot be decoded
pub const INVALID_LINK_MESSAGE: &str = "The shared recipe link is invalid or corrupted.";

/// Payload handed to a platform share sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareContent {
    /// Localized prefix followed by the recipe name
    pub title: String,
    /// Recipe description
    pub text: String,
    /// Share link
    pub url: String,
}

/// Encode a recipe, minus images, as a share payload
///
/// # Errors
///
/// Returns `SerializationError` if the recipe cannot be serialized.
pub fn encode_recipe(recipe: &Recipe) -> AppResult<String> {
    let json = serde_json::to_string(&recipe.without_images())?;
    Ok(STANDARD.encode(json.as_bytes()))
}

/// Decode a share payload back into a recipe
///
/// Spaces are read as `+`, which form decoding produces when a link was
/// pasted without percent-encoding.
///
/// # Errors
///
/// Returns `InvalidShareLink` for bad base64, bad UTF-8, or bad JSON.
pub fn decode_recipe(payload: &str) -> AppResult<Recipe> {
    let normalized = payload.trim().replace(' ', "+");
    let bytes = STANDARD
        .decode(normalized.as_bytes())
        .map_err(|e| AppError::invalid_share_link(INVALID_LINK_MESSAGE).with_source(e))?;
    let json = String::from_utf8(bytes)
        .map_err(|e| AppError::invalid_share_link(INVALID_LINK_MESSAGE).with_source(e))?;
    serde_json::from_str(&json)
        .map_err(|e| AppError::invalid_share_link(INVALID_LINK_MESSAGE).with_source(e))
}

/// Share link for `recipe` rooted at `base`
///
/// Any query or fragment already on `base` is dropped.
///
/// # Errors
///
/// Returns `SerializationError` if the recipe cannot be serialized.
pub fn build_share_url(base: &Url, recipe: &Recipe) -> AppResult<Url> {
    let payload = encode_recipe(recipe)?;
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.query_pairs_mut().append_pair(RECIPE_PARAM, &payload);
    debug!(recipe = %recipe.name, length = url.as_str().len(), "Built share link");
    Ok(url)
}

/// Title, text, and link for sharing `recipe`
///
/// # Errors
///
/// Returns `SerializationError` if the recipe cannot be serialized.
pub fn share_content(base: &Url, recipe: &Recipe, title_prefix: &str) -> AppResult<ShareContent> {
    let url = build_share_url(base, recipe)?;
    Ok(ShareContent {
        title: format!("{title_prefix}{}", recipe.name),
        text: recipe.description.clone(),
        url: url.into(),
    })
}

/// Extract a shared recipe from an opened URL
///
/// Returns `Ok(None)` when the URL carries no recipe. Otherwise returns the
/// recipe and the URL with the `recipe` parameter removed, so reopening the
/// cleaned URL does not show the recipe again.
///
/// # Errors
///
/// Returns `InvalidShareLink` if the parameter is present but malformed.
pub fn take_shared_recipe(url: &Url) -> AppResult<Option<(Recipe, Url)>> {
    let Some(payload) = url
        .query_pairs()
        .find(|(key, _)| key == RECIPE_PARAM)
        .map(|(_, value)| value.into_owned())
    else {
        return Ok(None);
    };

    let recipe = decode_recipe(&payload).inspect_err(|e| {
        warn!(error = %e, "Failed to parse shared recipe");
    })?;

    let remaining: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != RECIPE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let mut cleaned = url.clone();
    if remaining.is_empty() {
        cleaned.set_query(None);
    } else {
        cleaned.query_pairs_mut().clear().extend_pairs(remaining);
    }
    Ok(Some((recipe, cleaned)))
}
