// ABOUTME: Integration tests for recipe share links through the assistant session
// ABOUTME: Covers share payloads, opening links, parameter cleanup, and invalid links
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors
#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use anyhow::Result;
use common::{sample_recipe, test_session};
use cookly::errors::ErrorCode;
use cookly::share::{self, INVALID_LINK_MESSAGE};
use url::Url;

#[test]
fn test_share_then_open_restores_recipe_without_images() -> Result<()> {
    let mut sender = test_session();
    let mut recipe = sample_recipe("Spanakopita");
    recipe.image_url = Some("data:image/png;base64,AAAA".to_owned());
    recipe.steps[0].image_url = Some("https://images.test/step".to_owned());

    let content = sender.assistant.share_recipe(&recipe)?;
    assert_eq!(content.title, "Check out this recipe: Spanakopita");
    assert_eq!(content.text, "A quick Spanakopita");
    assert!(content.url.starts_with("https://cookly.test/?recipe="));
    assert!(!content.url.contains("AAAA"));

    let mut receiver = test_session();
    let cleaned = receiver.assistant.open_shared_link(&content.url)?.unwrap();
    assert_eq!(cleaned.as_str(), "https://cookly.test/");

    let opened = receiver.assistant.selected_recipe().unwrap();
    assert_eq!(*opened, recipe.without_images());
    Ok(())
}

#[test]
fn test_share_title_follows_language_prefix() -> Result<()> {
    let recipe = sample_recipe("Paella");
    let content = share::share_content(&common::share_base(), &recipe, "Mira esta receta: ")?;
    assert_eq!(content.title, "Mira esta receta: Paella");
    Ok(())
}

#[test]
fn test_open_keeps_other_query_parameters() -> Result<()> {
    let recipe = sample_recipe("Moussaka");
    let mut link = share::build_share_url(&common::share_base(), &recipe)?;
    link.query_pairs_mut().append_pair("utm_source", "chat");

    let mut session = test_session();
    let cleaned = session.assistant.open_shared_link(link.as_str())?.unwrap();
    assert_eq!(cleaned.as_str(), "https://cookly.test/?utm_source=chat");
    Ok(())
}

#[test]
fn test_link_without_recipe_is_ignored() -> Result<()> {
    let mut session = test_session();
    let result = session
        .assistant
        .open_shared_link("https://cookly.test/?lang=es")?;
    assert_eq!(result, None);
    assert!(session.assistant.selected_recipe().is_none());
    assert!(session.assistant.last_error().is_none());
    Ok(())
}

#[test]
fn test_corrupted_link_reports_invalid_link() {
    let mut session = test_session();
    let error = session
        .assistant
        .open_shared_link("https://cookly.test/?recipe=%%%not-base64")
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidShareLink);
    assert_eq!(session.assistant.last_error(), Some(INVALID_LINK_MESSAGE));
    assert!(session.assistant.selected_recipe().is_none());
}

#[test]
fn test_unparseable_url_reports_invalid_link() {
    let mut session = test_session();
    let error = session.assistant.open_shared_link("not a url").unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidShareLink);
    assert_eq!(session.assistant.last_error(), Some(INVALID_LINK_MESSAGE));
}

#[test]
fn test_pasted_link_with_spaces_still_decodes() -> Result<()> {
    let recipe = sample_recipe("Tzatziki");
    let payload = share::encode_recipe(&recipe)?;
    let decoded = share::decode_recipe(&payload.replace('+', " "))?;
    assert_eq!(decoded.name, "Tzatziki");

    let base = Url::parse("https://cookly.test/app?old=1#top")?;
    let link = share::build_share_url(&base, &recipe)?;
    assert_eq!(link.fragment(), None);
    assert!(link.query().unwrap().starts_with("recipe="));
    Ok(())
}
