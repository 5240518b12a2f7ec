// ABOUTME: Integration tests for the recipe assistant session
// ABOUTME: Covers search, photo analysis, image resolution, language switching, and recipe edits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors
#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use anyhow::Result;
use common::{recipes_json, sample_recipe, test_session, RecordingImageBackend};
use cookly::errors::{AppError, ErrorCode};
use cookly::i18n::Language;
use cookly::llm::InlineImage;
use cookly::models::DietaryFilter;
use cookly::speech::Voice;
use serde_json::json;

fn photo() -> InlineImage {
    InlineImage::from_bytes(b"not really a jpeg", "image/jpeg")
}

// ============================================================================
// Ingredient Search
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_search_rejects_invalid_ingredients() -> Result<()> {
    let mut session = test_session();
    session.assistant.add_ingredient("eggs");
    session.assistant.add_ingredient("rocks");
    session.assistant.add_ingredient("glue");
    session
        .provider
        .push_json(&json!({ "isValid": false, "invalidItems": ["rocks", "glue"] }));

    let error = session.assistant.search().await.unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidIngredients);
    assert_eq!(
        session.assistant.last_error(),
        Some("Some items don't look like ingredients: rocks, glue")
    );
    assert!(session.assistant.suggestions().is_empty());
    assert_eq!(session.provider.request_count(), 1, "recipes must not be requested");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_search_returns_recipes_then_resolves_images() -> Result<()> {
    let mut session = test_session();
    session.assistant.add_ingredient("eggs");
    session.assistant.add_ingredient("feta");
    session
        .provider
        .push_json(&json!({ "isValid": true, "invalidItems": [] }));
    session.provider.push_json(&recipes_json(&[
        sample_recipe("Shakshuka"),
        sample_recipe("Frittata"),
    ]));

    let names: Vec<String> = session
        .assistant
        .search()
        .await?
        .iter()
        .map(|r| r.name.clone())
        .collect();
    assert_eq!(names, vec!["Shakshuka", "Frittata"]);
    assert!(session.assistant.suggestions().iter().all(|r| r.image_url.is_none()));
    assert_eq!(session.assistant.pending_image_count(), 2);

    let applied = session.assistant.resolve_images().await;
    assert_eq!(applied, 2);
    assert_eq!(session.assistant.pending_image_count(), 0);
    assert_eq!(
        session.backend.prompts(),
        vec!["Shakshuka on a plate", "Frittata on a plate"]
    );
    let first = &session.assistant.suggestions()[0];
    assert_eq!(
        first.image_url.as_deref(),
        Some(RecordingImageBackend::url_for("Shakshuka on a plate").as_str())
    );
    assert!(session.assistant.last_error().is_none());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_search_with_no_ingredients_does_nothing() -> Result<()> {
    let mut session = test_session();
    assert!(session.assistant.search().await?.is_empty());
    assert_eq!(session.provider.request_count(), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_recipe_request_failure_sets_generic_message() -> Result<()> {
    let mut session = test_session();
    session.assistant.add_ingredient("eggs");
    session
        .provider
        .push_json(&json!({ "isValid": true, "invalidItems": [] }));
    session
        .provider
        .push_error(AppError::external_service("Gemini API", "boom"));

    assert!(session.assistant.search().await.is_err());
    assert_eq!(
        session.assistant.last_error(),
        Some(Language::En.messages().error_fetch)
    );
    assert!(session.assistant.suggestions().is_empty());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_filters_and_cuisines_reach_the_prompt() -> Result<()> {
    let mut session = test_session();
    session.assistant.add_ingredient("tofu");
    assert!(session.assistant.toggle_filter(DietaryFilter::Vegan));
    assert!(session.assistant.toggle_cuisine("Thai"));
    session.provider.push_json(&recipes_json(&[]));

    session.assistant.fetch_recipes().await?;
    let prompt = session.provider.prompt(0);
    assert!(prompt.contains("dietary restrictions: Vegan."));
    assert!(prompt.contains("cuisines: \"Thai\""));

    assert!(!session.assistant.toggle_filter(DietaryFilter::Vegan));
    session.assistant.clear_filters();
    assert!(session.assistant.filters().is_empty());
    assert!(session.assistant.cuisines().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_ingredient_edits_clear_suggestions() {
    let mut session = test_session();
    assert!(session.assistant.add_ingredient("  basil "));
    assert!(!session.assistant.add_ingredient("basil"));
    assert!(!session.assistant.add_ingredient("   "));
    assert_eq!(session.assistant.ingredients(), ["basil"]);

    assert!(session.assistant.remove_ingredient("basil"));
    assert!(!session.assistant.remove_ingredient("basil"));
    assert!(session.assistant.suggestions().is_empty());
}

// ============================================================================
// Photo Analysis
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_analyze_rejects_non_food_with_reason() -> Result<()> {
    let mut session = test_session();
    session.assistant.load_image(photo());
    session
        .provider
        .push_json(&json!({ "isFood": false, "reason": "This looks like a cat." }));

    let error = session.assistant.analyze_fridge().await.unwrap_err();
    assert_eq!(error.code, ErrorCode::NotFood);
    assert_eq!(session.assistant.last_error(), Some("This looks like a cat."));
    assert_eq!(session.provider.request_count(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_analyze_non_food_without_reason_uses_default_message() -> Result<()> {
    let mut session = test_session();
    session.assistant.load_image(photo());
    session
        .provider
        .push_json(&json!({ "isFood": false, "reason": "" }));

    assert!(session.assistant.analyze_fridge().await.is_err());
    assert_eq!(
        session.assistant.last_error(),
        Some(Language::En.messages().error_image_validation)
    );
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_analyze_merges_ingredients_without_duplicates() -> Result<()> {
    let mut session = test_session();
    session.assistant.add_ingredient("eggs");
    session.assistant.load_image(photo());
    session
        .provider
        .push_json(&json!({ "isFood": true, "reason": "" }));
    session
        .provider
        .push_json(&json!({ "ingredients": ["eggs", "milk", " ", "spinach"] }));
    session
        .provider
        .push_json(&recipes_json(&[sample_recipe("Quiche")]));

    let count = session.assistant.analyze_fridge().await?.len();
    assert_eq!(count, 1);
    assert_eq!(session.assistant.ingredients(), ["eggs", "milk", "spinach"]);

    let requests = session.provider.requests();
    assert!(requests[0].has_image());
    assert!(requests[1].has_image());
    assert!(!requests[2].has_image());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_analyze_failure_sets_analyze_message() -> Result<()> {
    let mut session = test_session();
    session.assistant.load_image(photo());
    session
        .provider
        .push_error(AppError::external_service("Gemini API", "unavailable"));

    assert!(session.assistant.analyze_fridge().await.is_err());
    assert_eq!(
        session.assistant.last_error(),
        Some(Language::En.messages().error_analyze)
    );
    Ok(())
}

#[tokio::test]
async fn test_analyze_without_photo_is_invalid_input() {
    let mut session = test_session();
    let error = session.assistant.analyze_fridge().await.unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
    assert_eq!(session.provider.request_count(), 0);
}

// ============================================================================
// Language Switching
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_language_switch_translates_suggestions_and_keeps_images() -> Result<()> {
    let mut session = test_session();
    session.assistant.add_ingredient("eggs");
    session.provider.push_json(&recipes_json(&[sample_recipe("Omelette")]));
    session.assistant.fetch_recipes().await?;
    session.assistant.resolve_images().await;

    let mut translated = sample_recipe("Tortilla francesa");
    translated.description = "Una tortilla rápida".to_owned();
    session.provider.push_json(&recipes_json(&[translated]));

    let language = session.assistant.set_language("es").await?;
    assert_eq!(language, Language::Es);
    assert_eq!(session.persistence.load_language().as_deref(), Some("es"));

    let recipe = &session.assistant.suggestions()[0];
    assert_eq!(recipe.name, "Tortilla francesa");
    assert_eq!(
        recipe.image_url.as_deref(),
        Some(RecordingImageBackend::url_for("Omelette on a plate").as_str())
    );

    let sent = session.provider.prompt(1);
    assert!(!sent.contains("images.test"), "image URLs must not be sent for translation");
    Ok(())
}

#[tokio::test]
async fn test_language_switch_to_same_language_skips_translation() -> Result<()> {
    let mut session = test_session();
    session.assistant.select_recipe(sample_recipe("Omelette"));
    session.assistant.set_language("en").await?;
    assert_eq!(session.provider.request_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_language_switch_failure_reports_in_new_language() {
    let mut session = test_session();
    session.assistant.select_recipe(sample_recipe("Omelette"));
    session
        .provider
        .push_error(AppError::external_service("Gemini API", "boom"));

    assert!(session.assistant.set_language("fr").await.is_err());
    assert_eq!(session.assistant.language(), Language::Fr);
    assert_eq!(
        session.assistant.last_error(),
        Some(Language::Fr.messages().error_fetch)
    );
    assert_eq!(session.assistant.selected_recipe().unwrap().name, "Omelette");
}

#[tokio::test]
async fn test_unknown_language_falls_back_to_english() -> Result<()> {
    let mut session = test_session();
    let language = session.assistant.set_language("xx").await?;
    assert_eq!(language, Language::En);
    Ok(())
}

#[test]
fn test_preferred_voice_follows_language() {
    let session = test_session();
    let voices = vec![
        Voice::new("Daniel", "en-GB"),
        Voice::new("Samantha Female", "en"),
        Voice::new("Monica", "es-ES"),
    ];
    let voice = session.assistant.preferred_voice(&voices).unwrap();
    assert_eq!(voice.name, "Samantha Female");
}

// ============================================================================
// Recipe Edits and Step Images
// ============================================================================

#[tokio::test]
async fn test_edits_propagate_to_favorites() -> Result<()> {
    let mut session = test_session();
    let recipe = sample_recipe("Frittata");
    session.assistant.toggle_favorite(&recipe);
    session.assistant.select_recipe(recipe);

    session.assistant.edit_recipe_times("Frittata", 20, None)?;
    session
        .assistant
        .edit_ingredient_amount("Frittata", "feta", "150 g")?;

    let saved = &session.persistence.load_favorites()[0];
    assert_eq!(saved.prep_time, 20);
    assert_eq!(saved.active_cooking_time, None);
    assert_eq!(saved.ingredients[1].amount, "150 g");

    let selected = session.assistant.selected_recipe().unwrap();
    assert_eq!(selected.prep_time, 20);
    Ok(())
}

#[tokio::test]
async fn test_blank_amount_is_rejected() {
    let mut session = test_session();
    session.assistant.select_recipe(sample_recipe("Frittata"));
    let error = session
        .assistant
        .edit_ingredient_amount("Frittata", "feta", "  ")
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
    let error = session
        .assistant
        .edit_ingredient_amount("Frittata", "saffron", "1 pinch")
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
}

#[tokio::test(start_paused = true)]
async fn test_step_image_is_generated_once() -> Result<()> {
    let mut session = test_session();
    session.assistant.select_recipe(sample_recipe("Frittata"));

    let url = session.assistant.step_image("Frittata", 0).await?;
    assert_eq!(
        url.as_deref(),
        Some(RecordingImageBackend::url_for("whisking eggs for Frittata").as_str())
    );
    let again = session.assistant.step_image("Frittata", 0).await?;
    assert_eq!(again, url);
    assert_eq!(session.backend.prompts().len(), 1);

    let selected = session.assistant.selected_recipe().unwrap();
    assert_eq!(selected.steps[0].image_url, url);

    assert_eq!(session.assistant.step_image("Frittata", 1).await?, None);
    let error = session.assistant.step_image("Frittata", 9).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
    Ok(())
}

// ============================================================================
// Ingredient Info
// ============================================================================

#[tokio::test]
async fn test_ingredient_info_dedupes_sources() -> Result<()> {
    let session = test_session();
    session.provider.push_grounded(
        "Sumac is a tangy spice.",
        &[
            ("https://a.test/sumac", "Sumac"),
            ("https://b.test/spice", "Spices"),
            ("https://a.test/sumac", "Sumac guide"),
        ],
    );

    let info = session.assistant.ingredient_info("sumac").await?;
    assert_eq!(info.text, "Sumac is a tangy spice.");
    assert_eq!(info.sources.len(), 2);
    assert_eq!(info.sources[0].title, "Sumac guide");
    assert!(session.provider.requests()[0].web_search);
    assert!(session.assistant.last_error().is_none());
    Ok(())
}
