// ABOUTME: Recipe commands for the cookly CLI
// ABOUTME: Handles photo analysis, ingredient search, and ingredient lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors

use std::path::Path;

use anyhow::{Context, Result};
use cookly::assistant::RecipeAssistant;
use cookly::constants::models::DEFAULT_IMAGE_MIME;
use cookly::models::{DietaryFilter, Recipe};
use tracing::info;

use super::localized;
use crate::display::{print_ingredient_info, print_recipe_summary};

/// Search options taken from the command line
pub struct Search {
    pub filters: Vec<DietaryFilter>,
    pub cuisines: Vec<String>,
    pub save: bool,
    pub images: bool,
}

fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("heic") => "image/heic",
        _ => DEFAULT_IMAGE_MIME,
    }
}

fn apply_options(assistant: &mut RecipeAssistant, search: &Search) {
    for filter in &search.filters {
        assistant.toggle_filter(*filter);
    }
    for cuisine in &search.cuisines {
        assistant.toggle_cuisine(cuisine);
    }
}

/// Suggest recipes from a fridge photo plus optional typed ingredients
pub async fn analyze(
    assistant: &mut RecipeAssistant,
    photo: &Path,
    extra: &[String],
    search: Search,
) -> Result<()> {
    let bytes = tokio::fs::read(photo)
        .await
        .with_context(|| format!("Failed to read {}", photo.display()))?;
    assistant.load_image_bytes(&bytes, mime_for_path(photo));
    for item in extra {
        assistant.add_ingredient(item);
    }
    apply_options(assistant, &search);

    let result = assistant.analyze_fridge().await.map(<[Recipe]>::len);
    if let Err(e) = result {
        return Err(localized(assistant, e));
    }
    println!("Ingredients: {}", assistant.ingredients().join(", "));
    finish(assistant, &search).await;
    Ok(())
}

/// Suggest recipes from typed ingredients
pub async fn suggest(
    assistant: &mut RecipeAssistant,
    ingredients: &[String],
    search: Search,
) -> Result<()> {
    for item in ingredients {
        assistant.add_ingredient(item);
    }
    apply_options(assistant, &search);

    let result = assistant.search().await.map(<[Recipe]>::len);
    if let Err(e) = result {
        return Err(localized(assistant, e));
    }
    finish(assistant, &search).await;
    Ok(())
}

async fn finish(assistant: &mut RecipeAssistant, search: &Search) {
    if assistant.suggestions().is_empty() {
        println!("{}", assistant.messages().no_recipes_found);
        return;
    }

    if search.images {
        let applied = assistant.resolve_images().await;
        info!(applied, "Recipe images resolved");
    }

    if search.save {
        for recipe in assistant.suggestions().to_vec() {
            if !assistant.is_favorite(&recipe.name) {
                assistant.toggle_favorite(&recipe);
            }
        }
    }

    for recipe in assistant.suggestions() {
        print_recipe_summary(recipe, assistant.is_favorite(&recipe.name));
    }
}

/// Print facts about one ingredient
pub async fn info(assistant: &RecipeAssistant, ingredient: &str) -> Result<()> {
    let info = assistant
        .ingredient_info(ingredient)
        .await
        .with_context(|| assistant.messages().error_fetch)?;
    print_ingredient_info(ingredient, &info);
    Ok(())
}
