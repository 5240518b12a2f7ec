// ABOUTME: Favorites and share-link commands for the cookly CLI
// ABOUTME: Lists, shows, removes, and shares saved recipes, and opens shared links
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors

use anyhow::{anyhow, bail, Result};
use cookly::assistant::RecipeAssistant;
use cookly::models::Recipe;
use tracing::info;

use super::localized;
use crate::display::{print_recipe_detail, print_recipe_summary, print_share};

fn favorite(assistant: &RecipeAssistant, name: &str) -> Result<Recipe> {
    assistant
        .favorites()
        .get(name)
        .cloned()
        .ok_or_else(|| anyhow!("No saved recipe named '{name}'"))
}

/// List saved recipes, optionally fetching missing images first
pub async fn list(assistant: &mut RecipeAssistant, detailed: bool, images: bool) {
    if images {
        assistant.show_favorites();
        let applied = assistant.resolve_images().await;
        info!(applied, "Favorite images resolved");
    }

    let favorites = assistant.favorites();
    if favorites.is_empty() {
        println!("{}", assistant.messages().no_favorites);
        return;
    }
    for recipe in favorites.as_slice() {
        if detailed {
            print_recipe_detail(recipe, true);
        } else {
            print_recipe_summary(recipe, true);
        }
    }
}

/// Show one saved recipe
pub fn show(assistant: &RecipeAssistant, name: &str) -> Result<()> {
    let recipe = favorite(assistant, name)?;
    print_recipe_detail(&recipe, true);
    Ok(())
}

/// Remove a saved recipe
pub fn remove(assistant: &mut RecipeAssistant, name: &str) -> Result<()> {
    let recipe = favorite(assistant, name)?;
    assistant.toggle_favorite(&recipe);
    println!("Removed '{name}' from favorites");
    Ok(())
}

/// Print a share payload for a saved recipe
pub fn share(assistant: &mut RecipeAssistant, name: &str) -> Result<()> {
    let recipe = favorite(assistant, name)?;
    let content = assistant
        .share_recipe(&recipe)
        .map_err(|e| localized(assistant, e))?;
    print_share(&content);
    Ok(())
}

/// Add a saved recipe's missing ingredients to the shopping list
pub fn shop(assistant: &mut RecipeAssistant, name: &str) -> Result<()> {
    let recipe = favorite(assistant, name)?;
    let added = recipe
        .missing_ingredients()
        .filter(|ingredient| assistant.add_ingredient_to_shopping_list(ingredient))
        .count();
    println!("Added {added} item(s) to the shopping list");
    Ok(())
}

/// Open a shared link and show its recipe
pub fn open(assistant: &mut RecipeAssistant, link: &str, save: bool) -> Result<()> {
    let opened = assistant
        .open_shared_link(link)
        .map_err(|e| localized(assistant, e))?;
    let (Some(_), Some(recipe)) = (opened, assistant.selected_recipe().cloned()) else {
        bail!("The link does not contain a recipe");
    };

    if save && !assistant.is_favorite(&recipe.name) {
        assistant.toggle_favorite(&recipe);
    }
    print_recipe_detail(&recipe, assistant.is_favorite(&recipe.name));
    Ok(())
}
