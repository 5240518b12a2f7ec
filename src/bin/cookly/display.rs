// ABOUTME: Output formatting helpers for the cookly CLI
// ABOUTME: Renders recipes, ingredient facts, share payloads, and shopping list items
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors

use cookly::gateway::IngredientInfo;
use cookly::models::{DietaryFilter, Recipe, ShoppingListItem};
use cookly::share::ShareContent;

/// Short label for an image source; generated images are inline data
fn image_label(url: &str) -> &str {
    if url.starts_with("data:") {
        "(generated image)"
    } else {
        url
    }
}

/// One-paragraph summary of a recipe
pub fn print_recipe_summary(recipe: &Recipe, favorite: bool) {
    let star = if favorite { " *" } else { "" };
    println!("\n{}{star}", recipe.name);
    println!("{}", "-".repeat(recipe.name.chars().count().max(8)));
    println!("{}", recipe.description);

    let mut facts = vec![
        recipe.difficulty.to_string(),
        format!("prep {} min", recipe.prep_time),
    ];
    if let Some(active) = recipe.active_cooking_time {
        facts.push(format!("cooking {active} min"));
    }
    facts.push(format!("total {} min", recipe.total_minutes()));
    facts.push(format!("{} kcal", recipe.calories));
    if let Some(cuisine) = &recipe.cuisine {
        facts.push(cuisine.clone());
    }
    println!("   {}", facts.join(" | "));

    if let Some(restrictions) = recipe.restrictions.as_ref().filter(|r| !r.is_empty()) {
        let names: Vec<&str> = restrictions.iter().map(DietaryFilter::display_name).collect();
        println!("   Suitable for: {}", names.join(", "));
    }

    let missing: Vec<&str> = recipe
        .missing_ingredients()
        .map(|i| i.name.as_str())
        .collect();
    if !missing.is_empty() {
        println!("   Missing: {}", missing.join(", "));
    }
    if let Some(url) = &recipe.image_url {
        println!("   Image: {}", image_label(url));
    }
}

/// Full recipe with nutrition, ingredients, and steps
pub fn print_recipe_detail(recipe: &Recipe, favorite: bool) {
    print_recipe_summary(recipe, favorite);

    if let Some(nutrition) = &recipe.nutrition {
        println!(
            "   Protein {} g | Fat {} g | Carbs {} g",
            nutrition.protein, nutrition.fat, nutrition.carbohydrates
        );
    }

    println!("\nIngredients:");
    for ingredient in &recipe.ingredients {
        let mark = if ingredient.is_available { "x" } else { " " };
        println!("  [{mark}] {} - {}", ingredient.name, ingredient.amount);
    }

    println!("\nSteps:");
    for (index, step) in recipe.steps.iter().enumerate() {
        println!("  {}. {}", index + 1, step.text);
        if let Some(url) = &step.image_url {
            println!("     Image: {}", image_label(url));
        }
    }
}

/// Ingredient facts followed by numbered sources
pub fn print_ingredient_info(name: &str, info: &IngredientInfo) {
    println!("\n{name}");
    println!("{}", "=".repeat(name.chars().count().max(8)));
    println!("{}", info.text);
    if !info.sources.is_empty() {
        println!("\nSources:");
        for (index, source) in info.sources.iter().enumerate() {
            let title = if source.title.is_empty() {
                &source.uri
            } else {
                &source.title
            };
            println!("  [{}] {title}", index + 1);
            println!("      {}", source.uri);
        }
    }
}

/// Share sheet payload as plain text
pub fn print_share(content: &ShareContent) {
    println!("{}", content.title);
    if !content.text.is_empty() {
        println!("{}", content.text);
    }
    println!("{}", content.url);
}

/// One shopping list line
pub fn print_shopping_item(item: &ShoppingListItem) {
    let mark = if item.completed { "x" } else { " " };
    if item.quantity > 1 {
        println!("  [{mark}] {} x{}  ({})", item.name, item.quantity, item.id);
    } else {
        println!("  [{mark}] {}  ({})", item.name, item.id);
    }
}
