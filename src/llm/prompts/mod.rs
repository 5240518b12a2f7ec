// ABOUTME: Prompt templates for every recipe gateway call, loaded at compile time
// ABOUTME: Renders `{placeholder}` slots with ingredient lists, filters, and language codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors

//! # Prompts
//!
//! Prompts live in markdown files next to this module so they can be edited
//! without touching code. Each builder fills the template's `{name}` slots;
//! braces that do not name a known slot (such as inline JSON examples) are
//! left untouched.

use cookly_core::constants::models::MAX_RECIPE_SUGGESTIONS;
use cookly_core::models::DietaryFilter;

const ANALYZE_FRIDGE: &str = include_str!("analyze_fridge.md");
const VALIDATE_INGREDIENTS: &str = include_str!("validate_ingredients.md");
const VALIDATE_IMAGE: &str = include_str!("validate_image.md");
const RECIPES: &str = include_str!("recipes.md");
const TRANSLATE_RECIPES: &str = include_str!("translate_recipes.md");
const TRANSLATE_TEXTS: &str = include_str!("translate_texts.md");
const INGREDIENT_INFO: &str = include_str!("ingredient_info.md");
const RECIPE_IMAGE: &str = include_str!("recipe_image.md");

/// Fill `{name}` slots in a template in a single pass
///
/// Substituted values are never re-scanned, so user text containing braces
/// cannot inject further substitutions.
fn render(template: &str, slots: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let key = &after[..close];
            slots
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (close, *value))
        });
        match value {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out.trim().to_owned()
}

/// Fridge photo analysis instruction
#[must_use]
pub fn analyze_fridge() -> String {
    render(ANALYZE_FRIDGE, &[])
}

/// Ingredient plausibility check
#[must_use]
pub fn validate_ingredients(ingredients: &[String], language: &str) -> String {
    render(
        VALIDATE_INGREDIENTS,
        &[("ingredients", &ingredients.join(", ")), ("language", language)],
    )
}

/// Does-this-photo-show-food check
#[must_use]
pub fn validate_image(language: &str) -> String {
    render(VALIDATE_IMAGE, &[("language", language)])
}

/// Recipe suggestion request
///
/// Filter and cuisine sentences are omitted entirely when the user selected
/// none.
#[must_use]
pub fn recipes(
    ingredients: &[String],
    filters: &[DietaryFilter],
    cuisines: &[String],
    language: &str,
) -> String {
    let filter_line = if filters.is_empty() {
        String::new()
    } else {
        let names: Vec<&str> = filters.iter().map(DietaryFilter::display_name).collect();
        format!(
            "The user has specified the following dietary restrictions: {}. Please ensure all suggested recipes adhere to these.",
            names.join(", ")
        )
    };
    let cuisine_line = if cuisines.is_empty() {
        String::new()
    } else {
        format!(
            "The user is also looking for recipes from the following cuisines: \"{}\". Please prioritize these types of recipes if possible.",
            cuisines.join(", ")
        )
    };
    let keys: Vec<&str> = DietaryFilter::ALL.iter().map(DietaryFilter::key).collect();
    let max_recipes = MAX_RECIPE_SUGGESTIONS.to_string();

    render(
        RECIPES,
        &[
            ("ingredients", &ingredients.join(", ")),
            ("max_recipes", &max_recipes),
            ("filters", &filter_line),
            ("cuisines", &cuisine_line),
            ("language", language),
            ("restriction_keys", &keys.join(", ")),
        ],
    )
}

/// Recipe translation request; `recipes_json` is `{"recipes": [...]}`
#[must_use]
pub fn translate_recipes(recipes_json: &str, language: &str) -> String {
    render(
        TRANSLATE_RECIPES,
        &[("language", language), ("recipes_json", recipes_json)],
    )
}

/// Text list translation request; `texts_json` is a JSON array of strings
#[must_use]
pub fn translate_texts(texts_json: &str, language: &str) -> String {
    render(
        TRANSLATE_TEXTS,
        &[("language", language), ("texts_json", texts_json)],
    )
}

/// Short grounded ingredient summary
#[must_use]
pub fn ingredient_info(ingredient: &str, language: &str) -> String {
    render(
        INGREDIENT_INFO,
        &[("ingredient", ingredient), ("language", language)],
    )
}

/// Image model prompt for a dish or step illustration
#[must_use]
pub fn recipe_image(prompt: &str) -> String {
    render(RECIPE_IMAGE, &[("prompt", prompt.trim().trim_end_matches('.'))])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_leaves_unknown_braces() {
        let rendered = render(r#"{"a": 1} {name} {other}"#, &[("name", "x")]);
        assert_eq!(rendered, r#"{"a": 1} x {other}"#);
    }

    #[test]
    fn test_render_does_not_rescan_values() {
        let rendered = render("{a}{b}", &[("a", "{b}"), ("b", "B")]);
        assert_eq!(rendered, "{b}B");
    }

    #[test]
    fn test_recipes_prompt_without_filters_or_cuisines() {
        let prompt = recipes(&["eggs".to_owned(), "milk".to_owned()], &[], &[], "en");
        assert!(prompt.contains("[eggs, milk]"));
        assert!(prompt.contains("up to 4 recipes"));
        assert!(!prompt.contains("dietary restrictions:"));
        assert!(!prompt.contains("following cuisines"));
        assert!(prompt.contains("GLUTEN_FREE"));
    }

    #[test]
    fn test_recipes_prompt_uses_display_names() {
        let prompt = recipes(
            &["tofu".to_owned()],
            &[DietaryFilter::GlutenFree, DietaryFilter::LowCarb],
            &["Thai".to_owned(), "Japanese".to_owned()],
            "de",
        );
        assert!(prompt.contains("dietary restrictions: Gluten-Free, Low-Carb."));
        assert!(prompt.contains("\"Thai, Japanese\""));
        assert!(prompt.contains("language code: \"de\""));
        assert!(prompt.contains("Do not translate the \"imagePrompt\" fields."));
    }

    #[test]
    fn test_validate_image_fills_both_language_slots() {
        let prompt = validate_image("fr");
        assert!(prompt.contains("language \"fr\""));
        assert!(prompt.contains("explanation in fr"));
        assert!(!prompt.contains("{language}"));
    }
}
