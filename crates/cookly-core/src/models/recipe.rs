// ABOUTME: Recipe data model shared by the gateway, favorites, and share links
// ABOUTME: Defines Recipe, Ingredient, InstructionStep, Nutrition, Difficulty, and DietaryFilter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use tracing::warn;

/// Minutes assumed per step when no active cooking time is given
const MINUTES_PER_STEP: u32 = 5;

/// How hard a recipe is to cook
///
/// Deserialization is lenient: the model sometimes localizes this field, and
/// an unrecognized value falls back to [`Difficulty::Easy`] instead of
/// rejecting the whole recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum Difficulty {
    /// Simple recipes, basic techniques
    #[default]
    Easy,
    /// Moderate complexity
    Medium,
    /// Advanced techniques required
    Hard,
}

impl Difficulty {
    /// Wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Parse the wire name, case-insensitively
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw).unwrap_or_else(|| {
            warn!(difficulty = %raw, "Unknown recipe difficulty, using default");
            Self::default()
        }))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dietary restriction tag for filtering and labelling recipes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DietaryFilter {
    /// No meat or fish
    Vegetarian,
    /// No animal products
    Vegan,
    /// No gluten-containing ingredients
    GlutenFree,
    /// Ketogenic
    Keto,
    /// Reduced carbohydrates
    LowCarb,
    /// No dairy products
    DairyFree,
    /// No nuts
    NutFree,
    /// Paleo-compliant
    Paleo,
    /// Fish allowed, no other meat
    Pescatarian,
}

impl DietaryFilter {
    /// Every filter, in display order
    pub const ALL: [Self; 9] = [
        Self::Vegetarian,
        Self::Vegan,
        Self::GlutenFree,
        Self::Keto,
        Self::LowCarb,
        Self::DairyFree,
        Self::NutFree,
        Self::Paleo,
        Self::Pescatarian,
    ];

    /// Wire key (e.g. `GLUTEN_FREE`)
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Vegetarian => "VEGETARIAN",
            Self::Vegan => "VEGAN",
            Self::GlutenFree => "GLUTEN_FREE",
            Self::Keto => "KETO",
            Self::LowCarb => "LOW_CARB",
            Self::DairyFree => "DAIRY_FREE",
            Self::NutFree => "NUT_FREE",
            Self::Paleo => "PALEO",
            Self::Pescatarian => "PESCATARIAN",
        }
    }

    /// English display name used when prompting the model
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Vegetarian => "Vegetarian",
            Self::Vegan => "Vegan",
            Self::GlutenFree => "Gluten-Free",
            Self::Keto => "Keto",
            Self::LowCarb => "Low-Carb",
            Self::DairyFree => "Dairy-Free",
            Self::NutFree => "Nut-Free",
            Self::Paleo => "Paleo",
            Self::Pescatarian => "Pescatarian",
        }
    }

    /// Parse a wire key or display name, case-insensitively
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_uppercase().replace('-', "_");
        Self::ALL.into_iter().find(|f| f.key() == normalized)
    }
}

impl fmt::Display for DietaryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Macronutrients per serving, in grams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Nutrition {
    /// Protein in grams
    pub protein: u32,
    /// Fat in grams
    pub fat: u32,
    /// Carbohydrates in grams
    pub carbohydrates: u32,
}

/// An ingredient line in a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// Clean ingredient name ("flour", not "2 cups flour")
    pub name: String,
    /// Free-text quantity ("2 cups", "100g")
    pub amount: String,
    /// Whether the user declared this ingredient as available
    #[serde(default)]
    pub is_available: bool,
}

/// One cooking instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionStep {
    /// Instruction text
    pub text: String,
    /// English prompt for an illustrative image; absent for non-visual steps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_prompt: Option<String>,
    /// Resolved image source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl InstructionStep {
    /// Create a step with text only
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image_prompt: None,
            image_url: None,
        }
    }

    /// Image prompt when this step still needs an image
    #[must_use]
    pub fn pending_image_prompt(&self) -> Option<&str> {
        if self.image_url.is_some() {
            return None;
        }
        self.image_prompt
            .as_deref()
            .filter(|prompt| !prompt.trim().is_empty())
    }
}

/// A recipe suggestion
///
/// Identity is the recipe name. There is no stable identifier, so two
/// suggestions with the same name are treated as the same recipe by favorites
/// and image updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Recipe title
    pub name: String,
    /// Short description
    pub description: String,
    /// Difficulty rating
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Preparation time in minutes
    #[serde(default)]
    pub prep_time: u32,
    /// Active cooking time in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_cooking_time: Option<u32>,
    /// Calories per serving
    #[serde(default)]
    pub calories: u32,
    /// Macronutrients per serving
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<Nutrition>,
    /// Ingredients in recipe order
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// Steps in cooking order
    #[serde(default)]
    pub steps: Vec<InstructionStep>,
    /// English prompt for the finished-dish image
    #[serde(default)]
    pub image_prompt: String,
    /// Resolved image source for the finished dish
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Primary cuisine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    /// Applicable dietary restriction tags; unknown tags are dropped on load
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "known_restrictions"
    )]
    pub restrictions: Option<Vec<DietaryFilter>>,
}

impl Recipe {
    /// Copy of this recipe with the main image and every step image removed
    #[must_use]
    pub fn without_images(&self) -> Self {
        let mut stripped = self.clone();
        stripped.strip_images();
        stripped
    }

    /// Remove the main image and every step image in place
    pub fn strip_images(&mut self) {
        self.image_url = None;
        for step in &mut self.steps {
            step.image_url = None;
        }
    }

    /// Main image prompt when the recipe still needs an image
    #[must_use]
    pub fn pending_image_prompt(&self) -> Option<&str> {
        if self.image_url.is_some() || self.image_prompt.trim().is_empty() {
            None
        } else {
            Some(&self.image_prompt)
        }
    }

    /// Whether two recipes refer to the same dish
    #[must_use]
    pub fn same_recipe(&self, other: &Self) -> bool {
        self.name == other.name
    }

    /// Ingredients the user does not have yet
    pub fn missing_ingredients(&self) -> impl Iterator<Item = &Ingredient> {
        self.ingredients.iter().filter(|i| !i.is_available)
    }

    /// Total time in minutes: preparation plus cooking
    ///
    /// Without an active cooking time (or with zero), cooking is estimated at
    /// five minutes per step.
    #[must_use]
    pub fn total_minutes(&self) -> u32 {
        let cooking = match self.active_cooking_time {
            Some(minutes) if minutes > 0 => minutes,
            _ => u32::try_from(self.steps.len())
                .unwrap_or(u32::MAX)
                .saturating_mul(MINUTES_PER_STEP),
        };
        self.prep_time.saturating_add(cooking)
    }
}

fn known_restrictions<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<DietaryFilter>>, D::Error> {
    let raw: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|keys| {
        keys.iter()
            .filter_map(|key| {
                let filter = DietaryFilter::parse(key);
                if filter.is_none() {
                    warn!(restriction = %key, "Dropping unknown dietary restriction");
                }
                filter
            })
            .collect()
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn recipe_json(difficulty: &str, restrictions: &[&str]) -> serde_json::Value {
        json!({
            "name": "Tortilla",
            "description": "Potato omelette",
            "difficulty": difficulty,
            "prepTime": 10,
            "calories": 400,
            "restrictions": restrictions,
        })
    }

    #[test]
    fn test_difficulty_accepts_any_case() {
        let recipe: Recipe = serde_json::from_value(recipe_json("HARD", &[])).unwrap();
        assert_eq!(recipe.difficulty, Difficulty::Hard);
        let recipe: Recipe = serde_json::from_value(recipe_json(" medium ", &[])).unwrap();
        assert_eq!(recipe.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_localized_difficulty_falls_back_to_default() {
        let recipe: Recipe = serde_json::from_value(recipe_json("Difícil", &[])).unwrap();
        assert_eq!(recipe.difficulty, Difficulty::Easy);
        assert_eq!(recipe.name, "Tortilla");
    }

    #[test]
    fn test_unknown_restrictions_are_dropped() {
        let recipe: Recipe =
            serde_json::from_value(recipe_json("Easy", &["VEGAN", "Sin gluten", "gluten-free"]))
                .unwrap();
        assert_eq!(
            recipe.restrictions,
            Some(vec![DietaryFilter::Vegan, DietaryFilter::GlutenFree])
        );
    }

    #[test]
    fn test_total_minutes_prefers_active_cooking_time() {
        let mut recipe: Recipe = serde_json::from_value(recipe_json("Easy", &[])).unwrap();
        recipe.steps = vec![InstructionStep::new("Peel"), InstructionStep::new("Fry")];
        assert_eq!(recipe.total_minutes(), 20);

        recipe.active_cooking_time = Some(25);
        assert_eq!(recipe.total_minutes(), 35);

        recipe.active_cooking_time = Some(0);
        assert_eq!(recipe.total_minutes(), 20);
    }

    #[test]
    fn test_total_minutes_saturates() {
        let mut recipe: Recipe = serde_json::from_value(recipe_json("Easy", &[])).unwrap();
        recipe.prep_time = u32::MAX;
        recipe.active_cooking_time = Some(30);
        assert_eq!(recipe.total_minutes(), u32::MAX);
    }
}
