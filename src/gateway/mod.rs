// ABOUTME: Recipe gateway: typed operations over the generative model provider
// ABOUTME: Fridge analysis, validation, recipe generation, translation, and grounded ingredient facts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors

//! # Recipe Gateway
//!
//! Every AI-backed feature of the assistant goes through [`RecipeGateway`].
//! Each operation builds a prompt, asks the provider for schema-constrained
//! JSON where applicable, and parses the result into domain types. Output that
//! does not parse is reported as a backend error; nothing is retried.

mod schemas;

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::constants::{models::MAX_RECIPE_SUGGESTIONS, service_names};
use crate::errors::{AppError, AppResult};
use crate::llm::{prompts, GenerateRequest, InlineImage, LlmProvider, WebSource};
use crate::models::{DietaryFilter, Recipe};

/// Outcome of checking a typed ingredient list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientValidation {
    /// Whether every item is a plausible ingredient
    pub is_valid: bool,
    /// Items the model rejected
    #[serde(default)]
    pub invalid_items: Vec<String>,
}

/// Outcome of checking a photo for food
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageValidation {
    /// Whether the photo shows usable ingredients
    pub is_food: bool,
    /// Localized explanation when it does not
    #[serde(default)]
    pub reason: String,
}

/// Short grounded summary of an ingredient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientInfo {
    /// Summary text in the requested language
    pub text: String,
    /// Web pages the summary was grounded on, unique by URI
    pub sources: Vec<WebSource>,
}

#[derive(Deserialize)]
struct FridgeAnalysis {
    #[serde(default)]
    ingredients: Vec<String>,
}

#[derive(Deserialize)]
struct RecipeList {
    #[serde(default)]
    recipes: Vec<Recipe>,
}

#[derive(Deserialize)]
struct Translations {
    #[serde(default)]
    translations: Option<Vec<String>>,
}

/// Typed access to the generative backend
#[derive(Clone)]
pub struct RecipeGateway {
    provider: Arc<dyn LlmProvider>,
    model: Option<String>,
}

impl RecipeGateway {
    /// Create a gateway using the provider's default model
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            model: None,
        }
    }

    /// Use a specific text model for every call
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// The underlying provider
    #[must_use]
    pub fn provider(&self) -> &Arc<dyn LlmProvider> {
        &self.provider
    }

    fn request(&self, request: GenerateRequest) -> GenerateRequest {
        match &self.model {
            Some(model) => request.with_model(model.clone()),
            None => request,
        }
    }

    async fn generate_json<T: DeserializeOwned>(&self, request: GenerateRequest) -> AppResult<T> {
        let response = self.provider.generate(&self.request(request)).await?;
        parse_model_json(response.require_text()?)
    }

    /// Identify ingredients in a fridge photo
    ///
    /// A response without an `ingredients` key yields an empty list.
    pub async fn analyze_fridge(&self, image: &InlineImage) -> AppResult<Vec<String>> {
        debug!(mime_type = %image.mime_type, "Analyzing fridge photo");
        let request = GenerateRequest::with_image(image.clone(), prompts::analyze_fridge())
            .with_json_schema(schemas::fridge_analysis());
        let analysis: FridgeAnalysis = self.generate_json(request).await?;
        info!(count = analysis.ingredients.len(), "Fridge analysis complete");
        Ok(analysis.ingredients)
    }

    /// Check that every item in a typed list is a plausible ingredient
    pub async fn validate_ingredients(
        &self,
        ingredients: &[String],
        language: &str,
    ) -> AppResult<IngredientValidation> {
        debug!(count = ingredients.len(), language, "Validating ingredients");
        let request = GenerateRequest::text(prompts::validate_ingredients(ingredients, language))
            .with_json_schema(schemas::ingredient_validation());
        self.generate_json(request).await
    }

    /// Check that a photo shows food before analyzing it
    pub async fn validate_image_content(
        &self,
        image: &InlineImage,
        language: &str,
    ) -> AppResult<ImageValidation> {
        debug!(language, "Validating image content");
        let request = GenerateRequest::with_image(image.clone(), prompts::validate_image(language))
            .with_json_schema(schemas::image_validation());
        self.generate_json(request).await
    }

    /// Suggest up to four recipes for the given ingredients
    pub async fn get_recipes(
        &self,
        ingredients: &[String],
        filters: &[DietaryFilter],
        cuisines: &[String],
        language: &str,
    ) -> AppResult<Vec<Recipe>> {
        debug!(
            ingredients = ingredients.len(),
            filters = filters.len(),
            cuisines = cuisines.len(),
            language,
            "Requesting recipe suggestions"
        );
        let request = GenerateRequest::text(prompts::recipes(
            ingredients,
            filters,
            cuisines,
            language,
        ))
        .with_json_schema(schemas::recipes());
        let RecipeList { mut recipes } = self.generate_json(request).await?;

        if recipes.len() > MAX_RECIPE_SUGGESTIONS {
            warn!(
                returned = recipes.len(),
                "Model returned more recipes than requested, truncating"
            );
            recipes.truncate(MAX_RECIPE_SUGGESTIONS);
        }
        info!(count = recipes.len(), "Recipe suggestions received");
        Ok(recipes)
    }

    /// Translate the user-facing fields of `recipes`
    ///
    /// Image URLs are not sent to the model; they are copied back onto the
    /// translated recipes by position.
    pub async fn translate_recipes(
        &self,
        recipes: &[Recipe],
        language: &str,
    ) -> AppResult<Vec<Recipe>> {
        if recipes.is_empty() {
            return Ok(Vec::new());
        }
        debug!(count = recipes.len(), language, "Translating recipes");

        let stripped: Vec<Recipe> = recipes.iter().map(Recipe::without_images).collect();
        let payload = serde_json::to_string(&json!({ "recipes": stripped }))?;
        let request = GenerateRequest::text(prompts::translate_recipes(&payload, language))
            .with_json_schema(schemas::recipes());
        let RecipeList {
            recipes: mut translated,
        } = self.generate_json(request).await?;

        if translated.len() != recipes.len() {
            warn!(
                sent = recipes.len(),
                returned = translated.len(),
                "Translation changed the number of recipes"
            );
        }
        for (target, original) in translated.iter_mut().zip(recipes) {
            restore_images(target, original);
        }
        Ok(translated)
    }

    /// Translate a list of short texts, keeping order
    ///
    /// Returns the input unchanged if the model answers with a list of a
    /// different length.
    pub async fn translate_texts(&self, texts: &[String], language: &str) -> AppResult<Vec<String>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let payload = serde_json::to_string(texts)?;
        let request = GenerateRequest::text(prompts::translate_texts(&payload, language))
            .with_json_schema(schemas::translations());
        let result: Translations = self.generate_json(request).await?;

        match result.translations {
            Some(translations) if translations.len() == texts.len() => Ok(translations),
            other => {
                warn!(
                    expected = texts.len(),
                    returned = other.as_ref().map_or(0, Vec::len),
                    "Translation length mismatch, keeping original texts"
                );
                Ok(texts.to_vec())
            }
        }
    }

    /// Short nutrition and substitution summary, grounded with web search
    pub async fn get_ingredient_info(&self, name: &str, language: &str) -> AppResult<IngredientInfo> {
        debug!(ingredient = name, language, "Looking up ingredient info");
        let request =
            GenerateRequest::text(prompts::ingredient_info(name, language)).with_web_search();
        let response = self.provider.generate(&self.request(request)).await?;
        let text = response.require_text()?.trim().to_owned();
        Ok(IngredientInfo {
            text,
            sources: unique_sources(response.sources),
        })
    }
}

/// Parse model JSON output, tolerating surrounding whitespace and code fences
fn parse_model_json<T: DeserializeOwned>(text: &str) -> AppResult<T> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .map_or(trimmed, str::trim);

    serde_json::from_str(body).map_err(|e| {
        AppError::external_service(
            service_names::GEMINI_API,
            format!("Malformed model output: {e}"),
        )
    })
}

/// De-duplicate by URI; position follows first appearance, title follows the last
fn unique_sources(sources: Vec<WebSource>) -> Vec<WebSource> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<WebSource> = Vec::new();
    for source in sources {
        if source.uri.is_empty() {
            continue;
        }
        if let Some(&index) = positions.get(&source.uri) {
            unique[index].title = source.title;
        } else {
            positions.insert(source.uri.clone(), unique.len());
            unique.push(source);
        }
    }
    unique
}

fn restore_images(target: &mut Recipe, original: &Recipe) {
    target.image_url.clone_from(&original.image_url);
    for (step, original_step) in target.steps.iter_mut().zip(&original.steps) {
        step.image_url.clone_from(&original_step.image_url);
    }
}
