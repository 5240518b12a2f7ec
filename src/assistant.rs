// ABOUTME: Recipe assistant session: ingredients, filters, suggestions, favorites, and shopping list
// ABOUTME: Orchestrates the gateway, image queue, local persistence, share links, and language
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors

//! # Recipe Assistant Session
//!
//! [`RecipeAssistant`] owns everything a cooking session knows: the declared
//! ingredients, active dietary filters and cuisines, the current suggestions,
//! favorites, the shopping list, the recipe being viewed, the active language,
//! and the last user-facing error.
//!
//! ## Error reporting
//!
//! Operations return `AppResult` and also record a localized message in
//! [`RecipeAssistant::last_error`]:
//!
//! - backend failures become a generic message for the operation
//! - validation rejections carry the model's own reason
//! - malformed share links report an invalid-link message
//!
//! Storage failures never surface; [`LocalPersistence`] logs and continues.
//!
//! ## Images
//!
//! Suggestions are returned as soon as the model answers. Their images are
//! enqueued on the [`ImageQueue`] at the same time and written back by recipe
//! name when [`RecipeAssistant::resolve_images`] is awaited.

use std::mem;
use std::sync::Arc;

use futures_util::future::try_join3;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::{AssistantConfig, ImageBackendKind};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::favorites::Favorites;
use crate::gateway::{IngredientInfo, RecipeGateway};
use crate::i18n::{Language, Messages};
use crate::images::{
    self, GenerativeImageBackend, ImageBackend, ImageQueue, ImageSlot, KeywordImageBackend,
    PendingImage, ResolvedImage,
};
use crate::llm::{GeminiProvider, InlineImage, LlmProvider};
use crate::models::{DietaryFilter, Ingredient, Recipe, ShoppingListItem};
use crate::share::{self, ShareContent, INVALID_LINK_MESSAGE};
use crate::shopping::ShoppingList;
use crate::speech::{self, Voice};
use crate::storage::{FileStore, LocalPersistence};

/// Which generic message a backend failure maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailureContext {
    Analyze,
    Fetch,
    Share,
}

/// A cooking session
pub struct RecipeAssistant {
    gateway: RecipeGateway,
    images: ImageQueue,
    persistence: LocalPersistence,
    share_base_url: Url,
    language: Language,
    pending_photo: Option<InlineImage>,
    ingredients: Vec<String>,
    filters: Vec<DietaryFilter>,
    cuisines: Vec<String>,
    suggestions: Vec<Recipe>,
    favorites: Favorites,
    shopping: ShoppingList,
    selected: Option<Recipe>,
    last_error: Option<String>,
    pending_images: Vec<PendingImage>,
}

impl RecipeAssistant {
    /// Start a session, loading favorites, shopping list, and language from storage
    #[must_use]
    pub fn new(
        gateway: RecipeGateway,
        images: ImageQueue,
        persistence: LocalPersistence,
        share_base_url: Url,
    ) -> Self {
        let language = persistence
            .load_language()
            .map_or_else(Language::default, |code| Language::from_code(&code));
        let favorites = Favorites::from_recipes(persistence.load_favorites());
        let shopping = ShoppingList::from_items(persistence.load_shopping_list());
        info!(
            language = %language,
            favorites = favorites.len(),
            shopping_items = shopping.len(),
            "Session started"
        );

        Self {
            gateway,
            images,
            persistence,
            share_base_url,
            language,
            pending_photo: None,
            ingredients: Vec::new(),
            filters: Vec::new(),
            cuisines: Vec::new(),
            suggestions: Vec::new(),
            favorites,
            shopping,
            selected: None,
            last_error: None,
            pending_images: Vec::new(),
        }
    }

    /// Build a session from environment configuration
    ///
    /// A missing API key is not an error here; AI operations report it when
    /// first used, so offline features keep working.
    ///
    /// # Errors
    ///
    /// Returns an error if the image backend cannot be constructed.
    pub fn from_config(config: &AssistantConfig) -> AppResult<Self> {
        let provider: Arc<dyn LlmProvider> = Arc::new(
            GeminiProvider::new(config.api_key.clone().unwrap_or_default())
                .with_default_model(config.text_model.clone())
                .with_timeout(config.http_timeout),
        );
        let backend: Arc<dyn ImageBackend> = match config.image_backend {
            ImageBackendKind::Keyword => Arc::new(KeywordImageBackend::new()?),
            ImageBackendKind::Generative => Arc::new(GenerativeImageBackend::new(
                Arc::clone(&provider),
                config.image_model.clone(),
            )),
        };
        let gateway = RecipeGateway::new(provider).with_model(config.text_model.clone());
        let images = ImageQueue::with_delay(backend, config.image_delay);
        let persistence = LocalPersistence::new(Arc::new(FileStore::new(&config.data_dir)));
        let stored_language = persistence.load_language();

        let mut assistant = Self::new(gateway, images, persistence, config.share_base_url.clone());
        if stored_language.is_none() {
            if let Some(code) = &config.initial_language {
                assistant.language = Language::from_code(code);
            }
        }
        Ok(assistant)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Active language
    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Messages in the active language
    #[must_use]
    pub const fn messages(&self) -> &'static Messages {
        self.language.messages()
    }

    /// Declared ingredients in the order they were added
    #[must_use]
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    /// Active dietary filters
    #[must_use]
    pub fn filters(&self) -> &[DietaryFilter] {
        &self.filters
    }

    /// Selected cuisines
    #[must_use]
    pub fn cuisines(&self) -> &[String] {
        &self.cuisines
    }

    /// Current recipe suggestions
    #[must_use]
    pub fn suggestions(&self) -> &[Recipe] {
        &self.suggestions
    }

    /// Saved favorites
    #[must_use]
    pub const fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    /// Shopping list
    #[must_use]
    pub const fn shopping_list(&self) -> &ShoppingList {
        &self.shopping
    }

    /// Recipe currently open, if any
    #[must_use]
    pub const fn selected_recipe(&self) -> Option<&Recipe> {
        self.selected.as_ref()
    }

    /// Last user-facing error message
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Photo waiting to be analyzed
    #[must_use]
    pub const fn pending_photo(&self) -> Option<&InlineImage> {
        self.pending_photo.as_ref()
    }

    /// The session's image queue
    #[must_use]
    pub const fn image_queue(&self) -> &ImageQueue {
        &self.images
    }

    /// Image requests enqueued but not yet applied
    #[must_use]
    pub fn pending_image_count(&self) -> usize {
        self.pending_images.len()
    }

    // ========================================================================
    // Error reporting
    // ========================================================================

    fn user_message(&self, error: &AppError, context: FailureContext) -> String {
        let messages = self.messages();
        match error.code {
            ErrorCode::NotFood if !error.message.trim().is_empty() => error.message.clone(),
            ErrorCode::NotFood => messages.error_image_validation.to_owned(),
            ErrorCode::InvalidIngredients => {
                format!("{} {}", messages.error_invalid_ingredients, error.message)
            }
            ErrorCode::InvalidShareLink => INVALID_LINK_MESSAGE.to_owned(),
            _ => match context {
                FailureContext::Analyze => messages.error_analyze.to_owned(),
                FailureContext::Fetch => messages.error_fetch.to_owned(),
                FailureContext::Share => messages.share_error.to_owned(),
            },
        }
    }

    fn fail<T>(&mut self, error: AppError, context: FailureContext) -> AppResult<T> {
        warn!(code = ?error.code, error = %error, "Session operation failed");
        self.last_error = Some(self.user_message(&error, context));
        Err(error)
    }

    /// Forget the last error
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    // ========================================================================
    // Ingredients and search
    // ========================================================================

    /// Hold a fridge photo for analysis
    ///
    /// Suggestions are cleared; declared ingredients are kept so the photo's
    /// findings merge into them.
    pub fn load_image(&mut self, image: InlineImage) {
        debug!(mime_type = %image.mime_type, "Photo loaded");
        self.pending_photo = Some(image);
        self.suggestions.clear();
        self.last_error = None;
    }

    /// Hold a photo given as raw bytes
    pub fn load_image_bytes(&mut self, bytes: &[u8], mime_type: &str) {
        self.load_image(InlineImage::from_bytes(bytes, mime_type));
    }

    /// Validate and analyze the loaded photo, then fetch recipes
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when no photo is loaded, `NotFood` when the photo
    /// is rejected, or the backend error from analysis or recipe generation.
    pub async fn analyze_fridge(&mut self) -> AppResult<&[Recipe]> {
        let Some(photo) = self.pending_photo.clone() else {
            return Err(AppError::invalid_input("No photo loaded"));
        };
        self.last_error = None;
        let lang = self.language.code();

        let validation = match self.gateway.validate_image_content(&photo, lang).await {
            Ok(validation) => validation,
            Err(e) => return self.fail(e, FailureContext::Analyze),
        };
        if !validation.is_food {
            return self.fail(AppError::not_food(validation.reason), FailureContext::Analyze);
        }

        let found = match self.gateway.analyze_fridge(&photo).await {
            Ok(found) => found,
            Err(e) => return self.fail(e, FailureContext::Analyze),
        };
        let before = self.ingredients.len();
        for name in found {
            self.push_ingredient(&name);
        }
        info!(
            found = self.ingredients.len() - before,
            total = self.ingredients.len(),
            "Merged ingredients from photo"
        );

        self.fetch_recipes().await
    }

    fn push_ingredient(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.ingredients.iter().any(|i| i == name) {
            return false;
        }
        self.ingredients.push(name.to_owned());
        true
    }

    /// Validate the typed ingredients, then fetch recipes
    ///
    /// # Errors
    ///
    /// Returns `InvalidIngredients` listing rejected items, or a backend error.
    pub async fn search(&mut self) -> AppResult<&[Recipe]> {
        if self.ingredients.is_empty() {
            return Ok(&self.suggestions);
        }
        self.last_error = None;
        self.suggestions.clear();

        let validation = match self
            .gateway
            .validate_ingredients(&self.ingredients, self.language.code())
            .await
        {
            Ok(validation) => validation,
            Err(e) => return self.fail(e, FailureContext::Fetch),
        };
        if !validation.is_valid {
            return self.fail(
                AppError::invalid_ingredients(&validation.invalid_items),
                FailureContext::Fetch,
            );
        }
        self.fetch_recipes().await
    }

    /// Ask the model for recipes using the current ingredients and filters
    ///
    /// Main images are enqueued before this returns.
    ///
    /// # Errors
    ///
    /// Returns the backend error; suggestions are left empty.
    pub async fn fetch_recipes(&mut self) -> AppResult<&[Recipe]> {
        if self.ingredients.is_empty() {
            self.suggestions.clear();
            return Ok(&self.suggestions);
        }
        self.last_error = None;

        let result = self
            .gateway
            .get_recipes(
                &self.ingredients,
                &self.filters,
                &self.cuisines,
                self.language.code(),
            )
            .await;
        match result {
            Ok(recipes) => self.suggestions = recipes,
            Err(e) => {
                self.suggestions.clear();
                return self.fail(e, FailureContext::Fetch);
            }
        }

        let pending = images::request_main_images(&self.images, &self.suggestions);
        self.pending_images.extend(pending);
        Ok(&self.suggestions)
    }

    /// Wait for every enqueued image and write results into matching recipes
    ///
    /// Returns the number of images applied. Failed requests were logged and
    /// leave their slot empty.
    pub async fn resolve_images(&mut self) -> usize {
        let pending = mem::take(&mut self.pending_images);
        if pending.is_empty() {
            return 0;
        }
        let resolved = images::resolve_all(pending).await;
        resolved
            .iter()
            .filter(|image| self.apply_image(image))
            .count()
    }

    fn apply_image(&mut self, image: &ResolvedImage) -> bool {
        let in_suggestions = images::apply_image(&mut self.suggestions, image);
        let in_favorites = images::apply_image(self.favorites.as_mut_slice(), image);
        let in_selected = self
            .selected
            .as_mut()
            .is_some_and(|recipe| images::apply_image(std::slice::from_mut(recipe), image));
        in_suggestions || in_favorites || in_selected
    }

    /// Add a typed ingredient; returns whether it was new
    ///
    /// Suggestions are cleared so the user searches explicitly.
    pub fn add_ingredient(&mut self, name: &str) -> bool {
        let added = self.push_ingredient(name);
        self.suggestions.clear();
        self.last_error = None;
        added
    }

    /// Remove an ingredient by exact name; returns whether it was present
    pub fn remove_ingredient(&mut self, name: &str) -> bool {
        let before = self.ingredients.len();
        self.ingredients.retain(|i| i != name);
        self.suggestions.clear();
        self.last_error = None;
        self.ingredients.len() != before
    }

    /// Toggle a dietary filter; returns whether it is now active
    pub fn toggle_filter(&mut self, filter: DietaryFilter) -> bool {
        let active = if self.filters.contains(&filter) {
            self.filters.retain(|f| *f != filter);
            false
        } else {
            self.filters.push(filter);
            true
        };
        self.suggestions.clear();
        active
    }

    /// Toggle a cuisine; returns whether it is now selected
    pub fn toggle_cuisine(&mut self, cuisine: &str) -> bool {
        let selected = if self.cuisines.iter().any(|c| c == cuisine) {
            self.cuisines.retain(|c| c != cuisine);
            false
        } else {
            self.cuisines.push(cuisine.to_owned());
            true
        };
        self.suggestions.clear();
        selected
    }

    /// Drop every filter and cuisine
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.cuisines.clear();
        self.suggestions.clear();
    }

    // ========================================================================
    // Recipes and favorites
    // ========================================================================

    /// Open a recipe for cooking
    pub fn select_recipe(&mut self, recipe: Recipe) {
        self.selected = Some(recipe);
    }

    /// Close the open recipe
    pub fn close_recipe(&mut self) {
        self.selected = None;
    }

    /// Find a recipe by name in the open recipe, suggestions, then favorites
    #[must_use]
    pub fn find_recipe(&self, name: &str) -> Option<&Recipe> {
        self.selected
            .as_ref()
            .filter(|r| r.name == name)
            .or_else(|| self.suggestions.iter().find(|r| r.name == name))
            .or_else(|| self.favorites.get(name))
    }

    /// Save or unsave a recipe; returns whether it is now a favorite
    pub fn toggle_favorite(&mut self, recipe: &Recipe) -> bool {
        let now_favorite = self.favorites.toggle(recipe);
        self.persistence.save_favorites(self.favorites.as_slice());
        info!(recipe = %recipe.name, favorite = now_favorite, "Favorite toggled");
        now_favorite
    }

    /// Whether a recipe with this name is a favorite
    #[must_use]
    pub fn is_favorite(&self, name: &str) -> bool {
        self.favorites.contains(name)
    }

    /// Replace a recipe everywhere it appears, matched by name
    ///
    /// The updated recipe also becomes the open recipe.
    pub fn update_recipe(&mut self, recipe: Recipe) {
        for suggestion in self.suggestions.iter_mut().filter(|r| r.same_recipe(&recipe)) {
            suggestion.clone_from(&recipe);
        }
        if self.favorites.update(&recipe) {
            self.persistence.save_favorites(self.favorites.as_slice());
        }
        self.selected = Some(recipe);
    }

    fn recipe_for_edit(&self, name: &str) -> AppResult<Recipe> {
        self.find_recipe(name)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Recipe '{name}'")))
    }

    /// Change a recipe's preparation and active cooking times
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no recipe has this name.
    pub fn edit_recipe_times(
        &mut self,
        name: &str,
        prep_time: u32,
        active_cooking_time: Option<u32>,
    ) -> AppResult<()> {
        let mut recipe = self.recipe_for_edit(name)?;
        recipe.prep_time = prep_time;
        recipe.active_cooking_time = active_cooking_time;
        self.update_recipe(recipe);
        Ok(())
    }

    /// Change the amount of one ingredient in a recipe
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank amount and `ResourceNotFound` for an
    /// unknown recipe or ingredient.
    pub fn edit_ingredient_amount(
        &mut self,
        recipe_name: &str,
        ingredient_name: &str,
        amount: &str,
    ) -> AppResult<()> {
        let amount = amount.trim();
        if amount.is_empty() {
            return Err(AppError::invalid_input("Amount cannot be empty"));
        }
        let mut recipe = self.recipe_for_edit(recipe_name)?;
        let ingredient = recipe
            .ingredients
            .iter_mut()
            .find(|i| i.name == ingredient_name)
            .ok_or_else(|| AppError::not_found(format!("Ingredient '{ingredient_name}'")))?;
        amount.clone_into(&mut ingredient.amount);
        self.update_recipe(recipe);
        Ok(())
    }

    /// Switch to the favorites view, enqueueing any missing main images
    pub fn show_favorites(&mut self) -> &Favorites {
        let missing: Vec<Recipe> = self.favorites.missing_images().cloned().collect();
        if !missing.is_empty() {
            debug!(count = missing.len(), "Regenerating favorite images");
            let pending = images::request_main_images(&self.images, &missing);
            self.pending_images.extend(pending);
        }
        &self.favorites
    }

    /// Image for one step of a recipe, generating it if needed
    ///
    /// Returns `Ok(None)` for steps without an image prompt. A generated image
    /// is written into every copy of the recipe.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown recipe or step, or the
    /// backend error.
    pub async fn step_image(&mut self, recipe_name: &str, index: usize) -> AppResult<Option<String>> {
        let recipe = self.recipe_for_edit(recipe_name)?;
        let step = recipe
            .steps
            .get(index)
            .ok_or_else(|| AppError::not_found(format!("Step {index} of '{recipe_name}'")))?;
        if let Some(url) = &step.image_url {
            return Ok(Some(url.clone()));
        }
        let Some(prompt) = step.pending_image_prompt() else {
            return Ok(None);
        };

        let url = self.images.request_image(prompt).await.inspect_err(|e| {
            warn!(recipe = recipe_name, step = index, error = %e, "Failed to generate step image");
        })?;
        self.apply_image(&ResolvedImage {
            recipe_name: recipe_name.to_owned(),
            slot: ImageSlot::Step(index),
            url: url.clone(),
        });
        Ok(Some(url))
    }

    /// Grounded summary of an ingredient in the active language
    ///
    /// Failures are returned but not recorded as a session error.
    ///
    /// # Errors
    ///
    /// Returns the backend error.
    pub async fn ingredient_info(&self, name: &str) -> AppResult<IngredientInfo> {
        self.gateway
            .get_ingredient_info(name, self.language.code())
            .await
            .inspect_err(|e| warn!(ingredient = name, error = %e, "Ingredient info failed"))
    }

    // ========================================================================
    // Language
    // ========================================================================

    /// Switch language, persisting the choice
    ///
    /// When the language actually changes, suggestions, favorites, and the open
    /// recipe are translated together; if any translation fails none is
    /// applied.
    ///
    /// # Errors
    ///
    /// Returns the backend error from translation.
    pub async fn set_language(&mut self, code: &str) -> AppResult<Language> {
        let language = Language::from_code(code);
        self.persistence.save_language(language.code());
        if language == self.language {
            return Ok(language);
        }
        info!(from = %self.language, to = %language, "Language changed");
        self.language = language;

        let target = language.code();
        let selected: Vec<Recipe> = self.selected.iter().cloned().collect();
        let translated = try_join3(
            self.gateway.translate_recipes(&self.suggestions, target),
            self.gateway.translate_recipes(self.favorites.as_slice(), target),
            self.gateway.translate_recipes(&selected, target),
        )
        .await;

        let (suggestions, favorites, selected) = match translated {
            Ok(results) => results,
            Err(e) => return self.fail(e, FailureContext::Fetch),
        };
        if !self.suggestions.is_empty() {
            self.suggestions = suggestions;
        }
        if !self.favorites.is_empty() {
            self.favorites.replace_all(favorites);
            self.persistence.save_favorites(self.favorites.as_slice());
        }
        if let Some(recipe) = selected.into_iter().next() {
            self.selected = Some(recipe);
        }
        Ok(language)
    }

    /// Best voice for reading steps aloud in the active language
    #[must_use]
    pub fn preferred_voice<'a>(&self, voices: &'a [Voice]) -> Option<&'a Voice> {
        speech::select_voice(voices, self.language.code())
    }

    // ========================================================================
    // Sharing
    // ========================================================================

    /// Share payload for a recipe
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if the recipe cannot be encoded.
    pub fn share_recipe(&mut self, recipe: &Recipe) -> AppResult<ShareContent> {
        match share::share_content(
            &self.share_base_url,
            recipe,
            self.messages().share_title_prefix,
        ) {
            Ok(content) => Ok(content),
            Err(e) => self.fail(e, FailureContext::Share),
        }
    }

    /// Open a shared link, making its recipe the open recipe
    ///
    /// Returns the link with the recipe parameter removed, or `None` when the
    /// link carries no recipe.
    ///
    /// # Errors
    ///
    /// Returns `InvalidShareLink` for unparseable links or payloads.
    pub fn open_shared_link(&mut self, link: &str) -> AppResult<Option<Url>> {
        let url = match Url::parse(link.trim()) {
            Ok(url) => url,
            Err(e) => {
                let error = AppError::invalid_share_link(INVALID_LINK_MESSAGE).with_source(e);
                return self.fail(error, FailureContext::Fetch);
            }
        };
        match share::take_shared_recipe(&url) {
            Ok(Some((recipe, cleaned))) => {
                info!(recipe = %recipe.name, "Opened shared recipe");
                self.selected = Some(recipe);
                Ok(Some(cleaned))
            }
            Ok(None) => Ok(None),
            Err(e) => self.fail(e, FailureContext::Fetch),
        }
    }

    // ========================================================================
    // Shopping list
    // ========================================================================

    /// Add an item by name; returns whether it was new
    pub fn add_to_shopping_list(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let added = self.shopping.add(name);
        if added {
            self.persistence.save_shopping_list(self.shopping.items());
        }
        added
    }

    /// Add a recipe ingredient as `"{name} ({amount})"`
    pub fn add_ingredient_to_shopping_list(&mut self, ingredient: &Ingredient) -> bool {
        self.add_to_shopping_list(&format!("{} ({})", ingredient.name, ingredient.amount))
    }

    /// Edit an item's name, quantity, or completion
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank name or zero quantity and
    /// `ResourceNotFound` for an unknown id.
    pub fn update_shopping_item(&mut self, item: ShoppingListItem) -> AppResult<()> {
        self.shopping.update(item)?;
        self.persistence.save_shopping_list(self.shopping.items());
        Ok(())
    }

    /// Remove an item; returns whether it existed
    pub fn remove_shopping_item(&mut self, id: &str) -> bool {
        let removed = self.shopping.remove(id);
        if removed {
            self.persistence.save_shopping_list(self.shopping.items());
        }
        removed
    }

    /// Tick or untick an item; `None` for an unknown id
    pub fn toggle_shopping_item(&mut self, id: &str) -> Option<bool> {
        let state = self.shopping.toggle_completed(id)?;
        self.persistence.save_shopping_list(self.shopping.items());
        Some(state)
    }
}
