// ABOUTME: Favorite recipes collection keyed by recipe name
// ABOUTME: Toggle, lookup, in-place update, and missing-image discovery
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors

use crate::models::Recipe;

/// The user's saved recipes, in the order they were saved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    recipes: Vec<Recipe>,
}

impl Favorites {
    /// Wrap recipes loaded from storage
    #[must_use]
    pub fn from_recipes(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// Add the recipe if no favorite has its name, otherwise remove that favorite
    ///
    /// Returns `true` when the recipe is a favorite afterwards.
    pub fn toggle(&mut self, recipe: &Recipe) -> bool {
        if self.contains(&recipe.name) {
            self.recipes.retain(|r| r.name != recipe.name);
            false
        } else {
            self.recipes.push(recipe.clone());
            true
        }
    }

    /// Whether a favorite with this name exists
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.recipes.iter().any(|r| r.name == name)
    }

    /// Favorite with this name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.name == name)
    }

    /// Replace every favorite sharing the recipe's name; returns whether any matched
    pub fn update(&mut self, recipe: &Recipe) -> bool {
        let mut updated = false;
        for favorite in self.recipes.iter_mut().filter(|r| r.same_recipe(recipe)) {
            favorite.clone_from(recipe);
            updated = true;
        }
        updated
    }

    /// Remove by name; returns whether anything was removed
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.recipes.len();
        self.recipes.retain(|r| r.name != name);
        self.recipes.len() != before
    }

    /// Favorites whose main image still has to be generated
    pub fn missing_images(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes
            .iter()
            .filter(|r| r.pending_image_prompt().is_some())
    }

    /// Replace the whole collection (after translation)
    pub fn replace_all(&mut self, recipes: Vec<Recipe>) {
        self.recipes = recipes;
    }

    /// Favorites as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Mutable access for image updates
    pub fn as_mut_slice(&mut self) -> &mut [Recipe] {
        &mut self.recipes
    }

    /// Number of favorites
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Whether there are no favorites
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
