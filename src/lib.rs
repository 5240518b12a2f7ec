// ABOUTME: Main library entry point for the Cookly fridge-to-recipe assistant
// ABOUTME: Wires the Gemini gateway, image queue, local storage, sharing, and languages into a session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors

#![deny(unsafe_code)]

//! # Cookly
//!
//! Turn a photo of the inside of a fridge into recipe suggestions.
//!
//! ## Features
//!
//! - **Photo analysis**: validate that a photo shows food, then list its ingredients
//! - **Recipe suggestions**: up to four recipes honoring dietary filters and cuisines
//! - **Images**: dish and step images through a rate-limited request queue
//! - **Favorites and shopping list**: persisted in a local key-value store
//! - **Share links**: a recipe encoded into a URL query parameter
//! - **Languages**: fourteen interface languages with model-side translation
//!
//! ## Architecture
//!
//! - **llm**: generative provider trait and the Gemini implementation
//! - **gateway**: typed operations over the provider with structured output
//! - **images**: image backends and the FIFO request queue
//! - **storage**: key-value stores and favorites/language/shopping persistence
//! - **assistant**: the session object tying everything together
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use cookly::assistant::RecipeAssistant;
//! use cookly::config::AssistantConfig;
//! use cookly::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = AssistantConfig::from_env()?;
//!     let mut assistant = RecipeAssistant::from_config(&config)?;
//!
//!     assistant.add_ingredient("eggs");
//!     assistant.add_ingredient("spinach");
//!     for recipe in assistant.search().await? {
//!         println!("{} ({} min)", recipe.name, recipe.prep_time);
//!     }
//!     assistant.resolve_images().await;
//!     Ok(())
//! }
//! ```

pub use cookly_core::{constants, errors, models};

/// Recipe assistant session
pub mod assistant;

/// Environment configuration
pub mod config;

/// Saved favorite recipes
pub mod favorites;

/// Typed recipe operations over the generative backend
pub mod gateway;

/// Interface languages and localized messages
pub mod i18n;

/// Image backends and the rate-limited request queue
pub mod images;

/// Generative provider abstraction and the Gemini client
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Recipe share links
pub mod share;

/// Shopping list
pub mod shopping;

/// Voice selection for reading steps aloud
pub mod speech;

/// Local key-value persistence
pub mod storage;

/// HTTP client helpers
pub mod utils;

pub use assistant::RecipeAssistant;
pub use errors::{AppError, AppResult, ErrorCode};
pub use i18n::Language;
pub use models::{DietaryFilter, Difficulty, Ingredient, InstructionStep, Recipe, ShoppingListItem};
