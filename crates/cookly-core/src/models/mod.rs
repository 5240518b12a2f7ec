// ABOUTME: Core data models for recipes and the shopping list
// ABOUTME: Re-exports recipe and shopping list types under a single module
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors

mod recipe;
mod shopping;

pub use recipe::{DietaryFilter, Difficulty, Ingredient, InstructionStep, Nutrition, Recipe};
pub use shopping::ShoppingListItem;
