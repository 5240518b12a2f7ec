// ABOUTME: Core types and constants for the Cookly recipe assistant
// ABOUTME: Foundation crate with error handling, recipe models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors

#![deny(unsafe_code)]

//! # Cookly Core
//!
//! Shared types for the Cookly fridge-to-recipe assistant. This crate changes
//! rarely and has no I/O.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, and `AppResult`
//! - **models**: `Recipe`, `Ingredient`, `InstructionStep`, `ShoppingListItem`
//! - **constants**: storage keys, queue pacing, and model defaults

/// Unified error handling with error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Recipe and shopping list data models
pub mod models;
