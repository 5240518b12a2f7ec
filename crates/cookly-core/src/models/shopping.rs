// ABOUTME: Shopping list item model
// ABOUTME: Items carry a generated id, display name, quantity, and completion flag
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors

use serde::{Deserialize, Serialize};

/// One entry on the shopping list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    /// Generated identifier, `{epoch millis}-{name with whitespace as '-'}`
    pub id: String,
    /// Item name as entered
    pub name: String,
    /// How many to buy, always positive
    pub quantity: u32,
    /// Whether the item has been bought
    #[serde(default)]
    pub completed: bool,
}

impl ShoppingListItem {
    /// Create a fresh item with quantity 1
    #[must_use]
    pub fn new(name: impl Into<String>, created_at_millis: u128) -> Self {
        let name = name.into();
        let slug: String = name
            .chars()
            .map(|c| if c.is_whitespace() { '-' } else { c })
            .collect();
        Self {
            id: format!("{created_at_millis}-{slug}"),
            name,
            quantity: 1,
            completed: false,
        }
    }

    /// Case-insensitive name comparison used for de-duplication
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}
