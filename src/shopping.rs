// ABOUTME: Shopping list with case-insensitive de-duplication and validated edits
// ABOUTME: Item ids embed the creation time in epoch milliseconds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors

use chrono::Utc;

use crate::errors::{AppError, AppResult};
use crate::models::ShoppingListItem;

/// Items the user wants to buy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShoppingList {
    items: Vec<ShoppingListItem>,
}

impl ShoppingList {
    /// Wrap items loaded from storage
    #[must_use]
    pub fn from_items(items: Vec<ShoppingListItem>) -> Self {
        Self { items }
    }

    /// Add an item stamped with the current time
    ///
    /// Returns `false` without changing anything if an item with the same
    /// name (ignoring case) is already listed.
    pub fn add(&mut self, name: &str) -> bool {
        let now = u128::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        self.add_at(name, now)
    }

    /// Add an item with an explicit creation time
    ///
    /// An id already in use gets a `-2`, `-3`, ... suffix.
    pub fn add_at(&mut self, name: &str, created_at_millis: u128) -> bool {
        if self.items.iter().any(|item| item.has_name(name)) {
            return false;
        }
        let mut item = ShoppingListItem::new(name, created_at_millis);
        if self.get(&item.id).is_some() {
            let base = item.id.clone();
            let mut suffix = 2_u32;
            while self.get(&item.id).is_some() {
                item.id = format!("{base}-{suffix}");
                suffix += 1;
            }
        }
        self.items.push(item);
        true
    }

    /// Replace the item with the same id
    ///
    /// The name is trimmed before saving.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank name or zero quantity, and
    /// `ResourceNotFound` if no item has this id.
    pub fn update(&mut self, updated: ShoppingListItem) -> AppResult<()> {
        let name = updated.name.trim();
        if name.is_empty() {
            return Err(AppError::invalid_input("Item name cannot be empty"));
        }
        if updated.quantity == 0 {
            return Err(AppError::invalid_input("Quantity must be greater than zero"));
        }
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == updated.id)
            .ok_or_else(|| AppError::not_found(format!("Shopping list item {}", updated.id)))?;
        *item = ShoppingListItem {
            name: name.to_owned(),
            ..updated
        };
        Ok(())
    }

    /// Remove by id; returns whether anything was removed
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Flip the completed flag; returns the new state, or `None` for an unknown id
    pub fn toggle_completed(&mut self, id: &str) -> Option<bool> {
        let item = self.items.iter_mut().find(|item| item.id == id)?;
        item.completed = !item.completed;
        Some(item.completed)
    }

    /// Item with this id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ShoppingListItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items in insertion order
    #[must_use]
    pub fn items(&self) -> &[ShoppingListItem] {
        &self.items
    }

    /// Number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_add_dedupes_case_insensitively() {
        let mut list = ShoppingList::default();
        assert!(list.add_at("Olive Oil", 1_700_000_000_000));
        assert!(!list.add_at("olive oil", 1_700_000_000_001));
        assert_eq!(list.len(), 1);
        assert_eq!(list.items()[0].id, "1700000000000-Olive-Oil");
        assert_eq!(list.items()[0].quantity, 1);
        assert!(!list.items()[0].completed);
    }

    #[test]
    fn test_colliding_ids_get_a_suffix() {
        let mut list = ShoppingList::default();
        assert!(list.add_at("a b", 42));
        assert!(list.add_at("a-b", 42));
        assert!(list.add_at("a\tb", 42));
        let ids: Vec<&str> = list.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["42-a-b", "42-a-b-2", "42-a-b-3"]);

        assert!(list.remove("42-a-b"));
        assert_eq!(list.len(), 2);
        assert_eq!(list.toggle_completed("42-a-b-2"), Some(true));
        assert!(!list.get("42-a-b-3").unwrap().completed);
    }

    #[test]
    fn test_update_validates_and_trims() {
        let mut list = ShoppingList::default();
        list.add_at("milk", 1);
        let id = list.items()[0].id.clone();

        let blank = ShoppingListItem {
            name: "   ".to_owned(),
            ..list.items()[0].clone()
        };
        assert_eq!(list.update(blank).unwrap_err().code, ErrorCode::InvalidInput);

        let zero = ShoppingListItem {
            quantity: 0,
            ..list.items()[0].clone()
        };
        assert_eq!(list.update(zero).unwrap_err().code, ErrorCode::InvalidInput);

        let good = ShoppingListItem {
            name: "  oat milk ".to_owned(),
            quantity: 2,
            ..list.items()[0].clone()
        };
        list.update(good).unwrap();
        let item = list.get(&id).unwrap();
        assert_eq!(item.name, "oat milk");
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_update_unknown_id() {
        let mut list = ShoppingList::default();
        let item = ShoppingListItem::new("eggs", 5);
        assert_eq!(
            list.update(item).unwrap_err().code,
            ErrorCode::ResourceNotFound
        );
    }

    #[test]
    fn test_toggle_and_remove() {
        let mut list = ShoppingList::default();
        list.add_at("bread", 9);
        let id = list.items()[0].id.clone();
        assert_eq!(list.toggle_completed(&id), Some(true));
        assert_eq!(list.toggle_completed(&id), Some(false));
        assert_eq!(list.toggle_completed("missing"), None);
        assert!(list.remove(&id));
        assert!(!list.remove(&id));
        assert!(list.is_empty());
    }
}
