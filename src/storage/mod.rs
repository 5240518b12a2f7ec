// ABOUTME: Local persistence for favorites, language, and the shopping list
// ABOUTME: Pluggable string key-value store with file-backed and in-memory implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors

//! # Local Storage
//!
//! A small string key-value store in the spirit of browser local storage.
//! [`LocalPersistence`] layers typed JSON accessors on top. Storage problems
//! are logged and swallowed there: a broken store must never break a cooking
//! session.

/// File-backed store, one JSON file per key
pub mod file;
/// In-memory store for tests and ephemeral sessions
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::constants::storage_keys;
use crate::errors::{AppError, AppResult};
use crate::models::{Recipe, ShoppingListItem};

/// String key-value store
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, if any
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing medium cannot be read.
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Delete `key`; deleting a missing key is not an error
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the key exists but cannot be removed.
    fn remove(&self, key: &str) -> AppResult<()>;
}

/// Reject keys that could escape a storage directory
pub(crate) fn validate_key(key: &str) -> AppResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(AppError::invalid_input(format!("Invalid storage key '{key}'")))
    }
}

/// Typed accessors for everything the assistant persists
#[derive(Clone)]
pub struct LocalPersistence {
    store: Arc<dyn KeyValueStore>,
}

impl LocalPersistence {
    /// Wrap a key-value store
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// In-memory persistence that forgets everything on drop
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// The underlying store
    #[must_use]
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        self.store
            .get(key)?
            .map(|raw| serde_json::from_str(&raw).map_err(AppError::from))
            .transpose()
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> AppResult<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }

    fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.read_json(key) {
            Ok(value) => value.unwrap_or_default(),
            Err(e) => {
                warn!(key, error = %e, "Failed to load from local storage");
                T::default()
            }
        }
    }

    fn save_logged<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        match self.write_json(key, value) {
            Ok(()) => debug!(key, "Saved to local storage"),
            Err(e) => warn!(key, error = %e, "Failed to save to local storage"),
        }
    }

    /// Saved favorites; image fields are never present
    #[must_use]
    ///
    /// Entries that no longer parse are skipped so one bad record cannot
    /// empty the whole list.
    pub fn load_favorites(&self) -> Vec<Recipe> {
        let entries: Vec<serde_json::Value> = self.load_or_default(storage_keys::FAVORITES);
        entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(recipe) => Some(recipe),
                Err(e) => {
                    warn!(index, error = %e, "Skipping unreadable favorite");
                    None
                }
            })
            .collect()
    }

    /// Persist favorites with every main and step image removed
    pub fn save_favorites(&self, favorites: &[Recipe]) {
        let stripped: Vec<Recipe> = favorites.iter().map(Recipe::without_images).collect();
        self.save_logged(storage_keys::FAVORITES, &stripped);
    }

    /// Stored language code, unvalidated
    #[must_use]
    pub fn load_language(&self) -> Option<String> {
        match self.store.get(storage_keys::LANGUAGE) {
            Ok(code) => code,
            Err(e) => {
                warn!(error = %e, "Failed to load language");
                None
            }
        }
    }

    /// Persist the active language code
    pub fn save_language(&self, code: &str) {
        if let Err(e) = self.store.set(storage_keys::LANGUAGE, code) {
            warn!(error = %e, "Failed to save language");
        }
    }

    /// Saved shopping list
    #[must_use]
    pub fn load_shopping_list(&self) -> Vec<ShoppingListItem> {
        self.load_or_default(storage_keys::SHOPPING_LIST)
    }

    /// Persist the shopping list
    pub fn save_shopping_list(&self, items: &[ShoppingListItem]) {
        self.save_logged(storage_keys::SHOPPING_LIST, items);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("favoriteRecipes").is_ok());
        assert!(validate_key("cookly-lang").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("a/b").is_err());
    }

    #[test]
    fn test_corrupt_favorites_load_as_empty() {
        let persistence = LocalPersistence::in_memory();
        persistence
            .store()
            .set(storage_keys::FAVORITES, "{not json")
            .unwrap();
        assert!(persistence.load_favorites().is_empty());
    }

    #[test]
    fn test_unreadable_favorite_is_skipped() {
        let persistence = LocalPersistence::in_memory();
        persistence
            .store()
            .set(
                storage_keys::FAVORITES,
                r#"[{"name":"Soup","description":"Warm"},{"description":"no name"}]"#,
            )
            .unwrap();
        let favorites = persistence.load_favorites();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].name, "Soup");
    }

    #[test]
    fn test_language_round_trip() {
        let persistence = LocalPersistence::in_memory();
        assert_eq!(persistence.load_language(), None);
        persistence.save_language("fr");
        assert_eq!(persistence.load_language().as_deref(), Some("fr"));
    }
}
