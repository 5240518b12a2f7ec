// ABOUTME: Application-wide constants for the Cookly assistant
// ABOUTME: Storage keys, service names, image queue pacing, and model defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors

/// Service identity used in logs
pub mod service_names {
    /// Library and binary name
    pub const COOKLY: &str = "cookly";
    /// Name of the generative backend in error messages
    pub const GEMINI_API: &str = "Gemini API";
}

/// Keys in the local key-value store
pub mod storage_keys {
    /// Favorite recipes, image data stripped
    pub const FAVORITES: &str = "favoriteRecipes";
    /// Active language code
    pub const LANGUAGE: &str = "cookly-lang";
    /// Shopping list items
    pub const SHOPPING_LIST: &str = "shoppingList";
}

/// Image request pacing
pub mod image_queue {
    /// Delay after each keyword-search image request (milliseconds)
    pub const KEYWORD_DELAY_MS: u64 = 2_000;
    /// Delay after each generative image request (milliseconds)
    pub const GENERATIVE_DELAY_MS: u64 = 5_000;
    /// Maximum keywords kept from a prompt for keyword-search images
    pub const MAX_KEYWORDS: usize = 4;
    /// Keywords used when a prompt has none left after cleanup
    pub const FALLBACK_KEYWORDS: &str = "food,cooking,recipe";
    /// Keyword image search endpoint with fixed 16:9 dimensions
    pub const KEYWORD_IMAGE_BASE_URL: &str = "https://source.unsplash.com/800x450/";
}

/// Generative model defaults
pub mod models {
    /// Text and vision model
    pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
    /// Image output model
    pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
    /// Maximum number of recipes requested per search
    pub const MAX_RECIPE_SUGGESTIONS: usize = 4;
    /// MIME type assumed for uploaded fridge photos
    pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";
}

/// Share link format
pub mod share {
    /// Query parameter carrying the encoded recipe
    pub const RECIPE_PARAM: &str = "recipe";
    /// Default origin used when building share links
    pub const DEFAULT_BASE_URL: &str = "https://cookly.app/";
}
