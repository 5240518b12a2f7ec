// ABOUTME: Text-to-speech voice selection for reading cooking steps aloud
// ABOUTME: Prefers a female voice in the exact language, then any exact match, then the base language
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors

use serde::{Deserialize, Serialize};

/// A synthesis voice offered by the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    /// Platform voice name, e.g. "Google UK English Female"
    pub name: String,
    /// BCP 47 tag, e.g. "en-GB"
    pub lang: String,
}

impl Voice {
    /// Convenience constructor
    #[must_use]
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }
}

/// Pick the voice for `language`
///
/// Order of preference:
/// 1. `lang` equals `language` and the name contains "female" (any case)
/// 2. `lang` equals `language`
/// 3. `lang` starts with the primary subtag of `language`
#[must_use]
pub fn select_voice<'a>(voices: &'a [Voice], language: &str) -> Option<&'a Voice> {
    let primary = language.split('-').next().unwrap_or(language);
    voices
        .iter()
        .find(|v| v.lang == language && v.name.to_lowercase().contains("female"))
        .or_else(|| voices.iter().find(|v| v.lang == language))
        .or_else(|| voices.iter().find(|v| v.lang.starts_with(primary)))
}
