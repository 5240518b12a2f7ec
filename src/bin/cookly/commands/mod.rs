// ABOUTME: Command handlers for the cookly CLI
// ABOUTME: Shared helpers for language switching and localized error reporting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors

pub mod favorites;
pub mod recipes;
pub mod shopping;

use cookly::assistant::RecipeAssistant;
use cookly::errors::AppError;
use cookly::i18n::Language;
use tracing::warn;

/// Wrap an assistant error with the message the session recorded for it
pub fn localized(assistant: &RecipeAssistant, error: AppError) -> anyhow::Error {
    let message = assistant
        .last_error()
        .map_or_else(|| error.message.clone(), str::to_owned);
    anyhow::Error::new(error).context(message)
}

/// Switch language for this run; translation failures are reported but not fatal
pub async fn switch_language(assistant: &mut RecipeAssistant, code: &str) {
    if Language::parse(code).is_none() {
        warn!(code, "Unknown language code, using English");
    }
    if let Err(e) = assistant.set_language(code).await {
        warn!(error = %e, "Saved recipes were not translated");
        if let Some(message) = assistant.last_error() {
            eprintln!("{message}");
        }
    }
}

/// Show the active language and the choices, or switch to `code`
pub async fn language(assistant: &mut RecipeAssistant, code: Option<&str>) {
    if let Some(code) = code {
        switch_language(assistant, code).await;
        let active = assistant.language();
        println!("Language: {} ({})", active.native_name(), active.code());
        return;
    }

    let active = assistant.language();
    for language in Language::ALL {
        let mark = if language == active { "*" } else { " " };
        println!("{mark} {}  {}", language.code(), language.native_name());
    }
}
