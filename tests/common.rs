// ABOUTME: Shared test utilities for integration tests
// ABOUTME: Scripted model provider, recording image backend, recipe fixtures, and session setup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `cookly`
//!
//! Nothing here touches the network: the model is a [`ScriptedProvider`]
//! replaying queued answers and images come from a [`RecordingImageBackend`].

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use cookly::assistant::RecipeAssistant;
use cookly::errors::{AppError, AppResult};
use cookly::gateway::RecipeGateway;
use cookly::images::{ImageBackend, ImageQueue};
use cookly::llm::{
    GenerateRequest, GenerateResponse, LlmCapabilities, LlmProvider, WebSource,
};
use cookly::models::{Difficulty, Ingredient, InstructionStep, Recipe};
use cookly::storage::LocalPersistence;
use serde_json::json;
use tokio::time::Instant;
use url::Url;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

// ============================================================================
// Scripted Provider
// ============================================================================

/// Model provider that answers from a queue and records every request
#[derive(Default)]
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<AppResult<GenerateResponse>>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_response(&self, response: AppResult<GenerateResponse>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn push_text(&self, text: impl Into<String>) {
        self.push_response(Ok(GenerateResponse::from_text(text)));
    }

    pub fn push_json(&self, value: &serde_json::Value) {
        self.push_text(value.to_string());
    }

    pub fn push_error(&self, error: AppError) {
        self.push_response(Err(error));
    }

    pub fn push_grounded(&self, text: &str, sources: &[(&str, &str)]) {
        let mut response = GenerateResponse::from_text(text);
        response.sources = sources
            .iter()
            .map(|(uri, title)| WebSource {
                uri: (*uri).to_owned(),
                title: (*title).to_owned(),
            })
            .collect();
        self.push_response(Ok(response));
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Prompt text of the `index`th request
    pub fn prompt(&self, index: usize) -> String {
        self.requests.lock().unwrap()[index].prompt_text()
    }

    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn display_name(&self) -> &'static str {
        "Scripted"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::recipe_assistant()
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn generate(&self, request: &GenerateRequest) -> AppResult<GenerateResponse> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::internal("No scripted response left")))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

// ============================================================================
// Recording Image Backend
// ============================================================================

/// Image backend that records when each prompt was serviced
pub struct RecordingImageBackend {
    calls: Mutex<Vec<(String, Instant)>>,
    failing: Mutex<HashSet<String>>,
    work: Duration,
}

impl RecordingImageBackend {
    pub fn new() -> Arc<Self> {
        Self::with_work(Duration::ZERO)
    }

    /// Backend whose calls take `work` to complete
    pub fn with_work(work: Duration) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
            work,
        })
    }

    pub fn fail_on(&self, prompt: &str) {
        self.failing.lock().unwrap().insert(prompt.to_owned());
    }

    pub fn calls(&self) -> Vec<(String, Instant)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls().into_iter().map(|(prompt, _)| prompt).collect()
    }

    pub fn url_for(prompt: &str) -> String {
        format!("https://images.test/{}", prompt.replace(' ', "-"))
    }
}

#[async_trait]
impl ImageBackend for RecordingImageBackend {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn default_delay(&self) -> Duration {
        Duration::from_millis(2_000)
    }

    async fn generate(&self, prompt: &str) -> AppResult<String> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_owned(), Instant::now()));
        if !self.work.is_zero() {
            tokio::time::sleep(self.work).await;
        }
        if self.failing.lock().unwrap().contains(prompt) {
            return Err(AppError::external_service("images", format!("cannot draw {prompt}")));
        }
        Ok(Self::url_for(prompt))
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// A complete recipe with one missing ingredient and two steps
pub fn sample_recipe(name: &str) -> Recipe {
    Recipe {
        name: name.to_owned(),
        description: format!("A quick {name}"),
        difficulty: Difficulty::Easy,
        prep_time: 10,
        active_cooking_time: Some(15),
        calories: 420,
        nutrition: None,
        ingredients: vec![
            Ingredient {
                name: "eggs".to_owned(),
                amount: "3".to_owned(),
                is_available: true,
            },
            Ingredient {
                name: "feta".to_owned(),
                amount: "100 g".to_owned(),
                is_available: false,
            },
        ],
        steps: vec![
            InstructionStep {
                text: "Whisk the eggs".to_owned(),
                image_prompt: Some(format!("whisking eggs for {name}")),
                image_url: None,
            },
            InstructionStep::new("Bake until set"),
        ],
        image_prompt: format!("{name} on a plate"),
        image_url: None,
        cuisine: Some("Greek".to_owned()),
        restrictions: None,
    }
}

/// Model output for a recipe list
pub fn recipes_json(recipes: &[Recipe]) -> serde_json::Value {
    json!({ "recipes": recipes })
}

pub fn share_base() -> Url {
    Url::parse("https://cookly.test/").unwrap()
}

/// Session over a scripted model, a recording backend, and in-memory storage
pub struct TestSession {
    pub assistant: RecipeAssistant,
    pub provider: Arc<ScriptedProvider>,
    pub backend: Arc<RecordingImageBackend>,
    pub persistence: LocalPersistence,
}

pub fn test_session() -> TestSession {
    test_session_with(LocalPersistence::in_memory())
}

pub fn test_session_with(persistence: LocalPersistence) -> TestSession {
    init_test_logging();
    let provider = ScriptedProvider::new();
    let backend = RecordingImageBackend::new();
    let gateway = RecipeGateway::new(provider.clone());
    let images = ImageQueue::with_delay(backend.clone(), Duration::from_millis(2_000));
    let assistant = RecipeAssistant::new(gateway, images, persistence.clone(), share_base());
    TestSession {
        assistant,
        provider,
        backend,
        persistence,
    }
}
