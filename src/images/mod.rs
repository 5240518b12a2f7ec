// ABOUTME: Recipe image resolution: backends, the rate-limited queue, and applying results
// ABOUTME: Images are requested through the queue and matched back to recipes by name
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors

//! Recipe images.
//!
//! Recipes arrive without images. Their English `imagePrompt`s are sent
//! through the [`ImageQueue`] and the resulting URLs are written back by
//! recipe name, because the recipe list may have been replaced while the
//! images were in flight.

mod backend;
mod queue;

pub use backend::{GenerativeImageBackend, ImageBackend, KeywordImageBackend};
pub use queue::{ImageQueue, QueueStats};

use futures_util::future::{join_all, BoxFuture};
use tracing::{debug, warn};

use crate::models::Recipe;

/// Which image slot of a recipe a result belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    /// Finished-dish image
    Main,
    /// Illustration for the step at this index
    Step(usize),
}

/// An image source ready to be written into a recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    /// Name of the recipe the image was requested for
    pub recipe_name: String,
    /// Slot within that recipe
    pub slot: ImageSlot,
    /// URL or `data:` URI
    pub url: String,
}

/// An image request already in the queue
///
/// Resolves to `None` when the backend failed; the failure has been logged.
pub type PendingImage = BoxFuture<'static, Option<ResolvedImage>>;

/// Enqueue one image request for a recipe slot
pub fn request_image(
    queue: &ImageQueue,
    recipe_name: &str,
    slot: ImageSlot,
    prompt: &str,
) -> PendingImage {
    let recipe_name = recipe_name.to_owned();
    let outcome = queue.request_image(prompt);
    Box::pin(async move {
        match outcome.await {
            Ok(url) => Some(ResolvedImage {
                recipe_name,
                slot,
                url,
            }),
            Err(e) => {
                warn!(recipe = %recipe_name, ?slot, error = %e, "Failed to generate recipe image");
                None
            }
        }
    })
}

/// Enqueue main images for every recipe that has a prompt but no image
///
/// Requests join the queue in list order before this returns.
pub fn request_main_images(queue: &ImageQueue, recipes: &[Recipe]) -> Vec<PendingImage> {
    let pending: Vec<PendingImage> = recipes
        .iter()
        .filter_map(|recipe| {
            recipe
                .pending_image_prompt()
                .map(|prompt| request_image(queue, &recipe.name, ImageSlot::Main, prompt))
        })
        .collect();
    debug!(count = pending.len(), "Requested main recipe images");
    pending
}

/// Wait for queued requests; failed ones are dropped
pub async fn resolve_all(pending: Vec<PendingImage>) -> Vec<ResolvedImage> {
    join_all(pending).await.into_iter().flatten().collect()
}

/// Enqueue and wait for main images of `recipes`
pub async fn resolve_main_images(queue: &ImageQueue, recipes: &[Recipe]) -> Vec<ResolvedImage> {
    resolve_all(request_main_images(queue, recipes)).await
}

/// Write a resolved image into every recipe with a matching name
///
/// Returns whether any recipe was updated. Step indexes past the end of a
/// recipe's steps are ignored.
pub fn apply_image(recipes: &mut [Recipe], image: &ResolvedImage) -> bool {
    let mut applied = false;
    for recipe in recipes.iter_mut().filter(|r| r.name == image.recipe_name) {
        match image.slot {
            ImageSlot::Main => {
                recipe.image_url = Some(image.url.clone());
                applied = true;
            }
            ImageSlot::Step(index) => {
                if let Some(step) = recipe.steps.get_mut(index) {
                    step.image_url = Some(image.url.clone());
                    applied = true;
                }
            }
        }
    }
    applied
}
