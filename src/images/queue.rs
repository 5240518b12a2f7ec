// ABOUTME: Rate-limited FIFO queue that serializes image requests to a single backend
// ABOUTME: One drain task services requests in order with a fixed pause after each one
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Cookly Contributors

//! # Image Request Queue
//!
//! Many call sites want images at once: every suggestion's main image, step
//! images, favorites with missing images. [`ImageQueue`] funnels them to the
//! backend one at a time:
//!
//! - `request_image` enqueues immediately and returns a future for the result
//! - a single drain task pops requests in FIFO order
//! - after each backend call (success or failure) the task sleeps for the
//!   configured delay before taking the next request
//! - when the queue is found empty the task exits; the next enqueue starts a
//!   new one, so the first request on an idle queue is never delayed
//!
//! There is no de-duplication, cancellation, or retry. Dropping the returned
//! future discards the result but the request is still serviced.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use super::backend::ImageBackend;
use crate::errors::{AppError, AppResult};

type ImageSender = oneshot::Sender<AppResult<String>>;

struct QueuedImageRequest {
    prompt: String,
    reply: ImageSender,
}

#[derive(Default)]
struct QueueState {
    pending: VecDeque<QueuedImageRequest>,
    draining: bool,
}

struct QueueInner {
    state: Mutex<QueueState>,
    backend: Arc<dyn ImageBackend>,
    delay: Duration,
    drains_started: AtomicU64,
    completed: AtomicU64,
    failed: AtomicU64,
}

impl QueueInner {
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pop the next request, or mark the queue idle if there is none
    ///
    /// Both happen under one lock so an enqueue can never observe
    /// `draining == true` after the loop has decided to exit.
    fn next_or_finish(&self) -> Option<QueuedImageRequest> {
        let mut state = self.lock();
        let next = state.pending.pop_front();
        if next.is_none() {
            state.draining = false;
        }
        next
    }
}

/// Counters describing queue activity since creation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueStats {
    /// Number of times a drain task was started
    pub drains_started: u64,
    /// Requests that resolved with an image
    pub completed: u64,
    /// Requests that resolved with an error
    pub failed: u64,
}

/// Handle to a shared image request queue
///
/// Clones share the same queue and drain task.
#[derive(Clone)]
pub struct ImageQueue {
    inner: Arc<QueueInner>,
}

impl ImageQueue {
    /// Create a queue using the backend's own delay
    #[must_use]
    pub fn new(backend: Arc<dyn ImageBackend>) -> Self {
        let delay = backend.default_delay();
        Self::with_delay(backend, delay)
    }

    /// Create a queue with an explicit delay between requests
    #[must_use]
    pub fn with_delay(backend: Arc<dyn ImageBackend>, delay: Duration) -> Self {
        Self {
            inner: Arc::new(QueueInner {
                state: Mutex::new(QueueState::default()),
                backend,
                delay,
                drains_started: AtomicU64::new(0),
                completed: AtomicU64::new(0),
                failed: AtomicU64::new(0),
            }),
        }
    }

    /// Enqueue an image request
    ///
    /// The request joins the queue before this returns; awaiting the future
    /// only waits for the outcome. Must be called inside a Tokio runtime.
    pub fn request_image(
        &self,
        prompt: impl Into<String>,
    ) -> impl Future<Output = AppResult<String>> + Send + 'static {
        let prompt = prompt.into();
        let (reply, outcome) = oneshot::channel();

        let start_drain = {
            let mut state = self.inner.lock();
            debug!(prompt = %prompt, queued = state.pending.len() + 1, "Image request queued");
            state.pending.push_back(QueuedImageRequest { prompt, reply });
            !std::mem::replace(&mut state.draining, true)
        };

        if start_drain {
            self.inner.drains_started.fetch_add(1, Ordering::Relaxed);
            tokio::spawn(Self::drain(Arc::clone(&self.inner)));
        }

        async move {
            match outcome.await {
                Ok(result) => result,
                Err(_) => Err(AppError::internal("Image queue dropped the request")),
            }
        }
    }

    async fn drain(inner: Arc<QueueInner>) {
        info!(backend = inner.backend.name(), "Image queue draining");

        while let Some(request) = inner.next_or_finish() {
            let result = inner.backend.generate(&request.prompt).await;
            match &result {
                Ok(_) => {
                    inner.completed.fetch_add(1, Ordering::Relaxed);
                    debug!(prompt = %request.prompt, "Image request completed");
                }
                Err(e) => {
                    inner.failed.fetch_add(1, Ordering::Relaxed);
                    warn!(prompt = %request.prompt, error = %e, "Image request failed");
                }
            }
            if request.reply.send(result).is_err() {
                debug!("Image requester went away before the result arrived");
            }

            tokio::time::sleep(inner.delay).await;
        }

        debug!("Image queue idle");
    }

    /// Requests waiting for the backend (excludes one in flight)
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.lock().pending.len()
    }

    /// Whether a drain task is running
    #[must_use]
    pub fn is_draining(&self) -> bool {
        self.inner.lock().draining
    }

    /// Delay enforced after each request
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.inner.delay
    }

    /// Activity counters
    #[must_use]
    pub fn stats(&self) -> QueueStats {
        QueueStats {
            drains_started: self.inner.drains_started.load(Ordering::Relaxed),
            completed: self.inner.completed.load(Ordering::Relaxed),
            failed: self.inner.failed.load(Ordering::Relaxed),
        }
    }
}
