// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generative API traits for text and image production.

use async_trait::async_trait;

use crate::error::AstropostError;
use crate::types::HealthStatus;

/// Text-generation collaborator (Mistral chat completions).
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Requests a completion for `prompt`, bounded by `max_tokens`.
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, AstropostError>;

    /// Checks the provider's health endpoint.
    async fn health_check(&self) -> Result<HealthStatus, AstropostError>;
}

/// Image-generation collaborator (neuroimg.art free-generate).
///
/// Image enrichment is strictly best-effort: both operations express
/// failure as `None` so callers fall through to text-only delivery
/// without error plumbing.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Requests an image for `prompt`, returning its URL if the service
    /// signals success within its time budget.
    async fn generate(&self, prompt: &str) -> Option<String>;

    /// Fetches raw image bytes from `url`. `None` on non-200 status or
    /// transport error.
    async fn download(&self, url: &str) -> Option<Vec<u8>>;
}
