// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock text and image generators for deterministic testing.
//!
//! `MockTextGenerator` implements `TextGenerator` with pre-configured
//! responses popped from a FIFO queue; `MockImageSource` returns fixed
//! optional values, modeling the best-effort contract.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use astropost_core::AstropostError;
use astropost_core::traits::{ImageSource, TextGenerator};
use astropost_core::types::HealthStatus;

/// A mock text generator that returns pre-configured responses.
///
/// Responses are popped from a FIFO queue. When the queue is empty,
/// a default "mock response" text is returned. An `Err` entry models
/// an upstream API failure.
pub struct MockTextGenerator {
    responses: Arc<Mutex<VecDeque<Result<String, String>>>>,
    health: HealthStatus,
}

impl MockTextGenerator {
    /// Create a mock generator with an empty response queue.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            health: HealthStatus::Healthy,
        }
    }

    /// Create a mock generator pre-loaded with successful responses.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into_iter().map(Ok).collect())),
            health: HealthStatus::Healthy,
        }
    }

    /// Queue a successful response.
    pub async fn push_response(&self, text: impl Into<String>) {
        self.responses.lock().await.push_back(Ok(text.into()));
    }

    /// Queue a failure.
    pub async fn push_failure(&self, message: impl Into<String>) {
        self.responses.lock().await.push_back(Err(message.into()));
    }

    /// Override the reported health status.
    pub fn with_health(mut self, health: HealthStatus) -> Self {
        self.health = health;
        self
    }
}

impl Default for MockTextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, _prompt: &str, _max_tokens: u32) -> Result<String, AstropostError> {
        match self.responses.lock().await.pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(AstropostError::Provider {
                message,
                source: None,
            }),
            None => Ok("mock response".to_string()),
        }
    }

    async fn health_check(&self) -> Result<HealthStatus, AstropostError> {
        Ok(self.health.clone())
    }
}

/// A mock image source with fixed optional results.
pub struct MockImageSource {
    url: Option<String>,
    bytes: Option<Vec<u8>>,
}

impl MockImageSource {
    /// An image source that always succeeds with the given URL and bytes.
    pub fn always(url: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            url: Some(url.into()),
            bytes: Some(bytes),
        }
    }

    /// An image source whose generation never finds an image.
    pub fn unavailable() -> Self {
        Self {
            url: None,
            bytes: None,
        }
    }

    /// An image source that yields a URL but whose download always fails.
    pub fn broken_download(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            bytes: None,
        }
    }
}

#[async_trait]
impl ImageSource for MockImageSource {
    async fn generate(&self, _prompt: &str) -> Option<String> {
        self.url.clone()
    }

    async fn download(&self, _url: &str) -> Option<Vec<u8>> {
        self.bytes.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_response_when_queue_empty() {
        let generator = MockTextGenerator::new();
        let text = generator.generate("prompt", 100).await.unwrap();
        assert_eq!(text, "mock response");
    }

    #[tokio::test]
    async fn queued_responses_returned_in_order() {
        let generator =
            MockTextGenerator::with_responses(vec!["first".to_string(), "second".to_string()]);
        assert_eq!(generator.generate("p", 10).await.unwrap(), "first");
        assert_eq!(generator.generate("p", 10).await.unwrap(), "second");
    }

    #[tokio::test]
    async fn failure_entries_become_provider_errors() {
        let generator = MockTextGenerator::new();
        generator.push_failure("boom").await;
        let err = generator.generate("p", 10).await.unwrap_err();
        assert!(err.to_string().contains("boom"));
    }

    #[tokio::test]
    async fn unavailable_image_source_yields_none() {
        let source = MockImageSource::unavailable();
        assert!(ImageSource::generate(&source, "p").await.is_none());
        assert!(ImageSource::download(&source, "url").await.is_none());
    }
}
