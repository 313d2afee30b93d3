// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mistral text-generation adapter for the Astropost posting agent.
//!
//! Implements [`TextGenerator`] on top of the Mistral chat-completions
//! API, with Bearer authentication, transient-error retry, and a health
//! probe for the health monitor.

pub mod client;
pub mod types;

use astropost_config::model::MistralConfig;
use astropost_core::traits::TextGenerator;
use astropost_core::types::HealthStatus;
use astropost_core::AstropostError;
use async_trait::async_trait;

pub use client::MistralClient;

/// Builds a [`MistralClient`] from configuration.
///
/// Requires `config.api_key` to be set.
pub fn from_config(config: &MistralConfig) -> Result<MistralClient, AstropostError> {
    let api_key = config
        .api_key
        .as_deref()
        .ok_or_else(|| AstropostError::Config("mistral.api_key is required".into()))?;

    if api_key.is_empty() {
        return Err(AstropostError::Config(
            "mistral.api_key cannot be empty".into(),
        ));
    }

    MistralClient::new(api_key, config.model.clone(), config.base_url.clone())
}

#[async_trait]
impl TextGenerator for MistralClient {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, AstropostError> {
        self.complete(prompt, max_tokens).await
    }

    async fn health_check(&self) -> Result<HealthStatus, AstropostError> {
        self.health().await
    }
}
