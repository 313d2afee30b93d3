// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! neuroimg.art image-generation adapter for the Astropost posting agent.
//!
//! Implements [`ImageSource`]: best-effort image URLs extracted from the
//! free-generate streaming response plus a raw byte download. Every
//! failure path yields `None` so delivery can fall through to text-only.

pub mod client;

use std::time::Duration;

use astropost_config::model::ImageConfig;
use astropost_core::traits::ImageSource;
use astropost_core::AstropostError;
use async_trait::async_trait;

pub use client::{NeuroimgClient, extract_image_url};

/// Builds a [`NeuroimgClient`] from configuration.
///
/// Requires `config.api_key` to be set; callers that want to disable
/// image enrichment should not construct the client at all.
pub fn from_config(config: &ImageConfig) -> Result<NeuroimgClient, AstropostError> {
    let token = config
        .api_key
        .as_deref()
        .ok_or_else(|| AstropostError::Config("image.api_key is required".into()))?;

    NeuroimgClient::new(
        token.to_string(),
        config.endpoint.clone(),
        Duration::from_secs(config.timeout_secs),
    )
}

#[async_trait]
impl ImageSource for NeuroimgClient {
    async fn generate(&self, prompt: &str) -> Option<String> {
        NeuroimgClient::generate(self, prompt).await
    }

    async fn download(&self, url: &str) -> Option<Vec<u8>> {
        NeuroimgClient::download(self, url).await
    }
}
