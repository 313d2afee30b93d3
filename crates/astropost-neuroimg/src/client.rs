// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the neuroimg.art free-generate API.
//!
//! The endpoint streams progress lines and eventually a line containing
//! `"status":"SUCCESS"` together with an `"image_url":"…"` field. The
//! client scans the stream for that marker within the configured budget
//! and extracts the URL. All failures are absorbed into `None`: image
//! enrichment is strictly best-effort.

use std::time::Duration;

use astropost_core::AstropostError;
use futures::StreamExt;
use serde::Serialize;
use tracing::{debug, warn};

/// Marker emitted by the API when generation has finished.
const SUCCESS_MARKER: &str = r#""status":"SUCCESS""#;

/// Field preceding the generated image URL.
const IMAGE_URL_FIELD: &str = r#""image_url":""#;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    token: &'a str,
    prompt: &'a str,
}

/// Client for the neuroimg.art free-generate endpoint.
#[derive(Debug, Clone)]
pub struct NeuroimgClient {
    client: reqwest::Client,
    token: String,
    endpoint: String,
}

impl NeuroimgClient {
    /// Creates a new client.
    ///
    /// `timeout` bounds the whole generate request, including the time
    /// spent waiting for the success marker in the streamed response.
    pub fn new(
        token: String,
        endpoint: String,
        timeout: Duration,
    ) -> Result<Self, AstropostError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AstropostError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            token,
            endpoint,
        })
    }

    /// Requests an image for `prompt` and returns its URL, or `None` when
    /// the service fails, times out, or never signals success.
    pub async fn generate(&self, prompt: &str) -> Option<String> {
        let request = GenerateRequest {
            token: &self.token,
            prompt,
        };

        let response = match self.client.post(&self.endpoint).json(&request).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(error = %e, "image generation request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "image generation returned non-success status");
            return None;
        }

        // Scan the streamed body line by line for the success marker.
        let mut stream = response.bytes_stream();
        let mut buffer = String::new();
        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(c) => c,
                Err(e) => {
                    warn!(error = %e, "image generation stream interrupted");
                    return None;
                }
            };
            buffer.push_str(&String::from_utf8_lossy(&chunk));

            while let Some(newline) = buffer.find('\n') {
                let line: String = buffer.drain(..=newline).collect();
                if let Some(url) = extract_image_url(&line) {
                    debug!(url = %url, "image generation succeeded");
                    return Some(url);
                }
            }
        }

        // Trailing data without a final newline.
        if let Some(url) = extract_image_url(&buffer) {
            debug!(url = %url, "image generation succeeded");
            return Some(url);
        }

        debug!("image generation stream ended without success marker");
        None
    }

    /// Downloads raw image bytes from `url`.
    ///
    /// `None` on non-200 status or transport error.
    pub async fn download(&self, url: &str) -> Option<Vec<u8>> {
        let response = match self.client.get(url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(error = %e, "image download failed");
                return None;
            }
        };

        if response.status() != reqwest::StatusCode::OK {
            warn!(status = %response.status(), "image download returned non-200 status");
            return None;
        }

        match response.bytes().await {
            Ok(bytes) => Some(bytes.to_vec()),
            Err(e) => {
                warn!(error = %e, "failed to read image bytes");
                None
            }
        }
    }
}

/// Extracts the image URL from a response line carrying the success marker.
///
/// Returns `None` when the line lacks the marker or the URL field.
pub fn extract_image_url(line: &str) -> Option<String> {
    if !line.contains(SUCCESS_MARKER) {
        return None;
    }
    let after = line.split(IMAGE_URL_FIELD).nth(1)?;
    let url = after.split('"').next()?;
    if url.is_empty() {
        None
    } else {
        Some(url.to_string())
    }
}
