// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Mistral chat-completions API.
//!
//! Provides [`MistralClient`] which handles request construction,
//! authentication, transient error retry, and the `/health` probe
//! used by the health monitor.

use std::time::Duration;

use astropost_core::AstropostError;
use astropost_core::types::HealthStatus;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, ChatMessage, ChatRequest, ChatResponse};

/// Path of the chat-completions endpoint relative to the base URL.
const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Path of the health endpoint relative to the base URL.
const HEALTH_PATH: &str = "/health";

/// HTTP client for Mistral API communication.
///
/// Manages authentication headers, connection pooling, and retry logic
/// for transient errors (429, 500, 503).
#[derive(Debug, Clone)]
pub struct MistralClient {
    client: reqwest::Client,
    model: String,
    max_retries: u32,
    base_url: String,
}

impl MistralClient {
    /// Creates a new Mistral API client.
    ///
    /// # Arguments
    /// * `api_key` - Mistral API key for Bearer authentication
    /// * `model` - Model identifier (e.g. "mistral-small-latest")
    /// * `base_url` - API base URL (e.g. "https://api.mistral.ai")
    pub fn new(api_key: &str, model: String, base_url: String) -> Result<Self, AstropostError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "authorization",
            HeaderValue::from_str(&format!("Bearer {api_key}"))
                .map_err(|e| AstropostError::Config(format!("invalid API key header value: {e}")))?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| AstropostError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            model,
            max_retries: 1,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends a single-message completion request and returns the text of
    /// the first choice.
    ///
    /// On transient errors (429, 500, 503), retries once after a 1-second delay.
    pub async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, AstropostError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
            max_tokens,
        };

        let url = format!("{}{COMPLETIONS_PATH}", self.base_url);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying completion request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&url)
                .json(&request)
                .send()
                .await
                .map_err(|e| AstropostError::Provider {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, "completion response received");

            if status.is_success() {
                let body = response.text().await.map_err(|e| AstropostError::Provider {
                    message: format!("failed to read response body: {e}"),
                    source: Some(Box::new(e)),
                })?;
                let parsed: ChatResponse =
                    serde_json::from_str(&body).map_err(|e| AstropostError::Provider {
                        message: format!("failed to parse API response: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                return Ok(parsed.first_text().to_string());
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(AstropostError::Provider {
                    message: format!("API returned {status}: {body}"),
                    source: None,
                });
                continue;
            }

            // Non-transient error or exhausted retries.
            let body = response.text().await.unwrap_or_default();
            let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                format!(
                    "Mistral API error ({}): {}",
                    api_err.type_.as_deref().unwrap_or("unknown"),
                    api_err.message
                )
            } else {
                format!("API returned {status}: {body}")
            };
            return Err(AstropostError::Provider {
                message,
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| AstropostError::Provider {
            message: "completion request failed after retries".into(),
            source: None,
        }))
    }

    /// Probes the API health endpoint.
    pub async fn health(&self) -> Result<HealthStatus, AstropostError> {
        let url = format!("{}{HEALTH_PATH}", self.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(10))
            .send()
            .await
            .map_err(|e| AstropostError::Provider {
                message: format!("health request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Unhealthy(format!(
                "health endpoint returned {status}"
            )))
        }
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}
