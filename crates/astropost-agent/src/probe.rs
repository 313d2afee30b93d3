// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP connectivity probe.

use std::time::Duration;

use astropost_core::traits::ConnectivityProbe;
use async_trait::async_trait;
use tracing::debug;

const PROBE_ATTEMPTS: u32 = 3;
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);
const PROBE_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Decides online/offline by fetching a well-known URL.
///
/// Any HTTP status counts as online; only transport-level failures
/// (DNS, connect, timeout) count against the probe.
pub struct HttpProbe {
    client: reqwest::Client,
    url: String,
    attempts: u32,
    retry_delay: Duration,
}

impl HttpProbe {
    pub fn new(url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(PROBE_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: url.into(),
            attempts: PROBE_ATTEMPTS,
            retry_delay: PROBE_RETRY_DELAY,
        })
    }
}

#[async_trait]
impl ConnectivityProbe for HttpProbe {
    async fn is_online(&self) -> bool {
        for attempt in 1..=self.attempts {
            match self.client.get(&self.url).send().await {
                Ok(_) => return true,
                Err(e) => {
                    debug!(attempt, error = %e, "connectivity probe failed");
                    if attempt < self.attempts {
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
            }
        }
        false
    }
}
