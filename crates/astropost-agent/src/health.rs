// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Periodic health monitor.
//!
//! On each cycle the monitor checks connectivity and the text provider
//! and alerts the administrator when either looks wrong. Checks are
//! observational only; nothing here pauses or restores the posting loop.

use std::sync::Arc;
use std::time::Duration;

use astropost_core::traits::{AdminNotifier, ConnectivityProbe, TextGenerator};
use astropost_core::types::HealthStatus;
use astropost_config::HealthConfig;
use tokio::select;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub struct HealthMonitor {
    probe: Arc<dyn ConnectivityProbe>,
    provider: Arc<dyn TextGenerator>,
    notifier: Arc<dyn AdminNotifier>,
    interval: Duration,
    error_retry: Duration,
}

impl HealthMonitor {
    pub fn new(
        cfg: &HealthConfig,
        probe: Arc<dyn ConnectivityProbe>,
        provider: Arc<dyn TextGenerator>,
        notifier: Arc<dyn AdminNotifier>,
    ) -> Self {
        Self {
            probe,
            provider,
            notifier,
            interval: Duration::from_secs(cfg.interval_secs),
            error_retry: Duration::from_secs(cfg.error_retry_secs),
        }
    }

    pub async fn run(self, token: CancellationToken) {
        info!("health monitor started");
        loop {
            let pause = select! {
                _ = token.cancelled() => break,
                pause = self.cycle() => pause,
            };
            select! {
                _ = token.cancelled() => break,
                _ = tokio::time::sleep(pause) => {}
            }
        }
        info!("health monitor stopped");
    }

    /// One health pass; returns the pause before the next one.
    ///
    /// A check that fails alerts and keeps the regular interval. Only a
    /// check that could not run at all shortens the pause, so recovery
    /// from an internal error is noticed quickly without spamming the
    /// administrator during an ordinary outage.
    pub(crate) async fn cycle(&self) -> Duration {
        if !self.probe.is_online().await {
            warn!("connectivity check failed");
            self.notify("📵 The bot appears to be offline; scheduled posts are deferred.")
                .await;
            return self.interval;
        }

        match self.provider.health_check().await {
            Ok(HealthStatus::Healthy) => {
                debug!("health check passed");
                self.interval
            }
            Ok(HealthStatus::Degraded(reason)) => {
                warn!(%reason, "text provider degraded");
                self.notify(&format!("⚠️ Text provider degraded: {reason}"))
                    .await;
                self.interval
            }
            Ok(HealthStatus::Unhealthy(reason)) => {
                warn!(%reason, "text provider unhealthy");
                self.notify(&format!("🚨 Text provider unhealthy: {reason}"))
                    .await;
                self.interval
            }
            Err(e) => {
                warn!(error = %e, "health check could not run");
                self.notify(&format!("🚨 Health check failed: {e}")).await;
                self.error_retry
            }
        }
    }

    async fn notify(&self, text: &str) {
        if let Err(e) = self.notifier.notify(text).await {
            warn!(error = %e, "admin notification failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astropost_test_utils::{MockNotifier, MockProbe, MockTextGenerator};

    fn config() -> HealthConfig {
        HealthConfig {
            interval_secs: 3600,
            error_retry_secs: 300,
            probe_url: "https://probe.example".into(),
        }
    }

    fn monitor(
        probe: MockProbe,
        provider: MockTextGenerator,
        notifier: Arc<MockNotifier>,
    ) -> HealthMonitor {
        HealthMonitor::new(&config(), Arc::new(probe), Arc::new(provider), notifier)
    }

    #[tokio::test]
    async fn healthy_cycle_stays_quiet_and_keeps_the_long_interval() {
        let notifier = Arc::new(MockNotifier::new());
        let m = monitor(MockProbe::new(true), MockTextGenerator::new(), notifier.clone());

        let pause = m.cycle().await;

        assert_eq!(pause, Duration::from_secs(3600));
        assert!(notifier.notes().await.is_empty());
    }

    #[tokio::test]
    async fn offline_cycle_alerts_once_and_keeps_the_long_interval() {
        let notifier = Arc::new(MockNotifier::new());
        let m = monitor(MockProbe::new(false), MockTextGenerator::new(), notifier.clone());

        let pause = m.cycle().await;

        // A failed check is not an internal error: the next check waits
        // the full hour rather than nagging the admin every few minutes.
        assert_eq!(pause, Duration::from_secs(3600));
        assert_eq!(notifier.notes().await.len(), 1);
        assert!(notifier.notes().await[0].contains("offline"));
    }

    #[tokio::test]
    async fn degraded_provider_alerts_but_keeps_the_long_interval() {
        let notifier = Arc::new(MockNotifier::new());
        let provider = MockTextGenerator::new()
            .with_health(HealthStatus::Degraded("slow responses".into()));
        let m = monitor(MockProbe::new(true), provider, notifier.clone());

        let pause = m.cycle().await;

        assert_eq!(pause, Duration::from_secs(3600));
        assert!(notifier.notes().await[0].contains("slow responses"));
    }

    struct BrokenHealthCheck;

    #[async_trait::async_trait]
    impl TextGenerator for BrokenHealthCheck {
        async fn generate(
            &self,
            _prompt: &str,
            _max_tokens: u32,
        ) -> Result<String, astropost_core::AstropostError> {
            unreachable!("the monitor never generates text")
        }

        async fn health_check(
            &self,
        ) -> Result<HealthStatus, astropost_core::AstropostError> {
            Err(astropost_core::AstropostError::Provider {
                message: "connection reset".into(),
                source: None,
            })
        }
    }

    #[tokio::test]
    async fn a_check_that_cannot_run_alerts_and_retries_sooner() {
        let notifier = Arc::new(MockNotifier::new());
        let m = HealthMonitor::new(
            &config(),
            Arc::new(MockProbe::new(true)),
            Arc::new(BrokenHealthCheck),
            notifier.clone(),
        );

        let pause = m.cycle().await;

        assert_eq!(pause, Duration::from_secs(300));
        assert!(notifier.notes().await[0].contains("Health check failed"));
    }

    #[tokio::test]
    async fn unhealthy_provider_alerts() {
        let notifier = Arc::new(MockNotifier::new());
        let provider =
            MockTextGenerator::new().with_health(HealthStatus::Unhealthy("api down".into()));
        let m = monitor(MockProbe::new(true), provider, notifier.clone());

        m.cycle().await;

        assert!(notifier.notes().await[0].contains("api down"));
    }
}
