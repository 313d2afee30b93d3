// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Agent runtime for the astropost channel bot.
//!
//! The [`AgentRuntime`] is the central coordinator that:
//! - Fires scheduled posts when their eligibility windows open
//! - Pushes posts through the retrying delivery pipeline
//! - Drains the fallback queue after outages
//! - Watches connectivity and provider health
//! - Handles graceful shutdown

pub mod content;
pub mod delivery;
pub mod drainer;
pub mod health;
pub mod probe;
pub mod queue;
pub mod rotation;
pub mod scheduler;
pub mod shutdown;

use std::time::Duration;

use astropost_core::error::AstropostError;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::drainer::QueueDrainer;
use crate::health::HealthMonitor;
use crate::scheduler::Scheduler;

/// Runs the three background loops to completion.
///
/// Each loop watches the same [`CancellationToken`]; cancelling it (for
/// example from the signal handler) stops all of them, and `run` returns
/// once every loop has wound down.
pub struct AgentRuntime {
    scheduler: Scheduler,
    drainer: QueueDrainer,
    health: HealthMonitor,
}

impl AgentRuntime {
    pub fn new(scheduler: Scheduler, drainer: QueueDrainer, health: HealthMonitor) -> Self {
        Self {
            scheduler,
            drainer,
            health,
        }
    }

    pub async fn run(self, token: CancellationToken) -> Result<(), AstropostError> {
        info!("agent runtime starting");

        let mut tasks = JoinSet::new();
        tasks.spawn(self.scheduler.run(token.clone()));
        tasks.spawn(self.drainer.run(token.clone()));
        tasks.spawn(self.health.run(token.clone()));

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, "background task ended abnormally");
                // One loop panicking should take the others down too.
                token.cancel();
            }
        }

        info!("agent runtime stopped");
        Ok(())
    }
}

/// Shared queue drain interval used when a config is not at hand.
pub const DEFAULT_DRAIN_INTERVAL: Duration = Duration::from_secs(10);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use astropost_config::{DeliveryConfig, HealthConfig, ScheduleConfig};
    use astropost_test_utils::{MockNotifier, MockProbe, MockPublisher, MockTextGenerator};

    use crate::content::ContentGenerator;
    use crate::delivery::{DeliveryPipeline, RetryPolicy};
    use crate::queue::FallbackQueue;
    use crate::rotation::ZodiacRotation;

    fn runtime(dir: &tempfile::TempDir) -> AgentRuntime {
        let provider: Arc<MockTextGenerator> = Arc::new(MockTextGenerator::new());
        let publisher = Arc::new(MockPublisher::new());
        let notifier = Arc::new(MockNotifier::new());
        let probe = Arc::new(MockProbe::new(true));
        let queue = Arc::new(FallbackQueue::new());

        let pipeline = Arc::new(DeliveryPipeline::new(
            publisher,
            None,
            notifier.clone(),
            queue.clone(),
            RetryPolicy::from(&DeliveryConfig::default()),
        ));
        let rotation = ZodiacRotation::load(dir.path().join("zodiac_index.txt"));
        let content = Arc::new(ContentGenerator::new(provider.clone(), rotation, 500));

        AgentRuntime::new(
            Scheduler::new(&ScheduleConfig::default(), content, pipeline.clone(), probe.clone()),
            QueueDrainer::new(queue, pipeline, DEFAULT_DRAIN_INTERVAL),
            HealthMonitor::new(&HealthConfig::default(), probe, provider, notifier),
        )
    }

    #[tokio::test]
    async fn cancelling_the_token_stops_the_runtime() {
        let dir = tempfile::tempdir().unwrap();
        let rt = runtime(&dir);
        let token = CancellationToken::new();
        token.cancel();

        rt.run(token).await.unwrap();
    }
}
