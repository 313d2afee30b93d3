// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Background drainer for the fallback queue.
//!
//! Wakes on a fixed interval, pops one post, and pushes it back through
//! the delivery pipeline. One post per wake keeps the channel from being
//! flooded after a long outage; the pipeline re-queues on failure, so a
//! still-broken channel just cycles the head of the queue.

use std::sync::Arc;
use std::time::Duration;

use astropost_core::types::DeliveryOutcome;
use tokio::select;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::delivery::DeliveryPipeline;
use crate::queue::FallbackQueue;

pub struct QueueDrainer {
    queue: Arc<FallbackQueue>,
    pipeline: Arc<DeliveryPipeline>,
    interval: Duration,
}

impl QueueDrainer {
    pub fn new(
        queue: Arc<FallbackQueue>,
        pipeline: Arc<DeliveryPipeline>,
        interval: Duration,
    ) -> Self {
        Self {
            queue,
            pipeline,
            interval,
        }
    }

    pub async fn run(self, token: CancellationToken) {
        info!("queue drainer started");
        loop {
            select! {
                _ = token.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
            self.drain_one().await;
        }
        info!("queue drainer stopped");
    }

    /// Pops and redelivers the oldest queued post, if any.
    pub async fn drain_one(&self) {
        let Some(post) = self.queue.pop().await else {
            return;
        };
        let kind = post.kind;
        match self.pipeline.deliver(post).await {
            DeliveryOutcome::Delivered => {
                let remaining = self.queue.len().await;
                info!(%kind, remaining, "queued post delivered");
            }
            DeliveryOutcome::Queued => {
                warn!(%kind, "queued post failed again, left on the queue");
            }
            DeliveryOutcome::Aborted => {
                warn!(%kind, "queued post dropped, channel access denied");
            }
        }
    }
}
