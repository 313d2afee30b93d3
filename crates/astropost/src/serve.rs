// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `astropost serve` command implementation.
//!
//! Wires the Telegram channel, the Mistral text provider, the optional
//! image source, and the three background loops (posting, queue drain,
//! health) into a single runtime, then runs that runtime until a
//! shutdown signal arrives.

use std::sync::Arc;
use std::time::Duration;

use astropost_agent::content::ContentGenerator;
use astropost_agent::delivery::{DeliveryPipeline, RetryPolicy};
use astropost_agent::drainer::QueueDrainer;
use astropost_agent::health::HealthMonitor;
use astropost_agent::probe::HttpProbe;
use astropost_agent::queue::FallbackQueue;
use astropost_agent::rotation::ZodiacRotation;
use astropost_agent::scheduler::Scheduler;
use astropost_agent::{AgentRuntime, shutdown};
use astropost_config::AstropostConfig;
use astropost_core::error::AstropostError;
use astropost_core::traits::{
    AdminNotifier, ChannelPublisher, ConnectivityProbe, ImageSource, TextGenerator,
};
use astropost_telegram::TelegramChannel;
use astropost_telegram::commands::spawn_dispatcher;
use tracing::{info, warn};

/// Runs the `astropost serve` command.
///
/// Builds every adapter from configuration, announces the start to the
/// administrator, and blocks until the runtime winds down after SIGINT
/// or SIGTERM.
pub async fn run_serve(config: AstropostConfig) -> Result<(), AstropostError> {
    init_tracing(&config.agent.log_level);

    info!(agent_name = config.agent.name.as_str(), "starting astropost serve");

    let channel = Arc::new(TelegramChannel::new(
        &config.telegram,
        config.delivery.max_caption_chars,
    )?);
    // A leftover webhook blocks long polling for /start commands.
    channel.delete_webhook().await?;

    let publisher: Arc<dyn ChannelPublisher> = channel.clone();
    let notifier: Arc<dyn AdminNotifier> = channel.clone();

    let provider: Arc<dyn TextGenerator> = Arc::new(astropost_mistral::from_config(&config.mistral)?);

    // The image source is optional: without an API key the bot posts
    // text-only and says so once at startup.
    let images: Option<Arc<dyn ImageSource>> = match astropost_neuroimg::from_config(&config.image)
    {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            warn!(error = %e, "image generation disabled");
            None
        }
    };

    let probe: Arc<dyn ConnectivityProbe> = Arc::new(
        HttpProbe::new(&config.health.probe_url)
            .map_err(|e| AstropostError::Internal(format!("failed to build probe client: {e}")))?,
    );

    let queue = Arc::new(FallbackQueue::new());
    let pipeline = Arc::new(DeliveryPipeline::new(
        publisher,
        images,
        notifier.clone(),
        queue.clone(),
        RetryPolicy::from(&config.delivery),
    ));

    let rotation = ZodiacRotation::load(&config.rotation.state_path);
    let content = Arc::new(ContentGenerator::new(
        provider.clone(),
        rotation,
        config.mistral.max_tokens,
    ));

    let runtime = AgentRuntime::new(
        Scheduler::new(&config.schedule, content, pipeline.clone(), probe.clone()),
        QueueDrainer::new(
            queue,
            pipeline,
            Duration::from_secs(config.queue.drain_interval_secs),
        ),
        HealthMonitor::new(&config.health, probe, provider, notifier.clone()),
    );

    // Answers /start in direct chats while the posting loops run.
    let dispatcher = spawn_dispatcher(channel.bot().clone());

    if let Err(e) = notifier
        .notify("✅ Astrology bot started and is on schedule.")
        .await
    {
        warn!(error = %e, "startup notification failed");
    }

    let token = shutdown::install_signal_handler();
    runtime.run(token).await?;

    dispatcher.abort();
    info!("astropost serve stopped");
    Ok(())
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("astropost={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
