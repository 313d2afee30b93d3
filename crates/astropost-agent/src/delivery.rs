// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Retrying delivery pipeline in front of the channel publisher.
//!
//! Every post goes through the same path: verify channel access, try an
//! image-backed send, fall back to text, and retry with a linear backoff.
//! Posts that exhaust their attempts land on the fallback queue; an
//! access failure aborts delivery outright since retrying a revoked bot
//! cannot succeed.

use std::sync::Arc;
use std::time::Duration;

use astropost_core::error::AstropostError;
use astropost_core::traits::{AdminNotifier, ChannelPublisher, ImageSource};
use astropost_core::types::{DeliveryOutcome, Post};
use astropost_config::DeliveryConfig;
use tracing::{debug, info, warn};

use crate::queue::FallbackQueue;

/// How many characters of the post text seed the image prompt.
const IMAGE_PROMPT_CHARS: usize = 50;

/// Retry knobs for the delivery loop.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub retry_delay: Duration,
    pub max_caption_chars: usize,
}

impl From<&DeliveryConfig> for RetryPolicy {
    fn from(cfg: &DeliveryConfig) -> Self {
        Self {
            max_attempts: cfg.max_attempts,
            retry_delay: Duration::from_secs(cfg.retry_delay_secs),
            max_caption_chars: cfg.max_caption_chars,
        }
    }
}

pub struct DeliveryPipeline {
    publisher: Arc<dyn ChannelPublisher>,
    images: Option<Arc<dyn ImageSource>>,
    notifier: Arc<dyn AdminNotifier>,
    queue: Arc<FallbackQueue>,
    policy: RetryPolicy,
}

impl DeliveryPipeline {
    pub fn new(
        publisher: Arc<dyn ChannelPublisher>,
        images: Option<Arc<dyn ImageSource>>,
        notifier: Arc<dyn AdminNotifier>,
        queue: Arc<FallbackQueue>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            publisher,
            images,
            notifier,
            queue,
            policy,
        }
    }

    /// Delivers a post to the channel.
    ///
    /// Never returns an error: every failure mode maps to an outcome the
    /// caller can log and move past.
    pub async fn deliver(&self, post: Post) -> DeliveryOutcome {
        for attempt in 1..=self.policy.max_attempts {
            match self.try_once(&post).await {
                Ok(()) => {
                    info!(kind = %post.kind, attempt, "post delivered");
                    return DeliveryOutcome::Delivered;
                }
                Err(AstropostError::ChannelAccess { message }) => {
                    warn!(kind = %post.kind, %message, "channel unreachable, aborting delivery");
                    self.notify_admin(&format!(
                        "🚫 Cannot post to the channel: {message}. Check that the bot \
                         is still an administrator."
                    ))
                    .await;
                    return DeliveryOutcome::Aborted;
                }
                Err(e) => {
                    warn!(kind = %post.kind, attempt, error = %e, "delivery attempt failed");
                    if attempt < self.policy.max_attempts {
                        // Linear backoff: delay, 2*delay, ...
                        tokio::time::sleep(self.policy.retry_delay * attempt).await;
                    }
                }
            }
        }

        warn!(kind = %post.kind, "delivery attempts exhausted, queuing post");
        let kind = post.kind;
        self.queue.push(post).await;
        self.notify_admin(&format!(
            "⚠️ Could not deliver a {kind} post after {} attempts; it was queued \
             and will be retried automatically.",
            self.policy.max_attempts
        ))
        .await;
        DeliveryOutcome::Queued
    }

    async fn try_once(&self, post: &Post) -> Result<(), AstropostError> {
        self.publisher.check_access().await?;

        if let Some(image) = self.fetch_image(post).await {
            let caption = truncated(&post.text, self.policy.max_caption_chars);
            return self.publisher.send_photo(&image, caption).await;
        }

        self.publisher.send_text(&post.text).await
    }

    /// Generates and downloads an illustration, absorbing every failure.
    async fn fetch_image(&self, post: &Post) -> Option<Vec<u8>> {
        let source = self.images.as_ref()?;
        let seed: String = post.text.chars().take(IMAGE_PROMPT_CHARS).collect();
        let prompt = format!("{}: {}", post.kind, seed);

        let url = source.generate(&prompt).await?;
        match source.download(&url).await {
            Some(bytes) => Some(bytes),
            None => {
                debug!(%url, "image download failed, falling back to text");
                None
            }
        }
    }

    async fn notify_admin(&self, text: &str) {
        if let Err(e) = self.notifier.notify(text).await {
            warn!(error = %e, "admin notification failed");
        }
    }
}

fn truncated(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astropost_core::types::PostKind;
    use astropost_test_utils::{MockImageSource, MockNotifier, MockPublisher, SentMessage};

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            retry_delay: Duration::from_millis(1),
            max_caption_chars: 1024,
        }
    }

    fn post() -> Post {
        Post::new("🌌 ASTROLOGY FACT 🌌\n\nStars are far away.", PostKind::Fact).unwrap()
    }

    fn pipeline(
        publisher: Arc<MockPublisher>,
        images: Option<Arc<dyn ImageSource>>,
        notifier: Arc<MockNotifier>,
        queue: Arc<FallbackQueue>,
    ) -> DeliveryPipeline {
        DeliveryPipeline::new(publisher, images, notifier, queue, fast_policy())
    }

    #[tokio::test]
    async fn text_goes_out_when_no_image_source_is_configured() {
        let publisher = Arc::new(MockPublisher::new());
        let notifier = Arc::new(MockNotifier::new());
        let queue = Arc::new(FallbackQueue::new());
        let p = pipeline(publisher.clone(), None, notifier.clone(), queue.clone());

        let outcome = p.deliver(post()).await;

        assert_eq!(outcome, DeliveryOutcome::Delivered);
        assert_eq!(publisher.sent().await.len(), 1);
        assert!(matches!(publisher.sent().await[0], SentMessage::Text(_)));
        assert!(notifier.notes().await.is_empty());
        assert!(queue.is_empty().await);
    }

    #[tokio::test]
    async fn image_send_wins_when_the_source_delivers() {
        let publisher = Arc::new(MockPublisher::new());
        let notifier = Arc::new(MockNotifier::new());
        let queue = Arc::new(FallbackQueue::new());
        let images = MockImageSource::always("https://img.example/a.jpg", vec![1, 2, 3]);
        let p = pipeline(
            publisher.clone(),
            Some(Arc::new(images)),
            notifier,
            queue,
        );

        let outcome = p.deliver(post()).await;

        assert_eq!(outcome, DeliveryOutcome::Delivered);
        match &publisher.sent().await[0] {
            SentMessage::Photo { caption, byte_len } => {
                assert_eq!(*byte_len, 3);
                assert!(caption.starts_with("🌌 ASTROLOGY FACT 🌌"));
            }
            other => panic!("expected a photo, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn broken_image_download_falls_back_to_text() {
        let publisher = Arc::new(MockPublisher::new());
        let notifier = Arc::new(MockNotifier::new());
        let queue = Arc::new(FallbackQueue::new());
        let images = MockImageSource::broken_download("https://img.example/a.jpg");
        let p = pipeline(
            publisher.clone(),
            Some(Arc::new(images)),
            notifier,
            queue,
        );

        let outcome = p.deliver(post()).await;

        assert_eq!(outcome, DeliveryOutcome::Delivered);
        assert!(matches!(publisher.sent().await[0], SentMessage::Text(_)));
    }

    #[tokio::test]
    async fn unavailable_image_source_falls_back_to_text() {
        let publisher = Arc::new(MockPublisher::new());
        let notifier = Arc::new(MockNotifier::new());
        let queue = Arc::new(FallbackQueue::new());
        let p = pipeline(
            publisher.clone(),
            Some(Arc::new(MockImageSource::unavailable())),
            notifier,
            queue,
        );

        assert_eq!(p.deliver(post()).await, DeliveryOutcome::Delivered);
        assert!(matches!(publisher.sent().await[0], SentMessage::Text(_)));
    }

    #[tokio::test]
    async fn transient_failures_are_retried_until_success() {
        let publisher = Arc::new(MockPublisher::new().fail_sends(2));
        let notifier = Arc::new(MockNotifier::new());
        let queue = Arc::new(FallbackQueue::new());
        let p = pipeline(publisher.clone(), None, notifier.clone(), queue.clone());

        let outcome = p.deliver(post()).await;

        assert_eq!(outcome, DeliveryOutcome::Delivered);
        assert_eq!(publisher.sent().await.len(), 1);
        assert_eq!(publisher.access_checks(), 3);
        assert!(queue.is_empty().await);
        assert!(notifier.notes().await.is_empty());
    }

    #[tokio::test]
    async fn exhausted_retries_queue_the_post_and_alert_once() {
        let publisher = Arc::new(MockPublisher::new().fail_sends(3));
        let notifier = Arc::new(MockNotifier::new());
        let queue = Arc::new(FallbackQueue::new());
        let p = pipeline(publisher.clone(), None, notifier.clone(), queue.clone());

        let outcome = p.deliver(post()).await;

        assert_eq!(outcome, DeliveryOutcome::Queued);
        assert!(publisher.sent().await.is_empty());
        assert_eq!(notifier.notes().await.len(), 1);
        assert!(notifier.notes().await[0].contains("queued"));
        // The queued post is the original, unchanged.
        assert_eq!(queue.pop().await.unwrap().text, post().text);
        assert!(queue.is_empty().await);
    }

    #[tokio::test]
    async fn denied_channel_access_aborts_without_retry_or_queuing() {
        let publisher = Arc::new(MockPublisher::new().deny_access());
        let notifier = Arc::new(MockNotifier::new());
        let queue = Arc::new(FallbackQueue::new());
        let p = pipeline(publisher.clone(), None, notifier.clone(), queue.clone());

        let outcome = p.deliver(post()).await;

        assert_eq!(outcome, DeliveryOutcome::Aborted);
        assert_eq!(publisher.access_checks(), 1);
        assert!(queue.is_empty().await);
        assert_eq!(notifier.notes().await.len(), 1);
        assert!(notifier.notes().await[0].contains("Cannot post"));
    }

    #[tokio::test]
    async fn long_captions_are_truncated_on_a_char_boundary() {
        let publisher = Arc::new(MockPublisher::new());
        let notifier = Arc::new(MockNotifier::new());
        let queue = Arc::new(FallbackQueue::new());
        let images = MockImageSource::always("https://img.example/a.jpg", vec![0; 8]);
        let p = pipeline(
            publisher.clone(),
            Some(Arc::new(images)),
            notifier,
            queue,
        );

        let long = Post::new("é".repeat(2000), PostKind::Morning).unwrap();
        p.deliver(long).await;

        match &publisher.sent().await[0] {
            SentMessage::Photo { caption, .. } => {
                assert_eq!(caption.chars().count(), 1024);
            }
            other => panic!("expected a photo, got {other:?}"),
        }
    }
}
