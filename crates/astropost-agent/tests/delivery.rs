// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end delivery scenarios: generation, outage, queuing, and
//! recovery through the drainer.

use std::sync::Arc;
use std::time::Duration;

use astropost_agent::content::ContentGenerator;
use astropost_agent::delivery::{DeliveryPipeline, RetryPolicy};
use astropost_agent::drainer::QueueDrainer;
use astropost_agent::queue::FallbackQueue;
use astropost_agent::rotation::ZodiacRotation;
use astropost_core::types::{DeliveryOutcome, PostKind};
use astropost_test_utils::{MockNotifier, MockPublisher, MockTextGenerator, SentMessage};

fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        retry_delay: Duration::from_millis(1),
        max_caption_chars: 1024,
    }
}

fn content(provider: MockTextGenerator, dir: &tempfile::TempDir) -> ContentGenerator {
    let rotation = ZodiacRotation::load(dir.path().join("zodiac_index.txt"));
    ContentGenerator::new(Arc::new(provider), rotation, 500)
}

#[tokio::test]
async fn generated_post_flows_to_the_channel() {
    let dir = tempfile::tempdir().unwrap();
    let generator = content(
        MockTextGenerator::with_responses(vec!["The stars align tonight.".into()]),
        &dir,
    );
    let publisher = Arc::new(MockPublisher::new());
    let queue = Arc::new(FallbackQueue::new());
    let pipeline = DeliveryPipeline::new(
        publisher.clone(),
        None,
        Arc::new(MockNotifier::new()),
        queue.clone(),
        fast_policy(),
    );

    let post = generator.generate(PostKind::NightWish).await.expect("a post");
    let outcome = pipeline.deliver(post).await;

    assert_eq!(outcome, DeliveryOutcome::Delivered);
    let sent = publisher.sent().await;
    assert_eq!(sent.len(), 1);
    match &sent[0] {
        SentMessage::Text(text) => {
            assert!(text.starts_with("🌙 GOOD NIGHT! 🌙"));
            assert!(text.contains("The stars align tonight."));
        }
        other => panic!("expected text, got {other:?}"),
    }
    assert!(queue.is_empty().await);
}

#[tokio::test]
async fn outage_queues_the_post_and_the_drainer_recovers_it() {
    let dir = tempfile::tempdir().unwrap();
    let generator = content(
        MockTextGenerator::with_responses(vec!["An astrology fact.".into()]),
        &dir,
    );
    // Three failures exhaust the initial delivery; the fourth send (from
    // the drainer) succeeds.
    let publisher = Arc::new(MockPublisher::new().fail_sends(3));
    let notifier = Arc::new(MockNotifier::new());
    let queue = Arc::new(FallbackQueue::new());
    let pipeline = Arc::new(DeliveryPipeline::new(
        publisher.clone(),
        None,
        notifier.clone(),
        queue.clone(),
        fast_policy(),
    ));

    let post = generator.generate(PostKind::Fact).await.expect("a post");
    assert_eq!(pipeline.deliver(post).await, DeliveryOutcome::Queued);
    assert_eq!(queue.len().await, 1);
    assert_eq!(notifier.notes().await.len(), 1);

    let drainer = QueueDrainer::new(queue.clone(), pipeline, Duration::from_secs(10));
    drainer.drain_one().await;

    assert!(queue.is_empty().await);
    assert_eq!(publisher.sent().await.len(), 1);
}

#[tokio::test]
async fn queued_posts_survive_repeated_failed_drains_in_order() {
    let publisher = Arc::new(MockPublisher::new().fail_sends(u32::MAX));
    let queue = Arc::new(FallbackQueue::new());
    let pipeline = Arc::new(DeliveryPipeline::new(
        publisher.clone(),
        None,
        Arc::new(MockNotifier::new()),
        queue.clone(),
        fast_policy(),
    ));

    for text in ["first", "second"] {
        queue
            .push(astropost_core::types::Post::new(text, PostKind::Fact).unwrap())
            .await;
    }

    let drainer = QueueDrainer::new(queue.clone(), pipeline, Duration::from_secs(10));
    drainer.drain_one().await;

    // The failed head goes back on the queue, behind the other post.
    assert_eq!(queue.len().await, 2);
    assert_eq!(queue.pop().await.unwrap().text, "second");
    assert_eq!(queue.pop().await.unwrap().text, "first");
}
