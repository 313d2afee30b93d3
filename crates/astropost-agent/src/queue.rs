// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory FIFO queue for posts that exhausted their delivery retries.
//!
//! Unbounded by design: the queue only fills while the channel is
//! unreachable, and the drainer empties it as soon as a send succeeds
//! again. Contents are lost on process exit.

use std::collections::VecDeque;

use astropost_core::types::Post;
use tokio::sync::Mutex;

#[derive(Default)]
pub struct FallbackQueue {
    inner: Mutex<VecDeque<Post>>,
}

impl FallbackQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push(&self, post: Post) {
        self.inner.lock().await.push_back(post);
    }

    /// Removes and returns the oldest queued post.
    pub async fn pop(&self) -> Option<Post> {
        self.inner.lock().await.pop_front()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astropost_core::types::PostKind;

    fn post(text: &str) -> Post {
        Post::new(text.to_string(), PostKind::Fact).unwrap()
    }

    #[tokio::test]
    async fn pops_in_insertion_order() {
        let queue = FallbackQueue::new();
        queue.push(post("one")).await;
        queue.push(post("two")).await;
        queue.push(post("three")).await;

        assert_eq!(queue.len().await, 3);
        assert_eq!(queue.pop().await.unwrap().text, "one");
        assert_eq!(queue.pop().await.unwrap().text, "two");
        assert_eq!(queue.pop().await.unwrap().text, "three");
        assert!(queue.pop().await.is_none());
        assert!(queue.is_empty().await);
    }
}
