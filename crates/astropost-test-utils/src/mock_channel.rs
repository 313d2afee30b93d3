// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock channel publisher and admin notifier for delivery pipeline tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use astropost_core::AstropostError;
use astropost_core::traits::{AdminNotifier, ChannelPublisher};

/// A message recorded by [`MockPublisher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentMessage {
    Text(String),
    Photo { caption: String, byte_len: usize },
}

/// A mock channel publisher with scriptable failures.
///
/// `fail_sends` makes the first N publish calls (text or photo) fail with
/// a transient channel error; `deny_access` makes every access check fail
/// with a channel-access error.
pub struct MockPublisher {
    sent: Arc<Mutex<Vec<SentMessage>>>,
    remaining_failures: AtomicU32,
    deny_access: bool,
    access_checks: AtomicU32,
}

impl MockPublisher {
    /// A publisher where every operation succeeds.
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            remaining_failures: AtomicU32::new(0),
            deny_access: false,
            access_checks: AtomicU32::new(0),
        }
    }

    /// Fail the first `n` publish calls with a transient channel error.
    pub fn fail_sends(self, n: u32) -> Self {
        self.remaining_failures.store(n, Ordering::SeqCst);
        self
    }

    /// Fail every channel-access check.
    pub fn deny_access(mut self) -> Self {
        self.deny_access = true;
        self
    }

    /// Messages successfully published so far.
    pub async fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().await.clone()
    }

    /// Number of access checks performed.
    pub fn access_checks(&self) -> u32 {
        self.access_checks.load(Ordering::SeqCst)
    }

    fn take_failure(&self) -> bool {
        self.remaining_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

impl Default for MockPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChannelPublisher for MockPublisher {
    async fn check_access(&self) -> Result<String, AstropostError> {
        self.access_checks.fetch_add(1, Ordering::SeqCst);
        if self.deny_access {
            Err(AstropostError::ChannelAccess {
                message: "mock: bot has no access to the channel".into(),
            })
        } else {
            Ok("Mock Channel".to_string())
        }
    }

    async fn send_text(&self, text: &str) -> Result<(), AstropostError> {
        if self.take_failure() {
            return Err(AstropostError::Channel {
                message: "mock: transient send failure".into(),
                source: None,
            });
        }
        self.sent
            .lock()
            .await
            .push(SentMessage::Text(text.to_string()));
        Ok(())
    }

    async fn send_photo(&self, image: &[u8], caption: &str) -> Result<(), AstropostError> {
        if self.take_failure() {
            return Err(AstropostError::Channel {
                message: "mock: transient photo failure".into(),
                source: None,
            });
        }
        self.sent.lock().await.push(SentMessage::Photo {
            caption: caption.to_string(),
            byte_len: image.len(),
        });
        Ok(())
    }
}

/// A mock admin notifier recording every notification.
pub struct MockNotifier {
    notes: Arc<Mutex<Vec<String>>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            notes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Notifications received so far.
    pub async fn notes(&self) -> Vec<String> {
        self.notes.lock().await.clone()
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AdminNotifier for MockNotifier {
    async fn notify(&self, text: &str) -> Result<(), AstropostError> {
        self.notes.lock().await.push(text.to_string());
        Ok(())
    }
}
