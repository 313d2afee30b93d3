// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel publishing and administrator notification traits.

use async_trait::async_trait;

use crate::error::AstropostError;

/// Outbound publisher for the single target channel.
///
/// Implemented by the Telegram adapter; mocked in delivery pipeline tests.
#[async_trait]
pub trait ChannelPublisher: Send + Sync {
    /// Verifies the bot can address the target channel.
    ///
    /// Returns the channel title on success. Failure is fatal for the
    /// post being delivered: the pipeline aborts without retry or queuing.
    async fn check_access(&self) -> Result<String, AstropostError>;

    /// Publishes a text-only message to the channel.
    async fn send_text(&self, text: &str) -> Result<(), AstropostError>;

    /// Publishes a photo with a caption to the channel.
    ///
    /// Implementations truncate the caption to the platform limit.
    async fn send_photo(&self, image: &[u8], caption: &str) -> Result<(), AstropostError>;
}

/// Direct-message notifier for the administrator.
///
/// All notifications are best-effort: callers log a failed notification
/// and move on, never retry or escalate.
#[async_trait]
pub trait AdminNotifier: Send + Sync {
    /// Sends a direct message to the administrator.
    async fn notify(&self, text: &str) -> Result<(), AstropostError>;
}
