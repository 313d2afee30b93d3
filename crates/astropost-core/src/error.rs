// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Astropost posting agent.

use thiserror::Error;

/// The primary error type used across all Astropost adapter traits and core operations.
#[derive(Debug, Error)]
pub enum AstropostError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Channel delivery errors (send failure, rate limiting, message format).
    ///
    /// Transient from the delivery pipeline's perspective: eligible for retry.
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The bot cannot address the target channel at all (revoked rights,
    /// wrong chat id). Fatal for the current post: no retry, no queue.
    #[error("channel access error: {message}")]
    ChannelAccess { message: String },

    /// Generative API errors (Mistral text, neuroimg image).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Persisted-state errors (rotation index file read/write).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
