// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Astropost workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The four scheduled content categories.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
pub enum PostKind {
    /// Morning digest with a short per-sign outlook.
    Morning,
    /// One full horoscope for the sign currently at the rotation index.
    DailyZodiac,
    /// Periodic astrology fact.
    Fact,
    /// Evening wish with an astrological touch.
    NightWish,
}

/// A unit of generated content destined for the channel.
///
/// Immutable once generated; consumed exactly once by the delivery
/// pipeline, either directly or via the fallback queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub text: String,
    pub kind: PostKind,
}

impl Post {
    /// Creates a post, rejecting empty text.
    ///
    /// Generators absorb upstream failures into empty strings; an empty
    /// post means "nothing to publish this cycle".
    pub fn new(text: impl Into<String>, kind: PostKind) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            None
        } else {
            Some(Self { text, kind })
        }
    }
}

/// Terminal outcome of a delivery pipeline run for one post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Published to the channel (with or without an image).
    Delivered,
    /// All attempts exhausted; the post was appended to the fallback queue.
    Queued,
    /// Channel-access check failed; the post was dropped without retry or queuing.
    Aborted,
}

/// Health status reported by upstream API health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Upstream is fully operational.
    Healthy,
    /// Upstream is reachable but reporting problems.
    Degraded(String),
    /// Upstream is not operational.
    Unhealthy(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn post_rejects_empty_and_whitespace_text() {
        assert!(Post::new("", PostKind::Fact).is_none());
        assert!(Post::new("   \n", PostKind::Fact).is_none());
    }

    #[test]
    fn post_keeps_text_unmodified() {
        let post = Post::new("🔮 ARIES 🔮\n\nBold moves pay off.", PostKind::DailyZodiac)
            .expect("non-empty");
        assert_eq!(post.text, "🔮 ARIES 🔮\n\nBold moves pay off.");
        assert_eq!(post.kind, PostKind::DailyZodiac);
    }

    #[test]
    fn post_kind_round_trips_through_strings() {
        for kind in [
            PostKind::Morning,
            PostKind::DailyZodiac,
            PostKind::Fact,
            PostKind::NightWish,
        ] {
            let s = kind.to_string();
            assert_eq!(PostKind::from_str(&s).expect("should parse back"), kind);
        }
        assert_eq!(PostKind::DailyZodiac.to_string(), "daily-zodiac");
    }
}
