// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content generation for the four scheduled post kinds.
//!
//! Each kind composes a natural-language instruction for the text
//! provider and wraps the result in a fixed banner. Upstream failures
//! and empty completions are absorbed into `None`: the posting loop
//! treats that as "nothing to post this tick", never as an error.

use std::sync::Arc;

use astropost_core::traits::TextGenerator;
use astropost_core::types::{Post, PostKind};
use chrono::{Datelike, Weekday};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::rotation::ZodiacRotation;

/// Token budget for the short night wish.
const NIGHT_WISH_MAX_TOKENS: u32 = 200;

/// Produces posts for every [`PostKind`].
///
/// Owns the zodiac rotation state; generating a daily-zodiac post
/// advances and persists the rotation as a side effect, so calling it
/// twice yields two sequential signs.
pub struct ContentGenerator {
    provider: Arc<dyn TextGenerator>,
    rotation: Mutex<ZodiacRotation>,
    max_tokens: u32,
}

impl ContentGenerator {
    pub fn new(provider: Arc<dyn TextGenerator>, rotation: ZodiacRotation, max_tokens: u32) -> Self {
        Self {
            provider,
            rotation: Mutex::new(rotation),
            max_tokens,
        }
    }

    /// Generates a post of the given kind, or `None` when the upstream
    /// call fails or returns nothing usable.
    pub async fn generate(&self, kind: PostKind) -> Option<Post> {
        let (prompt, banner, max_tokens) = match kind {
            PostKind::Morning => {
                let weekday = weekday_name(chrono::Local::now().weekday());
                (
                    format!(
                        "Write a short horoscope digest for {weekday} covering all twelve \
                         zodiac signs. Format: [Sign] [Emoji]: [3-5 word tip]. Start with \
                         a greeting."
                    ),
                    "🌅 GOOD MORNING! 🌅".to_string(),
                    self.max_tokens,
                )
            }
            PostKind::DailyZodiac => {
                let sign = match self.rotation.lock().await.next_sign() {
                    Ok(sign) => sign,
                    Err(e) => {
                        warn!(error = %e, "failed to advance zodiac rotation");
                        return None;
                    }
                };
                (
                    format!(
                        "Write today's horoscope for {sign} (3-5 sentences). Keep the \
                         tone positive."
                    ),
                    format!("🔮 {} 🔮", sign.to_uppercase()),
                    self.max_tokens,
                )
            }
            PostKind::Fact => (
                "Share an interesting astrology fact (3-5 sentences). Add emojis.".to_string(),
                "🌌 ASTROLOGY FACT 🌌".to_string(),
                self.max_tokens,
            ),
            PostKind::NightWish => (
                "Write a kind good-night wish (2-3 sentences) with an astrological tip."
                    .to_string(),
                "🌙 GOOD NIGHT! 🌙".to_string(),
                NIGHT_WISH_MAX_TOKENS,
            ),
        };

        let body = match self.provider.generate(&prompt, max_tokens).await {
            Ok(text) => text,
            Err(e) => {
                warn!(kind = %kind, error = %e, "text generation failed");
                return None;
            }
        };

        let body = body.trim();
        if body.is_empty() {
            debug!(kind = %kind, "text generation returned nothing");
            return None;
        }

        Post::new(format!("{banner}\n\n{body}"), kind)
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
