// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram channel adapter for the Astropost posting agent.
//!
//! Implements [`ChannelPublisher`] and [`AdminNotifier`] for the Telegram
//! Bot API via teloxide: channel-access verification, text and photo
//! publishing with caption truncation, Markdown formatting with plain-text
//! fallback, and best-effort administrator direct messages.

pub mod commands;

use astropost_config::model::TelegramConfig;
use astropost_core::AstropostError;
use astropost_core::traits::{AdminNotifier, ChannelPublisher};
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InputFile, ParseMode};
use tracing::{debug, warn};

/// Telegram channel adapter holding the bot handle and target chat ids.
#[derive(Clone)]
pub struct TelegramChannel {
    bot: Bot,
    channel: ChatId,
    admin: ChatId,
    max_caption_chars: usize,
}

impl TelegramChannel {
    /// Creates a new Telegram channel adapter.
    ///
    /// Requires `config.bot_token`, a non-zero `channel_id`, and a
    /// non-zero `admin_id`.
    pub fn new(config: &TelegramConfig, max_caption_chars: usize) -> Result<Self, AstropostError> {
        let token = config.bot_token.as_deref().ok_or_else(|| {
            AstropostError::Config("telegram.bot_token is required for the Telegram adapter".into())
        })?;

        if token.is_empty() {
            return Err(AstropostError::Config(
                "telegram.bot_token cannot be empty".into(),
            ));
        }

        if config.channel_id == 0 || config.admin_id == 0 {
            return Err(AstropostError::Config(
                "telegram.channel_id and telegram.admin_id must be set".into(),
            ));
        }

        Ok(Self {
            bot: Bot::new(token),
            channel: ChatId(config.channel_id),
            admin: ChatId(config.admin_id),
            max_caption_chars,
        })
    }

    /// Returns a reference to the underlying teloxide Bot.
    pub fn bot(&self) -> &Bot {
        &self.bot
    }

    /// Deletes any configured webhook, dropping pending updates.
    ///
    /// Long polling cannot start while a webhook is registered.
    pub async fn delete_webhook(&self) -> Result<(), AstropostError> {
        self.bot
            .delete_webhook()
            .drop_pending_updates(true)
            .await
            .map_err(|e| AstropostError::Channel {
                message: format!("failed to delete webhook: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(())
    }

    /// Sends `text` to `chat`, trying Markdown first and falling back to
    /// plain text when Telegram rejects the entities.
    async fn send_with_fallback(&self, chat: ChatId, text: &str) -> Result<(), AstropostError> {
        match self
            .bot
            .send_message(chat, text)
            .parse_mode(ParseMode::Markdown)
            .await
        {
            Ok(_) => Ok(()),
            Err(e) if e.to_string().contains("can't parse entities") => {
                warn!(error = %e, "Markdown parse failed, sending as plain text");
                self.bot
                    .send_message(chat, text)
                    .await
                    .map_err(|e| AstropostError::Channel {
                        message: format!("failed to send message: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                Ok(())
            }
            Err(e) => Err(AstropostError::Channel {
                message: format!("failed to send message: {e}"),
                source: Some(Box::new(e)),
            }),
        }
    }
}

#[async_trait]
impl ChannelPublisher for TelegramChannel {
    async fn check_access(&self) -> Result<String, AstropostError> {
        let chat = self
            .bot
            .get_chat(self.channel)
            .await
            .map_err(|e| AstropostError::ChannelAccess {
                message: format!("cannot access channel {}: {e}", self.channel),
            })?;

        let title = chat.title().unwrap_or("<untitled>").to_string();
        debug!(channel = %self.channel, title = %title, "channel access verified");
        Ok(title)
    }

    async fn send_text(&self, text: &str) -> Result<(), AstropostError> {
        self.send_with_fallback(self.channel, text).await
    }

    async fn send_photo(&self, image: &[u8], caption: &str) -> Result<(), AstropostError> {
        let caption = truncate_chars(caption, self.max_caption_chars);
        let photo = InputFile::memory(image.to_vec()).file_name("image.jpg");

        match self
            .bot
            .send_photo(self.channel, photo.clone())
            .caption(caption.clone())
            .parse_mode(ParseMode::Markdown)
            .await
        {
            Ok(_) => Ok(()),
            Err(e) if e.to_string().contains("can't parse entities") => {
                warn!(error = %e, "Markdown caption failed, sending photo with plain caption");
                self.bot
                    .send_photo(self.channel, photo)
                    .caption(caption)
                    .await
                    .map_err(|e| AstropostError::Channel {
                        message: format!("failed to send photo: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                Ok(())
            }
            Err(e) => Err(AstropostError::Channel {
                message: format!("failed to send photo: {e}"),
                source: Some(Box::new(e)),
            }),
        }
    }
}

#[async_trait]
impl AdminNotifier for TelegramChannel {
    async fn notify(&self, text: &str) -> Result<(), AstropostError> {
        self.bot
            .send_message(self.admin, text)
            .await
            .map_err(|e| AstropostError::Channel {
                message: format!("failed to notify administrator: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(())
    }
}

/// Truncates `text` to at most `max` characters on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> TelegramConfig {
        TelegramConfig {
            bot_token: Some("123456:ABC-DEF1234ghIkl".into()),
            channel_id: -1001234,
            admin_id: 42,
        }
    }

    #[test]
    fn new_requires_bot_token() {
        let config = TelegramConfig {
            bot_token: None,
            ..test_config()
        };
        assert!(TelegramChannel::new(&config, 1024).is_err());
    }

    #[test]
    fn new_rejects_empty_token() {
        let config = TelegramConfig {
            bot_token: Some(String::new()),
            ..test_config()
        };
        assert!(TelegramChannel::new(&config, 1024).is_err());
    }

    #[test]
    fn new_rejects_zero_chat_ids() {
        let config = TelegramConfig {
            channel_id: 0,
            ..test_config()
        };
        assert!(TelegramChannel::new(&config, 1024).is_err());

        let config = TelegramConfig {
            admin_id: 0,
            ..test_config()
        };
        assert!(TelegramChannel::new(&config, 1024).is_err());
    }

    #[test]
    fn new_accepts_valid_config() {
        assert!(TelegramChannel::new(&test_config(), 1024).is_ok());
    }

    #[test]
    fn truncate_respects_char_count() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn truncate_is_char_boundary_safe() {
        // Multi-byte emoji must not be split mid-codepoint.
        let text = "🔮🔮🔮🔮";
        assert_eq!(truncate_chars(text, 2), "🔮🔮");
    }

    #[test]
    fn truncate_caption_limit_matches_telegram() {
        let long = "x".repeat(2000);
        assert_eq!(truncate_chars(&long, 1024).chars().count(), 1024);
    }
}
