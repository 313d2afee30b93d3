// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Astropost posting agent.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Astropost configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values; only the API credentials have no defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AstropostConfig {
    /// Agent identity and logging.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Telegram bot and target channel settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Mistral text-generation API settings.
    #[serde(default)]
    pub mistral: MistralConfig,

    /// neuroimg.art image-generation API settings.
    #[serde(default)]
    pub image: ImageConfig,

    /// Posting loop schedule windows and intervals.
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Delivery pipeline retry behavior.
    #[serde(default)]
    pub delivery: DeliveryConfig,

    /// Fallback queue drainer settings.
    #[serde(default)]
    pub queue: QueueConfig,

    /// Health monitor settings.
    #[serde(default)]
    pub health: HealthConfig,

    /// Zodiac rotation persistence settings.
    #[serde(default)]
    pub rotation: RotationConfig,
}

/// Agent identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the agent.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "astropost".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram bot integration configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. Required at runtime.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Numeric chat id of the target channel.
    #[serde(default)]
    pub channel_id: i64,

    /// Numeric chat id of the administrator for alerts.
    #[serde(default)]
    pub admin_id: i64,
}

/// Mistral API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MistralConfig {
    /// Mistral API key. Required at runtime.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier for chat completions.
    #[serde(default = "default_mistral_model")]
    pub model: String,

    /// Default token budget per generation.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// API base URL. Overridable for testing.
    #[serde(default = "default_mistral_base_url")]
    pub base_url: String,
}

impl Default for MistralConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_mistral_model(),
            max_tokens: default_max_tokens(),
            base_url: default_mistral_base_url(),
        }
    }
}

fn default_mistral_model() -> String {
    "mistral-small-latest".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_mistral_base_url() -> String {
    "https://api.mistral.ai".to_string()
}

/// neuroimg.art image-generation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ImageConfig {
    /// neuroimg.art API token. `None` disables image enrichment.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Free-generate endpoint URL.
    #[serde(default = "default_image_endpoint")]
    pub endpoint: String,

    /// Whole-request budget for one image generation, in seconds.
    #[serde(default = "default_image_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_image_endpoint(),
            timeout_secs: default_image_timeout_secs(),
        }
    }
}

fn default_image_endpoint() -> String {
    "https://neuroimg.art/api/v1/free-generate".to_string()
}

fn default_image_timeout_secs() -> u64 {
    30
}

/// Posting loop schedule configuration.
///
/// Each post kind fires within an eligibility window: the configured hour
/// plus `window_minutes` of tolerance for tick drift.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleConfig {
    /// Local hour for the morning digest.
    #[serde(default = "default_morning_hour")]
    pub morning_hour: u32,

    /// Local hour for the daily per-sign horoscope.
    #[serde(default = "default_zodiac_hour")]
    pub zodiac_hour: u32,

    /// Local hour for the night wish.
    #[serde(default = "default_night_hour")]
    pub night_hour: u32,

    /// Facts fire every N hours, on the hour.
    #[serde(default = "default_fact_every_hours")]
    pub fact_every_hours: u32,

    /// Minutes past the hour during which a window stays eligible.
    #[serde(default = "default_window_minutes")]
    pub window_minutes: u32,

    /// Sleep between idle ticks, in seconds.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Sleep before re-polling when the network is unreachable, in seconds.
    #[serde(default = "default_offline_retry_secs")]
    pub offline_retry_secs: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            morning_hour: default_morning_hour(),
            zodiac_hour: default_zodiac_hour(),
            night_hour: default_night_hour(),
            fact_every_hours: default_fact_every_hours(),
            window_minutes: default_window_minutes(),
            poll_interval_secs: default_poll_interval_secs(),
            offline_retry_secs: default_offline_retry_secs(),
        }
    }
}

fn default_morning_hour() -> u32 {
    8
}

fn default_zodiac_hour() -> u32 {
    12
}

fn default_night_hour() -> u32 {
    20
}

fn default_fact_every_hours() -> u32 {
    6
}

fn default_window_minutes() -> u32 {
    30
}

fn default_poll_interval_secs() -> u64 {
    300
}

fn default_offline_retry_secs() -> u64 {
    60
}

/// Delivery pipeline retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DeliveryConfig {
    /// Bounded retry budget per post.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Base backoff delay in seconds; attempt n waits n times this.
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,

    /// Maximum photo caption length in characters.
    #[serde(default = "default_max_caption_chars")]
    pub max_caption_chars: usize,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            retry_delay_secs: default_retry_delay_secs(),
            max_caption_chars: default_max_caption_chars(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay_secs() -> u64 {
    5
}

fn default_max_caption_chars() -> usize {
    1024
}

/// Fallback queue drainer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QueueConfig {
    /// Sleep between drain ticks, in seconds.
    #[serde(default = "default_drain_interval_secs")]
    pub drain_interval_secs: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            drain_interval_secs: default_drain_interval_secs(),
        }
    }
}

fn default_drain_interval_secs() -> u64 {
    10
}

/// Health monitor configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HealthConfig {
    /// Sleep between health cycles, in seconds.
    #[serde(default = "default_health_interval_secs")]
    pub interval_secs: u64,

    /// Sleep after an internal health-cycle error, in seconds.
    #[serde(default = "default_health_error_retry_secs")]
    pub error_retry_secs: u64,

    /// URL probed to detect network connectivity.
    #[serde(default = "default_probe_url")]
    pub probe_url: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_health_interval_secs(),
            error_retry_secs: default_health_error_retry_secs(),
            probe_url: default_probe_url(),
        }
    }
}

fn default_health_interval_secs() -> u64 {
    3600
}

fn default_health_error_retry_secs() -> u64 {
    300
}

fn default_probe_url() -> String {
    "https://www.google.com".to_string()
}

/// Zodiac rotation persistence configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RotationConfig {
    /// Path of the file holding the persisted rotation index.
    #[serde(default = "default_rotation_path")]
    pub state_path: String,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            state_path: default_rotation_path(),
        }
    }
}

fn default_rotation_path() -> String {
    "zodiac_index.txt".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_constants() {
        let config = AstropostConfig::default();
        assert_eq!(config.agent.name, "astropost");
        assert_eq!(config.mistral.model, "mistral-small-latest");
        assert_eq!(config.mistral.max_tokens, 500);
        assert_eq!(config.schedule.morning_hour, 8);
        assert_eq!(config.schedule.zodiac_hour, 12);
        assert_eq!(config.schedule.night_hour, 20);
        assert_eq!(config.schedule.fact_every_hours, 6);
        assert_eq!(config.schedule.window_minutes, 30);
        assert_eq!(config.schedule.poll_interval_secs, 300);
        assert_eq!(config.delivery.max_attempts, 3);
        assert_eq!(config.delivery.retry_delay_secs, 5);
        assert_eq!(config.delivery.max_caption_chars, 1024);
        assert_eq!(config.queue.drain_interval_secs, 10);
        assert_eq!(config.health.interval_secs, 3600);
        assert_eq!(config.rotation.state_path, "zodiac_index.txt");
    }

    #[test]
    fn credentials_default_to_none() {
        let config = AstropostConfig::default();
        assert!(config.telegram.bot_token.is_none());
        assert!(config.mistral.api_key.is_none());
        assert!(config.image.api_key.is_none());
    }
}
