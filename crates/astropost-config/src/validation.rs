// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as hour ranges and non-zero retry budgets.

use crate::diagnostic::ConfigError;
use crate::model::AstropostConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &AstropostConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    for (key, hour) in [
        ("schedule.morning_hour", config.schedule.morning_hour),
        ("schedule.zodiac_hour", config.schedule.zodiac_hour),
        ("schedule.night_hour", config.schedule.night_hour),
    ] {
        if hour > 23 {
            errors.push(ConfigError::Validation {
                message: format!("{key} must be in 0..=23, got {hour}"),
            });
        }
    }

    if !(1..=24).contains(&config.schedule.fact_every_hours) {
        errors.push(ConfigError::Validation {
            message: format!(
                "schedule.fact_every_hours must be in 1..=24, got {}",
                config.schedule.fact_every_hours
            ),
        });
    }

    if !(1..=59).contains(&config.schedule.window_minutes) {
        errors.push(ConfigError::Validation {
            message: format!(
                "schedule.window_minutes must be in 1..=59, got {}",
                config.schedule.window_minutes
            ),
        });
    }

    if config.delivery.max_attempts == 0 {
        errors.push(ConfigError::Validation {
            message: "delivery.max_attempts must be at least 1".to_string(),
        });
    }

    if config.delivery.max_caption_chars == 0 {
        errors.push(ConfigError::Validation {
            message: "delivery.max_caption_chars must be at least 1".to_string(),
        });
    }

    if config.rotation.state_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "rotation.state_path must not be empty".to_string(),
        });
    }

    // Credentials and chat ids are only required when the bot actually runs;
    // `require_runtime_settings` is called from the serve path so that
    // offline commands and tests work without secrets.

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Validate the settings that have no usable defaults.
///
/// Called at serve time: a missing bot token or zero chat id is a
/// configuration-level fatal condition.
pub fn require_runtime_settings(config: &AstropostConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    match config.telegram.bot_token.as_deref() {
        None => errors.push(ConfigError::MissingKey {
            key: "telegram.bot_token".to_string(),
        }),
        Some(token) if token.trim().is_empty() => errors.push(ConfigError::Validation {
            message: "telegram.bot_token must not be empty".to_string(),
        }),
        Some(_) => {}
    }

    if config.telegram.channel_id == 0 {
        errors.push(ConfigError::MissingKey {
            key: "telegram.channel_id".to_string(),
        });
    }

    if config.telegram.admin_id == 0 {
        errors.push(ConfigError::MissingKey {
            key: "telegram.admin_id".to_string(),
        });
    }

    if config.mistral.api_key.as_deref().unwrap_or("").trim().is_empty() {
        errors.push(ConfigError::MissingKey {
            key: "mistral.api_key".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
