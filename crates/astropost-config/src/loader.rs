// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./astropost.toml` > `~/.config/astropost/astropost.toml`
//! > `/etc/astropost/astropost.toml`, with environment variable overrides via
//! the `ASTROPOST_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::AstropostConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/astropost/astropost.toml` (system-wide)
/// 3. `~/.config/astropost/astropost.toml` (user XDG config)
/// 4. `./astropost.toml` (local directory)
/// 5. `ASTROPOST_*` environment variables
pub fn load_config() -> Result<AstropostConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AstropostConfig::default()))
        .merge(Toml::file("/etc/astropost/astropost.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("astropost/astropost.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("astropost.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<AstropostConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AstropostConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<AstropostConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AstropostConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `ASTROPOST_TELEGRAM_BOT_TOKEN` must map
/// to `telegram.bot_token`, not `telegram.bot.token`.
fn env_provider() -> Env {
    Env::prefixed("ASTROPOST_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: ASTROPOST_TELEGRAM_BOT_TOKEN -> "telegram_bot_token"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("telegram_", "telegram.", 1)
            .replacen("mistral_", "mistral.", 1)
            .replacen("image_", "image.", 1)
            .replacen("schedule_", "schedule.", 1)
            .replacen("delivery_", "delivery.", 1)
            .replacen("queue_", "queue.", 1)
            .replacen("health_", "health.", 1)
            .replacen("rotation_", "rotation.", 1);
        mapped.into()
    })
}
