// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Astropost posting agent.
//!
//! Provides the foundational trait definitions, error type, and common
//! types used throughout the Astropost workspace. Adapter crates
//! (Telegram, Mistral, neuroimg) implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::AstropostError;
pub use types::{DeliveryOutcome, HealthStatus, Post, PostKind};

pub use traits::{AdminNotifier, ChannelPublisher, ConnectivityProbe, ImageSource, TextGenerator};
