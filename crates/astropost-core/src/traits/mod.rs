// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the Astropost agent.
//!
//! Every external collaborator (Telegram, Mistral, neuroimg, connectivity)
//! is reached through one of these seams, so the posting loop, delivery
//! pipeline, and health monitor can be tested against mocks. All traits
//! use `#[async_trait]` for dynamic dispatch compatibility.

pub mod channel;
pub mod generator;
pub mod probe;

pub use channel::{AdminNotifier, ChannelPublisher};
pub use generator::{ImageSource, TextGenerator};
pub use probe::ConnectivityProbe;
