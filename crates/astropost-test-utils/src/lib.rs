// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for the Astropost workspace.
//!
//! Provides mock implementations of every adapter trait so the posting
//! loop, delivery pipeline, and health monitor can be tested without
//! network access.

pub mod mock_channel;
pub mod mock_generator;
pub mod mock_probe;

pub use mock_channel::{MockNotifier, MockPublisher, SentMessage};
pub use mock_generator::{MockImageSource, MockTextGenerator};
pub use mock_probe::MockProbe;
