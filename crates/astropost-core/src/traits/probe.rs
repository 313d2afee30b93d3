// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connectivity probe trait.

use async_trait::async_trait;

/// Checks whether the process currently has network connectivity.
///
/// Used by the posting loop to skip ticks while offline and by the
/// health monitor to alert the administrator.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    /// Returns `true` when the network is reachable.
    async fn is_online(&self) -> bool;
}
