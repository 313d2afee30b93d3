// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock connectivity probe.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use astropost_core::traits::ConnectivityProbe;

/// A connectivity probe with a switchable online/offline state.
pub struct MockProbe {
    online: Arc<AtomicBool>,
}

impl MockProbe {
    /// A probe that reports the given initial state.
    pub fn new(online: bool) -> Self {
        Self {
            online: Arc::new(AtomicBool::new(online)),
        }
    }

    /// Flips the reported state.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }
}

#[async_trait]
impl ConnectivityProbe for MockProbe {
    async fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn probe_state_is_switchable() {
        let probe = MockProbe::new(true);
        assert!(probe.is_online().await);
        probe.set_online(false);
        assert!(!probe.is_online().await);
    }
}
