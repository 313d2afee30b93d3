// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Zodiac sign rotation with file persistence.
//!
//! A single decimal integer on disk points at the next sign to publish.
//! The pointer survives process restarts so the daily horoscope walks
//! the full 12-sign cycle without repeats or gaps.

use std::fs;
use std::path::PathBuf;

use astropost_core::AstropostError;
use chrono::Datelike;
use tracing::{debug, warn};

/// The fixed sign cycle, in rotation order.
pub const ZODIAC_SIGNS: [&str; 12] = [
    "Aries",
    "Taurus",
    "Gemini",
    "Cancer",
    "Leo",
    "Virgo",
    "Libra",
    "Scorpio",
    "Sagittarius",
    "Capricorn",
    "Aquarius",
    "Pisces",
];

/// Explicit rotation state owned by the content generator.
///
/// Invariant: `index` is always in `[0, 12)`. Advancing persists the new
/// index before the caller sees the selected sign's horoscope published.
#[derive(Debug)]
pub struct ZodiacRotation {
    path: PathBuf,
    index: usize,
}

impl ZodiacRotation {
    /// Loads the rotation state from `path`.
    ///
    /// When the file is absent or corrupt, defaults to the day of month
    /// modulo the sign count so a fresh install still varies by date.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let index = match fs::read_to_string(&path) {
            Ok(content) => match content.trim().parse::<usize>() {
                Ok(i) if i < ZODIAC_SIGNS.len() => i,
                Ok(i) => {
                    warn!(index = i, "persisted rotation index out of range, using default");
                    Self::default_index()
                }
                Err(e) => {
                    warn!(error = %e, "persisted rotation index unparseable, using default");
                    Self::default_index()
                }
            },
            Err(e) => {
                debug!(error = %e, path = %path.display(), "no rotation state, using default");
                Self::default_index()
            }
        };

        Self { path, index }
    }

    fn default_index() -> usize {
        chrono::Local::now().day() as usize % ZODIAC_SIGNS.len()
    }

    /// The current index into [`ZODIAC_SIGNS`].
    pub fn index(&self) -> usize {
        self.index
    }

    /// Selects the sign at the current index, then advances (mod 12) and
    /// persists the new index.
    ///
    /// There is deliberately no way to peek without advancing: selecting
    /// a sign consumes its slot in the cycle.
    pub fn next_sign(&mut self) -> Result<&'static str, AstropostError> {
        let sign = ZODIAC_SIGNS[self.index];
        self.index = (self.index + 1) % ZODIAC_SIGNS.len();
        self.persist()?;
        Ok(sign)
    }

    fn persist(&self) -> Result<(), AstropostError> {
        fs::write(&self.path, self.index.to_string()).map_err(|e| AstropostError::Storage {
            source: Box::new(e),
        })
    }
}
