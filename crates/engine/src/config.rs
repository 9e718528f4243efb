//! Engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Engine settings. Every field has a default, so an empty table is valid.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Backoff policy for lost compare-and-swap races.
    pub retry: ConflictRetry,
}

/// Bounded exponential backoff for optimistic write conflicts.
///
/// The delay before retry `n` (0-based) is
/// `min(initial_delay_ms * backoff_multiplier^n, max_delay_ms)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConflictRetry {
    /// Attempts in total, the first one included. `0` behaves like `1`.
    pub max_attempts: u32,
    /// Delay before the first retry, in milliseconds.
    pub initial_delay_ms: u64,
    /// Upper bound for any single delay, in milliseconds.
    pub max_delay_ms: u64,
    /// Growth factor between consecutive delays.
    pub backoff_multiplier: f64,
}

impl Default for ConflictRetry {
    fn default() -> Self {
        Self {
            max_attempts: 8,
            initial_delay_ms: 1,
            max_delay_ms: 50,
            backoff_multiplier: 2.0,
        }
    }
}

impl ConflictRetry {
    /// A policy that gives up after the first lost race.
    #[must_use]
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Attempt budget, never below one.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// How long to wait before retry `retry` (0-based).
    #[must_use]
    pub fn delay(&self, retry: u32) -> Duration {
        let factor = self.backoff_multiplier.max(1.0).powi(retry as i32);
        let millis = (self.initial_delay_ms as f64 * factor).min(self.max_delay_ms as f64);
        Duration::from_millis(millis as u64)
    }
}
