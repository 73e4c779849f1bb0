//! Generator configuration and its environment overrides.

use crate::contracts::Params;

/// Draws allowed per position before a call fails with `GenerationExhausted`.
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

/// Configuration for a [`RejectionSampler`](super::RejectionSampler).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Maximum candidate draws per position. Always at least 1.
    pub max_attempts: usize,
    /// Seed for a deterministic RNG. `None` draws entropy from the OS.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Creates a GeneratorConfig from environment variables.
    ///
    /// Environment variables:
    /// - `NOREPEAT_MAX_ATTEMPTS`: Draws per position (default: 100, 0 is ignored)
    /// - `NOREPEAT_SEED`: u64 seed for reproducible output (default: unset)
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_attempts: std::env::var("NOREPEAT_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&n: &usize| n > 0)
                .unwrap_or(default.max_attempts),
            seed: std::env::var("NOREPEAT_SEED")
                .ok()
                .and_then(|v| v.parse().ok())
                .or(default.seed),
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Upper bound on candidate draws for one call with `params`.
    pub fn max_draws(&self, params: &Params) -> u64 {
        (params.length as u64).saturating_mul(self.max_attempts as u64)
    }
}
