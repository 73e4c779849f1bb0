use serde::Serialize;

use crate::contracts::error::GenerateError;

/// Inputs to a single generation call.
///
/// # Invariants (checked by [`Params::validate`], in this order)
/// - `window >= 1`
/// - `window <= length`
/// - `window <= range`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Params {
    /// Inclusive upper bound; values are drawn from `[1, range]`.
    pub range: u32,
    /// Number of trailing positions that must hold distinct values.
    pub window: usize,
    /// Number of values to produce.
    pub length: usize,
}

impl Params {
    pub fn new(range: u32, window: usize, length: usize) -> Self {
        Self {
            range,
            window,
            length,
        }
    }

    /// Checks the parameter invariants. The first violated check wins.
    pub fn validate(&self) -> Result<(), GenerateError> {
        if self.window < 1 {
            return Err(GenerateError::InvalidWindow);
        }
        if self.window > self.length {
            return Err(GenerateError::WindowExceedsLength {
                window: self.window,
                length: self.length,
            });
        }
        // Widen both sides; usize may be narrower or wider than u32.
        if self.window as u64 > u64::from(self.range) {
            return Err(GenerateError::WindowExceedsRange {
                window: self.window,
                range: self.range,
            });
        }
        Ok(())
    }
}
