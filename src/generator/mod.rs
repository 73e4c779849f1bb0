mod config;
mod rejection;

pub use config::{GeneratorConfig, DEFAULT_MAX_ATTEMPTS};
pub use rejection::RejectionSampler;

use crate::contracts::{GenerateError, Params, Sequence, SequenceGenerator};

/// Generates `length` values from `[1, range]` with no repeat inside any
/// `window` consecutive positions.
///
/// Uses the thread-local RNG and the default attempt ceiling.
///
/// ```
/// let seq = norepeat::generate(5, 3, 10).unwrap();
/// assert_eq!(seq.len(), 10);
/// assert!(seq.is_window_distinct(3));
/// ```
pub fn generate(range: u32, window: usize, length: usize) -> Result<Sequence, GenerateError> {
    RejectionSampler::new().generate(&Params::new(range, window, length))
}
