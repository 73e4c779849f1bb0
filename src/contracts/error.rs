use thiserror::Error;

/// Failures reported by a [`SequenceGenerator`](super::SequenceGenerator).
///
/// The first three variants are parameter violations, detected before any
/// randomness is consumed. `GenerationExhausted` is raised mid-generation when
/// a single position runs out of draws.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("window must be at least 1")]
    InvalidWindow,

    #[error("window cannot exceed sequence length (window {window}, length {length})")]
    WindowExceedsLength { window: usize, length: usize },

    #[error(
        "window cannot exceed range; uniqueness cannot be guaranteed (window {window}, range {range})"
    )]
    WindowExceedsRange { window: usize, range: u32 },

    #[error(
        "unable to generate a value satisfying the constraint; parameters may be infeasible at this position (position {position}, {attempts} attempts)"
    )]
    GenerationExhausted { position: usize, attempts: usize },
}

impl GenerateError {
    /// True for the static precondition failures.
    pub fn is_parameter_error(&self) -> bool {
        !self.is_exhausted()
    }

    /// True when generation ran out of draws at some position.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, GenerateError::GenerationExhausted { .. })
    }

    /// Short stable name for the error kind, used as a metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerateError::InvalidWindow => "invalid_window",
            GenerateError::WindowExceedsLength { .. } => "window_exceeds_length",
            GenerateError::WindowExceedsRange { .. } => "window_exceeds_range",
            GenerateError::GenerationExhausted { .. } => "generation_exhausted",
        }
    }
}
