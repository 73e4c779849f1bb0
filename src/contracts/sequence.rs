use std::fmt;

use serde::Serialize;

use crate::contracts::error::GenerateError;
use crate::contracts::params::Params;

/// Produces sequences with no repeated value inside any trailing window.
///
/// # Invariants
/// - Parameter errors are returned before any randomness is consumed
/// - On success the sequence has exactly `params.length` values, each in `[1, params.range]`
/// - For every position `i`, no value in `[max(0, i - window + 1), i - 1]` equals `seq[i]`
/// - Every call terminates; a failed call returns no partial sequence
pub trait SequenceGenerator {
    /// Generates one sequence for the given parameters.
    fn generate(&mut self, params: &Params) -> Result<Sequence, GenerateError>;
}

/// Returns the values that a new value at `position` must differ from.
///
/// This is the slice `values[max(0, position - window + 1)..position]`, at most
/// `window - 1` elements long. A window of 0 or 1 yields an empty slice.
#[inline]
pub fn trailing_window(values: &[u32], position: usize, window: usize) -> &[u32] {
    &values[window_start(position, window)..position]
}

#[inline]
fn window_start(position: usize, window: usize) -> usize {
    (position + 1).saturating_sub(window).min(position)
}

/// An ordered sequence of generated values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Sequence {
    values: Vec<u32>,
}

impl Sequence {
    pub fn as_slice(&self) -> &[u32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, u32> {
        self.values.iter()
    }

    pub fn into_vec(self) -> Vec<u32> {
        self.values
    }

    /// Finds the first pair `(j, i)` with `j < i`, `i - j < window` and equal values.
    pub fn first_window_violation(&self, window: usize) -> Option<(usize, usize)> {
        (0..self.values.len()).find_map(|i| {
            let start = window_start(i, window);
            trailing_window(&self.values, i, window)
                .iter()
                .position(|&v| v == self.values[i])
                .map(|offset| (start + offset, i))
        })
    }

    /// True when no value repeats inside any span of `window` consecutive positions.
    pub fn is_window_distinct(&self, window: usize) -> bool {
        self.first_window_violation(window).is_none()
    }
}

impl From<Vec<u32>> for Sequence {
    fn from(values: Vec<u32>) -> Self {
        Self { values }
    }
}

impl From<Sequence> for Vec<u32> {
    fn from(seq: Sequence) -> Self {
        seq.values
    }
}

impl AsRef<[u32]> for Sequence {
    fn as_ref(&self) -> &[u32] {
        &self.values
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a u32;
    type IntoIter = std::slice::Iter<'a, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", v)?;
        }
        f.write_str("]")
    }
}
