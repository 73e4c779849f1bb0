//! Thread-safe histogram of draws spent per committed position.
//!
//! Buckets follow the shape of the rejection loop: most positions settle on
//! the first draw or two, a long tail approaches the attempt ceiling.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

/// Fixed histogram bucket boundaries, in draws.
pub const HISTOGRAM_BUCKETS: [u64; 10] = [1, 2, 3, 5, 8, 13, 25, 50, 100, 250];

/// Lock-free histogram with cumulative buckets, suitable for
/// Prometheus `histogram_quantile()`.
///
/// # Example
///
/// ```
/// use norepeat::metrics::Histogram;
///
/// let histogram = Histogram::new();
/// histogram.observe(3);
///
/// let (sum, count, buckets) = histogram.snapshot();
/// assert_eq!(count, 1);
/// assert_eq!(sum, 3);
/// assert_eq!(buckets[1], 0);
/// assert_eq!(buckets[2], 1);
/// ```
pub struct Histogram {
    sum: AtomicU64,
    count: AtomicU64,
    buckets: [AtomicU64; HISTOGRAM_BUCKETS.len()],
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    /// Creates a new empty histogram.
    #[allow(clippy::declare_interior_mutable_const)]
    pub fn new() -> Self {
        const ZERO: AtomicU64 = AtomicU64::new(0);
        Self {
            sum: AtomicU64::new(0),
            count: AtomicU64::new(0),
            buckets: [ZERO; HISTOGRAM_BUCKETS.len()],
        }
    }

    /// Records one observation.
    ///
    /// Lock-free and safe for concurrent use; `Relaxed` ordering is enough
    /// for counters that are only ever summed.
    #[inline]
    pub fn observe(&self, value: u64) {
        self.sum.fetch_add(value, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);

        for (i, &boundary) in HISTOGRAM_BUCKETS.iter().enumerate() {
            if value <= boundary {
                self.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Returns `(sum, count, bucket_counts)`; bucket counts are cumulative.
    pub fn snapshot(&self) -> (u64, u64, [u64; HISTOGRAM_BUCKETS.len()]) {
        let sum = self.sum.load(Ordering::Relaxed);
        let count = self.count.load(Ordering::Relaxed);

        let mut buckets = [0u64; HISTOGRAM_BUCKETS.len()];
        for (i, bucket) in self.buckets.iter().enumerate() {
            buckets[i] = bucket.load(Ordering::Relaxed);
        }

        (sum, count, buckets)
    }

    /// Returns the current count of observations.
    #[inline]
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Returns the current sum of all observations.
    #[inline]
    pub fn sum(&self) -> u64 {
        self.sum.load(Ordering::Relaxed)
    }

    /// Formats the histogram in Prometheus exposition format.
    pub fn format_prometheus(&self, name: &str, help: &str) -> String {
        let (sum, count, buckets) = self.snapshot();

        let mut output = String::with_capacity(512);

        let _ = writeln!(output, "# HELP {} {}", name, help);
        let _ = writeln!(output, "# TYPE {} histogram", name);

        for (i, &boundary) in HISTOGRAM_BUCKETS.iter().enumerate() {
            let _ = writeln!(
                output,
                "{}_bucket{{le=\"{}\"}} {}",
                name, boundary, buckets[i]
            );
        }

        let _ = writeln!(output, "{}_bucket{{le=\"+Inf\"}} {}", name, count);
        let _ = writeln!(output, "{}_sum {}", name, sum);
        let _ = writeln!(output, "{}_count {}", name, count);

        output
    }
}
