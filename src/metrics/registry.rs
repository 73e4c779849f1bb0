//! Generation counters shared across generators.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use super::Histogram;
use crate::contracts::GenerateError;

/// Counters for every generation call routed through a sampler that has
/// metrics attached.
///
/// All fields are relaxed atomics; share one instance behind an `Arc`.
#[derive(Default)]
pub struct GeneratorMetrics {
    /// Total generation calls
    pub calls_total: AtomicU64,
    /// Calls that returned a complete sequence
    pub succeeded_total: AtomicU64,
    /// Calls rejected with `InvalidWindow`
    pub invalid_window_total: AtomicU64,
    /// Calls rejected with `WindowExceedsLength`
    pub window_exceeds_length_total: AtomicU64,
    /// Calls rejected with `WindowExceedsRange`
    pub window_exceeds_range_total: AtomicU64,
    /// Calls that ran out of draws mid-generation
    pub exhausted_total: AtomicU64,
    /// Values committed to successful or partial sequences
    pub values_total: AtomicU64,
    /// Candidate draws, accepted or not
    pub draws_total: AtomicU64,
    /// Draws that collided with the trailing window
    pub rejections_total: AtomicU64,
    /// Draws needed per committed position
    pub draws_per_value: Histogram,
}

impl GeneratorMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_call(&self) {
        self.calls_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a position committed after `draws` candidate draws.
    #[inline]
    pub fn record_value(&self, draws: u64) {
        self.values_total.fetch_add(1, Ordering::Relaxed);
        self.draws_total.fetch_add(draws, Ordering::Relaxed);
        self.rejections_total
            .fetch_add(draws.saturating_sub(1), Ordering::Relaxed);
        self.draws_per_value.observe(draws);
    }

    #[inline]
    pub fn record_success(&self) {
        self.succeeded_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a failed call. Draws burned at an exhausted position count as
    /// rejections.
    pub fn record_failure(&self, err: &GenerateError) {
        let counter = match err {
            GenerateError::InvalidWindow => &self.invalid_window_total,
            GenerateError::WindowExceedsLength { .. } => &self.window_exceeds_length_total,
            GenerateError::WindowExceedsRange { .. } => &self.window_exceeds_range_total,
            GenerateError::GenerationExhausted { attempts, .. } => {
                let attempts = *attempts as u64;
                self.draws_total.fetch_add(attempts, Ordering::Relaxed);
                self.rejections_total.fetch_add(attempts, Ordering::Relaxed);
                &self.exhausted_total
            }
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Total failed calls across every error kind.
    pub fn failed_total(&self) -> u64 {
        self.invalid_window_total.load(Ordering::Relaxed)
            + self.window_exceeds_length_total.load(Ordering::Relaxed)
            + self.window_exceeds_range_total.load(Ordering::Relaxed)
            + self.exhausted_total.load(Ordering::Relaxed)
    }

    /// Formats all counters in Prometheus exposition format.
    pub fn format_prometheus(&self) -> String {
        let mut output = String::with_capacity(2048);

        write_counter(
            &mut output,
            "norepeat_calls_total",
            "Total generation calls",
            self.calls_total.load(Ordering::Relaxed),
        );
        write_counter(
            &mut output,
            "norepeat_succeeded_total",
            "Generation calls that returned a sequence",
            self.succeeded_total.load(Ordering::Relaxed),
        );

        let _ = writeln!(
            output,
            "# HELP norepeat_failed_total Generation calls that failed, by error kind"
        );
        let _ = writeln!(output, "# TYPE norepeat_failed_total counter");
        for (kind, counter) in [
            ("invalid_window", &self.invalid_window_total),
            ("window_exceeds_length", &self.window_exceeds_length_total),
            ("window_exceeds_range", &self.window_exceeds_range_total),
            ("generation_exhausted", &self.exhausted_total),
        ] {
            let _ = writeln!(
                output,
                "norepeat_failed_total{{kind=\"{}\"}} {}",
                kind,
                counter.load(Ordering::Relaxed)
            );
        }
        output.push('\n');

        write_counter(
            &mut output,
            "norepeat_values_total",
            "Values committed to sequences",
            self.values_total.load(Ordering::Relaxed),
        );
        write_counter(
            &mut output,
            "norepeat_draws_total",
            "Candidate draws from the value range",
            self.draws_total.load(Ordering::Relaxed),
        );
        write_counter(
            &mut output,
            "norepeat_rejections_total",
            "Draws rejected by the trailing window",
            self.rejections_total.load(Ordering::Relaxed),
        );

        output.push_str(&self.draws_per_value.format_prometheus(
            "norepeat_draws_per_value",
            "Draws needed to place one value",
        ));

        output
    }
}

fn write_counter(output: &mut String, name: &str, help: &str, value: u64) {
    let _ = writeln!(output, "# HELP {} {}", name, help);
    let _ = writeln!(output, "# TYPE {} counter", name);
    let _ = writeln!(output, "{} {}", name, value);
    output.push('\n');
}
