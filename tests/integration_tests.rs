//! End-to-end checks of the public generation surface.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use norepeat::metrics::GeneratorMetrics;
use norepeat::{
    generate, GenerateError, GeneratorConfig, Params, RejectionSampler, SequenceGenerator,
};

/// Every draw produces the lowest value in range.
struct ZeroRng;

impl RngCore for ZeroRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(0)
    }
}

/// Counts every request for randomness made through it.
struct CountingRng {
    inner: StdRng,
    calls: u64,
}

impl RngCore for CountingRng {
    fn next_u32(&mut self) -> u32 {
        self.calls += 1;
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.calls += 1;
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.calls += 1;
        self.inner.fill_bytes(dst)
    }
}

// =============================================================================
// Parameter validation
// =============================================================================

#[test]
fn zero_window_is_reported_first() {
    assert_eq!(generate(3, 0, 5), Err(GenerateError::InvalidWindow));
}

#[test]
fn window_longer_than_sequence() {
    assert_eq!(
        generate(10, 6, 5),
        Err(GenerateError::WindowExceedsLength {
            window: 6,
            length: 5
        })
    );
}

#[test]
fn window_wider_than_range() {
    assert_eq!(
        generate(2, 3, 5),
        Err(GenerateError::WindowExceedsRange {
            window: 3,
            range: 2
        })
    );
}

#[test]
fn empty_length_with_zero_window_is_still_invalid_window() {
    assert_eq!(generate(5, 0, 0), Err(GenerateError::InvalidWindow));
}

#[test]
fn parameter_errors_carry_readable_messages() {
    let err = generate(2, 3, 5).unwrap_err();
    assert!(err.is_parameter_error());
    assert!(err
        .to_string()
        .starts_with("window cannot exceed range; uniqueness cannot be guaranteed"));
}

// =============================================================================
// Successful generation
// =============================================================================

#[test]
fn reference_parameters_produce_valid_sequence() {
    for _ in 0..100 {
        let seq = generate(5, 3, 10).expect("feasible parameters");
        assert_eq!(seq.len(), 10);
        assert!(seq.iter().all(|&v| (1..=5).contains(&v)), "{seq}");
        assert!(seq.is_window_distinct(3), "{seq}");
    }
}

#[test]
fn single_value_single_position() {
    let seq = generate(1, 1, 1).unwrap();
    assert_eq!(seq.into_vec(), vec![1]);
}

#[test]
fn full_window_is_a_permutation() {
    for _ in 0..50 {
        let mut values = generate(5, 5, 5).unwrap().into_vec();
        values.sort_unstable();
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
    }
}

#[test]
fn seeded_generation_is_reproducible() {
    let params = Params::new(20, 7, 200);
    let config = GeneratorConfig::default().with_seed(1234);

    let a = RejectionSampler::from_config(config)
        .generate(&params)
        .unwrap();
    let b = RejectionSampler::from_config(config)
        .generate(&params)
        .unwrap();
    assert_eq!(a, b);
    assert!(a.is_window_distinct(7));
}

#[test]
fn one_sampler_serves_many_calls() {
    let mut sampler = RejectionSampler::from_seed(9);
    let shapes = [(5, 3, 10), (1, 1, 4), (8, 8, 8), (100, 2, 1_000)];
    for (range, window, length) in shapes {
        let seq = sampler
            .generate(&Params::new(range, window, length))
            .unwrap();
        assert_eq!(seq.len(), length);
        assert!(seq.is_window_distinct(window));
    }
}

// =============================================================================
// Exhaustion and termination
// =============================================================================

#[test]
fn exhaustion_is_reported_with_position() {
    let mut sampler = RejectionSampler::with_rng(ZeroRng);
    let err = sampler.generate(&Params::new(5, 3, 10)).unwrap_err();

    assert!(err.is_exhausted());
    assert_eq!(
        err,
        GenerateError::GenerationExhausted {
            position: 1,
            attempts: 100
        }
    );
}

#[test]
fn window_of_one_never_exhausts() {
    // Nothing to collide with, so even a constant source succeeds
    let mut sampler = RejectionSampler::with_rng(ZeroRng);
    let seq = sampler.generate(&Params::new(5, 1, 6)).unwrap();
    assert_eq!(seq.into_vec(), vec![1; 6]);
}

#[test]
fn draws_never_exceed_length_times_attempts() {
    let params = Params::new(6, 6, 300);
    let config = GeneratorConfig::default().with_max_attempts(3);

    for seed in 0..50 {
        let rng = CountingRng {
            inner: StdRng::seed_from_u64(seed),
            calls: 0,
        };
        let mut sampler = RejectionSampler::with_config(rng, config);
        let _ = sampler.generate(&params);
        let calls = sampler.into_rng().calls;
        assert!(
            calls <= config.max_draws(&params),
            "seed {seed}: {calls} rng calls"
        );
    }
}

#[test]
fn huge_length_is_an_error_not_a_panic() {
    let mut sampler = RejectionSampler::with_rng(ZeroRng);
    let err = sampler
        .generate(&Params::new(3, 3, usize::MAX))
        .unwrap_err();
    assert!(err.is_exhausted());
}

#[test]
fn metrics_separate_parameter_errors_from_exhaustion() {
    let metrics = Arc::new(GeneratorMetrics::new());
    let mut exhausting =
        RejectionSampler::with_rng(ZeroRng).with_metrics(Arc::clone(&metrics));
    let mut seeded = RejectionSampler::from_seed(1).with_metrics(Arc::clone(&metrics));

    let _ = exhausting.generate(&Params::new(4, 2, 4));
    let _ = seeded.generate(&Params::new(3, 0, 5));
    let _ = seeded.generate(&Params::new(10, 6, 5));
    let _ = seeded.generate(&Params::new(2, 3, 5));
    seeded.generate(&Params::new(5, 3, 10)).unwrap();

    assert_eq!(metrics.calls_total.load(Ordering::Relaxed), 5);
    assert_eq!(metrics.succeeded_total.load(Ordering::Relaxed), 1);
    assert_eq!(metrics.exhausted_total.load(Ordering::Relaxed), 1);
    assert_eq!(metrics.invalid_window_total.load(Ordering::Relaxed), 1);
    assert_eq!(
        metrics.window_exceeds_length_total.load(Ordering::Relaxed),
        1
    );
    assert_eq!(metrics.window_exceeds_range_total.load(Ordering::Relaxed), 1);

    let text = metrics.format_prometheus();
    assert!(text.contains("norepeat_failed_total{kind=\"generation_exhausted\"} 1"));
    assert!(text.contains("norepeat_succeeded_total 1"));
}
