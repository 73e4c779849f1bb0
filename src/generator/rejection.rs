use std::sync::Arc;

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

use crate::contracts::{trailing_window, GenerateError, Params, Sequence, SequenceGenerator};
use crate::generator::config::GeneratorConfig;
use crate::metrics::GeneratorMetrics;

const PREALLOCATE_LIMIT: usize = 4096;

/// Greedy per-position rejection sampler.
///
/// Each position draws uniformly from `[1, range]` until the candidate is
/// absent from the trailing window, giving up after `max_attempts` draws.
/// Committed positions are never revisited, so a feasible parameter set can
/// still exhaust on an unlucky run.
pub struct RejectionSampler<R = ThreadRng> {
    rng: R,
    config: GeneratorConfig,
    metrics: Option<Arc<GeneratorMetrics>>,
}

impl RejectionSampler<ThreadRng> {
    /// Creates a sampler on the thread-local RNG with the default config.
    pub fn new() -> Self {
        Self::with_rng(rand::rng())
    }
}

impl Default for RejectionSampler<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl RejectionSampler<StdRng> {
    /// Creates a deterministic sampler: equal seeds give equal sequences.
    pub fn from_seed(seed: u64) -> Self {
        Self::from_config(GeneratorConfig::default().with_seed(seed))
    }

    /// Creates a sampler seeded from `config.seed`, or from OS entropy when unset.
    pub fn from_config(config: GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_config(rng, config)
    }
}

impl<R: Rng> RejectionSampler<R> {
    pub fn with_rng(rng: R) -> Self {
        Self::with_config(rng, GeneratorConfig::default())
    }

    pub fn with_config(rng: R, config: GeneratorConfig) -> Self {
        Self {
            rng,
            config: GeneratorConfig {
                max_attempts: config.max_attempts.max(1),
                ..config
            },
            metrics: None,
        }
    }

    /// Attaches a shared metrics sink.
    pub fn with_metrics(mut self, metrics: Arc<GeneratorMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn into_rng(self) -> R {
        self.rng
    }

    fn run(&mut self, params: &Params) -> Result<Sequence, GenerateError> {
        params.validate()?;

        // length is unbounded; grow past the first chunk on demand
        let mut values = Vec::with_capacity(params.length.min(PREALLOCATE_LIMIT));
        for position in 0..params.length {
            let value = self.draw_admissible(&values, position, params)?;
            values.push(value);
        }
        Ok(Sequence::from(values))
    }

    fn draw_admissible(
        &mut self,
        values: &[u32],
        position: usize,
        params: &Params,
    ) -> Result<u32, GenerateError> {
        let forbidden = trailing_window(values, position, params.window);

        for attempt in 1..=self.config.max_attempts {
            let candidate = self.rng.random_range(1..=params.range);
            if !forbidden.contains(&candidate) {
                if let Some(ref metrics) = self.metrics {
                    metrics.record_value(attempt as u64);
                }
                tracing::trace!(position, candidate, attempt, "placed value");
                return Ok(candidate);
            }
        }

        Err(GenerateError::GenerationExhausted {
            position,
            attempts: self.config.max_attempts,
        })
    }
}

impl<R: Rng> SequenceGenerator for RejectionSampler<R> {
    fn generate(&mut self, params: &Params) -> Result<Sequence, GenerateError> {
        if let Some(ref metrics) = self.metrics {
            metrics.record_call();
        }

        let result = self.run(params);

        match &result {
            Ok(_) => {
                if let Some(ref metrics) = self.metrics {
                    metrics.record_success();
                }
                tracing::debug!(
                    range = params.range,
                    window = params.window,
                    length = params.length,
                    "generated sequence"
                );
            }
            Err(err) => {
                if let Some(ref metrics) = self.metrics {
                    metrics.record_failure(err);
                }
                tracing::debug!(
                    kind = err.kind(),
                    error = %err,
                    range = params.range,
                    window = params.window,
                    length = params.length,
                    "generation failed"
                );
            }
        }

        result
    }
}
