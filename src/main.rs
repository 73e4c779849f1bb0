use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use norepeat::metrics::GeneratorMetrics;
use norepeat::{GeneratorConfig, Params, RejectionSampler, Sequence, SequenceGenerator};

#[derive(Error, Debug)]
enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },

    #[error("unknown output format {0:?}, expected \"text\" or \"json\"")]
    UnknownFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::UnknownFormat(s.to_string())),
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    params: &'a Params,
    max_attempts: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    sequence: &'a Sequence,
}

/// Reads a required-shape variable: unset means `default`, garbage is an error.
fn env_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        Err(_) => Ok(default),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("norepeat=info".parse()?))
        .init();

    let params = Params::new(
        env_or("NOREPEAT_RANGE", 5)?,
        env_or("NOREPEAT_WINDOW", 3)?,
        env_or("NOREPEAT_LENGTH", 10)?,
    );
    let format = match std::env::var("NOREPEAT_FORMAT") {
        Ok(value) => value.parse()?,
        Err(_) => OutputFormat::Text,
    };
    let metrics_enabled = std::env::var("NOREPEAT_METRICS")
        .ok()
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    let config = GeneratorConfig::from_env();

    tracing::info!(
        range = params.range,
        window = params.window,
        length = params.length,
        max_attempts = config.max_attempts,
        seeded = config.seed.is_some(),
        "Generating sequence"
    );

    let metrics = Arc::new(GeneratorMetrics::new());
    let mut sampler = RejectionSampler::from_config(config).with_metrics(Arc::clone(&metrics));
    let result = sampler.generate(&params);

    if metrics_enabled {
        eprint!("{}", metrics.format_prometheus());
    }

    let sequence = result?;

    match format {
        OutputFormat::Text => println!("{}", sequence),
        OutputFormat::Json => {
            let report = Report {
                params: &params,
                max_attempts: config.max_attempts,
                seed: config.seed,
                sequence: &sequence,
            };
            println!("{}", serde_json::to_string(&report)?);
        }
    }

    Ok(())
}
