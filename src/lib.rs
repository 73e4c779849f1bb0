pub mod contracts;
pub mod generator;
pub mod metrics;

pub use contracts::{GenerateError, Params, Sequence, SequenceGenerator};
pub use generator::{generate, GeneratorConfig, RejectionSampler};
