//! Observability metrics for sequence generation.
//!
//! Lock-free atomics only, so one registry can be shared by generators on
//! any number of threads.

pub mod histogram;
pub mod registry;

pub use histogram::Histogram;
pub use registry::GeneratorMetrics;
