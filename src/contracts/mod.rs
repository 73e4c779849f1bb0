pub mod error;
pub mod params;
pub mod sequence;

pub use error::GenerateError;
pub use params::Params;
pub use sequence::{trailing_window, Sequence, SequenceGenerator};
