pub mod error;
pub mod sample;

pub use error::{GraxxError, Result};
pub use sample::Sample;
