//! Input-validation errors surfaced by the pipeline.
//!
//! All variants describe invalid caller input; none is
//! recoverable by the pipeline itself, and no partial
//! output is produced when one is returned.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid frame dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("raw buffer holds {len} samples, expected {expected} for a {width}x{height} frame")]
    BufferLengthMismatch {
        len: usize,
        expected: usize,
        width: usize,
        height: usize,
    },

    #[error("palette step must be positive, got {0}")]
    InvalidStep(i32),
}
