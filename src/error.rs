//! Crate-level error type and `Result` alias for structured error handling.
//! Structural problems with the band stack (wrong band count, mismatched plane
//! shapes, undecodable buffers) and configuration failures are reported here.
//! Non-finite values produced during classification are never errors.
use thiserror::Error;

use crate::types::ElementType;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Expected {expected} bands (B1, B2, B3, B4, B5, B7), got {actual}")]
    BandCount { expected: usize, actual: usize },

    #[error("Band plane {band} has shape {actual:?}, expected {expected:?}")]
    ShapeMismatch {
        band: String,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Unsupported element type: {0} cannot be converted to floating point")]
    UnsupportedType(ElementType),

    #[error("Buffer length mismatch: expected {expected} bytes, got {actual}")]
    BufferLength { expected: usize, actual: usize },

    #[error("Processing error: {0}")]
    Processing(String),
}

impl Error {
    pub fn processing<E: std::fmt::Display>(e: E) -> Self {
        Error::Processing(e.to_string())
    }
}
