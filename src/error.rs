//! Error types for stream setup and kernel dispatch.

use thiserror::Error;

/// Result type for generator operations.
pub type Result<T> = std::result::Result<T, MrgError>;

/// Errors that can occur while seeding states or planning a kernel launch.
///
/// All errors are raised synchronously, before any output buffer or state
/// vector is touched. Retrying with the same inputs fails identically; the
/// caller has to supply a valid shape or state.
#[derive(Error, Debug)]
pub enum MrgError {
    /// Requested output shape exceeds the kernel's 32-bit indexing space.
    #[error("Requested shape overflows 32-bit lane indexing: {0}")]
    CapacityOverflow(String),

    /// Output shape is malformed (non-positive dimension, zero lanes, ...).
    #[error("Invalid output shape: {0}")]
    InvalidShape(String),

    /// A state vector is out of modulus range or degenerate.
    #[error("Invalid generator state: {0}")]
    InvalidState(String),
}

impl MrgError {
    /// Create a capacity overflow error.
    pub fn capacity(msg: impl Into<String>) -> Self {
        Self::CapacityOverflow(msg.into())
    }

    /// Create an invalid shape error.
    pub fn invalid_shape(msg: impl Into<String>) -> Self {
        Self::InvalidShape(msg.into())
    }

    /// Create an invalid state error.
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }
}
