//! Error types for the sampling engine.
//!
//! Precondition violations of the splitting protocol are programming errors
//! and are checked with debug assertions, not reported here. This module
//! covers the two recoverable categories:
//!
//! - [`SamplingError`]: operations that deliberately refuse to produce a value
//! - [`ConfigError`]: invalid parameters rejected at configuration time

use thiserror::Error;

/// Error raised by a sampling context draw.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SamplingError {
    /// The requested operation has no implementation.
    ///
    /// Returned by the closed-interval draws, which never produce a value.
    #[error("Operation not implemented: {operation}")]
    NotImplemented {
        /// Name of the operation that was called.
        operation: &'static str,
    },
}

/// Configuration error for sampling contexts and sample generators.
///
/// These errors occur during construction when invalid parameters are provided.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Context dimension exceeds the fixed offset capacity.
    #[error("Invalid dimension {dimension}: must be in range [0, {max}]")]
    InvalidDimension {
        /// Requested dimension.
        dimension: usize,
        /// Largest supported dimension.
        max: usize,
    },
    /// Generator count of zero.
    #[error("Invalid generator count {0}: must be at least 1")]
    InvalidGeneratorCount(usize),
    /// Generator index not below the generator count.
    #[error("Invalid generator index {index}: must be below generator count {count}")]
    InvalidGeneratorIndex {
        /// Requested generator index.
        index: usize,
        /// Total number of generators.
        count: usize,
    },
    /// Batch size of zero.
    #[error("Invalid batch size {0}: must be at least 1")]
    InvalidBatchSize(usize),
}
