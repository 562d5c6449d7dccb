//! Error types for the Bloom filter engine

use thiserror::Error;

/// Coarse classification of a [`FilterError`]
///
/// Every failure is a caller-input problem reported synchronously; there is
/// no retryable class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Capacity, false positive rate or hash count outside the accepted range
    InvalidParameter,
    /// Item payload rejected before it reaches the hash family
    MalformedInput,
    /// Contract violation inside the engine
    Internal,
}

/// Errors that can occur in the Bloom filter engine
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FilterError {
    #[error("Invalid capacity: {capacity} (must be at least 1)")]
    InvalidCapacity { capacity: i64 },

    #[error("Invalid false positive rate: {fpr} (must be strictly between 0 and 1)")]
    InvalidFalsePositiveRate { fpr: f64 },

    #[error("Invalid hash function count: {count} (must be between 1 and {max})")]
    InvalidHashCount { count: i64, max: usize },

    #[error("Filter too large: {size_bits} bits > {max}")]
    FilterTooLarge { size_bits: usize, max: usize },

    #[error("Item must not be empty")]
    EmptyItem,

    #[error("Item too large: {size} bytes > {max}")]
    ItemTooLarge { size: usize, max: usize },

    #[error("Bit index out of range: {index} >= {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid filter parameters: {0}")]
    InvalidParameters(String),
}

impl FilterError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            FilterError::InvalidCapacity { .. }
            | FilterError::InvalidFalsePositiveRate { .. }
            | FilterError::InvalidHashCount { .. }
            | FilterError::FilterTooLarge { .. }
            | FilterError::InvalidParameters(_) => ErrorKind::InvalidParameter,
            FilterError::EmptyItem | FilterError::ItemTooLarge { .. } => ErrorKind::MalformedInput,
            FilterError::IndexOutOfRange { .. } => ErrorKind::Internal,
        }
    }
}
