//! Response messages returned from the filter boundary

use serde::{Deserialize, Serialize};

use crate::domain::HashCountPolicy;
use crate::error::FilterError;

/// Acknowledgement message
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Membership answer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipResponse {
    /// `true` if the item may be present, `false` if it is definitely absent
    pub exists: bool,
}

/// Memory held by the live filter
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorySizeResponse {
    /// Bytes, bit storage included
    pub memory_size: usize,
}

/// Read-only projection of the live filter
///
/// Built on demand from the current instance and never stored, so it cannot
/// drift from the filter it describes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Planned number of items (n)
    pub capacity: usize,
    /// Target false positive rate the filter was planned for
    pub false_positive_rate_target: f64,
    /// Hash functions in use (k)
    pub hash_function_count: usize,
    /// Insert calls since the filter was built
    pub items_inserted: usize,
    /// Bit-array length (m)
    pub size_bits: usize,
    /// Live estimate (1 - e^(-kn/m))^k
    pub estimated_false_positive_rate: f64,
    /// Bits currently set
    pub bits_set: usize,
    /// bits_set / size_bits
    pub fill_ratio: f64,
    /// Bytes held by the filter
    pub memory_size_bytes: usize,
    /// How submitted hash counts are treated
    pub hash_policy: HashCountPolicy,
}

/// Error response
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human readable reason
    pub message: String,
    /// One of [`error_codes`]
    pub code: u32,
}

impl From<&FilterError> for ErrorResponse {
    fn from(err: &FilterError) -> Self {
        Self {
            message: err.to_string(),
            code: error_codes::for_kind(err.kind()),
        }
    }
}

/// Error codes for filter operations
pub mod error_codes {
    use crate::error::ErrorKind;

    /// Capacity, rate or hash count rejected
    pub const INVALID_PARAMETER: u32 = 4001;
    /// Item payload or request body rejected
    pub const MALFORMED_INPUT: u32 = 4002;
    /// Internal error
    pub const INTERNAL_ERROR: u32 = 4099;

    /// Map an error kind to its code
    pub fn for_kind(kind: ErrorKind) -> u32 {
        match kind {
            ErrorKind::InvalidParameter => INVALID_PARAMETER,
            ErrorKind::MalformedInput => MALFORMED_INPUT,
            ErrorKind::Internal => INTERNAL_ERROR,
        }
    }
}
