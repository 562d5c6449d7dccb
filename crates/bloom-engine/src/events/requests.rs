//! Request messages accepted at the filter boundary
//!
//! Field names follow the JSON shapes sent by the visualization client.

use serde::{Deserialize, Serialize};

/// Insert an item
///
/// `POST /api/bloom-filter {"item": "..."}`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AddItemRequest {
    /// Item to insert
    pub item: String,
}

/// Membership query
///
/// `GET /api/bloom-filter?item=...`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MembershipQuery {
    /// Item to test
    pub item: String,
}

/// Replace the filter with one planned for new parameters
///
/// `POST /api/bloom-filter/settings`
///
/// Numeric fields are signed so that non-positive values reach validation
/// and are reported as invalid parameters rather than as parse failures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    /// Expected number of distinct items
    pub capacity: i64,
    /// Target false positive rate, in (0, 1)
    pub false_positive_rate: f64,
    /// Requested hash-function count
    #[serde(default)]
    pub num_hash_functions: Option<i64>,
}
