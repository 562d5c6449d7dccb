//! Boundary validation for filter requests
//!
//! Validates incoming messages before they reach the domain:
//! - Reject empty items
//! - Reject items larger than the configured bound
//! - Reject capacity < 1
//! - Reject false positive rates outside (0, 1)
//! - Reject non-positive hash-function counts, and overrides above the limit
//!
//! A rejected request never touches the hash family or the live filter. The
//! planned size is checked later, when the replacement filter is built.

use tracing::debug;

use crate::domain::config::{DEFAULT_MAX_HASH_FUNCTIONS, DEFAULT_MAX_SIZE_BITS};
use crate::domain::{FilterConfig, HashCountPolicy};
use crate::error::FilterError;
use crate::events::{AddItemRequest, MembershipQuery, UpdateSettingsRequest};

/// Validator for filter requests
#[derive(Clone, Debug)]
pub struct RequestValidator {
    max_item_bytes: usize,
    max_size_bits: usize,
    max_hash_functions: usize,
}

impl RequestValidator {
    /// Create a validator with an item size bound and default filter limits
    pub fn new(max_item_bytes: usize) -> Self {
        Self {
            max_item_bytes,
            max_size_bits: DEFAULT_MAX_SIZE_BITS,
            max_hash_functions: DEFAULT_MAX_HASH_FUNCTIONS,
        }
    }

    /// Create a validator carrying the bounds of `config`
    pub fn from_config(config: &FilterConfig) -> Self {
        Self {
            max_item_bytes: config.max_item_bytes,
            max_size_bits: config.max_size_bits,
            max_hash_functions: config.max_hash_functions,
        }
    }

    /// Validate a raw item and return its bytes
    pub fn validate_item<'a>(&self, item: &'a str) -> Result<&'a [u8], FilterError> {
        if item.is_empty() {
            debug!("Rejected empty item");
            return Err(FilterError::EmptyItem);
        }
        if item.len() > self.max_item_bytes {
            debug!(size = item.len(), max = self.max_item_bytes, "Rejected oversized item");
            return Err(FilterError::ItemTooLarge {
                size: item.len(),
                max: self.max_item_bytes,
            });
        }
        Ok(item.as_bytes())
    }

    /// Validate an AddItemRequest
    pub fn validate_add_item<'a>(&self, request: &'a AddItemRequest) -> Result<&'a [u8], FilterError> {
        self.validate_item(&request.item)
    }

    /// Validate a MembershipQuery
    pub fn validate_membership<'a>(
        &self,
        query: &'a MembershipQuery,
    ) -> Result<&'a [u8], FilterError> {
        self.validate_item(&query.item)
    }

    /// Validate an UpdateSettingsRequest and turn it into a FilterConfig
    ///
    /// A submitted hash count is always checked for positivity. It is carried
    /// into the config only under `HashCountPolicy::Override`.
    pub fn validate_settings(
        &self,
        request: &UpdateSettingsRequest,
        policy: HashCountPolicy,
    ) -> Result<FilterConfig, FilterError> {
        if request.capacity < 1 {
            return Err(FilterError::InvalidCapacity {
                capacity: request.capacity,
            });
        }
        let capacity = usize::try_from(request.capacity).map_err(|_| {
            FilterError::InvalidParameters(format!("capacity {} too large", request.capacity))
        })?;

        let hash_function_override = match request.num_hash_functions {
            Some(k) if k < 1 => {
                return Err(FilterError::InvalidHashCount {
                    count: k,
                    max: usize::MAX,
                })
            }
            Some(k) if policy == HashCountPolicy::Override => Some(usize::try_from(k).map_err(
                |_| FilterError::InvalidHashCount {
                    count: k,
                    max: usize::MAX,
                },
            )?),
            _ => None,
        };

        let config = FilterConfig {
            capacity,
            target_fpr: request.false_positive_rate,
            hash_function_override,
            max_item_bytes: self.max_item_bytes,
            max_size_bits: self.max_size_bits,
            max_hash_functions: self.max_hash_functions,
        };
        config.validate()?;
        Ok(config)
    }
}
