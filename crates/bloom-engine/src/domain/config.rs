//! Filter configuration and validation
//!
//! # Example
//!
//! ```
//! use bloom_engine::domain::FilterConfigBuilder;
//!
//! let config = FilterConfigBuilder::new()
//!     .capacity(5000)
//!     .target_fpr(0.05)
//!     .build()
//!     .expect("valid config");
//! assert_eq!(config.capacity, 5000);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::parameters::validate_inputs;
use crate::error::FilterError;

/// Default capacity of the filter created at service start
pub const DEFAULT_CAPACITY: usize = 1000;
/// Default target false positive rate of the filter created at service start
pub const DEFAULT_TARGET_FPR: f64 = 0.01;
/// Default upper bound on a single item payload
pub const DEFAULT_MAX_ITEM_BYTES: usize = 1024;
/// Default upper bound on the planned bit count (128 MiB of bit storage)
pub const DEFAULT_MAX_SIZE_BITS: usize = 1 << 30;
/// Default upper bound on the hash-function count
pub const DEFAULT_MAX_HASH_FUNCTIONS: usize = 64;

/// How a submitted hash-function count is treated
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashCountPolicy {
    /// k is always derived from `(capacity, target_fpr)`; a submitted count is
    /// validated and otherwise ignored
    #[default]
    Derived,
    /// A submitted count replaces the derived k; the planner still sizes m
    Override,
}

impl fmt::Display for HashCountPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashCountPolicy::Derived => write!(f, "derived"),
            HashCountPolicy::Override => write!(f, "override"),
        }
    }
}

impl FromStr for HashCountPolicy {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "derived" | "derive" => Ok(HashCountPolicy::Derived),
            "override" => Ok(HashCountPolicy::Override),
            other => Err(FilterError::InvalidParameters(format!(
                "unknown hash count policy: {}",
                other
            ))),
        }
    }
}

/// Filter configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Expected number of distinct items (n)
    pub capacity: usize,
    /// Target false positive rate at capacity, in (0, 1)
    pub target_fpr: f64,
    /// Explicit hash-function count, used only under `HashCountPolicy::Override`
    pub hash_function_override: Option<usize>,
    /// Largest accepted item payload in bytes
    pub max_item_bytes: usize,
    /// Largest bit field the planner may request
    #[serde(default = "default_max_size_bits")]
    pub max_size_bits: usize,
    /// Largest hash-function count, derived or overridden
    #[serde(default = "default_max_hash_functions")]
    pub max_hash_functions: usize,
}

fn default_max_size_bits() -> usize {
    DEFAULT_MAX_SIZE_BITS
}

fn default_max_hash_functions() -> usize {
    DEFAULT_MAX_HASH_FUNCTIONS
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            target_fpr: DEFAULT_TARGET_FPR,
            hash_function_override: None,
            max_item_bytes: DEFAULT_MAX_ITEM_BYTES,
            max_size_bits: DEFAULT_MAX_SIZE_BITS,
            max_hash_functions: DEFAULT_MAX_HASH_FUNCTIONS,
        }
    }
}

impl FilterConfig {
    /// Create a new configuration with validation
    pub fn new(capacity: usize, target_fpr: f64) -> Result<Self, FilterError> {
        let config = Self {
            capacity,
            target_fpr,
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate every field
    ///
    /// The planned size and the `k <= m` bound depend on the planner and are
    /// checked when the filter is built.
    pub fn validate(&self) -> Result<(), FilterError> {
        validate_inputs(
            i64::try_from(self.capacity).unwrap_or(i64::MAX),
            self.target_fpr,
        )?;

        if self.max_item_bytes == 0 {
            return Err(FilterError::InvalidParameters(
                "max_item_bytes cannot be 0".to_string(),
            ));
        }

        if self.max_size_bits == 0 {
            return Err(FilterError::InvalidParameters(
                "max_size_bits cannot be 0".to_string(),
            ));
        }

        if self.max_hash_functions == 0 {
            return Err(FilterError::InvalidParameters(
                "max_hash_functions cannot be 0".to_string(),
            ));
        }

        if let Some(k) = self.hash_function_override {
            if k == 0 || k > self.max_hash_functions {
                return Err(FilterError::InvalidHashCount {
                    count: i64::try_from(k).unwrap_or(i64::MAX),
                    max: self.max_hash_functions,
                });
            }
        }

        Ok(())
    }

    /// Builder-style method to set size and hash-count limits
    pub fn with_limits(mut self, max_size_bits: usize, max_hash_functions: usize) -> Self {
        self.max_size_bits = max_size_bits;
        self.max_hash_functions = max_hash_functions;
        self
    }

    /// Builder-style method to set a hash-function override
    pub fn with_hash_override(mut self, k: usize) -> Self {
        self.hash_function_override = Some(k);
        self
    }
}

/// Builder for FilterConfig with validation
#[derive(Default)]
pub struct FilterConfigBuilder {
    capacity: Option<usize>,
    target_fpr: Option<f64>,
    hash_function_override: Option<usize>,
    max_item_bytes: Option<usize>,
    max_size_bits: Option<usize>,
    max_hash_functions: Option<usize>,
}

impl FilterConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the expected number of items
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Set the target false positive rate
    pub fn target_fpr(mut self, fpr: f64) -> Self {
        self.target_fpr = Some(fpr);
        self
    }

    /// Set an explicit hash-function count
    pub fn hash_function_override(mut self, k: usize) -> Self {
        self.hash_function_override = Some(k);
        self
    }

    /// Set the largest accepted item payload
    pub fn max_item_bytes(mut self, bytes: usize) -> Self {
        self.max_item_bytes = Some(bytes);
        self
    }

    /// Set the largest bit field the planner may request
    pub fn max_size_bits(mut self, bits: usize) -> Self {
        self.max_size_bits = Some(bits);
        self
    }

    /// Set the largest hash-function count
    pub fn max_hash_functions(mut self, k: usize) -> Self {
        self.max_hash_functions = Some(k);
        self
    }

    /// Build the FilterConfig, validating all parameters
    pub fn build(self) -> Result<FilterConfig, FilterError> {
        let config = self.build_unchecked();
        config.validate()?;
        Ok(config)
    }

    /// Build without validation (for internal use only)
    pub fn build_unchecked(self) -> FilterConfig {
        let defaults = FilterConfig::default();

        FilterConfig {
            capacity: self.capacity.unwrap_or(defaults.capacity),
            target_fpr: self.target_fpr.unwrap_or(defaults.target_fpr),
            hash_function_override: self.hash_function_override,
            max_item_bytes: self.max_item_bytes.unwrap_or(defaults.max_item_bytes),
            max_size_bits: self.max_size_bits.unwrap_or(defaults.max_size_bits),
            max_hash_functions: self
                .max_hash_functions
                .unwrap_or(defaults.max_hash_functions),
        }
    }
}
