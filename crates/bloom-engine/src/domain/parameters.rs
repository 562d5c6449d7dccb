//! Optimal Bloom filter parameter planning
//!
//! Formulas:
//! - m = ceil(-n * ln(p) / ln(2)^2)   -- optimal bits, at least 1
//! - k = max(1, round((m / n) * ln(2))) -- optimal hash functions
//! - FPR(n) = (1 - e^(-kn/m))^k

use std::f64::consts::LN_2;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Structural parameters of a Bloom filter
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BloomFilterParams {
    /// Number of bits in the filter (m)
    pub size_bits: usize,
    /// Number of hash functions (k)
    pub hash_count: usize,
    /// False positive rate expected at full capacity
    pub expected_fpr: f64,
}

/// Validate a `(capacity, target_fpr)` pair
pub fn validate_inputs(capacity: i64, target_fpr: f64) -> Result<(), FilterError> {
    if capacity < 1 {
        return Err(FilterError::InvalidCapacity { capacity });
    }
    // NaN fails both comparisons and is rejected here too
    if !(target_fpr > 0.0 && target_fpr < 1.0) {
        return Err(FilterError::InvalidFalsePositiveRate { fpr: target_fpr });
    }
    Ok(())
}

/// Plan `(m, k)` for a capacity and a target false positive rate
///
/// Rejects `capacity < 1` and any rate outside the open interval `(0, 1)`
/// before anything is computed. Identical inputs always produce identical
/// outputs.
pub fn plan(capacity: usize, target_fpr: f64) -> Result<BloomFilterParams, FilterError> {
    validate_inputs(i64::try_from(capacity).unwrap_or(i64::MAX), target_fpr)?;

    let size_bits = minimum_bits(capacity, target_fpr);
    let hash_count = optimal_k(size_bits, capacity);
    let expected_fpr = calculate_fpr(size_bits, capacity, hash_count);

    Ok(BloomFilterParams {
        size_bits,
        hash_count,
        expected_fpr,
    })
}

/// Calculate the false positive rate for given parameters
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn calculate_fpr(m: usize, n: usize, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}

/// Calculate optimal k for given m and n, at least 1
pub fn optimal_k(m: usize, n: usize) -> usize {
    if n == 0 {
        return 1;
    }
    (((m as f64 / n as f64) * LN_2).round() as usize).max(1)
}

/// Calculate minimum m for given n and target FPR, at least 1
pub fn minimum_bits(n: usize, target_fpr: f64) -> usize {
    let ln2_squared = LN_2 * LN_2;
    let m = (-(n as f64) * target_fpr.ln() / ln2_squared).ceil() as usize;
    m.max(1)
}
