//! Core Bloom filter
//!
//! INVARIANTS:
//! - 0 < m <= max_size_bits and 1 <= k <= min(m, max_hash_functions) for
//!   every constructed filter
//! - No false negatives - if inserted, contains() MUST return true
//! - Estimated FPR = (1 - e^(-kn/m))^k tracks the live insert count
//!
//! A filter is never resized. Changing capacity or target rate produces a
//! brand-new instance with an empty bit field; the caller publishes it in
//! place of the old one.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, error, info, warn};

use super::bit_field::BitField;
use super::config::{FilterConfig, HashCountPolicy};
use super::hash_functions::HashFamily;
use super::parameters::{calculate_fpr, plan};
use crate::error::FilterError;

/// Bloom filter for probabilistic membership testing
///
/// All operations take `&self`: inserts and lookups from any number of
/// threads run in parallel against the same instance.
#[derive(Debug)]
pub struct BloomFilter {
    /// Bit array storing the filter state
    bits: BitField,
    /// Position generator
    hashes: HashFamily,
    /// Number of hash functions (k)
    k: usize,
    /// Size in bits (m)
    m: usize,
    /// Planned number of items (n at design time)
    capacity: usize,
    /// Target false positive rate at capacity
    target_fpr: f64,
    /// Number of insert calls so far
    inserted: AtomicU64,
}

impl BloomFilter {
    /// Create a filter with optimal parameters for `(capacity, target_fpr)`
    pub fn new_with_fpr(capacity: usize, target_fpr: f64) -> Result<Self, FilterError> {
        Self::with_config(
            &FilterConfig::new(capacity, target_fpr)?,
            HashCountPolicy::Derived,
        )
    }

    /// Create a filter from a configuration
    ///
    /// The planner always sizes m, which must not exceed `max_size_bits`.
    /// Under `HashCountPolicy::Override` a configured `hash_function_override`
    /// replaces the derived k. Either way k must satisfy
    /// `1 <= k <= min(m, max_hash_functions)`.
    pub fn with_config(config: &FilterConfig, policy: HashCountPolicy) -> Result<Self, FilterError> {
        Self::with_hash_family(config, policy, HashFamily::default())
    }

    /// Create a filter with a specific hash family
    pub fn with_hash_family(
        config: &FilterConfig,
        policy: HashCountPolicy,
        hashes: HashFamily,
    ) -> Result<Self, FilterError> {
        config.validate()?;
        let params = plan(config.capacity, config.target_fpr)?;

        // Checked before allocation: a saturated plan would otherwise abort
        if params.size_bits > config.max_size_bits {
            return Err(FilterError::FilterTooLarge {
                size_bits: params.size_bits,
                max: config.max_size_bits,
            });
        }

        let k = match (policy, config.hash_function_override) {
            (HashCountPolicy::Override, Some(k)) => k,
            _ => params.hash_count,
        };
        let max_k = params.size_bits.min(config.max_hash_functions);
        if k == 0 || k > max_k {
            return Err(FilterError::InvalidHashCount {
                count: i64::try_from(k).unwrap_or(i64::MAX),
                max: max_k,
            });
        }

        let bits = BitField::new(params.size_bits)?;

        info!(
            capacity = config.capacity,
            target_fpr = config.target_fpr,
            size_bits = params.size_bits,
            hash_count = k,
            policy = %policy,
            "Bloom filter constructed"
        );

        Ok(Self {
            bits,
            hashes,
            k,
            m: params.size_bits,
            capacity: config.capacity,
            target_fpr: config.target_fpr,
            inserted: AtomicU64::new(0),
        })
    }

    /// Build the replacement for this filter under a new configuration
    ///
    /// The result shares nothing with `self`: its bit field is empty, so every
    /// previously inserted item is gone. Positions depend on m, so old bits
    /// cannot be carried over.
    pub fn reconfigure(
        &self,
        config: &FilterConfig,
        policy: HashCountPolicy,
    ) -> Result<Self, FilterError> {
        let next = Self::with_hash_family(config, policy, self.hashes)?;
        info!(
            old_size_bits = self.m,
            old_hash_count = self.k,
            discarded_items = self.elements_inserted(),
            new_size_bits = next.m,
            new_hash_count = next.k,
            "Bloom filter rebuilt"
        );
        Ok(next)
    }

    /// Insert an element into the filter
    ///
    /// Never fails. Inserting past capacity only raises the false positive
    /// rate. After insertion `contains(element)` is guaranteed to return true.
    pub fn insert(&self, element: &[u8]) {
        for pos in self.hashes.positions(element, self.k, self.m) {
            if let Err(err) = self.bits.set(pos) {
                // Positions are reduced mod m, so this is a broken invariant.
                error!(error = %err, "hash position outside bit field");
            }
        }

        let previous = self.inserted.fetch_add(1, Ordering::AcqRel);
        if previous == self.capacity as u64 {
            warn!(
                capacity = self.capacity,
                estimated_fpr = self.estimated_false_positive_rate(),
                "Bloom filter exceeded planned capacity"
            );
        }
        debug!(item_len = element.len(), inserted = previous + 1, "Item inserted");
    }

    /// Test if an element might be in the filter
    ///
    /// Returns:
    /// - `true` if the element might be in the set (could be false positive)
    /// - `false` if the element is definitely NOT in the set
    pub fn contains(&self, element: &[u8]) -> bool {
        self.hashes
            .positions(element, self.k, self.m)
            .into_iter()
            .all(|pos| match self.bits.test(pos) {
                Ok(set) => set,
                Err(err) => {
                    error!(error = %err, "hash position outside bit field");
                    false
                }
            })
    }

    /// Current false positive estimate from the live insert count
    ///
    /// Formula: FPR = (1 - e^(-kn/m))^k
    pub fn estimated_false_positive_rate(&self) -> f64 {
        calculate_fpr(self.m, self.elements_inserted(), self.k)
    }

    /// False positive rate expected once `capacity` items are inserted
    pub fn planned_false_positive_rate(&self) -> f64 {
        calculate_fpr(self.m, self.capacity, self.k)
    }

    /// Get the number of bits set in the filter
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Fraction of bits set, in [0, 1]
    pub fn fill_ratio(&self) -> f64 {
        self.bits_set() as f64 / self.m as f64
    }

    /// Get the filter size in bits
    pub fn size_bits(&self) -> usize {
        self.m
    }

    /// Get the number of hash functions
    pub fn hash_count(&self) -> usize {
        self.k
    }

    /// Get the number of insert calls
    pub fn elements_inserted(&self) -> usize {
        self.inserted.load(Ordering::Acquire) as usize
    }

    /// Planned capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Target false positive rate the filter was planned for
    pub fn target_fpr(&self) -> f64 {
        self.target_fpr
    }

    /// Bytes held by this filter, bit storage included
    pub fn memory_size_bytes(&self) -> usize {
        std::mem::size_of::<Self>() + self.bits.memory_size_bytes()
    }
}
