//! Filter Service
//!
//! Owns the single live filter slot and exposes it through `FilterApi`.
//!
//! Concurrency model:
//! - The slot is a `RwLock<Arc<BloomFilter>>`. Readers hold the read lock only
//!   long enough to clone the `Arc`, then insert or look up lock-free against
//!   the atomic bit field.
//! - A settings update builds the replacement filter with no lock held, then
//!   takes the write lock just to swap the handle.
//! - Operations that cloned the old handle before the swap finish against the
//!   detached instance, which is dropped with its last reference. No caller
//!   ever sees a half-built filter.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::domain::{BloomFilter, FilterConfig, HashCountPolicy};
use crate::error::FilterError;
use crate::events::{
    AddItemRequest, FilterState, MembershipQuery, MembershipResponse, MemorySizeResponse,
    MessageResponse, UpdateSettingsRequest,
};
use crate::handler::RequestValidator;
use crate::metrics::{MetricsRecorder, MetricsSnapshot, NoOpMetrics};
use crate::ports::FilterApi;

/// Acknowledgement returned after an insert
pub const ITEM_ADDED_MESSAGE: &str = "Item added to bloom filter.";
/// Acknowledgement returned after a settings update
pub const SETTINGS_UPDATED_MESSAGE: &str = "Settings updated successfully.";

/// Filter Service implementation
///
/// Implements the `FilterApi` port over one logical filter slot.
pub struct FilterService {
    /// Live filter handle
    current: RwLock<Arc<BloomFilter>>,
    /// Treatment of submitted hash counts
    policy: HashCountPolicy,
    /// Boundary validation
    validator: RequestValidator,
    /// Operation counters
    metrics: Arc<dyn MetricsRecorder>,
}

impl FilterService {
    /// Create a service whose initial filter is built from `config`
    pub fn new(config: FilterConfig, policy: HashCountPolicy) -> Result<Self, FilterError> {
        Self::with_metrics(config, policy, Arc::new(NoOpMetrics))
    }

    /// Create with a custom metrics recorder
    pub fn with_metrics(
        config: FilterConfig,
        policy: HashCountPolicy,
        metrics: Arc<dyn MetricsRecorder>,
    ) -> Result<Self, FilterError> {
        let filter = BloomFilter::with_config(&config, policy)?;
        metrics.record_filter_created(filter.size_bits(), filter.hash_count(), filter.capacity());

        Ok(Self {
            current: RwLock::new(Arc::new(filter)),
            policy,
            validator: RequestValidator::from_config(&config),
            metrics,
        })
    }

    /// Handle to the live filter
    ///
    /// The handle stays valid after a reconfiguration; it then refers to the
    /// detached old instance.
    pub fn current(&self) -> Arc<BloomFilter> {
        Arc::clone(&self.current.read())
    }

    /// Active hash count policy
    pub fn policy(&self) -> HashCountPolicy {
        self.policy
    }

    /// Insert a raw item
    pub fn insert(&self, item: &str) -> Result<(), FilterError> {
        let bytes = self.validator.validate_item(item).inspect_err(|_| {
            self.metrics.record_rejected();
        })?;

        let start = Instant::now();
        self.current().insert(bytes);
        self.metrics.record_insert(start.elapsed());
        Ok(())
    }

    /// Test a raw item
    pub fn contains(&self, item: &str) -> Result<bool, FilterError> {
        let bytes = self.validator.validate_item(item).inspect_err(|_| {
            self.metrics.record_rejected();
        })?;

        let start = Instant::now();
        let found = self.current().contains(bytes);
        self.metrics.record_lookup(start.elapsed(), found);
        debug!(found, "Membership checked");
        Ok(found)
    }

    /// Replace the live filter with one built from `config`
    ///
    /// The new filter is fully built before the swap; on any error the live
    /// filter is untouched.
    pub fn reconfigure(&self, config: &FilterConfig) -> Result<(), FilterError> {
        let next = self
            .current()
            .reconfigure(config, self.policy)
            .inspect_err(|err| {
                warn!(error = %err, "Rejected filter reconfiguration");
                self.metrics.record_rejected();
            })?;
        self.metrics
            .record_filter_created(next.size_bits(), next.hash_count(), next.capacity());

        let old = std::mem::replace(&mut *self.current.write(), Arc::new(next));
        self.metrics.record_filter_freed(old.size_bits());
        self.metrics.record_reconfigure();

        info!(
            capacity = config.capacity,
            target_fpr = config.target_fpr,
            "Filter reconfigured"
        );
        Ok(())
    }

    /// Project a filter into its externally visible state
    fn project(&self, filter: &BloomFilter) -> FilterState {
        let bits_set = filter.bits_set();
        FilterState {
            capacity: filter.capacity(),
            false_positive_rate_target: filter.target_fpr(),
            hash_function_count: filter.hash_count(),
            items_inserted: filter.elements_inserted(),
            size_bits: filter.size_bits(),
            estimated_false_positive_rate: filter.estimated_false_positive_rate(),
            bits_set,
            fill_ratio: bits_set as f64 / filter.size_bits() as f64,
            memory_size_bytes: filter.memory_size_bytes(),
            hash_policy: self.policy,
        }
    }
}

impl FilterApi for FilterService {
    fn add_item(&self, request: &AddItemRequest) -> Result<MessageResponse, FilterError> {
        self.insert(&request.item)?;
        Ok(MessageResponse::new(ITEM_ADDED_MESSAGE))
    }

    fn check_item(&self, query: &MembershipQuery) -> Result<MembershipResponse, FilterError> {
        let exists = self.contains(&query.item)?;
        Ok(MembershipResponse { exists })
    }

    fn update_settings(
        &self,
        request: &UpdateSettingsRequest,
    ) -> Result<MessageResponse, FilterError> {
        let config = self
            .validator
            .validate_settings(request, self.policy)
            .inspect_err(|err| {
                warn!(error = %err, "Rejected settings request");
                self.metrics.record_rejected();
            })?;
        self.reconfigure(&config)?;
        Ok(MessageResponse::new(SETTINGS_UPDATED_MESSAGE))
    }

    fn get_state(&self) -> FilterState {
        self.project(&self.current())
    }

    fn memory_size(&self) -> MemorySizeResponse {
        MemorySizeResponse {
            memory_size: self.current().memory_size_bytes(),
        }
    }

    fn metrics(&self) -> Option<MetricsSnapshot> {
        self.metrics.snapshot()
    }
}
