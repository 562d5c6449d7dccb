//! Inbound Ports (Driving Ports)
//!
//! The API that external components (HTTP gateway, tests) use to drive the
//! filter.

use crate::error::FilterError;
use crate::events::{
    AddItemRequest, FilterState, MembershipQuery, MembershipResponse, MemorySizeResponse,
    MessageResponse, UpdateSettingsRequest,
};
use crate::metrics::MetricsSnapshot;

/// Primary filter API (Driving Port)
///
/// Every method is synchronous and CPU-bound; none blocks on I/O.
pub trait FilterApi: Send + Sync {
    /// Insert an item into the live filter
    fn add_item(&self, request: &AddItemRequest) -> Result<MessageResponse, FilterError>;

    /// Test an item against the live filter
    fn check_item(&self, query: &MembershipQuery) -> Result<MembershipResponse, FilterError>;

    /// Replace the live filter with one planned for new settings
    ///
    /// On error the live filter is left untouched.
    fn update_settings(
        &self,
        request: &UpdateSettingsRequest,
    ) -> Result<MessageResponse, FilterError>;

    /// Project the live filter into its externally visible state
    fn get_state(&self) -> FilterState;

    /// Memory held by the live filter
    fn memory_size(&self) -> MemorySizeResponse;

    /// Operation counters, if recorded
    fn metrics(&self) -> Option<MetricsSnapshot>;
}
