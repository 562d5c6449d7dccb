//! # Bloom Engine
//!
//! Concurrent Bloom filter with live parameter planning, used by the
//! interactive visualization gateway.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `BitField`: Fixed-length atomic bit array
//!   - `HashFamily`: Double hashing over MurmurHash3 and SipHash-1-3
//!   - `plan`: Optimal m and k for a capacity and target rate
//!   - `BloomFilter`: Probabilistic set over a `BitField`
//!   - `FilterConfig` / `FilterConfigBuilder`: Validated configuration
//!
//! - **Ports Layer** (`ports/`): `FilterApi`, the driving port
//!
//! - **Service Layer** (`service/`): `FilterService`, owner of the live
//!   filter slot
//!
//! - **Handler Layer** (`handler/`): `RequestValidator` boundary checks
//!
//! - **Events Layer** (`events/`): Request and response messages
//!
//! ## Invariants
//!
//! - No false negatives: after `insert(x)` returns, `contains(x)` is true
//!   until the filter is replaced.
//! - `m = ceil(-n ln p / (ln 2)^2)` and `k = round(m/n ln 2)`, both at least 1.
//! - Reconfiguration is a hard reset: the new filter starts empty and is
//!   published atomically.
//!
//! ## Usage Example
//!
//! ```
//! use bloom_engine::{FilterApi, FilterConfig, FilterService, HashCountPolicy};
//! use bloom_engine::events::{AddItemRequest, MembershipQuery};
//!
//! let service = FilterService::new(FilterConfig::default(), HashCountPolicy::Derived)?;
//! service.add_item(&AddItemRequest { item: "apple".into() })?;
//!
//! let answer = service.check_item(&MembershipQuery { item: "apple".into() })?;
//! assert!(answer.exists);
//! # Ok::<(), bloom_engine::FilterError>(())
//! ```

pub mod domain;
pub mod error;
pub mod events;
pub mod handler;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use domain::{
    BitField, BloomFilter, BloomFilterParams, FilterConfig, FilterConfigBuilder, HashCountPolicy,
    HashFamily,
};
pub use error::{ErrorKind, FilterError};
pub use events::{ErrorResponse, FilterState};
pub use handler::RequestValidator;
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use ports::FilterApi;
pub use service::FilterService;
