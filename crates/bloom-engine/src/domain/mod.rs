//! Domain Layer - Pure filter logic
//!
//! This layer contains:
//! - Hash family (double hashing over MurmurHash3 and SipHash)
//! - Parameter planning
//! - Atomic bit field
//! - Core Bloom filter
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Pure functions where possible

pub mod bit_field;
pub mod bloom_filter;
pub mod config;
pub mod hash_functions;
pub mod parameters;

pub use bit_field::BitField;
pub use bloom_filter::BloomFilter;
pub use config::{FilterConfig, FilterConfigBuilder, HashCountPolicy};
pub use hash_functions::{compute_hash_positions, HashFamily};
pub use parameters::{calculate_fpr, plan, BloomFilterParams};
