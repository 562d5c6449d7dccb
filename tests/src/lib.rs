//! # Bloom Filter Test Suite
//!
//! Cross-crate test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # criterion benchmarks for the engine
//! │   └── filter_ops.rs
//! │
//! └── integration/      # End-to-end flows through service and router
//!     ├── flows.rs
//!     └── concurrency.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p bloom-tests
//!
//! # By category
//! cargo test -p bloom-tests integration::flows
//! cargo test -p bloom-tests integration::concurrency
//!
//! # Benchmarks
//! cargo bench -p bloom-tests
//! ```

pub mod benchmarks;
pub mod integration;
