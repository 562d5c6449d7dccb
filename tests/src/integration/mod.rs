//! # Integration Tests
//!
//! End-to-end flows through `FilterService` and the gateway router.

pub mod concurrency;
pub mod flows;
