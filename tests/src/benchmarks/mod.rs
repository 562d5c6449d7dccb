//! # Bloom Filter Benchmarks
//!
//! Insert and lookup cost grows with k only, never with the number of
//! items already stored.

pub mod filter_ops;
