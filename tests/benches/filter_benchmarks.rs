//! # Bloom Filter Benchmarks
//!
//! | Operation | Claim |
//! |-----------|-------|
//! | insert / contains | O(k), independent of fill |
//! | plan | O(1) |
//! | concurrent insert | scales with workers |
//! | reconfigure | O(m) allocation |

use bloom_tests::benchmarks::filter_ops::register_benchmarks;
use criterion::{criterion_group, criterion_main};

criterion_group!(benches, register_benchmarks);
criterion_main!(benches);
