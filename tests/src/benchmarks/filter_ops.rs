//! # Filter Operation Benchmarks
//!
//! Claims to validate:
//! - insert/contains cost depends on k, not on fill level
//! - planning is constant time
//! - concurrent inserts scale without a global lock
//! - reconfigure cost is dominated by allocating the new bit array

use bloom_engine::domain::plan;
use bloom_engine::events::UpdateSettingsRequest;
use bloom_engine::{BloomFilter, FilterApi, FilterConfig, FilterService, HashCountPolicy};
use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use rayon::prelude::*;
use std::time::Duration;

fn items(count: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|i| format!("item-{}", i).into_bytes())
        .collect()
}

pub fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom/insert");
    group.measurement_time(Duration::from_secs(5));

    for fpr in [0.1, 0.01, 0.001] {
        let filter = BloomFilter::new_with_fpr(100_000, fpr).unwrap();
        let data = items(1_000);

        group.throughput(Throughput::Elements(data.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("k", filter.hash_count()),
            &data,
            |b, data| {
                b.iter(|| {
                    for item in data {
                        filter.insert(black_box(item));
                    }
                })
            },
        );
    }

    group.finish();
}

pub fn bench_contains(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom/contains");
    group.measurement_time(Duration::from_secs(5));

    // Same filter at increasing fill: cost must stay flat
    for fill in [0usize, 10_000, 100_000] {
        let filter = BloomFilter::new_with_fpr(100_000, 0.01).unwrap();
        for item in items(fill) {
            filter.insert(&item);
        }
        let probes: Vec<Vec<u8>> = (0..1_000)
            .map(|i| format!("probe-{}", i).into_bytes())
            .collect();

        group.throughput(Throughput::Elements(probes.len() as u64));
        group.bench_with_input(BenchmarkId::new("fill", fill), &probes, |b, probes| {
            b.iter(|| {
                let mut hits = 0u32;
                for probe in probes {
                    if filter.contains(black_box(probe)) {
                        hits += 1;
                    }
                }
                black_box(hits)
            })
        });
    }

    group.finish();
}

pub fn bench_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom/plan");

    for capacity in [100usize, 5_000, 1_000_000] {
        group.bench_with_input(
            BenchmarkId::new("capacity", capacity),
            &capacity,
            |b, &capacity| b.iter(|| plan(black_box(capacity), black_box(0.01))),
        );
    }

    group.finish();
}

pub fn bench_concurrent_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom/concurrent_insert");
    group.measurement_time(Duration::from_secs(5));

    let data = items(50_000);
    group.throughput(Throughput::Elements(data.len() as u64));

    group.bench_function("sequential", |b| {
        b.iter(|| {
            let filter = BloomFilter::new_with_fpr(50_000, 0.01).unwrap();
            data.iter().for_each(|item| filter.insert(item));
            black_box(filter.elements_inserted())
        })
    });

    group.bench_function("rayon", |b| {
        b.iter(|| {
            let filter = BloomFilter::new_with_fpr(50_000, 0.01).unwrap();
            data.par_iter().for_each(|item| filter.insert(item));
            black_box(filter.elements_inserted())
        })
    });

    group.finish();
}

pub fn bench_reconfigure(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom/reconfigure");

    let service = FilterService::new(FilterConfig::default(), HashCountPolicy::Derived).unwrap();

    for capacity in [1_000i64, 100_000, 1_000_000] {
        let request = UpdateSettingsRequest {
            capacity,
            false_positive_rate: 0.01,
            num_hash_functions: None,
        };
        group.bench_with_input(
            BenchmarkId::new("capacity", capacity),
            &request,
            |b, request| b.iter(|| service.update_settings(black_box(request))),
        );
    }

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_insert(c);
    bench_contains(c);
    bench_plan(c);
    bench_concurrent_insert(c);
    bench_reconfigure(c);
}
