//! # Concurrency Tests
//!
//! Many workers against one `FilterService`:
//!
//! - parallel inserts lose no bits
//! - readers never block each other
//! - a reconfigure mid-traffic leaves the service consistent

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Barrier};
    use std::thread;

    use rand::Rng;
    use rayon::prelude::*;

    use bloom_engine::events::{AddItemRequest, MembershipQuery, UpdateSettingsRequest};
    use bloom_engine::{BloomFilter, FilterApi, FilterConfig, FilterService, HashCountPolicy};

    fn service(capacity: usize) -> Arc<FilterService> {
        Arc::new(
            FilterService::new(
                FilterConfig::new(capacity, 0.01).unwrap(),
                HashCountPolicy::Derived,
            )
            .unwrap(),
        )
    }

    fn add(api: &dyn FilterApi, item: String) {
        api.add_item(&AddItemRequest { item }).unwrap();
    }

    fn check(api: &dyn FilterApi, item: String) -> bool {
        api.check_item(&MembershipQuery { item }).unwrap().exists
    }

    #[test]
    fn test_parallel_inserts_then_sequential_checks() {
        let service = service(40_000);

        (0..40_000usize)
            .into_par_iter()
            .for_each(|i| add(service.as_ref(), format!("par-{}", i)));

        assert_eq!(service.get_state().items_inserted, 40_000);
        for i in 0..40_000 {
            assert!(check(service.as_ref(), format!("par-{}", i)), "lost par-{}", i);
        }
    }

    #[test]
    fn test_threads_hammering_one_small_filter() {
        // Tiny m forces every thread onto the same few words.
        let filter = Arc::new(BloomFilter::new_with_fpr(8, 0.5).unwrap());
        let barrier = Arc::new(Barrier::new(16));

        let handles: Vec<_> = (0..16)
            .map(|t| {
                let filter = Arc::clone(&filter);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..200 {
                        filter.insert(format!("{}-{}", t, i).as_bytes());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        for t in 0..16 {
            for i in 0..200 {
                assert!(filter.contains(format!("{}-{}", t, i).as_bytes()));
            }
        }
        assert_eq!(filter.elements_inserted(), 3200);
    }

    #[test]
    fn test_readers_during_reconfigure_see_whole_filters() {
        let service = service(1_000);
        let stop = Arc::new(AtomicBool::new(false));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let service = Arc::clone(&service);
                let stop = Arc::clone(&stop);
                thread::spawn(move || {
                    let mut rng = rand::thread_rng();
                    while !stop.load(Ordering::Relaxed) {
                        let state = service.get_state();
                        // A projection always comes from one complete filter
                        assert!(state.hash_function_count >= 1);
                        assert!(state.size_bits >= state.bits_set);
                        let _ = check(service.as_ref(), format!("probe-{}", rng.gen::<u32>()));
                    }
                })
            })
            .collect();

        for capacity in [10i64, 100, 10_000, 500, 1_000] {
            service
                .update_settings(&UpdateSettingsRequest {
                    capacity,
                    false_positive_rate: 0.01,
                    num_hash_functions: None,
                })
                .unwrap();
        }
        stop.store(true, Ordering::Relaxed);
        for reader in readers {
            reader.join().unwrap();
        }

        let state = service.get_state();
        assert_eq!(state.capacity, 1_000);
        assert_eq!(state.size_bits, 9586);
    }

    #[test]
    fn test_inserts_after_final_reconfigure_are_kept() {
        let service = service(1_000);

        let writers: Vec<_> = (0..4)
            .map(|w| {
                let service = Arc::clone(&service);
                thread::spawn(move || {
                    for i in 0..250 {
                        add(service.as_ref(), format!("early-{}-{}", w, i));
                    }
                })
            })
            .collect();
        service
            .update_settings(&UpdateSettingsRequest {
                capacity: 2_000,
                false_positive_rate: 0.01,
                num_hash_functions: None,
            })
            .unwrap();
        for writer in writers {
            writer.join().unwrap();
        }

        // Everything from here on targets the settled filter
        (0..2_000usize)
            .into_par_iter()
            .for_each(|i| add(service.as_ref(), format!("late-{}", i)));

        let state = service.get_state();
        assert_eq!(state.capacity, 2_000);
        assert!(state.items_inserted >= 2_000 && state.items_inserted <= 3_000);
        for i in 0..2_000 {
            assert!(check(service.as_ref(), format!("late-{}", i)));
        }
    }
}
