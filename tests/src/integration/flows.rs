//! # Integration Test Flows
//!
//! Drives the filter the way the visualization client does:
//!
//! 1. **Service flow**: settings → add → check → settings (hard reset)
//! 2. **HTTP flow**: the same sequence through the gateway router
//! 3. **Accuracy**: empirical false positive rate against the plan

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use bloom_engine::domain::plan;
    use bloom_engine::events::{AddItemRequest, MembershipQuery, UpdateSettingsRequest};
    use bloom_engine::{BloomFilter, FilterApi, FilterConfig, FilterService, HashCountPolicy};
    use bloom_gateway::{GatewayConfig, GatewayService};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn service() -> FilterService {
        FilterService::new(FilterConfig::default(), HashCountPolicy::Derived).unwrap()
    }

    fn settings(capacity: i64, fpr: f64, k: Option<i64>) -> UpdateSettingsRequest {
        UpdateSettingsRequest {
            capacity,
            false_positive_rate: fpr,
            num_hash_functions: k,
        }
    }

    fn add(api: &dyn FilterApi, item: &str) {
        api.add_item(&AddItemRequest {
            item: item.to_string(),
        })
        .unwrap();
    }

    fn check(api: &dyn FilterApi, item: &str) -> bool {
        api.check_item(&MembershipQuery {
            item: item.to_string(),
        })
        .unwrap()
        .exists
    }

    async fn call(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    // =============================================================================
    // SERVICE FLOW
    // =============================================================================

    #[test]
    fn test_apple_banana_scenario() {
        let params = plan(5000, 0.05).unwrap();
        assert_eq!(params.size_bits, 31_177);
        assert_eq!(params.hash_count, 4);

        let service = service();
        service.update_settings(&settings(5000, 0.05, Some(5))).unwrap();

        add(&service, "apple");
        assert!(check(&service, "apple"));
        assert!(!check(&service, "banana"));

        service.update_settings(&settings(100, 0.01, None)).unwrap();
        assert!(!check(&service, "apple"), "Reconfigure discards every item");

        let state = service.get_state();
        assert_eq!(state.size_bits, 959);
        assert_eq!(state.hash_function_count, 7);
        assert_eq!(state.items_inserted, 0);
    }

    #[test]
    fn test_plan_is_reproducible() {
        let first = plan(5000, 0.05).unwrap();
        for _ in 0..10 {
            assert_eq!(plan(5000, 0.05).unwrap(), first);
        }
    }

    #[test]
    fn test_rejected_settings_keep_contents() {
        let service = service();
        add(&service, "apple");

        assert!(service.update_settings(&settings(-1, 0.01, None)).is_err());
        assert!(service.update_settings(&settings(10, 0.0, None)).is_err());

        assert!(check(&service, "apple"));
        assert_eq!(service.get_state().capacity, 1000);
    }

    #[test]
    fn test_state_tracks_inserts() {
        let service = service();
        for i in 0..10 {
            add(&service, &format!("item-{}", i));
        }

        let state = service.get_state();
        assert_eq!(state.items_inserted, 10);
        assert!(state.bits_set > 0 && state.bits_set <= 70);
        assert!(state.estimated_false_positive_rate > 0.0);
        assert!(state.fill_ratio > 0.0 && state.fill_ratio < 0.01);
    }

    // =============================================================================
    // ACCURACY
    // =============================================================================

    #[test]
    fn test_empirical_fpr_within_twice_target() {
        for (capacity, fpr) in [(1_000usize, 0.01), (5_000, 0.05)] {
            let filter = BloomFilter::new_with_fpr(capacity, fpr).unwrap();
            for i in 0..capacity {
                filter.insert(format!("member-{}", i).as_bytes());
            }

            let probes = 20_000;
            let false_positives = (0..probes)
                .filter(|i| filter.contains(format!("outsider-{}", i).as_bytes()))
                .count();
            let observed = false_positives as f64 / probes as f64;

            assert!(
                observed <= 2.0 * fpr,
                "capacity {} fpr {}: observed {}",
                capacity,
                fpr,
                observed
            );
        }
    }

    // =============================================================================
    // HTTP FLOW
    // =============================================================================

    #[tokio::test]
    async fn test_http_scenario() {
        let gateway = GatewayService::new(GatewayConfig::default()).unwrap();
        let router = gateway.router();

        let (status, body) = call(
            &router,
            Method::POST,
            "/api/bloom-filter/settings",
            Some(json!({"capacity": 5000, "falsePositiveRate": 0.05, "numHashFunctions": 5})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Settings updated successfully.");

        let (status, body) = call(
            &router,
            Method::POST,
            "/api/bloom-filter",
            Some(json!({"item": "apple"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Item added to bloom filter.");

        let (_, body) = call(&router, Method::GET, "/api/bloom-filter?item=apple", None).await;
        assert_eq!(body, json!({"exists": true}));

        let (_, body) = call(&router, Method::GET, "/api/bloom-filter?item=banana", None).await;
        assert_eq!(body, json!({"exists": false}));

        call(
            &router,
            Method::POST,
            "/api/bloom-filter/settings",
            Some(json!({"capacity": 100, "falsePositiveRate": 0.01})),
        )
        .await;
        let (_, body) = call(&router, Method::GET, "/api/bloom-filter?item=apple", None).await;
        assert_eq!(body, json!({"exists": false}));

        let (_, metrics) = call(&router, Method::GET, "/api/bloom-filter/metrics", None).await;
        assert_eq!(metrics["reconfigurations"], 2);
        assert_eq!(metrics["elementsInserted"], 1);
    }

    #[tokio::test]
    async fn test_http_memory_size_matches_service() {
        let gateway = GatewayService::new(GatewayConfig::default()).unwrap();
        let api = gateway.api();
        let router = gateway.router();

        let (status, body) =
            call(&router, Method::GET, "/api/bloom-filter/memory-size", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["memorySize"], api.memory_size().memory_size);
    }

    #[tokio::test]
    async fn test_http_and_service_share_filter() {
        let gateway = GatewayService::new(GatewayConfig::default()).unwrap();
        let api: Arc<FilterService> = gateway.api();
        let router = gateway.router();

        add(api.as_ref(), "direct");

        let (_, body) = call(&router, Method::GET, "/api/bloom-filter?item=direct", None).await;
        assert_eq!(body, json!({"exists": true}));
    }
}
