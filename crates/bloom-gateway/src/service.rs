//! Gateway service - owns the filter service and runs the HTTP server.

use crate::domain::config::GatewayConfig;
use crate::domain::error::GatewayError;
use crate::router::build_router;
use axum::Router;
use bloom_engine::{FilterApi, FilterService, Metrics};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Bloom filter HTTP gateway
pub struct GatewayService {
    config: GatewayConfig,
    api: Arc<FilterService>,
}

impl GatewayService {
    /// Validate the configuration and build the startup filter
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        config.validate()?;

        let api = Arc::new(FilterService::with_metrics(
            config.filter.to_filter_config(),
            config.filter.hash_policy,
            Arc::new(Metrics::new()),
        )?);

        Ok(Self { config, api })
    }

    /// Filter service behind the routes
    pub fn api(&self) -> Arc<FilterService> {
        Arc::clone(&self.api)
    }

    /// Router with every route and middleware attached
    pub fn router(&self) -> Router {
        let api: Arc<dyn FilterApi> = self.api.clone();
        build_router(api, &self.config)
    }

    /// Bind the configured address and serve until `shutdown` resolves
    pub async fn serve<F>(self, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.http_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| GatewayError::Bind { addr, source })?;

        self.serve_on(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve_on<F>(self, listener: TcpListener, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let state = self.api.get_state();
        info!(
            addr = ?listener.local_addr().ok(),
            capacity = state.capacity,
            size_bits = state.size_bits,
            hash_count = state.hash_function_count,
            hash_policy = %state.hash_policy,
            "Starting bloom filter gateway"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(GatewayError::Serve)?;

        info!("Bloom filter gateway stopped");
        Ok(())
    }
}
