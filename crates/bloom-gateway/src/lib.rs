//! # Bloom Gateway
//!
//! HTTP boundary for the interactive Bloom filter visualization. Wraps a
//! [`bloom_engine::FilterService`] in an axum router with CORS, request
//! tracing and body size limits.
//!
//! ```text
//!   browser ──HTTP──▶ TraceLayer ▶ CorsLayer ▶ body limit ▶ router
//!                                                            │
//!                                                   Arc<dyn FilterApi>
//!                                                            │
//!                                                     FilterService
//!                                                 RwLock<Arc<BloomFilter>>
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use bloom_gateway::{GatewayConfig, GatewayService};
//!
//! # async fn run() -> Result<(), bloom_gateway::GatewayError> {
//! let service = GatewayService::new(GatewayConfig::from_env())?;
//! service.serve(async {
//!     let _ = tokio::signal::ctrl_c().await;
//! }).await?;
//! # Ok(())
//! # }
//! ```

pub mod domain;
pub mod middleware;
pub mod router;
pub mod service;
pub mod telemetry;

pub use domain::{ApiError, ConfigError, GatewayConfig, GatewayError};
pub use router::{build_router, AppState};
pub use service::GatewayService;
pub use telemetry::init_tracing;
