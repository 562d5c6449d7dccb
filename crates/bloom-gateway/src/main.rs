//! Bloom filter gateway binary.
//!
//! Reads its configuration from `BLOOM_*` environment variables and serves
//! until Ctrl+C or SIGTERM.

use anyhow::{Context, Result};
use bloom_gateway::{init_tracing, GatewayConfig, GatewayService};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = GatewayConfig::from_env();
    init_tracing(&config.logging).context("Failed to initialize tracing")?;

    let service = GatewayService::new(config).context("Failed to build gateway")?;
    service
        .serve(shutdown_signal())
        .await
        .context("Gateway server failed")?;

    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("Received shutdown signal");
}
