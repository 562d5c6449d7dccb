//! Gateway domain: configuration and error types.

pub mod config;
pub mod error;

pub use config::{
    ConfigError, CorsConfig, FilterSection, GatewayConfig, HttpConfig, LimitsConfig,
    LoggingConfig,
};
pub use error::{ApiError, GatewayError};
