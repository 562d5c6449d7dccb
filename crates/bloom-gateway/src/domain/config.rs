//! Gateway configuration with validation.
//!
//! Defaults reproduce the stock visualization server: port 5000, CORS open
//! to every origin and a 1000-item filter planned for a 1% false positive
//! rate.

use bloom_engine::domain::config::{
    DEFAULT_CAPACITY, DEFAULT_MAX_HASH_FUNCTIONS, DEFAULT_MAX_ITEM_BYTES, DEFAULT_MAX_SIZE_BITS,
    DEFAULT_TARGET_FPR,
};
use bloom_engine::{FilterConfig, HashCountPolicy};
use serde::{Deserialize, Serialize};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use thiserror::Error;

/// Main gateway configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP server configuration
    pub http: HttpConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Request limits
    pub limits: LimitsConfig,
    /// Filter built at startup
    pub filter: FilterSection,
    /// Log output
    pub logging: LoggingConfig,
}

impl GatewayConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `BLOOM_HTTP_HOST`: Bind address (default: 0.0.0.0)
    /// - `BLOOM_HTTP_PORT`: Port (default: 5000)
    /// - `BLOOM_CAPACITY`: Initial filter capacity (default: 1000)
    /// - `BLOOM_FPR`: Initial target false positive rate (default: 0.01)
    /// - `BLOOM_MAX_ITEM_BYTES`: Largest accepted item (default: 1024)
    /// - `BLOOM_MAX_SIZE_BITS`: Largest planned bit field (default: 2^30)
    /// - `BLOOM_MAX_HASH_FUNCTIONS`: Largest hash-function count (default: 64)
    /// - `BLOOM_HASH_POLICY`: `derived` or `override` (default: derived)
    /// - `BLOOM_CORS_ORIGINS`: Comma separated origins (default: *)
    /// - `BLOOM_MAX_BODY_BYTES`: Largest accepted request body (default: 64 KiB)
    /// - `BLOOM_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `BLOOM_JSON_LOGS`: Emit JSON logs (default: false)
    ///
    /// Unset or unparsable variables fall back to their defaults; call
    /// [`GatewayConfig::validate`] on the result.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            http: HttpConfig {
                host: parse_var(&lookup, "BLOOM_HTTP_HOST").unwrap_or(defaults.http.host),
                port: parse_var(&lookup, "BLOOM_HTTP_PORT").unwrap_or(defaults.http.port),
            },
            cors: CorsConfig {
                allowed_origins: lookup("BLOOM_CORS_ORIGINS")
                    .map(|v| {
                        v.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or(defaults.cors.allowed_origins),
                ..defaults.cors
            },
            limits: LimitsConfig {
                max_body_bytes: parse_var(&lookup, "BLOOM_MAX_BODY_BYTES")
                    .unwrap_or(defaults.limits.max_body_bytes),
            },
            filter: FilterSection {
                capacity: parse_var(&lookup, "BLOOM_CAPACITY").unwrap_or(defaults.filter.capacity),
                false_positive_rate: parse_var(&lookup, "BLOOM_FPR")
                    .unwrap_or(defaults.filter.false_positive_rate),
                max_item_bytes: parse_var(&lookup, "BLOOM_MAX_ITEM_BYTES")
                    .unwrap_or(defaults.filter.max_item_bytes),
                max_size_bits: parse_var(&lookup, "BLOOM_MAX_SIZE_BITS")
                    .unwrap_or(defaults.filter.max_size_bits),
                max_hash_functions: parse_var(&lookup, "BLOOM_MAX_HASH_FUNCTIONS")
                    .unwrap_or(defaults.filter.max_hash_functions),
                hash_policy: parse_var(&lookup, "BLOOM_HASH_POLICY")
                    .unwrap_or(defaults.filter.hash_policy),
            },
            logging: LoggingConfig {
                level: lookup("BLOOM_LOG_LEVEL")
                    .or_else(|| lookup("RUST_LOG"))
                    .unwrap_or(defaults.logging.level),
                json_logs: lookup("BLOOM_JSON_LOGS")
                    .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                    .unwrap_or(defaults.logging.json_logs),
            },
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        if self.limits.max_body_bytes == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_body_bytes cannot be 0".into(),
            ));
        }

        if self.cors.enabled && self.cors.allowed_origins.is_empty() {
            return Err(ConfigError::Invalid(
                "cors enabled with no allowed origins".into(),
            ));
        }

        self.filter
            .to_filter_config()
            .validate()
            .map_err(|e| ConfigError::InvalidFilter(e.to_string()))
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }
}

/// Parse a variable, treating unparsable values as unset
fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.trim().parse().ok())
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 5000)
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Enable CORS
    pub enabled: bool,
    /// Allowed origins ("*" for all)
    pub allowed_origins: Vec<String>,
    /// Max age for preflight cache, in seconds
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec!["*".to_string()],
            max_age: 86400, // 24 hours
        }
    }
}

/// Request limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Max request body size in bytes (default: 64 KiB)
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 64 * 1024,
        }
    }
}

/// Parameters of the filter built at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSection {
    /// Expected number of items
    pub capacity: usize,
    /// Target false positive rate
    pub false_positive_rate: f64,
    /// Largest accepted item, in bytes
    pub max_item_bytes: usize,
    /// Largest bit field a settings request may plan
    pub max_size_bits: usize,
    /// Largest hash-function count a filter may use
    pub max_hash_functions: usize,
    /// Treatment of `numHashFunctions` in settings requests
    pub hash_policy: HashCountPolicy,
}

impl Default for FilterSection {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            false_positive_rate: DEFAULT_TARGET_FPR,
            max_item_bytes: DEFAULT_MAX_ITEM_BYTES,
            max_size_bits: DEFAULT_MAX_SIZE_BITS,
            max_hash_functions: DEFAULT_MAX_HASH_FUNCTIONS,
            hash_policy: HashCountPolicy::default(),
        }
    }
}

impl FilterSection {
    /// Engine configuration for the startup filter
    pub fn to_filter_config(&self) -> FilterConfig {
        FilterConfig {
            capacity: self.capacity,
            target_fpr: self.false_positive_rate,
            hash_function_override: None,
            max_item_bytes: self.max_item_bytes,
            max_size_bits: self.max_size_bits,
            max_hash_functions: self.max_hash_functions,
        }
    }
}

/// Log output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive
    pub level: String,
    /// JSON formatted logs
    pub json_logs: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Port 0 is not a usable listen port
    #[error("invalid port: 0")]
    InvalidPort,
    /// Invalid size limit
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
    /// Startup filter parameters rejected by the engine
    #[error("invalid filter configuration: {0}")]
    InvalidFilter(String),
    /// General configuration error
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
