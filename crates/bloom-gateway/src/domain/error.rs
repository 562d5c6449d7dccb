//! Gateway error types.
//!
//! `ApiError` is what a handler returns to the client: an HTTP status plus
//! the `{message, code}` body shared with the engine. `GatewayError` covers
//! startup and serving failures.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bloom_engine::events::error_codes;
use bloom_engine::{ErrorKind, ErrorResponse, FilterError};
use std::net::SocketAddr;
use thiserror::Error;

use super::config::ConfigError;

/// Error returned to HTTP clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status
    pub status: StatusCode,
    /// One of `error_codes`
    pub code: u32,
    /// Error message
    pub message: String,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, code: u32, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// Request body or query could not be read into the expected shape
    pub fn malformed(details: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            error_codes::MALFORMED_INPUT,
            details,
        )
    }
}

impl From<FilterError> for ApiError {
    fn from(err: FilterError) -> Self {
        let status = match err.kind() {
            ErrorKind::InvalidParameter | ErrorKind::MalformedInput => StatusCode::BAD_REQUEST,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorResponse::from(&err);
        Self::new(status, body.code, body.message)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // A body cut off by the size limit keeps its 413
        let status = match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };
        Self::new(status, error_codes::MALFORMED_INPUT, rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::malformed(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            message: self.message,
            code: self.code,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Startup and serving errors
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Configuration rejected
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Initial filter could not be built
    #[error("filter error: {0}")]
    Filter(#[from] FilterError),

    /// Listener could not be bound
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Server loop failed
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),

    /// Tracing subscriber could not be installed
    #[error("telemetry error: {0}")]
    Telemetry(String),
}
