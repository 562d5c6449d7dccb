//! HTTP middleware built on tower-http.

pub mod cors;
pub mod tracing;

pub use self::cors::create_cors_layer;
pub use self::tracing::{create_trace_layer, RequestSpan};
