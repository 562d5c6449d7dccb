//! Request tracing middleware.
//!
//! Every request runs inside an `http_request` span carrying a fresh UUID,
//! so the engine's `debug!`/`warn!` events can be tied back to the call that
//! caused them.

use axum::http::Request;
use tower_http::trace::{DefaultOnResponse, HttpMakeClassifier, MakeSpan, TraceLayer};
use tracing::{info_span, Level, Span};
use uuid::Uuid;

/// Span factory tagging each request with an id
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        info_span!(
            "http_request",
            request_id = %Uuid::new_v4(),
            http.method = %request.method(),
            http.target = %request.uri().path(),
        )
    }
}

/// Tracing layer used by the gateway router
pub fn create_trace_layer() -> TraceLayer<HttpMakeClassifier, RequestSpan> {
    TraceLayer::new_for_http()
        .make_span_with(RequestSpan)
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}
