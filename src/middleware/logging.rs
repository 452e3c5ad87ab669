//! Request logging.
//!
//! Outermost layer of the stack: records every request's method and path
//! before anything else touches it. Built on tower-http's `TraceLayer` so the
//! request also gets a span and a completion event with latency and status.

use axum::http::Request;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    trace::{DefaultMakeSpan, OnRequest, TraceLayer},
};
use tracing::Span;

/// Emits one debug event per incoming request.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRequest;

impl<B> OnRequest<B> for LogRequest {
    fn on_request(&mut self, request: &Request<B>, _span: &Span) {
        tracing::debug!(
            method = %request.method(),
            path = %request.uri().path(),
            "got incoming HTTP request"
        );
    }
}

pub type RequestLogLayer =
    TraceLayer<SharedClassifier<ServerErrorsAsFailures>, DefaultMakeSpan, LogRequest>;

pub fn layer() -> RequestLogLayer {
    TraceLayer::new_for_http().on_request(LogRequest)
}
