//! Router assembly.
//!
//! Layer order, outermost first: request logging → transparent gzip →
//! webhook. The gzip layer sits on the POST route only; any other method
//! falls through to a 405 handler before encodings are looked at.

use std::sync::Arc;

use axum::{middleware::from_fn, routing::post, Router};
use chrono::{DateTime, Utc};

use crate::middleware::{gzip_middleware, request_log_layer};
use crate::routes::webhook::{method_not_allowed, webhook};

/// Source of the current time for replies that announce it.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Shared, read-only state handed to the webhook.
#[derive(Clone)]
pub struct AppState {
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Arc::new(clock),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            post(webhook)
                .route_layer(from_fn(gzip_middleware))
                .fallback(method_not_allowed),
        )
        .layer(request_log_layer())
        .with_state(state)
}
