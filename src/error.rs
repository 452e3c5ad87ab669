use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Startup and process-level failures.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("Cannot install log subscriber: {0}")]
    Telemetry(#[from] tracing_subscriber::util::TryInitError),

    #[error("Cannot listen on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(std::io::Error),
}

/// Reasons the webhook refuses a call.
///
/// The webhook protocol has no error body, so each maps to a bare status.
#[derive(Error, Debug)]
pub enum WebhookError {
    #[error("cannot read request body: {0}")]
    Body(#[source] axum::Error),

    #[error("request body exceeds {0} bytes")]
    TooLarge(usize),

    #[error("cannot decode request JSON body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unsupported request type: {0}")]
    UnsupportedType(String),

    #[error("cannot parse timezone: {0}")]
    Timezone(String),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebhookError::Body(_) | WebhookError::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            WebhookError::TooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            WebhookError::UnsupportedType(_) => StatusCode::UNPROCESSABLE_ENTITY,
            WebhookError::Timezone(_) => StatusCode::BAD_REQUEST,
        };
        tracing::debug!(status = status.as_u16(), error = %self, "rejecting webhook call");
        status.into_response()
    }
}
