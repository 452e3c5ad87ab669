pub mod app;
pub mod config;
pub mod encoding;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod telemetry;

pub use app::{build_router, AppState};
pub use config::Config;
pub use error::{AppError, WebhookError};
