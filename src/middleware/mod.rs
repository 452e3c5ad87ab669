//! HTTP middleware wrapped around the webhook, outermost first:
//! request logging, then transparent gzip.

pub mod gzip;
pub mod logging;

pub use gzip::{gzip_middleware, CompressedBody, DecompressedBody};
pub use logging::{layer as request_log_layer, LogRequest};
