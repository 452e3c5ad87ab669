//! Content-encoding infrastructure.
//!
//! Provides the pieces the gzip middleware is assembled from:
//! - header negotiation
//! - a decompressing reader for request bodies
//! - a compressing writer for response bodies
//!
//! The adapters are plain `std::io` types so they can be exercised without an
//! HTTP stack; the middleware layer bridges them onto request/response bodies.

pub mod negotiate;
pub mod reader;
pub mod writer;

use thiserror::Error;

pub use negotiate::{negotiate, Negotiation};
pub use reader::GzipReader;
pub use writer::GzipWriter;

/// The only codec this service speaks, as it appears in headers.
pub const GZIP: &str = "gzip";

/// Largest request body accepted, both as sent and after decoding.
pub const BODY_LIMIT: usize = 2 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum CodecError {
    /// The stream is not gzip at the header level (bad magic, truncated header).
    #[error("cannot initialize gzip decoder: {0}")]
    DecodeInit(#[source] std::io::Error),

    #[error("body exceeds {0} bytes")]
    TooLarge(usize),

    #[error("codec I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
