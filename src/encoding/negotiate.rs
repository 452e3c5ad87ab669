//! Encoding negotiation.
//!
//! Decides, once per request, which directions of the exchange are gzip
//! encoded. Matching is a case-sensitive substring test: `gzip;q=0.8, br`
//! counts as acceptance, and so does `x-gzip` or `nogzip`.

use axum::http::{header, HeaderMap};

use super::GZIP;

/// Outcome of negotiating one request's encodings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Negotiation {
    /// The client accepts a gzip-encoded response.
    pub compress_response: bool,
    /// The client declared the request body gzip-encoded.
    pub decompress_request: bool,
}

impl Negotiation {
    /// Reads `Accept-Encoding` and `Content-Encoding` from a request.
    ///
    /// Missing headers and values that are not visible ASCII are treated as
    /// empty strings.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let value = |name| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
        };
        negotiate(value(header::ACCEPT_ENCODING), value(header::CONTENT_ENCODING))
    }
}

/// Pure negotiation over the raw header values.
pub fn negotiate(accept_encoding: &str, content_encoding: &str) -> Negotiation {
    Negotiation {
        compress_response: accept_encoding.contains(GZIP),
        decompress_request: content_encoding.contains(GZIP),
    }
}
