//! Transparent gzip middleware.
//!
//! Wraps a handler so that it neither knows nor cares whether the request
//! body arrived compressed or whether the response leaves compressed:
//!
//! - `Content-Encoding: gzip` on the request swaps the body for a
//!   [`DecompressedBody`]. A body without a valid gzip header is answered with
//!   500 and the handler is never called.
//! - `Accept-Encoding` containing `gzip` swaps the response body for a
//!   [`CompressedBody`] and marks the response `Content-Encoding: gzip`.
//!
//! The decision is made once per request, before the handler runs.

use std::io::{self, Cursor, Read, Write};
use std::pin::Pin;
use std::task::{ready, Context, Poll};

use axum::{
    body::{Body, Bytes, HttpBody},
    extract::Request,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body::Frame;
use http_body_util::{BodyExt, LengthLimitError, Limited};

use crate::encoding::{CodecError, GzipReader, GzipWriter, Negotiation, BODY_LIMIT, GZIP};

/// Upper bound on one decoded request frame.
const CHUNK_SIZE: usize = 8 * 1024;

/// Middleware entry point, used with [`axum::middleware::from_fn`].
pub async fn gzip_middleware(request: Request, next: Next) -> Response {
    let negotiation = Negotiation::from_headers(request.headers());

    let request = if negotiation.decompress_request {
        match decompress_request(request).await {
            Ok(request) => request,
            Err(err) => {
                tracing::debug!(error = %err, "cannot decode gzip request body");
                let status = match err {
                    CodecError::TooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                return status.into_response();
            }
        }
    } else {
        request
    };

    let response = next.run(request).await;

    if negotiation.compress_response {
        compress_response(response)
    } else {
        response
    }
}

/// Replaces a gzip request body with its decoded form.
///
/// The compressed body is buffered up to [`BODY_LIMIT`]; decoding stays lazy,
/// so the handler's own limit bounds the decoded size. The encoding headers
/// are dropped so the handler sees a plain request.
async fn decompress_request(request: Request) -> Result<Request, CodecError> {
    let (mut parts, body) = request.into_parts();
    let raw = Limited::new(body, BODY_LIMIT)
        .collect()
        .await
        .map_err(|e| {
            if e.is::<LengthLimitError>() {
                CodecError::TooLarge(BODY_LIMIT)
            } else {
                CodecError::Io(io::Error::new(io::ErrorKind::Other, e))
            }
        })?
        .to_bytes();

    let decoded = DecompressedBody::new(raw)?;
    parts.headers.remove(header::CONTENT_ENCODING);
    parts.headers.remove(header::CONTENT_LENGTH);

    Ok(Request::from_parts(parts, Body::new(decoded)))
}

/// Marks the response gzip-encoded and swaps in a compressing body.
///
/// Runs after the handler has set its own headers, so `Content-Type` and
/// friends are untouched. `Content-Length` no longer describes the body and
/// is removed.
fn compress_response(response: Response) -> Response {
    let (mut parts, body) = response.into_parts();
    parts
        .headers
        .insert(header::CONTENT_ENCODING, HeaderValue::from_static(GZIP));
    parts.headers.remove(header::CONTENT_LENGTH);

    Response::from_parts(parts, Body::new(CompressedBody::new(body)))
}

/// Request body that yields the decoded bytes of a gzip payload.
///
/// The reader is released as soon as the stream ends or fails, and on drop if
/// the handler walks away early.
pub struct DecompressedBody {
    reader: Option<GzipReader<Cursor<Bytes>>>,
}

impl DecompressedBody {
    /// Validates the gzip header of `raw` and prepares to decode it.
    pub fn new(raw: Bytes) -> Result<Self, CodecError> {
        let reader = GzipReader::new(Cursor::new(raw))?;
        Ok(Self {
            reader: Some(reader),
        })
    }

    fn close(&mut self) {
        if let Some(reader) = self.reader.take() {
            drop(reader.close());
        }
    }
}

impl HttpBody for DecompressedBody {
    type Data = Bytes;
    type Error = io::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Bytes>, io::Error>>> {
        let this = self.get_mut();
        let Some(reader) = this.reader.as_mut() else {
            return Poll::Ready(None);
        };

        let mut buf = vec![0u8; CHUNK_SIZE];
        match reader.read(&mut buf) {
            Ok(0) => {
                this.close();
                Poll::Ready(None)
            }
            Ok(n) => {
                buf.truncate(n);
                Poll::Ready(Some(Ok(Frame::data(Bytes::from(buf)))))
            }
            Err(err) => {
                this.close();
                Poll::Ready(Some(Err(err)))
            }
        }
    }

    fn is_end_stream(&self) -> bool {
        self.reader.is_none()
    }
}

/// Response body that gzip-encodes everything the inner body yields.
///
/// When the inner body ends the gzip trailer is written and emitted as the
/// final data frame. A failure while finalizing is logged and ends the
/// stream, since status and headers are already on their way.
pub struct CompressedBody {
    inner: Body,
    writer: GzipWriter<Vec<u8>>,
    trailers: Option<HeaderMap>,
    done: bool,
}

impl CompressedBody {
    pub fn new(inner: Body) -> Self {
        Self {
            inner,
            writer: GzipWriter::new(Vec::new()),
            trailers: None,
            done: false,
        }
    }

    /// Closes the writer and returns whatever it still had buffered.
    fn finish(&mut self) -> Option<Bytes> {
        if let Err(err) = self.writer.close() {
            tracing::debug!(error = %err, "cannot finalize gzip response body");
            return None;
        }
        let tail = self.writer.drain();
        (!tail.is_empty()).then(|| Bytes::from(tail))
    }
}

impl HttpBody for CompressedBody {
    type Data = Bytes;
    type Error = axum::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Bytes>, axum::Error>>> {
        let this = self.get_mut();

        loop {
            if this.done {
                return Poll::Ready(this.trailers.take().map(|t| Ok(Frame::trailers(t))));
            }

            match ready!(Pin::new(&mut this.inner).poll_frame(cx)) {
                Some(Ok(frame)) => match frame.into_data() {
                    Ok(data) => {
                        if let Err(err) = this.writer.write_all(&data) {
                            this.done = true;
                            return Poll::Ready(Some(Err(axum::Error::new(err))));
                        }
                        let out = this.writer.drain();
                        if !out.is_empty() {
                            return Poll::Ready(Some(Ok(Frame::data(Bytes::from(out)))));
                        }
                    }
                    Err(frame) => {
                        // Trailers end the data; they go out after the gzip trailer.
                        this.trailers = frame.into_trailers().ok();
                        this.done = true;
                        if let Some(tail) = this.finish() {
                            return Poll::Ready(Some(Ok(Frame::data(tail))));
                        }
                    }
                },
                Some(Err(err)) => {
                    this.done = true;
                    return Poll::Ready(Some(Err(err)));
                }
                None => {
                    this.done = true;
                    if let Some(tail) = this.finish() {
                        return Poll::Ready(Some(Ok(Frame::data(tail))));
                    }
                }
            }
        }
    }

    fn is_end_stream(&self) -> bool {
        self.done && self.trailers.is_none()
    }
}
