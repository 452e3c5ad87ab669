//! Decompressing reader for gzip-encoded request bodies.

use std::io::{self, BufRead, Read};

use flate2::bufread::MultiGzDecoder;

use super::CodecError;

/// Reads the decoded bytes of a gzip stream.
///
/// Concatenated members decode to the concatenation of their contents; bytes
/// after a member that do not start another member are a read error.
///
/// The gzip header is parsed when the reader is built, so a body that only
/// claims to be gzip is rejected before anyone consumes it. Corruption past
/// the header surfaces as an error from [`Read::read`].
pub struct GzipReader<R: BufRead> {
    decoder: MultiGzDecoder<R>,
}

impl<R: BufRead> GzipReader<R> {
    /// Takes ownership of `inner` and parses the gzip header from it.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::DecodeInit`] when the magic bytes are wrong or the
    /// header is truncated. `inner` must already hold the header bytes; a
    /// source that would block is treated as truncated.
    pub fn new(inner: R) -> Result<Self, CodecError> {
        let decoder = MultiGzDecoder::new(inner);
        if decoder.header().is_none() {
            return Err(CodecError::DecodeInit(io::Error::new(
                io::ErrorKind::InvalidData,
                "missing or malformed gzip header",
            )));
        }
        Ok(Self { decoder })
    }

    /// Releases the decoder and hands back the underlying stream.
    pub fn close(self) -> R {
        self.decoder.into_inner()
    }
}

impl<R: BufRead> Read for GzipReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.decoder.read(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_reads_decoded_bytes() {
        let original = br#"{"request":{"type":"SimpleUtterance"}}"#;
        let mut reader = GzipReader::new(Cursor::new(gzip(original))).unwrap();
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(out, original);
    }

    #[test]
    fn test_rejects_bad_magic() {
        let result = GzipReader::new(Cursor::new(b"{\"not\": \"gzip\"}".to_vec()));
        assert!(matches!(result, Err(CodecError::DecodeInit(_))));
    }

    #[test]
    fn test_rejects_empty_stream() {
        let result = GzipReader::new(Cursor::new(Vec::new()));
        assert!(matches!(result, Err(CodecError::DecodeInit(_))));
    }

    #[test]
    fn test_rejects_truncated_header() {
        let compressed = gzip(b"hello");
        let result = GzipReader::new(Cursor::new(compressed[..6].to_vec()));
        assert!(matches!(result, Err(CodecError::DecodeInit(_))));
    }

    #[test]
    fn test_corrupt_body_fails_on_read() {
        let mut compressed = gzip(b"hello hello hello hello");
        // Keep the 10-byte header, trash the deflate payload.
        for byte in compressed.iter_mut().skip(10) {
            *byte = 0xff;
        }
        let mut reader = GzipReader::new(Cursor::new(compressed)).unwrap();
        let mut out = Vec::new();
        assert!(reader.read_to_end(&mut out).is_err());
    }

    #[test]
    fn test_reads_concatenated_members() {
        let mut stream = gzip(br#"{"request":{"type":"Simple"#);
        stream.extend(gzip(br#"Utterance"},"version":"1.0"}"#));
        let mut reader = GzipReader::new(Cursor::new(stream)).unwrap();
        let mut out = String::new();
        reader.read_to_string(&mut out).unwrap();
        assert_eq!(out, r#"{"request":{"type":"SimpleUtterance"},"version":"1.0"}"#);
    }

    #[test]
    fn test_garbage_after_member_fails_on_read() {
        let mut stream = gzip(b"complete member");
        stream.extend_from_slice(b"trailing junk");
        let mut reader = GzipReader::new(Cursor::new(stream)).unwrap();
        let mut out = Vec::new();
        assert!(reader.read_to_end(&mut out).is_err());
    }

    #[test]
    fn test_close_returns_inner() {
        let compressed = gzip(b"abc");
        let len = compressed.len() as u64;
        let mut reader = GzipReader::new(Cursor::new(compressed)).unwrap();
        let mut out = String::new();
        reader.read_to_string(&mut out).unwrap();
        let inner = reader.close();
        assert_eq!(inner.position(), len);
    }
}
