//! Compressing writer for gzip-encoded response bodies.

use std::io::{self, Write};
use std::mem;

use flate2::{write::GzEncoder, Compression};

/// Gzip-encodes everything written to it.
///
/// The encoder buffers internally, so the inner writer may see fewer bytes
/// than were written until [`GzipWriter::close`] runs. Without `close` the
/// stream has no trailer and cannot be decoded.
pub struct GzipWriter<W: Write> {
    encoder: GzEncoder<W>,
    closed: bool,
}

impl<W: Write> GzipWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            encoder: GzEncoder::new(inner, Compression::default()),
            closed: false,
        }
    }

    /// Flushes pending data and writes the gzip trailer.
    ///
    /// Only the first call does any work; later calls return `Ok(())`.
    pub fn close(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.encoder.try_finish()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Closes the stream and returns the inner writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.close()?;
        self.encoder.finish()
    }
}

impl GzipWriter<Vec<u8>> {
    /// Takes the compressed bytes produced so far.
    pub fn drain(&mut self) -> Vec<u8> {
        mem::take(self.encoder.get_mut())
    }
}

impl<W: Write> Write for GzipWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.closed {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "write after gzip stream was closed",
            ));
        }
        self.encoder.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.encoder.flush()
    }
}
