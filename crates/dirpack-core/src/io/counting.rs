//! Compressed-size accounting for archive output.

use std::io::Write;

/// Writer that counts the bytes accepted by its inner sink.
///
/// The archive builder places it between the gzip encoder and the output
/// file, so [`total_bytes`](Self::total_bytes) is the size of the finished
/// `.tar.gz` once the encoder is finished. Bytes the sink refuses are not
/// counted.
///
/// # Examples
///
/// ```
/// use dirpack_core::io::CountingWriter;
/// use flate2::Compression;
/// use flate2::write::GzEncoder;
/// use std::io::Write;
///
/// let mut encoder = GzEncoder::new(CountingWriter::new(Vec::new()), Compression::default());
/// encoder.write_all(b"archive payload")?;
/// let counted = encoder.finish()?;
///
/// assert_eq!(counted.total_bytes(), counted.into_inner().len() as u64);
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct CountingWriter<W> {
    inner: W,
    bytes_written: u64,
}

impl<W> CountingWriter<W> {
    /// Wraps `inner` with a zero count.
    #[must_use]
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            bytes_written: 0,
        }
    }

    /// Bytes accepted by the inner writer so far.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.bytes_written
    }

    /// Returns the inner writer, dropping the count.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let accepted = self.inner.write(buf)?;
        self.bytes_written += accepted as u64;
        Ok(accepted)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
