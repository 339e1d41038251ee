//! Whole-buffer [`Read`] and [`Write`] adapters.
//!
//! Neither adapter transcodes incrementally. [`Encoder`] collects
//! everything written to it and encodes it once in
//! [`Encoder::finish`]; [`Decoder`] drains its source on the first
//! read and decodes it once. Errors in the data therefore only
//! surface at those two points.

use std::io::{self, Read, Write};

use tracing::{debug, trace};

use crate::{codec::Codec, error::DecodeError};

impl Codec {
    /// Returns an [`Encoder`] that writes Base58 to `inner`.
    pub fn encoder<W: Write>(&self, inner: W) -> Encoder<'_, W> {
        Encoder::new(self, inner)
    }

    /// Returns a [`Decoder`] that reads Base58 from `inner`.
    pub fn decoder<R: Read>(&self, inner: R) -> Decoder<'_, R> {
        Decoder::new(self, inner)
    }
}

/// Buffers raw bytes and writes their Base58 encoding to the
/// underlying writer when finished.
///
/// Dropping an `Encoder` without calling [`finish`][Self::finish]
/// discards everything written to it.
#[derive(Debug)]
pub struct Encoder<'a, W> {
    codec: &'a Codec,
    inner: W,
    buf: Vec<u8>,
}

impl<'a, W: Write> Encoder<'a, W> {
    /// Creates an encoder that writes to `inner`.
    pub fn new(codec: &'a Codec, inner: W) -> Self {
        Self {
            codec,
            inner,
            buf: Vec::new(),
        }
    }

    /// Encodes everything written so far, writes it to the
    /// underlying writer and returns the writer.
    pub fn finish(mut self) -> io::Result<W> {
        let encoded = self.codec.encode_to_vec(&self.buf);
        trace!(
            input = self.buf.len(),
            output = encoded.len(),
            "encoded buffered input"
        );
        self.inner.write_all(&encoded)?;
        self.inner.flush()?;
        Ok(self.inner)
    }

    /// Returns the number of bytes buffered so far.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Returns a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Returns a mutable reference to the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }
}

impl<W: Write> Write for Encoder<'_, W> {
    /// Buffers `data`. Always accepts all of it.
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    /// Flushes the underlying writer. Buffered input is not encoded
    /// until [`Encoder::finish`].
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[derive(Debug)]
enum State {
    /// Collecting encoded input from the source.
    Draining(Vec<u8>),
    /// Serving decoded bytes starting at `pos`.
    Decoded { data: Vec<u8>, pos: usize },
    /// The input was not valid Base58.
    Failed(DecodeError),
}

/// Reads Base58 from the underlying reader and yields the decoded
/// bytes.
///
/// The first call to [`read`][Read::read] reads the underlying reader
/// to EOF and decodes everything at once. If that fails with an I/O
/// error the bytes read so far are kept and the next `read` carries
/// on draining. If the input is not valid Base58 every `read` fails
/// with [`io::ErrorKind::InvalidData`] wrapping the [`DecodeError`].
#[derive(Debug)]
pub struct Decoder<'a, R> {
    codec: &'a Codec,
    inner: R,
    state: State,
}

impl<'a, R: Read> Decoder<'a, R> {
    /// Creates a decoder that reads from `inner`.
    pub fn new(codec: &'a Codec, inner: R) -> Self {
        Self {
            codec,
            inner,
            state: State::Draining(Vec::new()),
        }
    }

    /// Returns a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Returns a mutable reference to the underlying reader.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Consumes the decoder, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Drains the underlying reader and decodes its contents.
    fn fill(&mut self) -> io::Result<()> {
        let State::Draining(raw) = &mut self.state else {
            return Ok(());
        };
        self.inner.read_to_end(raw).inspect_err(|err| {
            debug!(%err, buffered = raw.len(), "failed to drain base58 input");
        })?;
        trace!(len = raw.len(), "drained base58 input");

        self.state = match self.codec.decode(raw.as_slice()) {
            Ok(data) => {
                trace!(len = data.len(), "decoded base58 input");
                State::Decoded { data, pos: 0 }
            }
            Err(err) => {
                debug!(%err, "invalid base58 input");
                State::Failed(err)
            }
        };
        Ok(())
    }
}

impl<R: Read> Read for Decoder<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.fill()?;
        match &mut self.state {
            State::Decoded { data, pos } => {
                let rest = data.get(*pos..).unwrap_or_default();
                let n = rest.len().min(buf.len());
                buf[..n].copy_from_slice(&rest[..n]);
                *pos = pos.saturating_add(n);
                Ok(n)
            }
            State::Failed(err) => Err(io::Error::new(io::ErrorKind::InvalidData, *err)),
            // `fill` only returns `Ok` once the input is decoded or
            // has failed to decode.
            State::Draining(_) => Ok(0),
        }
    }
}
