//! Forward-only byte source over any [`std::io::Read`].
//!
//! [`crate::file::stream::StreamSource`] lets the decoder consume a heap dump straight from a
//! pipe, socket or decompressor without loading it into memory first. Reads go through a
//! [`std::io::BufReader`], and length-prefixed payloads are pulled in bounded chunks, so a forged
//! length prefix cannot make the decoder allocate more than the input actually delivers.
//!
//! An [`std::io::ErrorKind::UnexpectedEof`] from the reader is reported as
//! [`crate::Error::Truncated`]; every other I/O error is passed through as
//! [`crate::Error::FileError`].

use std::io::{BufRead, BufReader, ErrorKind, Read};

use crate::{file::io::Source, Error, Result};

/// Largest block [`StreamSource::read_vec`] allocates ahead of the data actually read.
const READ_CHUNK: usize = 64 * 1024;

/// A buffered, forward-only [`Source`] over a [`Read`] implementation.
///
/// # Examples
///
/// ```rust
/// use dumpscope::{Source, StreamSource};
///
/// let input: &[u8] = &[0xAC, 0x02];
/// let mut source = StreamSource::new(input);
/// assert_eq!(source.read_uvarint()?, 300);
/// assert_eq!(source.position(), 2);
/// # Ok::<(), dumpscope::Error>(())
/// ```
pub struct StreamSource<R> {
    reader: BufReader<R>,
    position: u64,
}

impl<R: Read> StreamSource<R> {
    /// Wraps `reader` in a buffered source.
    pub fn new(reader: R) -> Self {
        StreamSource {
            reader: BufReader::new(reader),
            position: 0,
        }
    }

    /// Returns a reference to the wrapped reader.
    pub fn get_ref(&self) -> &R {
        self.reader.get_ref()
    }

    /// Unwraps the source, returning the underlying reader.
    ///
    /// Data already pulled into the internal buffer but not yet decoded is lost.
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

fn map_io(error: std::io::Error) -> Error {
    if error.kind() == ErrorKind::UnexpectedEof {
        truncated_error!()
    } else {
        Error::FileError(error)
    }
}

impl<R: Read> Source for StreamSource<R> {
    fn next_byte(&mut self) -> Result<Option<u8>> {
        let byte = loop {
            match self.reader.fill_buf() {
                Ok([]) => return Ok(None),
                Ok(buf) => break buf[0],
                Err(error) if error.kind() == ErrorKind::Interrupted => {}
                Err(error) => return Err(map_io(error)),
            }
        };

        self.reader.consume(1);
        self.position += 1;
        Ok(Some(byte))
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        self.reader.read_exact(buf).map_err(map_io)?;
        self.position += buf.len() as u64;
        Ok(())
    }

    fn read_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(len.min(READ_CHUNK));
        let mut remaining = len;

        while remaining > 0 {
            let step = remaining.min(READ_CHUNK);
            let start = out.len();
            out.resize(start + step, 0);
            self.read_exact(&mut out[start..])?;
            remaining -= step;
        }

        Ok(out)
    }

    fn position(&self) -> u64 {
        self.position
    }
}
