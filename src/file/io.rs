//! Primitive reading and writing for the heap dump wire format.
//!
//! This module provides the [`crate::file::io::Source`] trait, the abstraction every decoder in
//! this crate reads through, together with the encoding counterparts used by
//! [`crate::DumpWriter`]. The format knows exactly two primitive shapes:
//!
//! - **uvarint** - little-endian base-128 unsigned integer, 7 data bits per byte, high bit set
//!   on every byte except the last. At most [`MAX_VARINT_LEN`] bytes for a `u64`.
//! - **length-prefixed bytes** - one uvarint `n` followed by exactly `n` raw bytes. Used for
//!   both text (names, descriptions) and opaque payloads (object and frame contents).
//!
//! Booleans are uvarints where exactly `1` means `true`.
//!
//! # Key Components
//!
//! - [`crate::file::io::Source`] - Forward-only byte source with provided primitive decoders
//! - [`crate::file::io::write_uvarint`] - Encode a uvarint
//! - [`crate::file::io::write_prefixed_bytes`] - Encode a length-prefixed payload
//! - [`crate::file::io::write_bool`] - Encode a boolean
//! - [`crate::file::io::uvarint_len`] - Encoded size of a uvarint
//!
//! # Implementations
//!
//! - [`crate::file::parser::Parser`] - zero-copy cursor over a byte slice
//! - [`crate::file::stream::StreamSource`] - buffered wrapper over any [`std::io::Read`]
//!
//! # Examples
//!
//! ```rust
//! use dumpscope::{DecoderConfig, Parser, Source};
//!
//! let data = [0x80, 0x01, 0x03, b'a', b'b', b'c'];
//! let mut parser = Parser::new(&data);
//!
//! assert_eq!(parser.read_uvarint()?, 128);
//! assert_eq!(parser.read_prefixed_string(&DecoderConfig::default())?, "abc");
//! # Ok::<(), dumpscope::Error>(())
//! ```

use std::io::Write;

use crate::{file::text::DumpString, DecoderConfig, Error, Result};

/// Maximum number of bytes a uvarint encoding of a `u64` can occupy.
pub const MAX_VARINT_LEN: usize = 10;

/// A forward-only source of heap dump bytes.
///
/// Implementors supply the four raw access methods; the primitive decoders of the wire format
/// are provided on top of them, so every source decodes identically. A source never seeks
/// backwards and is not meant to be shared between two decode sequences.
pub trait Source {
    /// Returns the next byte, or `None` if the source is cleanly exhausted.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the underlying source fails.
    fn next_byte(&mut self) -> Result<Option<u8>>;

    /// Fills `buf` completely.
    ///
    /// # Errors
    /// Returns [`crate::Error::Truncated`] if fewer than `buf.len()` bytes remain.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Reads exactly `len` bytes into a new vector.
    ///
    /// # Errors
    /// Returns [`crate::Error::Truncated`] if fewer than `len` bytes remain.
    fn read_vec(&mut self, len: usize) -> Result<Vec<u8>>;

    /// Number of bytes consumed so far.
    fn position(&self) -> u64;

    /// Reads a uvarint, distinguishing a clean end of input from a truncated value.
    ///
    /// Returns `Ok(None)` only if the source is exhausted before the first byte of the
    /// varint. This is what lets the record framer tell a finished stream from a cut one.
    ///
    /// # Errors
    /// Returns [`crate::Error::Truncated`] if the source ends after the first byte but before
    /// the terminating byte, and [`crate::Error::Overflow`] if the value exceeds 64 bits.
    fn try_read_uvarint(&mut self) -> Result<Option<u64>> {
        let Some(mut byte) = self.next_byte()? else {
            return Ok(None);
        };

        let mut value = 0u64;
        let mut shift = 0u32;
        for index in 0..MAX_VARINT_LEN {
            // The tenth byte may only contribute the single remaining bit.
            if index == MAX_VARINT_LEN - 1 && byte > 1 {
                return Err(Error::Overflow);
            }

            if byte & 0x80 == 0 {
                return Ok(Some(value | (u64::from(byte) << shift)));
            }

            value |= u64::from(byte & 0x7F) << shift;
            shift += 7;

            byte = match self.next_byte()? {
                Some(byte) => byte,
                None => return Err(truncated_error!()),
            };
        }

        Err(Error::Overflow)
    }

    /// Reads a uvarint.
    ///
    /// # Errors
    /// Returns [`crate::Error::Truncated`] if the source ends before the terminating byte and
    /// [`crate::Error::Overflow`] if the value exceeds 64 bits.
    fn read_uvarint(&mut self) -> Result<u64> {
        match self.try_read_uvarint()? {
            Some(value) => Ok(value),
            None => Err(truncated_error!()),
        }
    }

    /// Reads a boolean encoded as a uvarint. Only the value `1` is `true`.
    ///
    /// # Errors
    /// Same as [`Source::read_uvarint`].
    fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_uvarint()? == 1)
    }

    /// Reads a uvarint length followed by exactly that many raw bytes.
    ///
    /// The bytes are returned untouched; nothing beyond the declared length is consumed.
    ///
    /// # Errors
    /// Returns [`crate::Error::Truncated`] if fewer bytes remain than declared,
    /// [`crate::Error::Overflow`] if the length does not fit into `usize`, and
    /// [`crate::Error::LimitExceeded`] if it is above `config.max_payload_len`.
    fn read_prefixed_bytes(&mut self, config: &DecoderConfig) -> Result<Vec<u8>> {
        let length = self.read_uvarint()?;
        config.check_payload_len(length)?;

        let length = usize::try_from(length).map_err(|_| Error::Overflow)?;
        self.read_vec(length)
    }

    /// Reads a length-prefixed text field.
    ///
    /// The bytes are kept as written, valid UTF-8 or not; see [`DumpString`].
    ///
    /// # Errors
    /// Same as [`Source::read_prefixed_bytes`].
    fn read_prefixed_string(&mut self, config: &DecoderConfig) -> Result<DumpString> {
        self.read_prefixed_bytes(config).map(DumpString::from)
    }
}

/// Returns the number of bytes the uvarint encoding of `value` occupies.
#[must_use]
pub fn uvarint_len(mut value: u64) -> usize {
    let mut len = 1;
    while value >= 0x80 {
        value >>= 7;
        len += 1;
    }
    len
}

/// Writes `value` as a uvarint.
///
/// # Errors
/// Returns [`crate::Error::FileError`] if writing to `out` fails.
pub fn write_uvarint<W: Write + ?Sized>(out: &mut W, mut value: u64) -> Result<()> {
    let mut buf = [0u8; MAX_VARINT_LEN];
    let mut len = 0;
    while value >= 0x80 {
        #[allow(clippy::cast_possible_truncation)]
        let low = (value & 0x7F) as u8;
        buf[len] = low | 0x80;
        value >>= 7;
        len += 1;
    }
    #[allow(clippy::cast_possible_truncation)]
    let last = value as u8;
    buf[len] = last;
    len += 1;

    out.write_all(&buf[..len])?;
    Ok(())
}

/// Writes a boolean as the uvarint `1` or `0`.
///
/// # Errors
/// Returns [`crate::Error::FileError`] if writing to `out` fails.
pub fn write_bool<W: Write + ?Sized>(out: &mut W, value: bool) -> Result<()> {
    write_uvarint(out, u64::from(value))
}

/// Writes the length of `bytes` as a uvarint followed by the bytes themselves.
///
/// # Errors
/// Returns [`crate::Error::FileError`] if writing to `out` fails.
pub fn write_prefixed_bytes<W: Write + ?Sized>(out: &mut W, bytes: &[u8]) -> Result<()> {
    write_uvarint(out, bytes.len() as u64)?;
    out.write_all(bytes)?;
    Ok(())
}
