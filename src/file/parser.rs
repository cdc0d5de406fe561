//! Byte slice cursor for decoding in-memory heap dumps.
//!
//! This module provides the [`crate::file::parser::Parser`] type, a cursor-based binary data
//! parser over a borrowed byte slice. It implements [`crate::file::io::Source`], so every record
//! decoder in the crate can run on top of it, and it offers bounds-checked access to the
//! underlying data for callers that want to look at raw bytes.
//!
//! # Architecture
//!
//! The parser is built around a simple cursor-based model that maintains a position within
//! a byte slice:
//!
//! - **Position tracking** - Maintains current offset for sequential parsing operations
//! - **Bounds checking** - Every read validates data availability before touching memory
//! - **Zero-copy access** - [`crate::file::parser::Parser::read_bytes`] hands out sub-slices
//!
//! Memory-mapped files and owned buffers both end up here through [`crate::HeapDump`].
//!
//! # Usage Examples
//!
//! ```rust
//! use dumpscope::{Parser, Source};
//!
//! let data = [0xAC, 0x02, 0x01, 0x02, 0x03];
//! let mut parser = Parser::new(&data);
//!
//! assert_eq!(parser.read_uvarint()?, 300);
//! assert_eq!(parser.read_bytes(3)?, &[0x01, 0x02, 0x03]);
//! assert!(!parser.has_more_data());
//! # Ok::<(), dumpscope::Error>(())
//! ```

use crate::{file::io::Source, Result};

/// A cursor over a borrowed byte slice.
///
/// `Parser` never reads past the end of its slice: every access that would do so fails with
/// [`crate::Error::Truncated`] and leaves the position untouched.
///
/// # Examples
///
/// ```rust
/// use dumpscope::{Parser, Source};
///
/// let data = [0x05, 0x07];
/// let mut parser = Parser::new(&data);
///
/// assert_eq!(parser.read_uvarint()?, 5);
/// assert_eq!(parser.remaining(), 1);
/// # Ok::<(), dumpscope::Error>(())
/// ```
pub struct Parser<'a> {
    /// The binary data being parsed
    data: &'a [u8],
    /// Current position within the data buffer
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new [`crate::file::parser::Parser`] from a byte slice.
    ///
    /// # Arguments
    /// * `data` - The byte slice to read from
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Parser { data, position: 0 }
    }

    /// Returns the length of the underlying data buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the parser has no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if there is more data available to parse.
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    /// Get the current position of the parser within the data buffer.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Get access to the underlying data buffer.
    #[must_use]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the number of bytes remaining from the current position.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Calculates an end position safely with overflow checking.
    ///
    /// # Errors
    /// Returns [`crate::Error::Truncated`] if the calculation would overflow or the resulting
    /// position exceeds the data length.
    pub fn calc_end_position(&self, length: usize) -> Result<usize> {
        let end = self
            .position
            .checked_add(length)
            .ok_or(truncated_error!())?;

        if end > self.data.len() {
            return Err(truncated_error!());
        }

        Ok(end)
    }

    /// Reads a slice of bytes of the specified length from the current position.
    ///
    /// # Errors
    /// Returns [`crate::Error::Truncated`] if reading `length` bytes would exceed the data.
    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8]> {
        let end = self.calc_end_position(length)?;
        let bytes = &self.data[self.position..end];
        self.position = end;
        Ok(bytes)
    }
}

impl Source for Parser<'_> {
    fn next_byte(&mut self) -> Result<Option<u8>> {
        match self.data.get(self.position) {
            Some(&byte) => {
                self.position += 1;
                Ok(Some(byte))
            }
            None => Ok(None),
        }
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let bytes = self.read_bytes(buf.len())?;
        buf.copy_from_slice(bytes);
        Ok(())
    }

    fn read_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        Ok(self.read_bytes(len)?.to_vec())
    }

    fn position(&self) -> u64 {
        self.position as u64
    }
}
