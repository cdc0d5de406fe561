//! Byte-level access to heap dump inputs.
//!
//! Everything in this module is about getting bytes in front of the record decoders; nothing
//! here knows about records or tags.
//!
//! # Key Components
//!
//! - [`crate::file::io::Source`] - The forward-only source trait with the primitive decoders
//! - [`crate::file::parser::Parser`] - Zero-copy cursor over a byte slice
//! - [`crate::file::stream::StreamSource`] - Buffered source over any [`std::io::Read`]
//! - [`crate::file::Backend`] - Storage behind a [`crate::HeapDump`], either a memory-mapped
//!   file or an owned buffer

pub mod io;
pub mod parser;
pub mod stream;
pub mod text;

mod memory;
mod physical;

pub(crate) use memory::Memory;
pub(crate) use physical::Physical;

use crate::{Error, Result};

/// Backing storage of a heap dump that is fully addressable in memory.
///
/// Implemented by the memory-mapped and the owned-buffer backend. [`crate::HeapDump`] stores a
/// boxed backend and runs a [`crate::Parser`] over [`Backend::data`].
pub trait Backend: Send + Sync {
    /// Returns the complete data.
    fn data(&self) -> &[u8];

    /// Returns the size of the data in bytes.
    fn len(&self) -> usize {
        self.data().len()
    }

    /// Returns `len` bytes starting at `offset`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range is not fully inside the data.
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let data = self.data();
        offset
            .checked_add(len)
            .and_then(|end| data.get(offset..end))
            .ok_or(Error::OutOfBounds {
                offset,
                len,
                size: data.len(),
            })
    }
}
