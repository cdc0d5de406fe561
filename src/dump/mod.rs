//! Heap dump framing and the top-level [`HeapDump`] entry point.
//!
//! A heap dump is a 16 byte magic header followed by a stream of tagged records:
//!
//! ```text
//! "go1.4 heap dump\n" (tag body)* [0]
//! ```
//!
//! The stream ends at tag `0` or where the input ends cleanly between two records. Records carry
//! no length of their own, so a tag the decoder has no decoder for ends decoding with
//! [`crate::Error::UnknownTag`].
//!
//! # Key Components
//!
//! - [`HeapDump`] - A complete dump held in memory or memory-mapped from disk
//! - [`DumpReader`] - The framer, an iterator of [`crate::Record`]s over any [`crate::Source`]
//! - [`DumpWriter`] - Encodes records back into the wire format
//! - [`Tag`] - All record tags the format defines
//! - [`DecoderConfig`] - Optional limits for untrusted input
//!
//! # Examples
//!
//! ```rust,no_run
//! use dumpscope::{HeapDump, Record};
//! use std::path::Path;
//!
//! let dump = HeapDump::from_file(Path::new("heapdump"))?;
//! for record in dump.records() {
//!     if let Record::Goroutine(g) = record? {
//!         println!("goroutine {} {:?} {}", g.id, g.status, g.wait_reason);
//!     }
//! }
//! # Ok::<(), dumpscope::Error>(())
//! ```

mod config;
mod header;
mod reader;
mod tag;
mod writer;

use std::path::Path;

pub use config::DecoderConfig;
pub use header::{read_header, write_header, MAGIC};
pub use reader::{DumpReader, ReaderState};
pub use tag::Tag;
pub use writer::DumpWriter;

use crate::{
    file::{parser::Parser, Backend, Memory, Physical},
    records::Record,
    Result,
};

/// A complete heap dump, memory-mapped from disk or held in an owned buffer.
///
/// The magic header is validated when the dump is loaded; records are decoded lazily by
/// [`HeapDump::records`], which can be called any number of times.
pub struct HeapDump {
    data: Box<dyn Backend>,
    config: DecoderConfig,
}

impl HeapDump {
    /// Memory-maps the heap dump at `path`.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened, and
    /// [`crate::Error::BadMagic`] or [`crate::Error::Truncated`] if it does not start with a
    /// valid header.
    pub fn from_file(path: &Path) -> Result<HeapDump> {
        Self::from_file_with_config(path, DecoderConfig::default())
    }

    /// Memory-maps the heap dump at `path`, decoding with the given limits.
    ///
    /// # Errors
    /// Same as [`HeapDump::from_file`].
    pub fn from_file_with_config(path: &Path, config: DecoderConfig) -> Result<HeapDump> {
        let input = Physical::new(path)?;

        Self::load(input, config)
    }

    /// Takes ownership of an in-memory heap dump.
    ///
    /// # Errors
    /// Returns [`crate::Error::BadMagic`] or [`crate::Error::Truncated`] if `data` does not
    /// start with a valid header.
    pub fn from_mem(data: Vec<u8>) -> Result<HeapDump> {
        Self::from_mem_with_config(data, DecoderConfig::default())
    }

    /// Takes ownership of an in-memory heap dump, decoding with the given limits.
    ///
    /// # Errors
    /// Same as [`HeapDump::from_mem`].
    pub fn from_mem_with_config(data: Vec<u8>, config: DecoderConfig) -> Result<HeapDump> {
        let input = Memory::new(data);

        Self::load(input, config)
    }

    fn load<T: Backend + 'static>(data: T, config: DecoderConfig) -> Result<HeapDump> {
        read_header(&mut Parser::new(data.data()))?;
        log::debug!("loaded heap dump of {} bytes", data.len());

        Ok(HeapDump {
            data: Box::new(data),
            config,
        })
    }

    /// Returns a fresh reader over all records of this dump.
    #[must_use]
    pub fn records(&self) -> DumpReader<Parser<'_>> {
        DumpReader::with_config(Parser::new(self.data.data()), self.config)
    }

    /// Decodes every record of this dump.
    ///
    /// # Errors
    /// Returns the first decoding error; see [`DumpReader::next_record`].
    pub fn read_all(&self) -> Result<Vec<Record>> {
        self.records().collect()
    }

    /// The 16 header bytes.
    ///
    /// # Errors
    /// Cannot fail for a loaded dump; the header was validated on load.
    pub fn header(&self) -> Result<&[u8]> {
        self.data.data_slice(0, MAGIC.len())
    }

    /// The raw bytes of the dump.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.data.data()
    }

    /// The limits records are decoded with.
    #[must_use]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Size of the dump in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the dump holds no bytes. Never the case for a loaded dump.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
