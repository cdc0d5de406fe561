use thiserror::Error;

macro_rules! truncated_error {
    () => {
        crate::Error::Truncated {
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every error is fatal to the decode sequence that produced it. The heap dump format carries
/// no self-describing record lengths, so there is no way to skip a damaged record and
/// resynchronise on the next one.
///
/// # Error Categories
///
/// ## Format Errors
/// - [`Error::BadMagic`] - The file does not start with the heap dump magic
/// - [`Error::Truncated`] - The input ended in the middle of a value
/// - [`Error::Overflow`] - A varint does not fit into 64 bits
/// - [`Error::UnknownTag`] - A record tag this decoder cannot size
///
/// ## Policy Errors
/// - [`Error::LimitExceeded`] - A configured [`crate::DecoderConfig`] limit was hit
///
/// ## Access Errors
/// - [`Error::OutOfBounds`] - A byte range outside of a loaded dump was requested
///
/// ## I/O and External Errors
/// - [`Error::FileError`] - Filesystem or stream I/O errors
/// - [`Error::Error`] - Miscellaneous failures
///
/// # Examples
///
/// ```rust,no_run
/// use dumpscope::{Error, HeapDump};
/// use std::path::Path;
///
/// match HeapDump::from_file(Path::new("heapdump")) {
///     Ok(dump) => println!("{} bytes of heap dump", dump.len()),
///     Err(Error::BadMagic) => eprintln!("Not a go1.4 heap dump"),
///     Err(Error::Truncated { file, line }) => eprintln!("Truncated dump ({}:{})", file, line),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The first 16 bytes are present but do not spell the heap dump magic.
    #[error("Invalid heap dump header")]
    BadMagic,

    /// The input ended before a value was completely read.
    ///
    /// Raised for a short magic header, a varint whose continuation bit is still set on the
    /// last available byte, and a length-prefixed payload with fewer bytes than declared.
    ///
    /// # Fields
    ///
    /// * `file` - Source file where the truncation was detected
    /// * `line` - Source line where the truncation was detected
    #[error("Truncated - {file}:{line}: input ended in the middle of a value")]
    Truncated {
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// A varint does not fit into 64 bits, or a length does not fit into `usize`.
    #[error("Varint overflows the supported integer width")]
    Overflow,

    /// A top-level record tag outside of the supported dispatch table.
    ///
    /// This includes the tags the format reserves for record kinds this decoder does not
    /// implement. The bytes following the tag are never interpreted.
    #[error("Unknown or unsupported record tag - {0}")]
    UnknownTag(u64),

    /// A limit configured through [`crate::DecoderConfig`] was exceeded.
    #[error("{what} limit exceeded - {found} > {limit}")]
    LimitExceeded {
        /// Which limit was hit
        what: &'static str,
        /// The configured limit
        limit: u64,
        /// The value found in the input
        found: u64,
    },

    /// A byte range outside of a loaded heap dump was requested.
    ///
    /// Unlike [`Error::Truncated`] this is a caller error, the input itself is not at fault.
    #[error("Out of bounds - {len} bytes at offset {offset} requested, dump holds {size}")]
    OutOfBounds {
        /// Start of the requested range
        offset: usize,
        /// Length of the requested range
        len: usize,
        /// Size of the dump in bytes
        size: usize,
    },

    /// File I/O error.
    ///
    /// Wraps errors of the underlying byte source. An unexpected end of file reported by the
    /// source is surfaced as [`Error::Truncated`] instead.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Generic error for miscellaneous failures.
    #[error("{0}")]
    Error(String),
}

impl Error {
    /// Returns `true` if this error reports an input that ended too early.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        matches!(self, Error::Truncated { .. })
    }
}
