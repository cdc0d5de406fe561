use std::io::Write;

use crate::{file::io::Source, Error, Result};

/// The 16 byte magic every heap dump starts with.
pub const MAGIC: &[u8; 16] = b"go1.4 heap dump\n";

/// Reads and validates the magic header.
///
/// # Errors
/// Returns [`crate::Error::Truncated`] if fewer than 16 bytes are available and
/// [`crate::Error::BadMagic`] if the bytes differ from [`MAGIC`].
pub fn read_header<S: Source + ?Sized>(source: &mut S) -> Result<()> {
    let mut head = [0u8; MAGIC.len()];
    source.read_exact(&mut head)?;

    if &head != MAGIC {
        return Err(Error::BadMagic);
    }

    Ok(())
}

/// Writes the magic header.
///
/// # Errors
/// Returns [`crate::Error::FileError`] if writing to `out` fails.
pub fn write_header<W: Write + ?Sized>(out: &mut W) -> Result<()> {
    out.write_all(MAGIC)?;
    Ok(())
}
