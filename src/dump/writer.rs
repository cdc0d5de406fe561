use std::io::Write;

use crate::{
    dump::{write_header, Tag},
    file::io::write_uvarint,
    records::{Record, RecordCodec},
    Result,
};

/// Encodes records into a heap dump.
///
/// The magic header is written on construction, [`DumpWriter::finish`] appends the EOF marker.
/// Output decodes back to the same records with [`crate::DumpReader`].
///
/// # Examples
///
/// ```rust
/// use dumpscope::{DumpReader, DumpWriter, Record, Root};
///
/// let mut writer = DumpWriter::new(Vec::new())?;
/// writer.write(&Root { description: "runtime.m0".into(), target: 0x1000 })?;
/// let data = writer.finish()?;
///
/// let records = DumpReader::from_slice(&data).collect::<Result<Vec<_>, _>>()?;
/// assert_eq!(records[0].address(), 0x1000);
/// # Ok::<(), dumpscope::Error>(())
/// ```
pub struct DumpWriter<W: Write> {
    out: W,
    records: u64,
}

impl<W: Write> DumpWriter<W> {
    /// Writes the magic header to `out` and returns the writer.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if writing fails.
    pub fn new(mut out: W) -> Result<Self> {
        write_header(&mut out)?;
        Ok(DumpWriter { out, records: 0 })
    }

    /// Writes a tagged record.
    ///
    /// # Errors
    /// Same as [`Record::write`].
    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        record.write(&mut self.out)?;
        self.records += 1;
        Ok(())
    }

    /// Writes a record of a statically known kind.
    ///
    /// # Errors
    /// Same as [`RecordCodec::write`].
    pub fn write<R: RecordCodec>(&mut self, record: &R) -> Result<()> {
        write_uvarint(&mut self.out, R::TAG.value())?;
        record.write(&mut self.out)?;
        self.records += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn records_written(&self) -> u64 {
        self.records
    }

    /// Returns a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Appends the EOF marker, flushes and returns the underlying writer.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if writing or flushing fails.
    pub fn finish(mut self) -> Result<W> {
        write_uvarint(&mut self.out, Tag::Eof.value())?;
        self.out.flush()?;
        Ok(self.out)
    }
}
