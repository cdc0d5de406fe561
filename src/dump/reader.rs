use std::{io::Read, iter::FusedIterator};

use log::{debug, trace, warn};

use crate::{
    dump::{read_header, Tag},
    file::{io::Source, parser::Parser, stream::StreamSource},
    records::Record,
    DecoderConfig, Error, Result,
};

/// Where a [`DumpReader`] stands in the record stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    /// The magic header has not been read yet.
    Start,
    /// The header is valid; the next read expects a record tag.
    Framed,
    /// The stream ended at the EOF marker or at a clean end of input.
    Done,
    /// Decoding failed. The error has been handed out.
    Failed,
}

/// Decodes a heap dump into a forward-only sequence of [`Record`]s.
///
/// The reader validates the magic header on first use, then reads one tag at a time and
/// dispatches to the matching record decoder. The sequence ends after tag `0`, or when the
/// source runs out exactly where the next tag would begin. Any error is yielded once and ends
/// the sequence; the reader never skips over data it cannot decode.
///
/// # Examples
///
/// ```rust
/// use dumpscope::{DumpReader, Record};
///
/// let mut data = b"go1.4 heap dump\n".to_vec();
/// data.extend_from_slice(&[0x02, 0x01, b'g', 0x80, 0x20, 0x00]);
///
/// let records = DumpReader::from_slice(&data).collect::<Result<Vec<_>, _>>()?;
/// assert_eq!(records.len(), 1);
/// assert!(matches!(&records[0], Record::Root(root) if root.target == 0x1000));
/// # Ok::<(), dumpscope::Error>(())
/// ```
pub struct DumpReader<S> {
    source: S,
    config: DecoderConfig,
    state: ReaderState,
    records: u64,
}

impl<S: Source> DumpReader<S> {
    /// Creates a reader over `source` with the default [`DecoderConfig`].
    pub fn new(source: S) -> Self {
        Self::with_config(source, DecoderConfig::default())
    }

    /// Creates a reader over `source` with the given limits.
    pub fn with_config(source: S, config: DecoderConfig) -> Self {
        DumpReader {
            source,
            config,
            state: ReaderState::Start,
            records: 0,
        }
    }

    /// Current position in the record stream.
    pub fn state(&self) -> ReaderState {
        self.state
    }

    /// Number of records decoded so far.
    pub fn records_read(&self) -> u64 {
        self.records
    }

    /// Number of bytes consumed from the source.
    pub fn position(&self) -> u64 {
        self.source.position()
    }

    /// The limits this reader applies.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Unwraps the reader, returning the source.
    pub fn into_inner(self) -> S {
        self.source
    }

    /// Decodes the next record.
    ///
    /// Returns `Ok(None)` once the stream has ended, and keeps doing so on further calls.
    ///
    /// # Errors
    /// Returns [`crate::Error::BadMagic`] or [`crate::Error::Truncated`] for an invalid
    /// header, [`crate::Error::UnknownTag`] for a tag without a decoder, and any error of the
    /// record decoders. After an error the reader is [`ReaderState::Failed`].
    pub fn next_record(&mut self) -> Result<Option<Record>> {
        let result = self.advance();
        if result.is_err() {
            self.state = ReaderState::Failed;
        }
        result
    }

    fn advance(&mut self) -> Result<Option<Record>> {
        match self.state {
            ReaderState::Done | ReaderState::Failed => return Ok(None),
            ReaderState::Start => {
                read_header(&mut self.source)?;
                self.state = ReaderState::Framed;
            }
            ReaderState::Framed => {}
        }

        let offset = self.source.position();
        let Some(raw) = self.source.try_read_uvarint()? else {
            debug!(
                "heap dump input exhausted after {} records ({} bytes)",
                self.records, offset
            );
            self.state = ReaderState::Done;
            return Ok(None);
        };

        let tag = match Tag::from_raw(raw) {
            Some(Tag::Eof) => {
                debug!(
                    "heap dump EOF marker at offset {} after {} records",
                    offset, self.records
                );
                self.state = ReaderState::Done;
                return Ok(None);
            }
            Some(tag) if tag.is_supported() => tag,
            Some(tag) => {
                warn!(
                    "{} record at offset {} is not supported, stopping",
                    tag, offset
                );
                return Err(Error::UnknownTag(raw));
            }
            None => return Err(Error::UnknownTag(raw)),
        };

        let record = Record::read(tag, &mut self.source, &self.config)?;
        self.records += 1;
        trace!("decoded {} record at offset {}", tag, offset);

        Ok(Some(record))
    }
}

impl<'a> DumpReader<Parser<'a>> {
    /// Creates a reader over an in-memory heap dump.
    pub fn from_slice(data: &'a [u8]) -> Self {
        Self::new(Parser::new(data))
    }
}

impl<R: Read> DumpReader<StreamSource<R>> {
    /// Creates a reader that decodes straight from `reader`.
    pub fn from_reader(reader: R) -> Self {
        Self::new(StreamSource::new(reader))
    }
}

impl<S: Source> Iterator for DumpReader<S> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

impl<S: Source> FusedIterator for DumpReader<S> {}
