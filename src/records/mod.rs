//! Typed heap dump records and their wire codecs.
//!
//! Each supported record kind lives in its own module and implements [`RecordCodec`]. A
//! decoder reads a fixed sequence of primitives in the exact order the format lays them out;
//! there is no branching inside a record and no partial result on failure.
//!
//! | Tag | Type | Wire layout |
//! |-----|------|-------------|
//! | 1 | [`HeapObject`] | address, contents, fields |
//! | 2 | [`Root`] | description, target |
//! | 3 | [`TypeDescriptor`] | address, size, name, is-pointer |
//! | 4 | [`Goroutine`] | address, frame, id, go-statement pc, status, system, background, start, wait reason, context, thread, defer, panic |
//! | 5 | [`StackFrame`] | address, depth, child, contents, entry pc, current pc, continuation pc, name, fields |
//!
//! Records never reference each other directly; cross references are raw addresses for the
//! consumer to resolve.

mod fields;
mod frame;
mod goroutine;
mod object;
mod root;
mod typedesc;

use std::io::Write;

pub use fields::{read_field_list, write_field_list, Field, FieldKind};
pub use frame::StackFrame;
pub use goroutine::{Goroutine, GoroutineStatus};
pub use object::HeapObject;
pub use root::Root;
pub use typedesc::TypeDescriptor;

use crate::{
    dump::Tag,
    file::io::{write_uvarint, Source},
    DecoderConfig, Error, Result,
};

/// Wire codec of one record kind.
///
/// `read` and `write` handle the record body only; the leading tag is framed by
/// [`crate::DumpReader`] and [`crate::DumpWriter`].
pub trait RecordCodec: Sized {
    /// The tag introducing records of this kind.
    const TAG: Tag;

    /// Decodes one record body.
    ///
    /// # Errors
    /// Returns [`crate::Error::Truncated`] or [`crate::Error::Overflow`] if a primitive cannot
    /// be read, and [`crate::Error::LimitExceeded`] if `config` rejects a length.
    fn read<S: Source + ?Sized>(source: &mut S, config: &DecoderConfig) -> Result<Self>;

    /// Encodes the record body.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if writing fails, or another error if the record
    /// holds a value the format cannot express.
    fn write<W: Write + ?Sized>(&self, out: &mut W) -> Result<()>;
}

/// One decoded heap dump record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// A heap object
    Object(HeapObject),
    /// A GC root outside the heap and the stacks
    Root(Root),
    /// A type descriptor
    Type(TypeDescriptor),
    /// A goroutine
    Goroutine(Goroutine),
    /// A stack frame
    StackFrame(StackFrame),
}

impl Record {
    /// Decodes the body of a record introduced by `tag`.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnknownTag`] for [`Tag::Eof`] and every tag without a decoder;
    /// otherwise the errors of the matching [`RecordCodec::read`].
    pub fn read<S: Source + ?Sized>(
        tag: Tag,
        source: &mut S,
        config: &DecoderConfig,
    ) -> Result<Record> {
        Ok(match tag {
            Tag::Object => Record::Object(HeapObject::read(source, config)?),
            Tag::OtherRoot => Record::Root(Root::read(source, config)?),
            Tag::Type => Record::Type(TypeDescriptor::read(source, config)?),
            Tag::Goroutine => Record::Goroutine(Goroutine::read(source, config)?),
            Tag::StackFrame => Record::StackFrame(StackFrame::read(source, config)?),
            other => return Err(Error::UnknownTag(other.value())),
        })
    }

    /// Encodes the tag followed by the record body.
    ///
    /// # Errors
    /// Same as [`RecordCodec::write`].
    pub fn write<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        write_uvarint(out, self.tag().value())?;
        match self {
            Record::Object(record) => record.write(out),
            Record::Root(record) => record.write(out),
            Record::Type(record) => record.write(out),
            Record::Goroutine(record) => record.write(out),
            Record::StackFrame(record) => record.write(out),
        }
    }

    /// The tag this record is framed with.
    #[must_use]
    pub fn tag(&self) -> Tag {
        match self {
            Record::Object(_) => HeapObject::TAG,
            Record::Root(_) => Root::TAG,
            Record::Type(_) => TypeDescriptor::TAG,
            Record::Goroutine(_) => Goroutine::TAG,
            Record::StackFrame(_) => StackFrame::TAG,
        }
    }

    /// The address this record is about.
    ///
    /// For roots this is the address the root points to, for everything else the address of
    /// the described entity itself.
    #[must_use]
    pub fn address(&self) -> u64 {
        match self {
            Record::Object(record) => record.address,
            Record::Root(record) => record.target,
            Record::Type(record) => record.address,
            Record::Goroutine(record) => record.address,
            Record::StackFrame(record) => record.address,
        }
    }
}

macro_rules! impl_from_record {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Record {
                fn from(record: $ty) -> Self {
                    Record::$variant(record)
                }
            }
        )*
    };
}

impl_from_record! {
    Object => HeapObject,
    Root => Root,
    Type => TypeDescriptor,
    Goroutine => Goroutine,
    StackFrame => StackFrame,
}
