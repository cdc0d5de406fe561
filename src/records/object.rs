use std::io::Write;

use crate::{
    dump::Tag,
    file::io::{write_prefixed_bytes, write_uvarint, Source},
    records::{read_field_list, write_field_list, Field, RecordCodec},
    DecoderConfig, Result,
};

/// A heap object as written into the dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeapObject {
    /// Address of the object
    pub address: u64,
    /// Raw memory contents of the object
    pub contents: Vec<u8>,
    /// Pointer slots within `contents`
    pub fields: Vec<Field>,
}

impl RecordCodec for HeapObject {
    const TAG: Tag = Tag::Object;

    fn read<S: Source + ?Sized>(source: &mut S, config: &DecoderConfig) -> Result<Self> {
        Ok(HeapObject {
            address: source.read_uvarint()?,
            contents: source.read_prefixed_bytes(config)?,
            fields: read_field_list(source, config)?,
        })
    }

    fn write<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        write_uvarint(out, self.address)?;
        write_prefixed_bytes(out, &self.contents)?;
        write_field_list(out, &self.fields)
    }
}
