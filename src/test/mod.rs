//! Byte builders for crafting heap dump input in unit tests.
//!
//! Unlike [`crate::DumpWriter`] these write whatever they are told, which is what tests for
//! malformed input need.

use crate::{
    dump::{Tag, MAGIC},
    file::io::{write_prefixed_bytes, write_uvarint},
};

/// Appends raw heap dump primitives to a buffer.
#[derive(Default)]
pub struct DumpBuilder {
    data: Vec<u8>,
}

impl DumpBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a buffer with the magic header already in place.
    pub fn with_magic() -> Self {
        Self::new().raw(MAGIC)
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.data.extend_from_slice(bytes);
        self
    }

    pub fn uvarint(mut self, value: u64) -> Self {
        write_uvarint(&mut self.data, value).unwrap();
        self
    }

    pub fn tag(self, tag: Tag) -> Self {
        self.uvarint(tag.value())
    }

    pub fn bytes(mut self, bytes: &[u8]) -> Self {
        write_prefixed_bytes(&mut self.data, bytes).unwrap();
        self
    }

    pub fn string(self, text: &str) -> Self {
        self.bytes(text.as_bytes())
    }

    /// Writes `(kind, offset)` pairs followed by the end marker.
    pub fn fields(mut self, fields: &[(u64, u64)]) -> Self {
        for &(kind, offset) in fields {
            self = self.uvarint(kind).uvarint(offset);
        }
        self.uvarint(0)
    }

    pub fn build(self) -> Vec<u8> {
        self.data
    }
}
