//! Pointer field lists.
//!
//! Objects and stack frames are dumped as raw bytes plus a list telling which offsets inside
//! those bytes hold pointers. On the wire a list is a sequence of `(kind, offset)` uvarint pairs
//! closed by a lone kind `0`:
//!
//! ```text
//! kind offset kind offset ... 0
//! ```
//!
//! The closing marker is consumed but not kept. Entry order mirrors the layout of the pointer
//! slots in memory and is preserved as read.
//!
//! Offsets are relative to the owning record's payload and are not checked against its length.
//! A hostile dump may point outside the payload; consumers must bounds-check before
//! dereferencing.

use std::io::Write;

use crate::{
    file::io::{write_uvarint, Source},
    DecoderConfig, Error, Result,
};

/// What kind of pointer-shaped data a [`Field`] points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Terminates a field list. Never stored in a decoded list.
    End,
    /// A single pointer word.
    Pointer,
    /// A two-word interface value (itab pointer, data pointer).
    Interface,
    /// A two-word empty interface value (type pointer, data pointer).
    EmptyInterface,
    /// A kind this decoder does not know. Kept verbatim.
    Unknown(u64),
}

impl FieldKind {
    /// Maps a raw wire value to its kind.
    #[must_use]
    pub fn from_raw(value: u64) -> FieldKind {
        match value {
            0 => FieldKind::End,
            1 => FieldKind::Pointer,
            2 => FieldKind::Interface,
            3 => FieldKind::EmptyInterface,
            other => FieldKind::Unknown(other),
        }
    }

    /// The raw wire value of this kind.
    #[must_use]
    pub fn value(self) -> u64 {
        match self {
            FieldKind::End => 0,
            FieldKind::Pointer => 1,
            FieldKind::Interface => 2,
            FieldKind::EmptyInterface => 3,
            FieldKind::Unknown(other) => other,
        }
    }

    /// Number of machine words occupied by a slot of this kind, if known.
    #[must_use]
    pub fn width_words(self) -> Option<u64> {
        match self {
            FieldKind::End => Some(0),
            FieldKind::Pointer => Some(1),
            FieldKind::Interface | FieldKind::EmptyInterface => Some(2),
            FieldKind::Unknown(_) => None,
        }
    }
}

/// One pointer slot inside a record payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Field {
    /// Shape of the slot
    pub kind: FieldKind,
    /// Byte offset of the slot within the owning payload
    pub offset: u64,
}

impl Field {
    /// Creates a field of `kind` at `offset`.
    #[must_use]
    pub fn new(kind: FieldKind, offset: u64) -> Self {
        Field { kind, offset }
    }

    /// Returns `true` for interface slots, which hold two words.
    #[must_use]
    pub fn is_pointer_pair(&self) -> bool {
        matches!(self.kind, FieldKind::Interface | FieldKind::EmptyInterface)
    }
}

/// Reads a field list up to and including its end marker.
///
/// Unknown kinds are passed through as [`FieldKind::Unknown`].
///
/// # Errors
/// Returns [`crate::Error::Truncated`] if the input ends before the end marker,
/// [`crate::Error::Overflow`] for an oversized varint and [`crate::Error::LimitExceeded`] if
/// the list grows past `config.max_fields`.
pub fn read_field_list<S: Source + ?Sized>(
    source: &mut S,
    config: &DecoderConfig,
) -> Result<Vec<Field>> {
    let mut fields = Vec::new();
    loop {
        let kind = FieldKind::from_raw(source.read_uvarint()?);
        if kind == FieldKind::End {
            return Ok(fields);
        }

        let offset = source.read_uvarint()?;
        config.check_field_count(fields.len() + 1)?;
        fields.push(Field { kind, offset });
    }
}

/// Writes a field list followed by the end marker.
///
/// # Errors
/// Returns [`crate::Error::Error`] if a field has kind [`FieldKind::End`] or
/// [`FieldKind::Unknown`]`(0)`, either of which would close the list early, and
/// [`crate::Error::FileError`] if writing fails.
pub fn write_field_list<W: Write + ?Sized>(out: &mut W, fields: &[Field]) -> Result<()> {
    for field in fields {
        if field.kind.value() == 0 {
            return Err(Error::Error(format!(
                "Field at offset {} uses the end marker as its kind",
                field.offset
            )));
        }

        write_uvarint(out, field.kind.value())?;
        write_uvarint(out, field.offset)?;
    }
    write_uvarint(out, 0)
}
