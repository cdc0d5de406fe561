use std::io::Write;

use crate::{
    dump::Tag,
    file::io::{write_bool, write_prefixed_bytes, write_uvarint, Source},
    records::RecordCodec,
    DecoderConfig, DumpString, Result,
};

/// A runtime type descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Address of the type descriptor
    pub address: u64,
    /// Size of an instance in bytes
    pub size: u64,
    /// Name of the type
    pub name: DumpString,
    /// The type is a single pointer word, so objects of it need no field list
    pub is_pointer: bool,
}

impl RecordCodec for TypeDescriptor {
    const TAG: Tag = Tag::Type;

    fn read<S: Source + ?Sized>(source: &mut S, config: &DecoderConfig) -> Result<Self> {
        Ok(TypeDescriptor {
            address: source.read_uvarint()?,
            size: source.read_uvarint()?,
            name: source.read_prefixed_string(config)?,
            is_pointer: source.read_uvarint()? != 0,
        })
    }

    fn write<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        write_uvarint(out, self.address)?;
        write_uvarint(out, self.size)?;
        write_prefixed_bytes(out, self.name.as_bytes())?;
        write_bool(out, self.is_pointer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test::DumpBuilder, Error, Parser};

    #[test]
    fn crafted() {
        let data = DumpBuilder::new()
            .uvarint(0x4a_1b20)
            .uvarint(24)
            .string("main.node")
            .uvarint(0)
            .build();

        let desc = TypeDescriptor::read(&mut Parser::new(&data), &DecoderConfig::default()).unwrap();
        assert_eq!(desc.address, 0x4a_1b20);
        assert_eq!(desc.size, 24);
        assert_eq!(desc.name, "main.node");
        assert!(!desc.is_pointer);
    }

    #[test]
    fn any_nonzero_is_pointer() {
        for raw in [1, 2, 200] {
            let data = DumpBuilder::new()
                .uvarint(1)
                .uvarint(8)
                .string("*main.node")
                .uvarint(raw)
                .build();

            let desc =
                TypeDescriptor::read(&mut Parser::new(&data), &DecoderConfig::default()).unwrap();
            assert!(desc.is_pointer);
        }
    }

    #[test]
    fn truncated_name() {
        let data = DumpBuilder::new()
            .uvarint(1)
            .uvarint(8)
            .uvarint(10)
            .raw(b"main")
            .build();

        assert!(matches!(
            TypeDescriptor::read(&mut Parser::new(&data), &DecoderConfig::default()),
            Err(Error::Truncated { .. })
        ));
    }
}
