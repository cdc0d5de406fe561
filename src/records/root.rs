use std::io::Write;

use crate::{
    dump::Tag,
    file::io::{write_prefixed_bytes, write_uvarint, Source},
    records::RecordCodec,
    DecoderConfig, DumpString, Result,
};

/// A GC root that is neither a heap object nor a stack slot, e.g. a runtime global.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root {
    /// Free-form description of the root
    pub description: DumpString,
    /// Address the root points to
    pub target: u64,
}

impl RecordCodec for Root {
    const TAG: Tag = Tag::OtherRoot;

    fn read<S: Source + ?Sized>(source: &mut S, config: &DecoderConfig) -> Result<Self> {
        Ok(Root {
            description: source.read_prefixed_string(config)?,
            target: source.read_uvarint()?,
        })
    }

    fn write<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        write_prefixed_bytes(out, self.description.as_bytes())?;
        write_uvarint(out, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test::DumpBuilder, Error, Parser};

    #[test]
    fn crafted() {
        let data = DumpBuilder::new().string("runtime.m0").uvarint(0x1000).build();

        let root = Root::read(&mut Parser::new(&data), &DecoderConfig::default()).unwrap();
        assert_eq!(root.description, "runtime.m0");
        assert_eq!(root.target, 0x1000);
    }

    #[test]
    fn description_bytes_are_kept() {
        let data = DumpBuilder::new()
            .bytes(&[b'a', 0xFF, b'b'])
            .uvarint(7)
            .build();

        let root = Root::read(&mut Parser::new(&data), &DecoderConfig::default()).unwrap();
        assert_eq!(root.description.as_bytes(), &[b'a', 0xFF, b'b']);

        let mut out = Vec::new();
        root.write(&mut out).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn missing_target() {
        let data = DumpBuilder::new().string("finq").build();
        assert!(matches!(
            Root::read(&mut Parser::new(&data), &DecoderConfig::default()),
            Err(Error::Truncated { .. })
        ));
    }
}
