use std::io::Write;

use crate::{
    dump::Tag,
    file::io::{write_prefixed_bytes, write_uvarint, Source},
    records::{read_field_list, write_field_list, Field, RecordCodec},
    DecoderConfig, DumpString, Result,
};

/// One frame of a goroutine stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    /// Stack pointer of the frame
    pub address: u64,
    /// Depth within the stack, 0 for the top-most frame
    pub depth: u64,
    /// Stack pointer of the child (callee-side) frame, 0 if there is none
    pub child: u64,
    /// Raw contents of the frame's local storage
    pub contents: Vec<u8>,
    /// Entry PC of the function
    pub entry_pc: u64,
    /// Current PC within the function
    pub current_pc: u64,
    /// PC execution continues at when the frame is resumed
    pub continuation_pc: u64,
    /// Name of the function
    pub function_name: DumpString,
    /// Pointer slots within `contents`
    pub fields: Vec<Field>,
}

impl StackFrame {
    /// The child frame's address, if the frame has one.
    #[must_use]
    pub fn child_frame(&self) -> Option<u64> {
        (self.child != 0).then_some(self.child)
    }
}

impl RecordCodec for StackFrame {
    const TAG: Tag = Tag::StackFrame;

    fn read<S: Source + ?Sized>(source: &mut S, config: &DecoderConfig) -> Result<Self> {
        Ok(StackFrame {
            address: source.read_uvarint()?,
            depth: source.read_uvarint()?,
            child: source.read_uvarint()?,
            contents: source.read_prefixed_bytes(config)?,
            entry_pc: source.read_uvarint()?,
            current_pc: source.read_uvarint()?,
            continuation_pc: source.read_uvarint()?,
            function_name: source.read_prefixed_string(config)?,
            fields: read_field_list(source, config)?,
        })
    }

    fn write<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        write_uvarint(out, self.address)?;
        write_uvarint(out, self.depth)?;
        write_uvarint(out, self.child)?;
        write_prefixed_bytes(out, &self.contents)?;
        write_uvarint(out, self.entry_pc)?;
        write_uvarint(out, self.current_pc)?;
        write_uvarint(out, self.continuation_pc)?;
        write_prefixed_bytes(out, self.function_name.as_bytes())?;
        write_field_list(out, &self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{records::FieldKind, test::DumpBuilder, Error, Parser};

    fn crafted() -> Vec<u8> {
        DumpBuilder::new()
            .uvarint(0xc420_0400_00)
            .uvarint(2)
            .uvarint(0xc420_03ff_a0)
            .bytes(&[0xAA; 32])
            .uvarint(0x40_1000)
            .uvarint(0x40_1044)
            .uvarint(0x40_2010)
            .string("main.worker")
            .fields(&[(1, 8), (3, 16)])
            .build()
    }

    #[test]
    fn field_order() {
        let data = crafted();
        let mut parser = Parser::new(&data);
        let frame = StackFrame::read(&mut parser, &DecoderConfig::default()).unwrap();

        assert_eq!(frame.address, 0xc420_0400_00);
        assert_eq!(frame.depth, 2);
        assert_eq!(frame.child, 0xc420_03ff_a0);
        assert_eq!(frame.child_frame(), Some(0xc420_03ff_a0));
        assert_eq!(frame.contents, vec![0xAA; 32]);
        assert_eq!(frame.entry_pc, 0x40_1000);
        assert_eq!(frame.current_pc, 0x40_1044);
        assert_eq!(frame.continuation_pc, 0x40_2010);
        assert_eq!(frame.function_name, "main.worker");
        assert_eq!(
            frame.fields,
            vec![
                Field::new(FieldKind::Pointer, 8),
                Field::new(FieldKind::EmptyInterface, 16)
            ]
        );
        assert!(!parser.has_more_data());
    }

    #[test]
    fn top_frame_has_no_child() {
        let data = DumpBuilder::new()
            .uvarint(0x1000)
            .uvarint(0)
            .uvarint(0)
            .bytes(&[])
            .uvarint(1)
            .uvarint(2)
            .uvarint(3)
            .string("runtime.goexit")
            .fields(&[])
            .build();

        let frame = StackFrame::read(&mut Parser::new(&data), &DecoderConfig::default()).unwrap();
        assert_eq!(frame.child_frame(), None);
        assert!(frame.fields.is_empty());
    }

    #[test]
    fn missing_field_list() {
        let data = crafted();
        // Drop the field list entirely
        let cut = data.len() - 5;
        assert!(matches!(
            StackFrame::read(&mut Parser::new(&data[..cut]), &DecoderConfig::default()),
            Err(Error::Truncated { .. })
        ));
    }

    #[test]
    fn write_matches_wire_layout() {
        let data = crafted();
        let frame = StackFrame::read(&mut Parser::new(&data), &DecoderConfig::default()).unwrap();

        let mut out = Vec::new();
        frame.write(&mut out).unwrap();
        assert_eq!(out, data);
    }
}
