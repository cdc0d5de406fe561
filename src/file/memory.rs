//! Owned-buffer backend, used by [`crate::HeapDump::from_mem`].

use super::Backend;

/// Heap dump held in an owned buffer
#[derive(Debug)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// Takes ownership of `data`.
    pub fn new(data: Vec<u8>) -> Memory {
        Memory { data }
    }
}

impl Backend for Memory {
    fn data(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dump::{Tag, MAGIC},
        test::DumpBuilder,
        Error,
    };

    fn root_dump() -> Vec<u8> {
        DumpBuilder::with_magic()
            .tag(Tag::OtherRoot)
            .string("runtime.allp")
            .uvarint(0x5a_0000)
            .tag(Tag::Eof)
            .build()
    }

    #[test]
    fn header_and_record_ranges() {
        let data = root_dump();
        let size = data.len();
        let memory = Memory::new(data);

        assert_eq!(memory.len(), size);
        assert_eq!(memory.data_slice(0, MAGIC.len()).unwrap(), MAGIC);
        // Tag byte and the length prefix of the description
        assert_eq!(memory.data_slice(16, 2).unwrap(), &[0x02, 12]);
        assert_eq!(memory.data_slice(18, 12).unwrap(), b"runtime.allp");
        assert_eq!(memory.data_slice(size - 1, 1).unwrap(), &[0x00]);
        assert!(memory.data_slice(size, 0).unwrap().is_empty());
    }

    #[test]
    fn ranges_past_the_end() {
        let memory = Memory::new(root_dump());
        let size = memory.len();

        assert!(matches!(
            memory.data_slice(size - 1, 2),
            Err(Error::OutOfBounds { offset, len: 2, size: found })
                if offset == size - 1 && found == size
        ));
        assert!(matches!(
            memory.data_slice(usize::MAX, usize::MAX),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn empty_buffer() {
        let memory = Memory::new(Vec::new());

        assert_eq!(memory.len(), 0);
        assert!(memory.data().is_empty());
        assert!(memory.data_slice(0, 0).unwrap().is_empty());
        assert!(matches!(
            memory.data_slice(0, MAGIC.len()),
            Err(Error::OutOfBounds { size: 0, .. })
        ));
    }
}
