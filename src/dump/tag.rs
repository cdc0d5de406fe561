use std::fmt;

use strum::{EnumCount, EnumIter};

/// Top-level record tags of the heap dump format.
///
/// Every record in the stream starts with one of these values as a uvarint. The format defines
/// eighteen of them; this crate decodes the first six ([`Tag::is_supported`]). A reserved tag
/// stops the decoder with [`crate::Error::UnknownTag`], since the record that follows has no
/// length prefix and cannot be skipped.
///
/// ## Reference
/// * [Go heap dump format, version 1.4](https://github.com/golang/go/wiki/heapdump14)
#[derive(Clone, Copy, PartialEq, Debug, EnumIter, EnumCount, Eq, Hash)]
pub enum Tag {
    /// End of the record stream.
    Eof = 0,
    /// A heap object with its contents and pointer fields.
    Object = 1,
    /// A GC root that is neither a heap object nor a stack slot.
    OtherRoot = 2,
    /// A type descriptor.
    Type = 3,
    /// A goroutine.
    Goroutine = 4,
    /// One stack frame of a goroutine.
    StackFrame = 5,
    /// Dump parameters (byte order, pointer size, heap range, architecture).
    Params = 6,
    /// A registered finalizer.
    Finalizer = 7,
    /// An interface table.
    Itab = 8,
    /// An OS thread.
    OsThread = 9,
    /// Runtime memory statistics.
    MemStats = 10,
    /// A finalizer queued to run.
    QueuedFinalizer = 11,
    /// The initialized data segment.
    Data = 12,
    /// The zero-initialized data segment.
    Bss = 13,
    /// A deferred call record.
    Defer = 14,
    /// A panic record.
    Panic = 15,
    /// An alloc/free profile bucket.
    MemProf = 16,
    /// An allocation sample.
    AllocSample = 17,
}

impl Tag {
    /// Maps a raw tag value to its [`Tag`], if the format defines it.
    #[must_use]
    pub fn from_raw(value: u64) -> Option<Tag> {
        Some(match value {
            0 => Tag::Eof,
            1 => Tag::Object,
            2 => Tag::OtherRoot,
            3 => Tag::Type,
            4 => Tag::Goroutine,
            5 => Tag::StackFrame,
            6 => Tag::Params,
            7 => Tag::Finalizer,
            8 => Tag::Itab,
            9 => Tag::OsThread,
            10 => Tag::MemStats,
            11 => Tag::QueuedFinalizer,
            12 => Tag::Data,
            13 => Tag::Bss,
            14 => Tag::Defer,
            15 => Tag::Panic,
            16 => Tag::MemProf,
            17 => Tag::AllocSample,
            _ => return None,
        })
    }

    /// The raw wire value of this tag.
    #[must_use]
    pub fn value(self) -> u64 {
        self as u64
    }

    /// Returns `true` if this decoder can frame records with this tag.
    ///
    /// [`Tag::Eof`] counts as supported: it terminates the stream.
    #[must_use]
    pub fn is_supported(self) -> bool {
        matches!(
            self,
            Tag::Eof
                | Tag::Object
                | Tag::OtherRoot
                | Tag::Type
                | Tag::Goroutine
                | Tag::StackFrame
        )
    }

    /// Human-readable name, as used by the format description.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Tag::Eof => "eof",
            Tag::Object => "object",
            Tag::OtherRoot => "otherroot",
            Tag::Type => "type",
            Tag::Goroutine => "goroutine",
            Tag::StackFrame => "stackframe",
            Tag::Params => "params",
            Tag::Finalizer => "finalizer",
            Tag::Itab => "itab",
            Tag::OsThread => "osthread",
            Tag::MemStats => "memstats",
            Tag::QueuedFinalizer => "queuedfinalizer",
            Tag::Data => "data",
            Tag::Bss => "bss",
            Tag::Defer => "defer",
            Tag::Panic => "panic",
            Tag::MemProf => "memprof",
            Tag::AllocSample => "allocsample",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
