use std::{
    io::Write,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use crate::{
    dump::Tag,
    file::io::{write_bool, write_prefixed_bytes, write_uvarint, Source},
    records::RecordCodec,
    DecoderConfig, DumpString, Error, Result,
};

/// Scheduling state of a goroutine at dump time.
///
/// Values the decoder does not know are kept as [`GoroutineStatus::Unknown`]; newer runtimes
/// may add states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoroutineStatus {
    /// Not yet started or already finished
    Idle,
    /// Ready to run
    Runnable,
    /// Inside a system call
    InSyscall,
    /// Blocked, see [`Goroutine::wait_reason`]
    Waiting,
    /// A status value outside of the known set
    Unknown(u64),
}

impl GoroutineStatus {
    /// Maps a raw wire value to its status.
    #[must_use]
    pub fn from_raw(value: u64) -> Self {
        match value {
            0 => GoroutineStatus::Idle,
            1 => GoroutineStatus::Runnable,
            2 => GoroutineStatus::InSyscall,
            3 => GoroutineStatus::Waiting,
            other => GoroutineStatus::Unknown(other),
        }
    }

    /// The raw wire value of this status.
    #[must_use]
    pub fn value(self) -> u64 {
        match self {
            GoroutineStatus::Idle => 0,
            GoroutineStatus::Runnable => 1,
            GoroutineStatus::InSyscall => 2,
            GoroutineStatus::Waiting => 3,
            GoroutineStatus::Unknown(other) => other,
        }
    }
}

/// A goroutine captured at dump time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goroutine {
    /// Address of the goroutine descriptor
    pub address: u64,
    /// Address of the top-most (currently running) stack frame
    pub current_frame: u64,
    /// Goroutine id
    pub id: u64,
    /// Location of the `go` statement that created this goroutine
    pub go_statement: u64,
    /// Scheduling state
    pub status: GoroutineStatus,
    /// Started by the runtime rather than by user code
    pub is_system: bool,
    /// Background goroutine
    pub is_background: bool,
    /// Time the goroutine started waiting, relative to the Unix epoch
    pub started: Duration,
    /// Why the goroutine is waiting; empty if it is not
    pub wait_reason: DumpString,
    /// Address of the context pointer
    pub context: u64,
    /// Address of the OS thread descriptor running this goroutine, or 0
    pub thread: u64,
    /// Address of the head of the defer chain, or 0
    pub defer_chain: u64,
    /// Address of the head of the panic chain, or 0
    pub panic_chain: u64,
}

impl Goroutine {
    /// [`Goroutine::started`] as an absolute point in time.
    ///
    /// Returns `None` if the value cannot be represented by [`SystemTime`] on this platform.
    #[must_use]
    pub fn started_at(&self) -> Option<SystemTime> {
        UNIX_EPOCH.checked_add(self.started)
    }
}

impl RecordCodec for Goroutine {
    const TAG: Tag = Tag::Goroutine;

    fn read<S: Source + ?Sized>(source: &mut S, config: &DecoderConfig) -> Result<Self> {
        Ok(Goroutine {
            address: source.read_uvarint()?,
            current_frame: source.read_uvarint()?,
            id: source.read_uvarint()?,
            go_statement: source.read_uvarint()?,
            status: GoroutineStatus::from_raw(source.read_uvarint()?),
            is_system: source.read_bool()?,
            is_background: source.read_bool()?,
            started: Duration::from_nanos(source.read_uvarint()?),
            wait_reason: source.read_prefixed_string(config)?,
            context: source.read_uvarint()?,
            thread: source.read_uvarint()?,
            defer_chain: source.read_uvarint()?,
            panic_chain: source.read_uvarint()?,
        })
    }

    fn write<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        let started = u64::try_from(self.started.as_nanos()).map_err(|_| Error::Overflow)?;

        write_uvarint(out, self.address)?;
        write_uvarint(out, self.current_frame)?;
        write_uvarint(out, self.id)?;
        write_uvarint(out, self.go_statement)?;
        write_uvarint(out, self.status.value())?;
        write_bool(out, self.is_system)?;
        write_bool(out, self.is_background)?;
        write_uvarint(out, started)?;
        write_prefixed_bytes(out, self.wait_reason.as_bytes())?;
        write_uvarint(out, self.context)?;
        write_uvarint(out, self.thread)?;
        write_uvarint(out, self.defer_chain)?;
        write_uvarint(out, self.panic_chain)
    }
}
