// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

//! # dumpscope
//!
//! A decoder for Go runtime heap dumps (`runtime/debug.WriteHeapDump`, format `go1.4 heap dump`).
//!
//! `dumpscope` turns the opaque byte stream the runtime writes into typed records describing
//! heap objects, goroutines, stack frames, type descriptors and GC roots. It extracts fields
//! exactly as written; resolving addresses, building an object graph or computing reachability
//! is left to the consumer.
//!
//! # Architecture
//!
//! Data flows strictly upward through three layers:
//!
//! - **Byte sources** - [`Source`] with the primitive decoders (uvarint, length-prefixed bytes),
//!   implemented by the slice cursor [`Parser`] and the buffered [`StreamSource`]
//! - **Records** - [`records`] holds one decoder per record kind plus the pointer field lists
//! - **Framing** - [`dump`] validates the magic, dispatches on tags and exposes the record
//!   stream through [`DumpReader`] and [`HeapDump`]
//!
//! Decoding is single-threaded and pull-based: a record is only decoded when the caller asks
//! for the next one, and stopping early needs no cleanup.
//!
//! # Usage Examples
//!
//! ## Decoding a dump from disk
//!
//! ```rust,no_run
//! use dumpscope::{HeapDump, Record};
//! use std::path::Path;
//!
//! let dump = HeapDump::from_file(Path::new("heapdump"))?;
//!
//! let mut objects = 0;
//! let mut bytes = 0;
//! for record in dump.records() {
//!     if let Record::Object(object) = record? {
//!         objects += 1;
//!         bytes += object.contents.len();
//!     }
//! }
//! println!("{} objects, {} bytes", objects, bytes);
//! # Ok::<(), dumpscope::Error>(())
//! ```
//!
//! ## Decoding from a stream
//!
//! ```rust,no_run
//! use dumpscope::{DecoderConfig, DumpReader, StreamSource};
//!
//! let stdin = std::io::stdin().lock();
//! let reader = DumpReader::with_config(StreamSource::new(stdin), DecoderConfig::hardened());
//! for record in reader {
//!     println!("{:?}", record?.tag());
//! }
//! # Ok::<(), dumpscope::Error>(())
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`Result`]. Errors are fatal to the record stream that
//! produced them, see [`Error`].

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]

#[macro_use]
pub(crate) mod error;
pub(crate) mod file;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust,no_run
/// use dumpscope::prelude::*;
///
/// let dump = HeapDump::from_file("heapdump".as_ref())?;
/// let roots = dump
///     .records()
///     .filter(|record| matches!(record, Ok(Record::Root(_))))
///     .count();
/// # Ok::<(), dumpscope::Error>(())
/// ```
pub mod prelude;

/// Typed heap dump records and their wire codecs.
///
/// # Key Types
///
/// - [`records::Record`] - Tagged union over all supported record kinds
/// - [`records::HeapObject`], [`records::Root`], [`records::TypeDescriptor`],
///   [`records::Goroutine`], [`records::StackFrame`] - The record kinds
/// - [`records::Field`] - A pointer slot inside an object or frame
/// - [`records::RecordCodec`] - Per-kind decode/encode
pub mod records;

/// Record stream framing, the [`HeapDump`] entry point and decoder configuration.
pub mod dump;

/// `dumpscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `dumpscope` Error type
///
/// The main error type for all operations in this crate.
///
/// # Examples
///
/// ```rust,no_run
/// use dumpscope::{Error, HeapDump};
///
/// match HeapDump::from_file(std::path::Path::new("heapdump")) {
///     Ok(dump) => println!("Loaded {} bytes", dump.len()),
///     Err(Error::BadMagic) => println!("Not a heap dump"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
pub use error::Error;

/// Main entry points for decoding heap dumps.
pub use dump::{DecoderConfig, DumpReader, DumpWriter, HeapDump, ReaderState, Tag, MAGIC};

/// Decoded record types.
pub use records::{
    Field, FieldKind, Goroutine, GoroutineStatus, HeapObject, Record, RecordCodec, Root,
    StackFrame, TypeDescriptor,
};

/// Byte sources and the primitive codecs of the wire format.
///
/// # Example
///
/// ```rust
/// use dumpscope::{write_uvarint, Parser, Source};
///
/// let mut data = Vec::new();
/// write_uvarint(&mut data, 0x2000)?;
///
/// let mut parser = Parser::new(&data);
/// assert_eq!(parser.read_uvarint()?, 0x2000);
/// # Ok::<(), dumpscope::Error>(())
/// ```
pub use file::{
    io::{
        uvarint_len, write_bool, write_prefixed_bytes, write_uvarint, Source, MAX_VARINT_LEN,
    },
    parser::Parser,
    stream::StreamSource,
    text::DumpString,
};
