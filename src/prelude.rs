//! # dumpscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the dumpscope library. Import this module to get quick access to everything needed
//! to walk a heap dump.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all dumpscope operations
pub use crate::Error;

/// The result type used throughout dumpscope
pub use crate::Result;

/// Limits applied while decoding
pub use crate::DecoderConfig;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// A heap dump loaded from disk or memory
pub use crate::HeapDump;

/// Record stream reader and writer
pub use crate::{DumpReader, DumpWriter, ReaderState};

/// Byte sources
pub use crate::{Parser, Source, StreamSource};

/// Text fields, kept as the raw bytes of the dump
pub use crate::DumpString;

// ================================================================================================
// Records
// ================================================================================================

/// Record tags and the tagged record union
pub use crate::{Record, RecordCodec, Tag};

/// Individual record kinds
pub use crate::{Goroutine, GoroutineStatus, HeapObject, Root, StackFrame, TypeDescriptor};

/// Pointer field lists
pub use crate::{Field, FieldKind};
