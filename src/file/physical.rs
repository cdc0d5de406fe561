//! Physical file backend for memory-mapped I/O.
//!
//! This module provides the [`crate::file::physical::Physical`] backend that implements the
//! [`crate::file::Backend`] trait for accessing heap dumps on disk through memory-mapped I/O.
//! Heap dumps of long-running services easily reach several gigabytes; mapping them lets the
//! decoder walk the record stream front to back while the operating system pages data in on
//! demand, instead of reading the whole file into an owned buffer upfront.
//!
//! # Safety
//!
//! Memory mapping is `unsafe` because another process could truncate or rewrite the file while
//! it is mapped. Heap dumps are written once by the runtime and then only read, which is the
//! usage this backend assumes.

use super::Backend;
use crate::{
    Error::{Error, FileError},
    Result,
};

use memmap2::Mmap;
use std::{fs, path::Path};

/// Heap dump backed by a memory-mapped file
#[derive(Debug)]
pub struct Physical {
    data: Mmap,
}

impl Physical {
    /// Maps the file at `path` into memory.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened and
    /// [`crate::Error::Error`] if the mapping fails.
    pub fn new(path: impl AsRef<Path>) -> Result<Physical> {
        let file = match fs::File::open(path) {
            Ok(file) => file,
            Err(error) => return Err(FileError(error)),
        };

        let mmap = match unsafe { Mmap::map(&file) } {
            Ok(mmap) => mmap,
            Err(error) => return Err(Error(error.to_string())),
        };

        Ok(Physical { data: mmap })
    }
}

impl Backend for Physical {
    fn data(&self) -> &[u8] {
        self.data.as_ref()
    }
}
