//! Text as the runtime writes it.
//!
//! Go strings are arbitrary byte sequences, so names and descriptions in a heap dump are not
//! guaranteed to be UTF-8. [`crate::file::text::DumpString`] keeps the exact bytes and decodes
//! them on request.

use std::{borrow::Cow, fmt, str::Utf8Error};

/// A length-prefixed text field, holding exactly the bytes found in the dump.
///
/// Compares equal to a `&str` with the same bytes, and displays lossily (invalid sequences as
/// `U+FFFD`). Writing a record back out reproduces the original bytes.
///
/// # Examples
///
/// ```rust
/// use dumpscope::DumpString;
///
/// let name = DumpString::from(b"main.\xFFnode".to_vec());
/// assert!(name.to_str().is_err());
/// assert_eq!(name.to_string_lossy(), "main.\u{FFFD}node");
/// assert_eq!(name.as_bytes(), b"main.\xFFnode");
///
/// assert_eq!(DumpString::from("runtime.m0"), "runtime.m0");
/// ```
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DumpString(Vec<u8>);

impl DumpString {
    /// The raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the string, returning the raw bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// The text, if the bytes are valid UTF-8.
    ///
    /// # Errors
    /// Returns the [`Utf8Error`] describing the first invalid sequence.
    pub fn to_str(&self) -> std::result::Result<&str, Utf8Error> {
        std::str::from_utf8(&self.0)
    }

    /// The text with invalid sequences replaced by `U+FFFD`.
    #[must_use]
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for an empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for DumpString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_string_lossy(), f)
    }
}

impl fmt::Display for DumpString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl AsRef<[u8]> for DumpString {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for DumpString {
    fn from(bytes: Vec<u8>) -> Self {
        DumpString(bytes)
    }
}

impl From<&[u8]> for DumpString {
    fn from(bytes: &[u8]) -> Self {
        DumpString(bytes.to_vec())
    }
}

impl From<String> for DumpString {
    fn from(text: String) -> Self {
        DumpString(text.into_bytes())
    }
}

impl From<&str> for DumpString {
    fn from(text: &str) -> Self {
        DumpString(text.as_bytes().to_vec())
    }
}

impl PartialEq<str> for DumpString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for DumpString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}
