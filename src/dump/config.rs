//! Decoder configuration
//!
//! The heap dump format puts no upper bound on payload lengths or on the number of entries in
//! a field list. With a trusted dump on disk that is fine: a forged length simply runs into the
//! end of the data and fails as truncated. For dumps arriving over a stream the decoder would
//! instead keep waiting for, and buffering, whatever the length prefix claims. These limits let
//! callers cap that.

use crate::{Error, Result};

/// Limits applied while decoding records.
///
/// The default configuration applies no limits and decodes exactly what the format allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Largest accepted length prefix, in bytes, for payloads and strings.
    pub max_payload_len: Option<u64>,

    /// Largest accepted number of entries in a single field list.
    pub max_fields: Option<usize>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl DecoderConfig {
    /// No limits. Every well-formed dump decodes.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            max_payload_len: None,
            max_fields: None,
        }
    }

    /// Limits suitable for untrusted input.
    ///
    /// 256 MiB per payload and 1 Mi entries per field list. Real objects and frames stay far
    /// below both; the largest payloads in practice are big slices' backing arrays.
    #[must_use]
    pub fn hardened() -> Self {
        Self {
            max_payload_len: Some(256 * 1024 * 1024),
            max_fields: Some(1024 * 1024),
        }
    }

    pub(crate) fn check_payload_len(&self, length: u64) -> Result<()> {
        match self.max_payload_len {
            Some(limit) if length > limit => Err(Error::LimitExceeded {
                what: "payload length",
                limit,
                found: length,
            }),
            _ => Ok(()),
        }
    }

    pub(crate) fn check_field_count(&self, count: usize) -> Result<()> {
        match self.max_fields {
            Some(limit) if count > limit => Err(Error::LimitExceeded {
                what: "field list",
                limit: limit as u64,
                found: count as u64,
            }),
            _ => Ok(()),
        }
    }
}
