//! Decoder limits.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest bulk string accepted by default (512 MiB).
pub const DEFAULT_MAX_BULK_LEN: usize = 512 * 1024 * 1024;
/// Longest simple/error/integer/length line accepted by default.
pub const DEFAULT_MAX_LINE_LEN: usize = 64 * 1024;
/// Deepest array nesting accepted by default.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Limits applied by a [`Decoder`](crate::Decoder) to bound memory exposure.
///
/// ```
/// # use respcodec::DecoderConfig;
/// let config = DecoderConfig::default().with_max_bulk_len(1024);
/// assert_eq!(config.max_bulk_len, 1024);
/// assert_eq!(config.max_depth, 512);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecoderConfig {
    /// Maximum bulk body size in bytes.
    pub max_bulk_len: usize,
    /// Maximum line content size in bytes, excluding the CRLF.
    pub max_line_len: usize,
    /// Maximum array nesting; a flat array has depth 1.
    pub max_depth: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        DecoderConfig {
            max_bulk_len: DEFAULT_MAX_BULK_LEN,
            max_line_len: DEFAULT_MAX_LINE_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecoderConfig {
    #[must_use]
    pub fn with_max_bulk_len(mut self, max_bulk_len: usize) -> Self {
        self.max_bulk_len = max_bulk_len;
        self
    }

    #[must_use]
    pub fn with_max_line_len(mut self, max_line_len: usize) -> Self {
        self.max_line_len = max_line_len;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
