//! Error types for hashflate operations.
//!
//! Every failure the codec can report is a variant of [`HashflateError`].
//! Decode-side variants (`MalformedStream`, `ShortRead`, `WindowViolation`)
//! always mean the artifact is corrupt; there is no best-effort recovery.

use std::io;
use thiserror::Error;

/// The main error type for hashflate operations.
#[derive(Debug, Error)]
pub enum HashflateError {
    /// I/O error from an underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Nothing to compress: the input (or its frequency table) is empty.
    #[error("Empty input: nothing to encode")]
    EmptyInput,

    /// The artifact does not follow the wire format.
    #[error("Malformed stream at offset {offset}: {message}")]
    MalformedStream {
        /// Byte offset where the problem was detected.
        offset: u64,
        /// Description of the problem.
        message: String,
    },

    /// A fixed-width record was cut short.
    #[error("Short read: record needs {needed} bytes, only {available} remain")]
    ShortRead {
        /// Width of the record being read.
        needed: usize,
        /// Bytes left in the stream.
        available: usize,
    },

    /// A back-reference points before the start of the decoded block.
    #[error("Window violation: offset {offset} exceeds {decoded} decoded bytes")]
    WindowViolation {
        /// The offending back-reference offset.
        offset: usize,
        /// Bytes decoded so far in the current block.
        decoded: usize,
    },

    /// Codec configuration is out of range.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Which setting is wrong and why.
        message: String,
    },

    /// A caller-supplied frequency table cannot be serialized unambiguously.
    #[error("Invalid frequency table: {message}")]
    InvalidFrequencyTable {
        /// Description of the table problem.
        message: String,
    },

    /// A symbol occurs more often than the wire format can count.
    #[error("Input too large: symbol {symbol:#04x} occurs {count} times (limit {limit})")]
    InputTooLarge {
        /// The symbol whose count overflowed.
        symbol: u8,
        /// Observed occurrence count.
        count: u64,
        /// Largest representable count.
        limit: u64,
    },

    /// The bounded worker pool could not be created.
    #[error("Worker pool error: {message}")]
    WorkerPool {
        /// Description reported by the thread pool builder.
        message: String,
    },
}

/// Result type alias for hashflate operations.
pub type Result<T> = std::result::Result<T, HashflateError>;

impl HashflateError {
    /// Create a malformed stream error.
    pub fn malformed(offset: u64, message: impl Into<String>) -> Self {
        Self::MalformedStream {
            offset,
            message: message.into(),
        }
    }

    /// Create a short read error.
    pub fn short_read(needed: usize, available: usize) -> Self {
        Self::ShortRead { needed, available }
    }

    /// Create a window violation error.
    pub fn window_violation(offset: usize, decoded: usize) -> Self {
        Self::WindowViolation { offset, decoded }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid frequency table error.
    pub fn invalid_table(message: impl Into<String>) -> Self {
        Self::InvalidFrequencyTable {
            message: message.into(),
        }
    }

    /// Create an input too large error.
    pub fn input_too_large(symbol: u8, count: u64) -> Self {
        Self::InputTooLarge {
            symbol,
            count,
            limit: u64::from(u32::MAX),
        }
    }

    /// Create a worker pool error.
    pub fn worker_pool(message: impl Into<String>) -> Self {
        Self::WorkerPool {
            message: message.into(),
        }
    }

    /// Whether this error signals a corrupt artifact rather than bad input.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::MalformedStream { .. } | Self::ShortRead { .. } | Self::WindowViolation { .. }
        )
    }
}
