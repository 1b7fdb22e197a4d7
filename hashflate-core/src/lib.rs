//! # hashflate core
//!
//! Core components shared by the hashflate crates.
//!
//! - [`bitstream`]: MSB-first bit I/O for Huffman codes
//! - [`traits`]: the whole-buffer [`Codec`] trait
//! - [`error`]: error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: CLI                                                 │
//! │     compress / decompress / test, timing report        │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Pipeline                                            │
//! │     Huffman(LZ77(data)), standalone stages, stats      │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Stages                                              │
//! │     hash-chain LZ77 + block coordinator, Huffman coder │
//! ├─────────────────────────────────────────────────────────┤
//! │ L0: Core (this crate)                                   │
//! │     MsbBitReader/MsbBitWriter, Codec, HashflateError   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use hashflate_core::bitstream::{MsbBitReader, MsbBitWriter};
//!
//! let mut writer = MsbBitWriter::new();
//! writer.write_bits(0b110, 3);
//! let (pad, bytes) = writer.finish();
//!
//! let mut reader = MsbBitReader::new(&bytes, pad).unwrap();
//! assert_eq!(reader.read_bits(3).unwrap(), 0b110);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;
pub mod traits;

// Re-exports for convenience
pub use bitstream::{MsbBitReader, MsbBitWriter};
pub use error::{HashflateError, Result};
pub use traits::Codec;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{MsbBitReader, MsbBitWriter};
    pub use crate::error::{HashflateError, Result};
    pub use crate::traits::Codec;
}
