//! # hashflate
//!
//! A two-stage lossless compressor: a parallel hash-chain LZ77 match finder
//! followed by a Huffman coder over the LZ77 tuple stream.
//!
//! ## Features
//!
//! - Input split into independent blocks matched on a bounded thread pool
//! - Greedy matching with 3-byte anchors and a sliding window
//! - Canonical Huffman construction; the artifact stores only the
//!   frequency table
//! - Each stage also usable on its own through [`Method`]
//! - Round-trip timing via [`measure`]
//!
//! ## Example
//!
//! ```rust
//! use hashflate::{compress, decompress};
//!
//! let original = b"Hello, World! Hello, World!";
//! let artifact = compress(original).unwrap();
//! assert_eq!(decompress(&artifact).unwrap(), original);
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use hashflate::{DeflatePipeline, Lz77Config};
//!
//! let config = Lz77Config::new(32 * 1024, 255).with_blocks(8);
//! let pipeline = DeflatePipeline::new(config).unwrap();
//! let artifact = pipeline.compress(b"abcabcabcabc").unwrap();
//! assert_eq!(pipeline.decompress(&artifact).unwrap(), b"abcabcabcabc");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod method;
pub mod pipeline;
pub mod stats;

// Re-exports
pub use hashflate_core::{Codec, HashflateError, Result};
pub use hashflate_lz77::Lz77Config;
pub use method::Method;
pub use pipeline::DeflatePipeline;
pub use stats::{CodecStats, measure};

/// Compress `data` with the default pipeline.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    DeflatePipeline::default().compress(data)
}

/// Decompress an artifact produced by [`compress`].
///
/// The block layout is self-describing, so any configuration's artifact
/// decodes here.
pub fn decompress(artifact: &[u8]) -> Result<Vec<u8>> {
    DeflatePipeline::default().decompress(artifact)
}
