//! # hashflate LZ77
//!
//! Hash-chain LZ77 match finder for the first hashflate stage.
//!
//! Input is split into independent blocks which are matched in parallel.
//! Each block becomes a stream of fixed-width 4-byte tuples
//! `(offset u16 LE, length u8, literal u8)`; blocks are framed with a block
//! count and a separator so they can be decoded in parallel too.
//!
//! ## Features
//!
//! - 3-byte anchors keyed into a per-block hash chain
//! - Chains pruned as the sliding window advances
//! - Nearest match wins ties between equally long candidates
//! - Optional bound on candidates examined per position
//! - `parallel` (default): blocks run on a bounded rayon pool
//!
//! ## Example
//!
//! ```rust
//! use hashflate_lz77::{Lz77Config, compress, decompress};
//!
//! let data = b"abcabcabcabcabcabc";
//! let packed = compress(data, Lz77Config::DEFAULT).unwrap();
//! assert_eq!(decompress(&packed).unwrap(), data);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod block;
pub mod config;
pub mod decode;
pub mod matcher;
pub mod token;

// Re-exports
pub use block::{BLOCK_SEPARATOR, BlockCoordinator};
pub use config::Lz77Config;
pub use decode::{BlockDecoder, decode_tokens};
pub use matcher::{HashChain, HashChainMatcher};
pub use token::{TUPLE_SIZE, Token, TupleCodec};

use hashflate_core::error::Result;
use hashflate_core::traits::Codec;

/// Compress `data` into a framed tuple stream.
pub fn compress(data: &[u8], config: Lz77Config) -> Result<Vec<u8>> {
    BlockCoordinator::new(config)?.compress(data)
}

/// Decompress a framed tuple stream.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    BlockCoordinator::decompress(data)
}

/// The LZ77 stage on its own, as a [`Codec`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Lz77Codec {
    config: Lz77Config,
}

impl Lz77Codec {
    /// Create a codec with the given configuration.
    pub fn new(config: Lz77Config) -> Self {
        Self { config }
    }

    /// The configuration used for compression.
    pub fn config(&self) -> &Lz77Config {
        &self.config
    }
}

impl Codec for Lz77Codec {
    fn name(&self) -> &'static str {
        "lz77"
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        compress(input, self.config)
    }

    fn decompress(&self, artifact: &[u8]) -> Result<Vec<u8>> {
        decompress(artifact)
    }
}
