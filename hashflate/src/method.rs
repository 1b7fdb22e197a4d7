//! Selecting which stages to run.

use crate::pipeline::DeflatePipeline;
use hashflate_core::error::{HashflateError, Result};
use hashflate_core::traits::Codec;
use hashflate_huffman::HuffmanCodec;
use hashflate_lz77::{Lz77Codec, Lz77Config};
use std::fmt;
use std::str::FromStr;

/// Compression method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    /// `Huffman(LZ77(data))`.
    #[default]
    Deflate,
    /// Huffman coding only.
    Huffman,
    /// LZ77 tuples only.
    Lz77,
}

impl Method {
    /// Every method, pipeline first.
    pub const ALL: [Method; 3] = [Method::Deflate, Method::Huffman, Method::Lz77];

    /// Lowercase method name.
    pub fn name(self) -> &'static str {
        match self {
            Method::Deflate => "deflate",
            Method::Huffman => "huffman",
            Method::Lz77 => "lz77",
        }
    }

    /// Whether this method runs the LZ77 stage and so uses `config`.
    pub fn uses_lz77(self) -> bool {
        !matches!(self, Method::Huffman)
    }

    /// Build the codec for this method.
    ///
    /// `config` is validated only for methods that run the LZ77 stage.
    pub fn codec(self, config: Lz77Config) -> Result<Box<dyn Codec + Send + Sync>> {
        if self.uses_lz77() {
            config.validate()?;
        }
        Ok(match self {
            Method::Deflate => Box::new(DeflatePipeline::new(config)?),
            Method::Huffman => Box::new(HuffmanCodec),
            Method::Lz77 => Box::new(Lz77Codec::new(config)),
        })
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = HashflateError;

    fn from_str(s: &str) -> Result<Self> {
        Method::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                HashflateError::invalid_config(format!(
                    "unknown method '{s}' (expected deflate, huffman or lz77)"
                ))
            })
    }
}
