//! # hashflate Huffman
//!
//! Byte-oriented Huffman coder with a self-describing frequency table.
//!
//! ## Artifact layout
//!
//! ```text
//! +-----------+----------------------------------+-------------+
//! | pad (u8)  | frequency table + 4-byte sentinel | packed bits |
//! +-----------+----------------------------------+-------------+
//! ```
//!
//! The table is stored rather than the tree: the decoder rebuilds the same
//! tree because construction is canonical (pairs sorted by
//! `(freq, symbol)`, ties in the queue broken by insertion order).
//!
//! ## Example
//!
//! ```rust
//! use hashflate_huffman::{decode, encode};
//!
//! let artifact = encode(b"abracadabra").unwrap();
//! assert_eq!(decode(&artifact).unwrap(), b"abracadabra");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod pack;
pub mod serialize;
pub mod tree;

// Re-exports
pub use pack::BitPacker;
pub use serialize::TreeSerializer;
pub use tree::{Code, EncodingTable, FrequencySymbol, FrequencyTable, HuffmanNode, HuffmanTree};

use hashflate_core::error::{HashflateError, Result};
use hashflate_core::traits::Codec;
use tracing::debug;

/// Huffman-encode `data` with a table counted from `data` itself.
pub fn encode(data: &[u8]) -> Result<Vec<u8>> {
    let table = FrequencyTable::from_bytes(data)?;
    encode_with_table(data, &table)
}

/// Huffman-encode `data` with a caller-supplied table.
///
/// Every byte of `data` must have a pair in `table`.
pub fn encode_with_table(data: &[u8], table: &FrequencyTable) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Err(HashflateError::EmptyInput);
    }

    let tree = HuffmanTree::build(table)?;
    let codes = tree.encoding_table()?;
    let (pad, bits) = BitPacker::pack(data, &codes)?;

    let mut output = Vec::with_capacity(1 + TreeSerializer::serialized_len(table) + bits.len());
    output.push(pad);
    TreeSerializer::serialize_into(table, &mut output);
    output.extend_from_slice(&bits);

    debug!(
        input = data.len(),
        symbols = table.len(),
        output = output.len(),
        "huffman stage encoded"
    );
    Ok(output)
}

/// Decode an artifact produced by [`encode`].
pub fn decode(artifact: &[u8]) -> Result<Vec<u8>> {
    let Some((&pad, rest)) = artifact.split_first() else {
        return Err(HashflateError::malformed(0, "missing pad count"));
    };
    if pad > 7 {
        return Err(HashflateError::malformed(0, format!("pad count {pad} exceeds 7")));
    }

    let (table, consumed) = TreeSerializer::deserialize(rest)?;
    let tree = HuffmanTree::build(&table)?;
    let output = BitPacker::unpack(pad, &rest[consumed..], &tree)?;

    debug!(
        input = artifact.len(),
        symbols = table.len(),
        output = output.len(),
        "huffman stage decoded"
    );
    Ok(output)
}

/// The Huffman stage on its own, as a [`Codec`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanCodec;

impl Codec for HuffmanCodec {
    fn name(&self) -> &'static str {
        "huffman"
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        encode(input)
    }

    fn decompress(&self, artifact: &[u8]) -> Result<Vec<u8>> {
        decode(artifact)
    }
}
