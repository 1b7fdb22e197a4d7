//! Packing symbols into an MSB-first bitstream and walking it back.

use crate::tree::{EncodingTable, HuffmanNode, HuffmanTree};
use hashflate_core::bitstream::{MsbBitReader, MsbBitWriter};
use hashflate_core::error::{HashflateError, Result};

/// Converts between symbols and packed code bits.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitPacker;

impl BitPacker {
    /// Concatenate the code of every symbol, MSB-first.
    ///
    /// Returns `(pad_count, bytes)`; `pad_count` zero bits fill the last
    /// byte and is 0 when the codes end on a byte boundary.
    pub fn pack(symbols: &[u8], table: &EncodingTable) -> Result<(u8, Vec<u8>)> {
        let mut writer = MsbBitWriter::with_capacity(symbols.len() / 2 + 1);
        for &symbol in symbols {
            let code = table.get(symbol).ok_or_else(|| {
                HashflateError::invalid_table(format!("symbol {symbol} has no code"))
            })?;
            writer.write_code(code.bits, code.len);
        }
        Ok(writer.finish())
    }

    /// Decode exactly `8 * bytes.len() - pad_count` bits by walking `tree`.
    pub fn unpack(pad_count: u8, bytes: &[u8], tree: &HuffmanTree) -> Result<Vec<u8>> {
        let mut reader = MsbBitReader::new(bytes, pad_count)?;
        let root = tree.root();
        let mut output = Vec::with_capacity(bytes.len() * 2);

        let mut node = root;
        let mut depth = 0u32;

        while let Some(bit) = reader.read_bit() {
            let next = match node {
                HuffmanNode::Internal { left, right, .. } => {
                    if bit {
                        right.as_ref()
                    } else {
                        left.as_ref()
                    }
                }
                // Lone-leaf tree: its only code is a single 0 bit.
                HuffmanNode::Leaf { .. } if bit => {
                    return Err(HashflateError::malformed(
                        (reader.bits_read() - 1) / 8,
                        "bit 1 in a single-symbol stream",
                    ));
                }
                HuffmanNode::Leaf { .. } => node,
            };

            if let HuffmanNode::Leaf { symbol, .. } = next {
                output.push(*symbol);
                node = root;
                depth = 0;
            } else {
                node = next;
                depth += 1;
            }
        }

        if depth != 0 {
            return Err(HashflateError::malformed(
                bytes.len() as u64,
                format!("bitstream ends {depth} bits into a code"),
            ));
        }
        Ok(output)
    }
}
