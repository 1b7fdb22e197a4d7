//! Self-describing frequency table encoding.
//!
//! ```text
//! +--------+-----------------+
//! | symbol | freq (u32 LE)   |   repeated per pair
//! +--------+-----------------+
//! | 00 00 00 00              |   sentinel
//! +--------------------------+
//! ```
//!
//! The decoder rebuilds the exact tree from these pairs, so the encoder must
//! build its own tree from the same table.

use crate::tree::{FrequencySymbol, FrequencyTable};
use hashflate_core::error::{HashflateError, Result};

/// Bytes per serialized pair.
pub const RECORD_SIZE: usize = 5;

/// Terminator after the last pair.
pub const SENTINEL: [u8; 4] = [0; 4];

/// Writes and reads frequency tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeSerializer;

impl TreeSerializer {
    /// Serialized size of `table` including the sentinel.
    pub fn serialized_len(table: &FrequencyTable) -> usize {
        table.len() * RECORD_SIZE + SENTINEL.len()
    }

    /// Append `table` to `out`.
    pub fn serialize_into(table: &FrequencyTable, out: &mut Vec<u8>) {
        out.reserve(Self::serialized_len(table));
        for pair in table.pairs() {
            out.push(pair.symbol);
            out.extend_from_slice(&pair.freq.to_le_bytes());
        }
        out.extend_from_slice(&SENTINEL);
    }

    /// Serialize `table`.
    pub fn serialize(table: &FrequencyTable) -> Vec<u8> {
        let mut out = Vec::new();
        Self::serialize_into(table, &mut out);
        out
    }

    /// Read a table from the front of `bytes`.
    ///
    /// Returns the table and the number of bytes consumed, sentinel included.
    pub fn deserialize(bytes: &[u8]) -> Result<(FrequencyTable, usize)> {
        let mut pairs = Vec::new();
        let mut pos = 0;

        loop {
            let rest = &bytes[pos..];
            if rest.len() < SENTINEL.len() {
                return Err(HashflateError::malformed(
                    pos as u64,
                    "frequency table ends before its sentinel",
                ));
            }
            if rest[..SENTINEL.len()] == SENTINEL {
                pos += SENTINEL.len();
                break;
            }
            if rest.len() < RECORD_SIZE {
                return Err(HashflateError::short_read(RECORD_SIZE, rest.len()));
            }

            let freq = u32::from_le_bytes([rest[1], rest[2], rest[3], rest[4]]);
            pairs.push(FrequencySymbol::new(rest[0], freq));
            pos += RECORD_SIZE;
        }

        let table = FrequencyTable::from_pairs(pairs).map_err(|e| match e {
            HashflateError::EmptyInput => {
                HashflateError::malformed(0, "frequency table has no symbols")
            }
            HashflateError::InvalidFrequencyTable { message } => {
                HashflateError::malformed(0, message)
            }
            other => other,
        })?;
        Ok((table, pos))
    }
}
