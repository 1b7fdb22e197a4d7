//! LZ77 tokens and their fixed-width tuple encoding.
//!
//! # Wire format
//!
//! Every token is a 4-byte record:
//!
//! ```text
//! +--------+--------+--------+---------+
//! | offset (u16 LE) | length | literal |
//! +--------+--------+--------+---------+
//! ```
//!
//! A pure literal is `(0, 0, byte)`. A back-reference has `offset > 0` and
//! `length > 0`; its literal byte is `0` when there is no trailing literal.
//! A missing literal can only happen on the final token of a block, so a
//! back-reference whose literal byte is `0` decodes as "no literal" exactly
//! when it is the block's last record.

use hashflate_core::error::{HashflateError, Result};

/// Size of one packed token record in bytes.
pub const TUPLE_SIZE: usize = 4;

/// A token produced by the hash-chain matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Distance back from the write position (0 for a pure literal).
    pub offset: u16,
    /// Number of bytes to copy (0 for a pure literal).
    pub length: u8,
    /// Byte emitted after the copy, if any.
    pub literal: Option<u8>,
}

impl Token {
    /// A pure literal token.
    pub const fn literal(byte: u8) -> Self {
        Self {
            offset: 0,
            length: 0,
            literal: Some(byte),
        }
    }

    /// A back-reference, optionally followed by one literal byte.
    pub const fn back_reference(offset: u16, length: u8, literal: Option<u8>) -> Self {
        Self {
            offset,
            length,
            literal,
        }
    }

    /// Whether this token copies nothing.
    pub fn is_literal(&self) -> bool {
        self.length == 0
    }

    /// Number of bytes this token expands to.
    pub fn decoded_len(&self) -> usize {
        self.length as usize + usize::from(self.literal.is_some())
    }
}

/// Packs tokens to and from 4-byte records.
#[derive(Debug, Clone, Copy, Default)]
pub struct TupleCodec;

impl TupleCodec {
    /// Pack a single token.
    pub fn pack(token: &Token) -> [u8; TUPLE_SIZE] {
        let [lo, hi] = token.offset.to_le_bytes();
        [lo, hi, token.length, token.literal.unwrap_or(0)]
    }

    /// Append packed records for every token to `out`.
    pub fn pack_into(tokens: &[Token], out: &mut Vec<u8>) {
        out.reserve(tokens.len() * TUPLE_SIZE);
        for token in tokens {
            out.extend_from_slice(&Self::pack(token));
        }
    }

    /// Pack a whole token stream.
    pub fn pack_all(tokens: &[Token]) -> Vec<u8> {
        let mut out = Vec::new();
        Self::pack_into(tokens, &mut out);
        out
    }

    /// Unpack one record.
    ///
    /// `is_last` says whether this is the final record of its block, which
    /// decides how a zero literal byte on a back-reference is read.
    /// `position` is only used for error reporting.
    pub fn unpack(record: [u8; TUPLE_SIZE], is_last: bool, position: u64) -> Result<Token> {
        let offset = u16::from_le_bytes([record[0], record[1]]);
        let length = record[2];
        let byte = record[3];

        match (offset, length) {
            (0, 0) => Ok(Token::literal(byte)),
            (_, 0) => Err(HashflateError::malformed(
                position,
                format!("literal record carries offset {offset}"),
            )),
            (0, _) => Err(HashflateError::malformed(
                position,
                format!("back-reference of length {length} has zero offset"),
            )),
            _ => {
                let literal = if is_last && byte == 0 { None } else { Some(byte) };
                Ok(Token::back_reference(offset, length, literal))
            }
        }
    }

    /// Unpack one block's tuple stream.
    pub fn unpack_all(bytes: &[u8]) -> Result<Vec<Token>> {
        Self::unpack_at(bytes, 0)
    }

    /// Unpack a tuple stream that starts `base` bytes into the artifact.
    pub(crate) fn unpack_at(bytes: &[u8], base: u64) -> Result<Vec<Token>> {
        let remainder = bytes.len() % TUPLE_SIZE;
        if remainder != 0 {
            return Err(HashflateError::short_read(TUPLE_SIZE, remainder));
        }

        let count = bytes.len() / TUPLE_SIZE;
        let mut tokens = Vec::with_capacity(count);
        for (i, chunk) in bytes.chunks_exact(TUPLE_SIZE).enumerate() {
            let record = [chunk[0], chunk[1], chunk[2], chunk[3]];
            let position = base + (i * TUPLE_SIZE) as u64;
            tokens.push(Self::unpack(record, i + 1 == count, position)?);
        }
        Ok(tokens)
    }
}
