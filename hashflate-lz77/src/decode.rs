//! LZ77 token decoding.

use crate::token::Token;
use hashflate_core::error::{HashflateError, Result};

/// Rebuilds one block from its tokens.
///
/// Back-references may only reach into bytes this decoder has produced;
/// blocks never reference each other.
#[derive(Debug, Default)]
pub struct BlockDecoder {
    /// Decoded bytes of the current block.
    output: Vec<u8>,
}

impl BlockDecoder {
    /// Create an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder expecting roughly `capacity` output bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            output: Vec::with_capacity(capacity),
        }
    }

    /// Decode a literal byte.
    pub fn decode_literal(&mut self, byte: u8) {
        self.output.push(byte);
    }

    /// Copy `length` bytes starting `offset` bytes back. The source may
    /// overlap the bytes being written.
    pub fn decode_match(&mut self, offset: u16, length: u8) -> Result<()> {
        let offset = offset as usize;
        if offset == 0 || offset > self.output.len() {
            return Err(HashflateError::window_violation(offset, self.output.len()));
        }

        let start = self.output.len() - offset;
        for i in 0..length as usize {
            let byte = self.output[start + i];
            self.output.push(byte);
        }
        Ok(())
    }

    /// Decode one token.
    pub fn decode_token(&mut self, token: &Token) -> Result<()> {
        if token.length > 0 {
            self.decode_match(token.offset, token.length)?;
        }
        if let Some(byte) = token.literal {
            self.decode_literal(byte);
        }
        Ok(())
    }

    /// Decoded bytes so far.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Take the decoded output.
    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }
}

/// Decode a whole block's tokens.
pub fn decode_tokens(tokens: &[Token]) -> Result<Vec<u8>> {
    let capacity = tokens.iter().map(Token::decoded_len).sum();
    let mut decoder = BlockDecoder::with_capacity(capacity);
    for token in tokens {
        decoder.decode_token(token)?;
    }
    Ok(decoder.take_output())
}
