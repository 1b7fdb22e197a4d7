//! Match finder and block-splitting configuration.

use hashflate_core::error::{HashflateError, Result};

/// Largest window the 2-byte offset field can address.
pub const MAX_SEARCH_BUFFER: usize = u16::MAX as usize;

/// Largest match the 1-byte length field can carry.
pub const MAX_LOOKAHEAD: usize = u8::MAX as usize;

/// Sentinel for "examine every candidate in the window".
pub const UNBOUNDED_CHAIN: usize = usize::MAX;

/// LZ77 configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lz77Config {
    /// Sliding window size: how far back a match may start (1-65535).
    pub search_buffer_size: usize,
    /// Longest match emitted in one token (1-255).
    pub lookahead_buffer_size: usize,
    /// Number of independently compressed blocks (at least 1).
    pub block_count: usize,
    /// Upper bound on candidates examined per position.
    pub max_chain: usize,
}

impl Lz77Config {
    /// Balanced defaults: 4KB window, full-length matches, 4 blocks.
    pub const DEFAULT: Self = Self {
        search_buffer_size: 4096,
        lookahead_buffer_size: MAX_LOOKAHEAD,
        block_count: 4,
        max_chain: UNBOUNDED_CHAIN,
    };

    /// Small window and shallow chains.
    pub const FAST: Self = Self {
        search_buffer_size: 1024,
        lookahead_buffer_size: MAX_LOOKAHEAD,
        block_count: 4,
        max_chain: 32,
    };

    /// Largest addressable window, every candidate examined.
    pub const BEST: Self = Self {
        search_buffer_size: MAX_SEARCH_BUFFER,
        lookahead_buffer_size: MAX_LOOKAHEAD,
        block_count: 4,
        max_chain: UNBOUNDED_CHAIN,
    };

    /// Create a configuration with the given window and lookahead sizes,
    /// a single block and an unbounded chain.
    pub fn new(search_buffer_size: usize, lookahead_buffer_size: usize) -> Self {
        Self {
            search_buffer_size,
            lookahead_buffer_size,
            block_count: 1,
            max_chain: UNBOUNDED_CHAIN,
        }
    }

    /// Set the number of blocks.
    pub fn with_blocks(mut self, block_count: usize) -> Self {
        self.block_count = block_count;
        self
    }

    /// Bound the number of candidates examined per position.
    pub fn with_max_chain(mut self, max_chain: usize) -> Self {
        self.max_chain = max_chain;
        self
    }

    /// Check every field against the wire format limits.
    pub fn validate(&self) -> Result<()> {
        if self.search_buffer_size == 0 || self.search_buffer_size > MAX_SEARCH_BUFFER {
            return Err(HashflateError::invalid_config(format!(
                "search buffer size {} outside 1..={}",
                self.search_buffer_size, MAX_SEARCH_BUFFER
            )));
        }
        if self.lookahead_buffer_size == 0 || self.lookahead_buffer_size > MAX_LOOKAHEAD {
            return Err(HashflateError::invalid_config(format!(
                "lookahead buffer size {} outside 1..={}",
                self.lookahead_buffer_size, MAX_LOOKAHEAD
            )));
        }
        if self.block_count == 0 || u32::try_from(self.block_count).is_err() {
            return Err(HashflateError::invalid_config(format!(
                "block count {} outside 1..={}",
                self.block_count,
                u32::MAX
            )));
        }
        if self.max_chain == 0 {
            return Err(HashflateError::invalid_config("max chain must be at least 1"));
        }
        Ok(())
    }
}

impl Default for Lz77Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}
