//! Hash-chain LZ77 match finder.
//!
//! # Algorithm
//!
//! The matcher walks the input once, greedily. At each position it keys the
//! next [`ANCHOR_LEN`] bytes into a [`HashChain`] to find earlier positions
//! that start with the same bytes, extends each candidate byte-by-byte, and
//! emits either:
//! - a literal `(0, 0, byte)` when no candidate matches, or
//! - a back-reference `(distance, length, next byte)` for the longest match.
//!
//! Candidates older than the sliding window are dropped from the chain for
//! good. Among equally long matches the nearest one wins.

use crate::config::Lz77Config;
use crate::token::Token;
use hashflate_core::error::Result;
use std::collections::{HashMap, VecDeque};
use tracing::trace;

/// Number of bytes keyed into the hash chain.
pub const ANCHOR_LEN: usize = 3;

/// Anchor → ascending list of positions where that anchor starts.
///
/// Each list holds positions inside the window of the newest position
/// inserted under its key. Lookups prune again against the position being
/// searched, which may lie further ahead.
#[derive(Debug)]
pub struct HashChain {
    /// Anchor key → positions, oldest first.
    chains: HashMap<u32, VecDeque<usize>>,
    /// Sliding window size.
    window: usize,
}

impl HashChain {
    /// Create an empty chain for a window of `window` bytes.
    pub fn new(window: usize) -> Self {
        Self {
            chains: HashMap::new(),
            window,
        }
    }

    /// Anchor key for the bytes starting at `pos`, if enough bytes remain.
    ///
    /// Three bytes pack losslessly into a `u32`, so distinct anchors never
    /// share a chain.
    #[inline]
    pub fn anchor(data: &[u8], pos: usize) -> Option<u32> {
        let bytes = data.get(pos..pos + ANCHOR_LEN)?;
        Some(u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]))
    }

    /// Record that the anchor at `pos` occurred. Positions must be inserted
    /// in ascending order.
    ///
    /// Positions of the same anchor that fell out of the window of `pos` are
    /// dropped.
    pub fn insert(&mut self, data: &[u8], pos: usize) {
        if let Some(key) = Self::anchor(data, pos) {
            let window = self.window;
            let positions = self.chains.entry(key).or_default();
            debug_assert!(positions.back().is_none_or(|&last| last < pos));
            while positions.front().is_some_and(|&old| old + window < pos) {
                positions.pop_front();
            }
            positions.push_back(pos);
        }
    }

    /// Candidates for `key` that are still inside the window of `current`.
    ///
    /// Positions with `pos < current - window` are removed permanently.
    pub fn candidates(&mut self, key: u32, current: usize) -> Option<&VecDeque<usize>> {
        let window = self.window;
        let positions = self.chains.get_mut(&key)?;

        while positions.front().is_some_and(|&pos| pos + window < current) {
            positions.pop_front();
        }

        if positions.is_empty() {
            self.chains.remove(&key);
            return None;
        }
        self.chains.get(&key)
    }

    /// Total positions currently retained.
    pub fn len(&self) -> usize {
        self.chains.values().map(VecDeque::len).sum()
    }

    /// Whether no position is retained.
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Drop every retained position.
    pub fn clear(&mut self) {
        self.chains.clear();
    }
}

/// Greedy LZ77 encoder for a single block.
///
/// Each instance owns its hash chain; one matcher never sees another
/// block's data.
#[derive(Debug)]
pub struct HashChainMatcher {
    config: Lz77Config,
    chain: HashChain,
}

impl HashChainMatcher {
    /// Create a matcher, validating the configuration.
    ///
    /// Validation bounds the window by the offset field and the lookahead by
    /// the length field, so every emitted token fits its tuple.
    pub fn new(config: Lz77Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            chain: HashChain::new(config.search_buffer_size),
        })
    }

    /// The configuration this matcher runs with.
    pub fn config(&self) -> &Lz77Config {
        &self.config
    }

    /// Find the longest match for `data[pos..]`, returning `(distance, length)`.
    fn find_match(&mut self, data: &[u8], pos: usize) -> Option<(usize, usize)> {
        let key = HashChain::anchor(data, pos)?;
        let max_len = self.config.lookahead_buffer_size.min(data.len() - pos);
        let max_chain = self.config.max_chain;
        let lookahead = &data[pos..pos + max_len];

        let candidates = self.chain.candidates(key, pos)?;

        let mut best_len = 0;
        let mut best_dist = 0;

        // Newest first: a later candidate must be strictly longer to win,
        // so ties go to the nearest match.
        for &candidate in candidates.iter().rev().take(max_chain) {
            let len = data[candidate..]
                .iter()
                .zip(lookahead)
                .take_while(|(a, b)| a == b)
                .count();

            if len > best_len {
                best_len = len;
                best_dist = pos - candidate;

                if len == max_len {
                    break;
                }
            }
        }

        (best_len > 0).then_some((best_dist, best_len))
    }

    /// Compress one block into tokens.
    pub fn compress(&mut self, data: &[u8]) -> Vec<Token> {
        self.chain.clear();

        let mut tokens = Vec::with_capacity(data.len() / 2 + 1);
        let mut pos = 0;

        while pos < data.len() {
            let Some((distance, mut length)) = self.find_match(data, pos) else {
                tokens.push(Token::literal(data[pos]));
                self.chain.insert(data, pos);
                pos += 1;
                continue;
            };

            // A final (d, L, Some(0)) reads back as (d, L, None); give the
            // zero its own literal token instead.
            if pos + length + 1 == data.len() && data[pos + length] == 0 {
                length -= 1;
            }

            let literal = data.get(pos + length).copied();
            let token = if length == 0 {
                Token::literal(data[pos])
            } else {
                Token::back_reference(distance as u16, length as u8, literal)
            };

            let consumed = token.decoded_len();
            for p in pos..pos + consumed {
                self.chain.insert(data, p);
            }

            tokens.push(token);
            pos += consumed;
        }

        trace!(
            input = data.len(),
            tokens = tokens.len(),
            chain = self.chain.len(),
            "block matched"
        );
        tokens
    }

    /// Compress one block with a fresh matcher (convenience method).
    pub fn compress_all(data: &[u8], config: Lz77Config) -> Result<Vec<Token>> {
        Ok(Self::new(config)?.compress(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_tokens;
    use hashflate_core::error::HashflateError;

    fn config(window: usize, lookahead: usize) -> Lz77Config {
        Lz77Config::new(window, lookahead)
    }

    #[test]
    fn test_repeated_byte_scenario() {
        let tokens = HashChainMatcher::compress_all(b"aaaa", config(8, 4)).unwrap();
        assert_eq!(
            tokens,
            vec![Token::literal(b'a'), Token::back_reference(1, 3, None)]
        );
    }

    #[test]
    fn test_literals_only() {
        let tokens = HashChainMatcher::compress_all(b"abcdefgh", config(16, 8)).unwrap();
        assert_eq!(tokens.len(), 8);
        assert!(tokens.iter().all(Token::is_literal));
    }

    #[test]
    fn test_simple_match() {
        let tokens = HashChainMatcher::compress_all(b"abcabcabcX", config(16, 16)).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::literal(b'a'),
                Token::literal(b'b'),
                Token::literal(b'c'),
                Token::back_reference(3, 6, Some(b'X')),
            ]
        );
    }

    #[test]
    fn test_lookahead_caps_match() {
        let data = vec![b'z'; 20];
        let tokens = HashChainMatcher::compress_all(&data, config(32, 4)).unwrap();
        assert!(tokens.iter().all(|t| t.length <= 4));
        assert_eq!(decode_tokens(&tokens).unwrap(), data);
    }

    #[test]
    fn test_nearest_match_wins_ties() {
        // "abc" occurs at 0 and 4; at position 8 both give a 3-byte match.
        let data = b"abcXabcYabcZ";
        let tokens = HashChainMatcher::compress_all(data, config(64, 16)).unwrap();
        let last = tokens.last().unwrap();
        assert_eq!(*last, Token::back_reference(4, 3, Some(b'Z')));
        assert_eq!(decode_tokens(&tokens).unwrap(), data);
    }

    #[test]
    fn test_window_is_respected() {
        let mut data = b"needle".to_vec();
        data.extend(std::iter::repeat_n(b'.', 40).enumerate().map(|(i, b)| b + (i % 7) as u8));
        data.extend_from_slice(b"needle");

        let window = 16;
        let tokens = HashChainMatcher::compress_all(&data, config(window, 32)).unwrap();
        assert!(tokens.iter().all(|t| usize::from(t.offset) <= window));
        assert_eq!(decode_tokens(&tokens).unwrap(), data);
    }

    #[test]
    fn test_trailing_zero_gets_own_literal() {
        let data = b"abcdabcd\0";
        let tokens = HashChainMatcher::compress_all(data, config(32, 32)).unwrap();
        assert_eq!(tokens.last(), Some(&Token::literal(0)));
        assert_eq!(decode_tokens(&tokens).unwrap(), data);
    }

    #[test]
    fn test_max_chain_still_roundtrips() {
        let data: Vec<u8> = b"the cat sat on the mat with the hat "
            .iter()
            .copied()
            .cycle()
            .take(2000)
            .collect();
        let tokens =
            HashChainMatcher::compress_all(&data, config(512, 64).with_max_chain(2)).unwrap();
        assert!(tokens.len() < data.len() / 4);
        assert_eq!(decode_tokens(&tokens).unwrap(), data);
    }

    #[test]
    fn test_chain_prunes_outside_window() {
        let data = b"abcabcabc";
        let mut chain = HashChain::new(4);
        chain.insert(data, 0);
        chain.insert(data, 3);
        assert_eq!(chain.len(), 2);

        let key = HashChain::anchor(data, 0).unwrap();
        let positions: Vec<usize> = chain.candidates(key, 5).unwrap().iter().copied().collect();
        assert_eq!(positions, vec![3]);
        assert_eq!(chain.len(), 1);

        assert!(chain.candidates(key, 9).is_none());
        assert!(chain.is_empty());
    }

    #[test]
    fn test_insert_drops_positions_outside_window() {
        let data = b"abcabcabc";
        let mut chain = HashChain::new(2);
        for pos in [0, 3, 6] {
            chain.insert(data, pos);
        }
        assert_eq!(chain.len(), 1);

        let key = HashChain::anchor(data, 0).unwrap();
        let positions: Vec<usize> = chain.candidates(key, 6).unwrap().iter().copied().collect();
        assert_eq!(positions, vec![6]);
    }

    #[test]
    fn test_config_outside_field_limits_rejected() {
        let data = [b'a'; 257];
        let too_long = HashChainMatcher::compress_all(&data, config(1024, 256));
        assert!(matches!(too_long, Err(HashflateError::InvalidConfig { .. })));

        let too_wide = HashChainMatcher::compress_all(&data, config(65_536, 16));
        assert!(matches!(too_wide, Err(HashflateError::InvalidConfig { .. })));
    }

    #[test]
    fn test_longest_lookahead_at_end_of_input() {
        let data = [b'a'; 257];
        let tokens = HashChainMatcher::compress_all(&data, config(1024, 255)).unwrap();
        assert!(tokens.iter().all(|t| t.decoded_len() > 0));
        assert_eq!(decode_tokens(&tokens).unwrap(), data);
    }

    #[test]
    fn test_anchor_needs_three_bytes() {
        assert!(HashChain::anchor(b"ab", 0).is_none());
        assert_eq!(HashChain::anchor(b"abc", 0), HashChain::anchor(b"xabc", 1));
        assert_ne!(HashChain::anchor(b"abc", 0), HashChain::anchor(b"abd", 0));
    }
}
