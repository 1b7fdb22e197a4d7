//! Block splitting and parallel dispatch.
//!
//! The input is cut into `N` contiguous blocks of nearly equal size and each
//! block is matched by its own [`HashChainMatcher`]. Matches never cross a
//! block boundary, which costs some ratio but lets blocks run in parallel
//! with no shared mutable state.
//!
//! # Framing
//!
//! ```text
//! +----------------------+
//! | block count (u32 BE) |
//! +----------------------+-------------------------+
//! | separator (16 bytes) | tuples of block 0 ...   |
//! +----------------------+-------------------------+
//! | separator (16 bytes) | tuples of block 1 ...   |
//! +----------------------+-------------------------+
//! ```
//!
//! The separator's first 4 bytes read as a record with `offset = 0` and
//! `length != 0`, which no valid token produces, so block boundaries are
//! found at record alignment without ambiguity.

use crate::config::Lz77Config;
use crate::decode::decode_tokens;
use crate::matcher::HashChainMatcher;
use crate::token::{TUPLE_SIZE, Token, TupleCodec};
use hashflate_core::error::{HashflateError, Result};
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Size of the big-endian block count header.
pub const BLOCK_COUNT_SIZE: usize = 4;

/// Size of the marker preceding each block.
pub const SEPARATOR_SIZE: usize = 16;

/// Marker preceding each block's tuple stream.
pub const BLOCK_SEPARATOR: [u8; SEPARATOR_SIZE] = [
    0x00, 0x00, 0xFF, 0xFF, //
    0x00, 0x00, 0xFF, 0xFF, //
    0x00, 0x00, 0xFF, 0xFF, //
    0x00, 0x00, 0xFF, 0xFF,
];

/// Splits input into blocks, matches them in parallel and frames the result.
#[derive(Debug, Clone, Copy)]
pub struct BlockCoordinator {
    config: Lz77Config,
}

impl BlockCoordinator {
    /// Create a coordinator, validating the configuration.
    pub fn new(config: Lz77Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration blocks are matched with.
    pub fn config(&self) -> &Lz77Config {
        &self.config
    }

    /// Cut `data` into `block_count` contiguous slices.
    ///
    /// Block `i` covers `data[i * len / n .. (i + 1) * len / n]`; when there
    /// are more blocks than bytes some blocks are empty.
    pub fn split<'a>(&self, data: &'a [u8]) -> Vec<&'a [u8]> {
        let n = self.config.block_count;
        let len = data.len();
        (0..n)
            .map(|i| &data[i * len / n..(i + 1) * len / n])
            .collect()
    }

    /// Match every block, returning tokens in block order.
    pub fn tokenize(&self, data: &[u8]) -> Result<Vec<Vec<Token>>> {
        if data.is_empty() {
            return Err(HashflateError::EmptyInput);
        }

        let blocks = self.split(data);
        let config = self.config;
        run_indexed(blocks.len(), |i| HashChainMatcher::compress_all(blocks[i], config))
    }

    /// Compress `data` into the framed tuple stream.
    pub fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        if data.is_empty() {
            return Err(HashflateError::EmptyInput);
        }

        let blocks = self.split(data);
        let config = self.config;
        let packed = run_indexed(blocks.len(), |i| {
            let tokens = HashChainMatcher::compress_all(blocks[i], config)?;
            Ok(TupleCodec::pack_all(&tokens))
        })?;

        let body: usize = packed.iter().map(|p| SEPARATOR_SIZE + p.len()).sum();
        let mut output = Vec::with_capacity(BLOCK_COUNT_SIZE + body);
        output.extend_from_slice(&(packed.len() as u32).to_be_bytes());
        for block in &packed {
            output.extend_from_slice(&BLOCK_SEPARATOR);
            output.extend_from_slice(block);
        }

        debug!(
            input = data.len(),
            blocks = packed.len(),
            output = output.len(),
            "lz77 stage compressed"
        );
        Ok(output)
    }

    /// Split a framed tuple stream back into per-block token lists.
    pub fn parse(bytes: &[u8]) -> Result<Vec<Vec<Token>>> {
        if bytes.len() < BLOCK_COUNT_SIZE {
            return Err(HashflateError::short_read(BLOCK_COUNT_SIZE, bytes.len()));
        }

        let count = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
        let body = &bytes[BLOCK_COUNT_SIZE..];
        let base = BLOCK_COUNT_SIZE as u64;

        let mut blocks = Vec::with_capacity(count.min(body.len() / SEPARATOR_SIZE));
        let mut pos = 0;

        while pos < body.len() {
            if body[pos..].get(..SEPARATOR_SIZE) != Some(&BLOCK_SEPARATOR[..]) {
                return Err(HashflateError::malformed(
                    base + pos as u64,
                    "expected block separator",
                ));
            }
            pos += SEPARATOR_SIZE;

            let start = pos;
            while body.len() - pos >= TUPLE_SIZE && !is_separator_start(&body[pos..]) {
                pos += TUPLE_SIZE;
            }
            if body.len() - pos < TUPLE_SIZE {
                pos = body.len();
            }

            blocks.push(TupleCodec::unpack_at(
                &body[start..pos],
                base + start as u64,
            )?);
        }

        if blocks.len() != count {
            return Err(HashflateError::malformed(
                0,
                format!("header declares {count} blocks, found {}", blocks.len()),
            ));
        }
        Ok(blocks)
    }

    /// Decode per-block token lists and concatenate them in order.
    pub fn decode_blocks(blocks: &[Vec<Token>]) -> Result<Vec<u8>> {
        let decoded = run_indexed(blocks.len(), |i| decode_tokens(&blocks[i]))?;
        Ok(decoded.concat())
    }

    /// Decompress a framed tuple stream.
    pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
        let blocks = Self::parse(bytes)?;
        let output = Self::decode_blocks(&blocks)?;
        debug!(
            input = bytes.len(),
            blocks = blocks.len(),
            output = output.len(),
            "lz77 stage decompressed"
        );
        Ok(output)
    }
}

impl Default for BlockCoordinator {
    fn default() -> Self {
        Self {
            config: Lz77Config::DEFAULT,
        }
    }
}

/// Whether `record` starts a separator rather than a token.
fn is_separator_start(record: &[u8]) -> bool {
    record[0] == 0 && record[1] == 0 && record[2] != 0
}

/// Run `task` for every index on a pool bounded by `count`, returning the
/// results sorted by index.
#[cfg(feature = "parallel")]
fn run_indexed<T, F>(count: usize, task: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> Result<T> + Sync + Send,
{
    let cores = std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get);
    let threads = count.clamp(1, cores);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| HashflateError::worker_pool(e.to_string()))?;

    let mut results: Vec<(usize, T)> = pool.install(|| {
        (0..count)
            .into_par_iter()
            .map(|i| task(i).map(|out| (i, out)))
            .collect::<Result<Vec<_>>>()
    })?;

    results.sort_by_key(|(i, _)| *i);
    Ok(results.into_iter().map(|(_, out)| out).collect())
}

/// Run `task` for every index in order.
#[cfg(not(feature = "parallel"))]
fn run_indexed<T, F>(count: usize, task: F) -> Result<Vec<T>>
where
    F: Fn(usize) -> Result<T>,
{
    (0..count).map(task).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinator(blocks: usize) -> BlockCoordinator {
        BlockCoordinator::new(Lz77Config::new(64, 32).with_blocks(blocks)).unwrap()
    }

    #[test]
    fn test_split_is_contiguous() {
        let data: Vec<u8> = (0..10).collect();
        let blocks = coordinator(3).split(&data);
        assert_eq!(blocks, vec![&data[0..3], &data[3..6], &data[6..10]]);
    }

    #[test]
    fn test_more_blocks_than_bytes() {
        let data = b"ab";
        let c = coordinator(4);
        assert_eq!(c.split(data).iter().filter(|b| b.is_empty()).count(), 2);

        let framed = c.compress(data).unwrap();
        assert_eq!(BlockCoordinator::decompress(&framed).unwrap(), data);
    }

    #[test]
    fn test_framing_layout() {
        let framed = coordinator(1).compress(b"aaaa").unwrap();
        let mut expected = vec![0, 0, 0, 1];
        expected.extend_from_slice(&BLOCK_SEPARATOR);
        expected.extend_from_slice(&[0, 0, 0, b'a']);
        expected.extend_from_slice(&[1, 0, 3, 0]);
        assert_eq!(framed, expected);
    }

    #[test]
    fn test_roundtrip_across_block_counts() {
        let data = b"It was the best of times, it was the worst of times.".repeat(20);
        for blocks in [1, 2, 3, 4, 7] {
            let framed = coordinator(blocks).compress(&data).unwrap();
            assert_eq!(BlockCoordinator::decompress(&framed).unwrap(), data);
        }
    }

    #[test]
    fn test_tokenize_matches_compress() {
        let data = b"abcabcabcabc-xyzxyzxyz".repeat(3);
        let c = coordinator(2);
        let tokens = c.tokenize(&data).unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(BlockCoordinator::parse(&c.compress(&data).unwrap()).unwrap(), tokens);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            coordinator(2).compress(b""),
            Err(HashflateError::EmptyInput)
        ));
    }

    #[test]
    fn test_block_count_mismatch() {
        let mut framed = coordinator(2).compress(b"hello world").unwrap();
        framed[3] = 3;
        assert!(matches!(
            BlockCoordinator::parse(&framed),
            Err(HashflateError::MalformedStream { .. })
        ));
    }

    #[test]
    fn test_missing_separator() {
        let framed = [0, 0, 0, 1, 0, 0, 0, b'a'];
        assert!(matches!(
            BlockCoordinator::parse(&framed),
            Err(HashflateError::MalformedStream { .. })
        ));
    }

    #[test]
    fn test_truncated_tuple() {
        let mut framed = coordinator(1).compress(b"abcdef").unwrap();
        framed.pop();
        assert!(matches!(
            BlockCoordinator::parse(&framed),
            Err(HashflateError::ShortRead { .. })
        ));
    }

    #[test]
    fn test_truncated_header() {
        assert!(matches!(
            BlockCoordinator::parse(&[0, 0]),
            Err(HashflateError::ShortRead { needed: 4, available: 2 })
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(BlockCoordinator::new(Lz77Config::new(0, 4)).is_err());
    }
}
