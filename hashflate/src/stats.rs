//! Timing and size statistics for a compress/decompress round trip.

use hashflate_core::error::{HashflateError, Result};
use hashflate_core::traits::Codec;
use std::time::{Duration, Instant};
use tracing::debug;

/// Result of [`measure`].
#[derive(Debug, Clone, PartialEq)]
pub struct CodecStats {
    /// Codec name.
    pub method: &'static str,
    /// Input size in bytes.
    pub original_len: usize,
    /// Artifact size in bytes.
    pub compressed_len: usize,
    /// Time spent compressing.
    pub compress_time: Duration,
    /// Time spent decompressing.
    pub decompress_time: Duration,
}

impl CodecStats {
    /// `original / compressed`; values above 1.0 mean the artifact is smaller.
    pub fn ratio(&self) -> f64 {
        if self.compressed_len == 0 {
            return 0.0;
        }
        self.original_len as f64 / self.compressed_len as f64
    }

    /// Fraction of the input saved, `1 - compressed / original`.
    /// Negative when the artifact is larger than the input.
    pub fn space_savings(&self) -> f64 {
        if self.original_len == 0 {
            return 0.0;
        }
        1.0 - self.compressed_len as f64 / self.original_len as f64
    }
}

/// Compress and decompress `data` with `codec`, timing both directions.
///
/// Fails with `MalformedStream` if the round trip does not reproduce `data`.
pub fn measure<C: Codec + ?Sized>(codec: &C, data: &[u8]) -> Result<CodecStats> {
    let start = Instant::now();
    let artifact = codec.compress(data)?;
    let compress_time = start.elapsed();

    let start = Instant::now();
    let restored = codec.decompress(&artifact)?;
    let decompress_time = start.elapsed();

    if restored != data {
        let mismatch = restored
            .iter()
            .zip(data)
            .position(|(a, b)| a != b)
            .unwrap_or(restored.len().min(data.len()));
        return Err(HashflateError::malformed(
            mismatch as u64,
            format!("{} round trip differs from input", codec.name()),
        ));
    }

    let stats = CodecStats {
        method: codec.name(),
        original_len: data.len(),
        compressed_len: artifact.len(),
        compress_time,
        decompress_time,
    };
    debug!(
        method = stats.method,
        ratio = stats.ratio(),
        compress_us = compress_time.as_micros() as u64,
        decompress_us = decompress_time.as_micros() as u64,
        "round trip measured"
    );
    Ok(stats)
}
