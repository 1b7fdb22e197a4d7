//! The two-stage `Huffman(LZ77(data))` pipeline.

use hashflate_core::error::{HashflateError, Result};
use hashflate_core::traits::Codec;
use hashflate_lz77::{BlockCoordinator, Lz77Config};
use tracing::debug;

/// LZ77 followed by Huffman coding of the tuple stream.
///
/// The stage order is fixed: the Huffman stage always wraps the LZ77
/// stage's framed tuples.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeflatePipeline {
    coordinator: BlockCoordinator,
}

impl DeflatePipeline {
    /// Create a pipeline, validating the LZ77 configuration.
    pub fn new(config: Lz77Config) -> Result<Self> {
        Ok(Self {
            coordinator: BlockCoordinator::new(config)?,
        })
    }

    /// The LZ77 configuration in use.
    pub fn config(&self) -> &Lz77Config {
        self.coordinator.config()
    }

    /// Compress `data` into an artifact.
    pub fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        if data.is_empty() {
            return Err(HashflateError::EmptyInput);
        }

        let tuples = self.coordinator.compress(data)?;
        let artifact = hashflate_huffman::encode(&tuples)?;

        debug!(
            input = data.len(),
            tuples = tuples.len(),
            artifact = artifact.len(),
            "pipeline compressed"
        );
        Ok(artifact)
    }

    /// Reconstruct the original bytes from an artifact.
    pub fn decompress(&self, artifact: &[u8]) -> Result<Vec<u8>> {
        let tuples = hashflate_huffman::decode(artifact)?;
        let output = BlockCoordinator::decompress(&tuples)?;

        debug!(
            artifact = artifact.len(),
            tuples = tuples.len(),
            output = output.len(),
            "pipeline decompressed"
        );
        Ok(output)
    }
}

impl Codec for DeflatePipeline {
    fn name(&self) -> &'static str {
        "deflate"
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        DeflatePipeline::compress(self, input)
    }

    fn decompress(&self, artifact: &[u8]) -> Result<Vec<u8>> {
        DeflatePipeline::decompress(self, artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let pipeline = DeflatePipeline::default();
        let data = b"Hello, World! Hello, World! Hello, World!";
        let artifact = pipeline.compress(data).unwrap();
        assert_eq!(pipeline.decompress(&artifact).unwrap(), data);
    }

    #[test]
    fn test_empty_input_writes_nothing() {
        let pipeline = DeflatePipeline::default();
        assert!(matches!(
            pipeline.compress(b""),
            Err(HashflateError::EmptyInput)
        ));
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            DeflatePipeline::new(Lz77Config::new(70_000, 16)),
            Err(HashflateError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_huffman_wraps_lz77() {
        let pipeline = DeflatePipeline::new(Lz77Config::new(64, 32).with_blocks(2)).unwrap();
        let data = b"abcabcabcabc";
        let artifact = pipeline.compress(data).unwrap();
        let tuples = hashflate_huffman::decode(&artifact).unwrap();
        assert_eq!(&tuples[..4], &[0, 0, 0, 2]);
        assert_eq!(hashflate_lz77::decompress(&tuples).unwrap(), data);
    }
}
