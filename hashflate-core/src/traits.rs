//! Core traits shared by every hashflate codec.
//!
//! All codecs work on fully materialized buffers: the whole input is in
//! memory before encoding starts, and the whole artifact before decoding.

use crate::error::Result;

/// A whole-buffer compression codec.
///
/// Implemented by the LZ77 stage, the Huffman stage and the two-stage
/// pipeline, so callers (and the timing harness) can treat them uniformly.
pub trait Codec {
    /// Short human-readable codec name, used in reports.
    fn name(&self) -> &'static str;

    /// Compress `input` into a self-describing artifact.
    ///
    /// Fails with [`HashflateError::EmptyInput`](crate::HashflateError::EmptyInput)
    /// when `input` is empty; no partial artifact is produced.
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>>;

    /// Reconstruct the original bytes from an artifact produced by
    /// [`Codec::compress`].
    fn decompress(&self, artifact: &[u8]) -> Result<Vec<u8>>;
}

impl<C: Codec + ?Sized> Codec for &C {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        (**self).compress(input)
    }

    fn decompress(&self, artifact: &[u8]) -> Result<Vec<u8>> {
        (**self).decompress(artifact)
    }
}

impl<C: Codec + ?Sized> Codec for Box<C> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        (**self).compress(input)
    }

    fn decompress(&self, artifact: &[u8]) -> Result<Vec<u8>> {
        (**self).decompress(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HashflateError;

    /// Identity codec used to exercise the blanket impls.
    struct Store;

    impl Codec for Store {
        fn name(&self) -> &'static str {
            "store"
        }

        fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
            if input.is_empty() {
                return Err(HashflateError::EmptyInput);
            }
            Ok(input.to_vec())
        }

        fn decompress(&self, artifact: &[u8]) -> Result<Vec<u8>> {
            Ok(artifact.to_vec())
        }
    }

    fn roundtrip<C: Codec>(codec: C, data: &[u8]) -> Vec<u8> {
        let packed = codec.compress(data).unwrap();
        codec.decompress(&packed).unwrap()
    }

    #[test]
    fn test_blanket_impls() {
        assert_eq!(roundtrip(&Store, b"abc"), b"abc");

        let boxed: Box<dyn Codec> = Box::new(Store);
        assert_eq!(boxed.name(), "store");
        assert_eq!(roundtrip(boxed, b"xyz"), b"xyz");
    }

    #[test]
    fn test_empty_input_contract() {
        assert!(matches!(Store.compress(b""), Err(HashflateError::EmptyInput)));
    }
}
