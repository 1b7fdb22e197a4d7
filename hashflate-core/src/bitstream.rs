//! MSB-first bit I/O for variable-length codes.
//!
//! Huffman codes are written most-significant bit first: the first bit of the
//! stream is bit 7 of byte 0. The final byte is right-padded with zero bits
//! and the number of pad bits is reported separately, so a reader can stop
//! exactly at the last real bit.
//!
//! # Example
//!
//! ```
//! use hashflate_core::bitstream::{MsbBitReader, MsbBitWriter};
//!
//! let mut writer = MsbBitWriter::new();
//! writer.write_bits(0b101, 3);
//! writer.write_bits(0b1100, 4);
//! let (pad, bytes) = writer.finish();
//! assert_eq!(pad, 1);
//! assert_eq!(bytes, vec![0b1011_1000]);
//!
//! let mut reader = MsbBitReader::new(&bytes, pad).unwrap();
//! assert_eq!(reader.remaining(), 7);
//! assert_eq!(reader.read_bit(), Some(true));
//! ```

use crate::error::{HashflateError, Result};

/// MSB-first bit writer collecting into an owned buffer.
#[derive(Debug, Default)]
pub struct MsbBitWriter {
    /// Completed bytes.
    output: Vec<u8>,
    /// Pending bits, right-aligned.
    buffer: u64,
    /// Number of pending bits (always < 8 between calls).
    bits_in_buffer: u8,
    /// Total bits written.
    total_bits: u64,
}

impl MsbBitWriter {
    /// Create a new writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with room for `bytes` output bytes.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            output: Vec::with_capacity(bytes),
            ..Self::default()
        }
    }

    /// Write the low `count` bits of `value`, most significant first (0-32).
    #[inline]
    pub fn write_bits(&mut self, value: u32, count: u8) {
        debug_assert!(count <= 32, "Cannot write more than 32 bits at once");

        if count == 0 {
            return;
        }

        let mask = (1u64 << count) - 1;
        self.buffer = (self.buffer << count) | (u64::from(value) & mask);
        self.bits_in_buffer += count;
        self.total_bits += u64::from(count);

        while self.bits_in_buffer >= 8 {
            let byte = (self.buffer >> (self.bits_in_buffer - 8)) as u8;
            self.output.push(byte);
            self.bits_in_buffer -= 8;
        }
        self.buffer &= (1u64 << self.bits_in_buffer) - 1;
    }

    /// Write a code of up to 64 bits, most significant first.
    pub fn write_code(&mut self, code: u64, len: u8) {
        debug_assert!(len <= 64, "Codes are limited to 64 bits");

        if len > 32 {
            self.write_bits((code >> 32) as u32, len - 32);
            self.write_bits(code as u32, 32);
        } else {
            self.write_bits(code as u32, len);
        }
    }

    /// Total number of bits written so far.
    pub fn bits_written(&self) -> u64 {
        self.total_bits
    }

    /// Zero-pad the final byte and return `(pad_count, bytes)`.
    ///
    /// `pad_count` is 0 when the bit length is already a multiple of 8.
    pub fn finish(mut self) -> (u8, Vec<u8>) {
        let mut pad = 0;
        if self.bits_in_buffer > 0 {
            pad = 8 - self.bits_in_buffer;
            let byte = (self.buffer << pad) as u8;
            self.output.push(byte);
        }
        (pad, self.output)
    }
}

/// MSB-first bit reader over a padded byte slice.
///
/// Only the first `8 * data.len() - pad_count` bits are readable; pad bits
/// are never interpreted.
#[derive(Debug)]
pub struct MsbBitReader<'a> {
    /// Input data.
    data: &'a [u8],
    /// Number of meaningful bits.
    limit: u64,
    /// Next bit to read.
    position: u64,
}

impl<'a> MsbBitReader<'a> {
    /// Create a reader over `data` whose last byte carries `pad_count` pad bits.
    pub fn new(data: &'a [u8], pad_count: u8) -> Result<Self> {
        if pad_count > 7 {
            return Err(HashflateError::malformed(
                0,
                format!("pad count {pad_count} exceeds 7"),
            ));
        }
        if data.is_empty() && pad_count != 0 {
            return Err(HashflateError::malformed(
                0,
                format!("pad count {pad_count} with no packed bytes"),
            ));
        }

        Ok(Self {
            data,
            limit: data.len() as u64 * 8 - u64::from(pad_count),
            position: 0,
        })
    }

    /// Read one bit, or `None` once every meaningful bit has been consumed.
    #[inline]
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.position >= self.limit {
            return None;
        }
        let byte = self.data[(self.position / 8) as usize];
        let shift = 7 - (self.position % 8) as u8;
        self.position += 1;
        Some((byte >> shift) & 1 == 1)
    }

    /// Read `count` bits (0-32) as an integer, first bit most significant.
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        debug_assert!(count <= 32, "Cannot read more than 32 bits at once");

        let mut value = 0u32;
        for _ in 0..count {
            let bit = self.read_bit().ok_or_else(|| {
                HashflateError::malformed(self.position / 8, "bit stream exhausted")
            })?;
            value = (value << 1) | u32::from(bit);
        }
        Ok(value)
    }

    /// Bits consumed so far.
    pub fn bits_read(&self) -> u64 {
        self.position
    }

    /// Meaningful bits not yet consumed.
    pub fn remaining(&self) -> u64 {
        self.limit - self.position
    }
}
