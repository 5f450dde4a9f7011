//! Bit-level I/O for packing and unpacking Huffman codes.
//!
//! Both directions operate MSB-first within each byte: the first bit
//! written lands in bit 7 of the first byte. The writer zero-pads the
//! final partial byte; the reader is bounded by an explicit valid-bit
//! count, because padding bits are indistinguishable from data. The
//! payload bit count therefore travels in the container header and is
//! never inferred from the byte length.

use crate::code::Code;
use crate::error::{BitIoError, Result};

/// Accumulates a logical sequence of bits into bytes, MSB-first.
///
/// # Invariants
/// - `bit_buffer` holds at most 7 bits (a full byte is flushed eagerly)
/// - `bit_count` is always < 8
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
}

impl BitWriter {
    /// Create a new BitWriter with empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a single bit.
    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.bit_buffer |= 1 << (7 - self.bit_count);
        }
        self.bit_count += 1;
        if self.bit_count == 8 {
            self.bytes.push(self.bit_buffer);
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
    }

    /// Write the low `count` bits of `value`, MSB-first.
    ///
    /// # Errors
    /// `BitIoError::InvalidBitCount` if `count` > 64.
    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }
        for i in (0..count).rev() {
            self.write_bit((value >> i) & 1 == 1);
        }
        Ok(())
    }

    /// Write a Huffman code, bit by bit in emission order.
    pub fn write_code(&mut self, code: &Code) {
        for bit in code.iter_bits() {
            self.write_bit(bit);
        }
    }

    /// Total number of bits written so far.
    pub fn bit_len(&self) -> u64 {
        self.bytes.len() as u64 * 8 + self.bit_count as u64
    }

    /// Finish writing: pad the final partial byte with zeros and return
    /// the bytes together with the total count of valid bits.
    ///
    /// Consumes the writer. An empty writer yields `(vec![], 0)`.
    pub fn finish(mut self) -> (Vec<u8>, u64) {
        let total_bits = self.bit_len();
        if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
        }
        (self.bytes, total_bits)
    }
}

/// Reads bits MSB-first from a byte buffer, bounded by a valid-bit count.
///
/// # Invariants
/// - `bit_position` never exceeds `bit_limit`
/// - `bit_limit` never exceeds `data.len() * 8`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    /// Source data
    data: &'a [u8],
    /// Current bit position (0 = MSB of first byte)
    bit_position: u64,
    /// Number of valid bits in `data`; anything past this is padding
    bit_limit: u64,
}

impl<'a> BitReader<'a> {
    /// Create a reader over `data` with `valid_bits` readable bits.
    ///
    /// # Errors
    /// `BitIoError::EndOfStream` if `valid_bits` exceeds the buffer size
    /// in bits (the declared count promises more data than exists).
    pub fn new(data: &'a [u8], valid_bits: u64) -> Result<Self> {
        if valid_bits > data.len() as u64 * 8 {
            return Err(BitIoError::EndOfStream.into());
        }
        Ok(Self {
            data,
            bit_position: 0,
            bit_limit: valid_bits,
        })
    }

    /// Read a single bit.
    ///
    /// # Errors
    /// `BitIoError::EndOfStream` once all valid bits are consumed.
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.bit_position >= self.bit_limit {
            return Err(BitIoError::EndOfStream.into());
        }
        let byte = self.data[(self.bit_position / 8) as usize];
        let offset = (self.bit_position % 8) as u8;
        self.bit_position += 1;
        Ok((byte >> (7 - offset)) & 1 == 1)
    }

    /// Read `count` bits (up to 64), MSB-first.
    ///
    /// # Errors
    /// - `BitIoError::InvalidBitCount` if `count` > 64
    /// - `BitIoError::EndOfStream` if fewer than `count` valid bits remain
    pub fn read_bits(&mut self, count: usize) -> Result<u64> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }
        if count as u64 > self.bits_remaining() {
            return Err(BitIoError::EndOfStream.into());
        }
        let mut value = 0u64;
        for _ in 0..count {
            value = (value << 1) | self.read_bit()? as u64;
        }
        Ok(value)
    }

    /// Number of valid bits not yet consumed.
    pub fn bits_remaining(&self) -> u64 {
        self.bit_limit - self.bit_position
    }

    /// Current bit position.
    pub fn position(&self) -> u64 {
        self.bit_position
    }

    /// True once every valid bit has been consumed.
    pub fn is_empty(&self) -> bool {
        self.bit_position >= self.bit_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_write_read_single_byte() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b10110011, 8).unwrap();

        let (bytes, bits) = writer.finish();
        assert_eq!(bytes, vec![0b10110011]);
        assert_eq!(bits, 8);

        let mut reader = BitReader::new(&bytes, bits).unwrap();
        assert_eq!(reader.read_bits(8).unwrap(), 0b10110011);
    }

    #[test]
    fn test_partial_byte_is_zero_padded() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b101, 3).unwrap();
        writer.write_bits(0b11, 2).unwrap();
        // Logical stream 10111, padded to 10111000.

        let (bytes, bits) = writer.finish();
        assert_eq!(bytes, vec![0b10111000]);
        assert_eq!(bits, 5);

        let mut reader = BitReader::new(&bytes, bits).unwrap();
        assert_eq!(reader.read_bits(3).unwrap(), 0b101);
        assert_eq!(reader.read_bits(2).unwrap(), 0b11);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_reader_stops_at_valid_bit_limit() {
        // The padded byte has 8 bits but only 5 are valid.
        let bytes = vec![0b10111000];
        let mut reader = BitReader::new(&bytes, 5).unwrap();
        for _ in 0..5 {
            reader.read_bit().unwrap();
        }
        assert!(matches!(
            reader.read_bit(),
            Err(Error::BitIo(BitIoError::EndOfStream))
        ));
    }

    #[test]
    fn test_declared_bits_beyond_buffer_rejected() {
        let bytes = vec![0xFF];
        assert!(BitReader::new(&bytes, 9).is_err());
        assert!(BitReader::new(&bytes, 8).is_ok());
        assert!(BitReader::new(&[], 0).is_ok());
    }

    #[test]
    fn test_bit_by_bit_round_trip() {
        let pattern = [true, false, true, true, false, false, true, false, true];
        let mut writer = BitWriter::new();
        for &bit in &pattern {
            writer.write_bit(bit);
        }

        let (bytes, bits) = writer.finish();
        assert_eq!(bits, 9);
        assert_eq!(bytes.len(), 2);

        let mut reader = BitReader::new(&bytes, bits).unwrap();
        for &expected in &pattern {
            assert_eq!(reader.read_bit().unwrap(), expected);
        }
        assert!(reader.read_bit().is_err());
    }

    #[test]
    fn test_write_code() {
        let code = Code { bits: 0b110, len: 3 };
        let mut writer = BitWriter::new();
        writer.write_code(&code);
        writer.write_code(&code);

        let (bytes, bits) = writer.finish();
        assert_eq!(bits, 6);
        assert_eq!(bytes, vec![0b11011000]);
    }

    #[test]
    fn test_empty_writer() {
        let (bytes, bits) = BitWriter::new().finish();
        assert!(bytes.is_empty());
        assert_eq!(bits, 0);
    }

    #[test]
    fn test_64_bit_values() {
        let value = 0x123456789ABCDEF0u64;
        let mut writer = BitWriter::new();
        writer.write_bits(value, 64).unwrap();

        let (bytes, bits) = writer.finish();
        let mut reader = BitReader::new(&bytes, bits).unwrap();
        assert_eq!(reader.read_bits(64).unwrap(), value);
    }

    #[test]
    fn test_bits_remaining() {
        let bytes = vec![0xFF, 0xFF];
        let mut reader = BitReader::new(&bytes, 16).unwrap();
        assert_eq!(reader.bits_remaining(), 16);
        reader.read_bits(5).unwrap();
        assert_eq!(reader.bits_remaining(), 11);
        assert_eq!(reader.position(), 5);
    }
}
