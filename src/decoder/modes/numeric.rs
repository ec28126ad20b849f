//! Numeric mode decoder (Mode 0001)
//! Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits

use super::read_bits;

/// Reader for numeric segments
pub struct NumericDecoder;

impl NumericDecoder {
    /// Decode digits from the bit stream.
    /// Returns (ASCII digits, bits consumed); `None` when the stream ends
    /// early or a group encodes a value with too many digits.
    pub fn decode(bits: &[bool], character_count: usize) -> Option<(Vec<u8>, usize)> {
        let mut result = Vec::with_capacity(character_count);
        let mut bit_idx = 0;
        let mut chars_remaining = character_count;

        while chars_remaining > 0 {
            let group_size = chars_remaining.min(3);
            let (bits_needed, limit) = match group_size {
                3 => (10, 1000),
                2 => (7, 100),
                _ => (4, 10),
            };
            let value = read_bits(bits, bit_idx, bits_needed)?;
            if value >= limit {
                return None;
            }

            let digits = format!("{value:0width$}", width = group_size);
            result.extend_from_slice(digits.as_bytes());
            bit_idx += bits_needed;
            chars_remaining -= group_size;
        }

        Some((result, bit_idx))
    }
}
