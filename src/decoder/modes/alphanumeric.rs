//! Alphanumeric mode decoder (Mode 0010)
//! Pairs = 11 bits, single = 6 bits

use super::read_bits;
use crate::capability::tables::ALPHANUMERIC_CHARSET;

/// Reader for alphanumeric segments
pub struct AlphanumericDecoder;

impl AlphanumericDecoder {
    pub fn decode(bits: &[bool], character_count: usize) -> Option<(Vec<u8>, usize)> {
        let mut result = Vec::with_capacity(character_count);
        let mut bit_idx = 0;
        let mut chars_remaining = character_count;

        while chars_remaining >= 2 {
            let value = read_bits(bits, bit_idx, 11)? as usize;
            result.push(*ALPHANUMERIC_CHARSET.get(value / 45)?);
            result.push(ALPHANUMERIC_CHARSET[value % 45]);
            bit_idx += 11;
            chars_remaining -= 2;
        }
        if chars_remaining == 1 {
            let value = read_bits(bits, bit_idx, 6)? as usize;
            result.push(*ALPHANUMERIC_CHARSET.get(value)?);
            bit_idx += 6;
        }

        Some((result, bit_idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphanumeric_decode() {
        // Encode "A1" = (10 * 45 + 1) = 451 = 0b00111000011 (11 bits)
        let bits = vec![
            false, false, true, true, true, false, false, false, false, true, true,
        ];
        let (decoded, used) = AlphanumericDecoder::decode(&bits, 2).unwrap();
        assert_eq!(decoded, b"A1");
        assert_eq!(used, 11);
    }

    #[test]
    fn test_alphanumeric_odd_count_and_invalid() {
        // "A1" then ":" (44) in 6 bits
        let mut bits = vec![
            false, false, true, true, true, false, false, false, false, true, true,
        ];
        bits.extend([true, false, true, true, false, false]);
        let (decoded, used) = AlphanumericDecoder::decode(&bits, 3).unwrap();
        assert_eq!(decoded, b"A1:");
        assert_eq!(used, 17);

        // 63 is outside the 45-character set
        assert!(AlphanumericDecoder::decode(&[true; 6], 1).is_none());
    }
}
