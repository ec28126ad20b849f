//! Byte mode decoder (Mode 0100) for 8-bit data

use super::read_bits;

/// Reader for byte segments
pub struct ByteDecoder;

impl ByteDecoder {
    pub fn decode(bits: &[bool], character_count: usize) -> Option<(Vec<u8>, usize)> {
        let bytes = (0..character_count)
            .map(|i| read_bits(bits, i * 8, 8).map(|b| b as u8))
            .collect::<Option<Vec<u8>>>()?;
        Some((bytes, character_count * 8))
    }
}
