/// Bit accumulator used while assembling the data codewords
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    bits: Vec<bool>,
}

impl BitBuffer {
    /// Empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty buffer with room for `bits`
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: Vec::with_capacity(bits),
        }
    }

    /// Bits written
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether nothing was written
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Append the low `count` bits of `value`, most significant first
    pub fn append_bits(&mut self, value: u32, count: usize) {
        debug_assert!(count <= 32, "at most 32 bits per call");
        debug_assert!(count == 32 || value >> count == 0, "value wider than count");
        self.bits
            .extend((0..count).rev().map(|i| (value >> i) & 1 != 0));
    }

    /// Pack into bytes, MSB first. A trailing partial byte is zero-padded.
    pub fn to_codewords(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &bit)| acc | (u8::from(bit) << (7 - i)))
            })
            .collect()
    }

    /// Written bits, most significant first
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_pack() {
        let mut buf = BitBuffer::new();
        buf.append_bits(0b0001, 4);
        buf.append_bits(8, 10);
        assert_eq!(buf.len(), 14);
        // 0001 0000001000 -> 00010000 001000[00]
        assert_eq!(buf.to_codewords(), vec![0x10, 0x20]);
    }

    #[test]
    fn test_zero_width_append() {
        let mut buf = BitBuffer::new();
        buf.append_bits(0, 0);
        assert!(buf.is_empty());
        assert!(buf.to_codewords().is_empty());
    }
}
