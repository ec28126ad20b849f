//! BCH codes protecting format information (15,5) and version information (18,6)

use crate::models::{ECLevel, MaskPattern, Version};

/// XOR mask applied to format information so it is never all-light
pub const FORMAT_XOR_MASK: u16 = 0x5412;
const FORMAT_GENERATOR: u32 = 0x537;
const VERSION_GENERATOR: u32 = 0x1F25;

/// Largest Hamming distance accepted when decoding either code
pub const MAX_CORRECTABLE_BITS: u32 = 3;

/// 15 format bits (already XOR-masked) for a level and mask
pub fn format_bits(ec_level: ECLevel, mask: MaskPattern) -> u16 {
    let data = (u32::from(ec_level.format_bits()) << 3) | u32::from(mask.bits());
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * FORMAT_GENERATOR);
    }
    (((data << 10) | (rem & 0x3FF)) as u16) ^ FORMAT_XOR_MASK
}

/// 18 version bits for versions 7 and up
pub fn version_bits(version: Version) -> u32 {
    let data = u32::from(version.number());
    let mut rem = data;
    for _ in 0..12 {
        rem = (rem << 1) ^ ((rem >> 11) * VERSION_GENERATOR);
    }
    (data << 12) | (rem & 0xFFF)
}

/// Nearest valid format word to a raw 15-bit read.
///
/// Returns the level, mask and number of bits that disagreed, or `None` when
/// every valid word is further than [`MAX_CORRECTABLE_BITS`] away.
pub fn decode_format(raw: u16) -> Option<(ECLevel, MaskPattern, u32)> {
    let mut best: Option<(ECLevel, MaskPattern, u32)> = None;
    for ec_level in ECLevel::ALL {
        for mask in MaskPattern::ALL {
            let distance = (format_bits(ec_level, mask) ^ (raw & 0x7FFF)).count_ones();
            if best.is_none_or(|(_, _, d)| distance < d) {
                best = Some((ec_level, mask, distance));
            }
        }
    }
    best.filter(|&(_, _, d)| d <= MAX_CORRECTABLE_BITS)
}

/// Nearest valid version word (7-40) to a raw 18-bit read
pub fn decode_version(raw: u32) -> Option<(Version, u32)> {
    Version::range(Version::new(7)?, Version::MAX)
        .map(|v| (v, (version_bits(v) ^ (raw & 0x3FFFF)).count_ones()))
        .min_by_key(|&(v, d)| (d, v))
        .filter(|&(_, d)| d <= MAX_CORRECTABLE_BITS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_format_words() {
        assert_eq!(format_bits(ECLevel::M, MaskPattern::Pattern0), 0b101010000010010);
        assert_eq!(format_bits(ECLevel::L, MaskPattern::Pattern0), 0b111011111000100);
        assert_eq!(format_bits(ECLevel::H, MaskPattern::Pattern7), 0b000100000111011);
    }

    #[test]
    fn test_known_version_words() {
        assert_eq!(version_bits(Version::new(7).unwrap()), 0x07C94);
        assert_eq!(version_bits(Version::new(40).unwrap()), 0x28C69);
    }

    #[test]
    fn test_format_corrects_three_bits() {
        let word = format_bits(ECLevel::Q, MaskPattern::Pattern5);
        let damaged = word ^ 0b100_0000_0100_0001;
        let (level, mask, distance) = decode_format(damaged).unwrap();
        assert_eq!((level, mask, distance), (ECLevel::Q, MaskPattern::Pattern5, 3));
    }

    #[test]
    fn test_version_corrects_bits() {
        let v = Version::new(23).unwrap();
        let damaged = version_bits(v) ^ 0b101;
        assert_eq!(decode_version(damaged), Some((v, 2)));
    }

    #[test]
    fn test_all_format_words_distinct() {
        let mut words: Vec<u16> = ECLevel::ALL
            .iter()
            .flat_map(|&l| MaskPattern::ALL.iter().map(move |&m| format_bits(l, m)))
            .collect();
        words.sort_unstable();
        words.dedup();
        assert_eq!(words.len(), 32);
    }
}
