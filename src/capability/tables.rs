//! Per-version codeword tables (Model 2)

use crate::models::{ECLevel, Version};

// Index: [ec_level][version], version 0 unused.
const ECC_CODEWORDS_PER_BLOCK: [[u8; 41]; 4] = [
    [
        0, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    [
        0, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ],
    [
        0, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    [
        0, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
];

const NUM_ERROR_CORRECTION_BLOCKS: [[u8; 41]; 4] = [
    [
        0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ],
    [
        0, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ],
    [
        0, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
        29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ],
    [
        0, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ],
];

/// Alphanumeric mode character set, indexed by character value
pub const ALPHANUMERIC_CHARSET: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Modules available for codewords (and remainder bits) once every function
/// pattern is placed
pub fn raw_data_modules(version: Version) -> usize {
    let v = version.number() as usize;
    let mut result = (16 * v + 128) * v + 64;
    if v >= 2 {
        let num_align = v / 7 + 2;
        result -= (25 * num_align - 10) * num_align - 55;
        if v >= 7 {
            result -= 36;
        }
    }
    result
}

/// Total codewords (data + EC) of a version
pub fn total_codewords(version: Version) -> usize {
    raw_data_modules(version) / 8
}

/// How the codewords of one version/level split into Reed-Solomon blocks.
///
/// Short blocks come first; long blocks carry one extra data codeword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    /// Number of blocks
    pub num_blocks: usize,
    /// EC codewords in every block
    pub ecc_per_block: usize,
    /// Number of short blocks
    pub num_short_blocks: usize,
    /// Data codewords in a short block
    pub short_data_len: usize,
}

impl BlockLayout {
    /// Look up the layout for a version and level
    pub fn new(version: Version, ec_level: ECLevel) -> Self {
        let level = ec_level.ordinal();
        let v = version.number() as usize;
        let num_blocks = NUM_ERROR_CORRECTION_BLOCKS[level][v] as usize;
        let ecc_per_block = ECC_CODEWORDS_PER_BLOCK[level][v] as usize;
        let total = total_codewords(version);
        let num_short_blocks = num_blocks - total % num_blocks;
        let short_data_len = total / num_blocks - ecc_per_block;
        Self {
            num_blocks,
            ecc_per_block,
            num_short_blocks,
            short_data_len,
        }
    }

    /// Data codewords carried by block `index`
    pub fn data_len(&self, index: usize) -> usize {
        if index < self.num_short_blocks {
            self.short_data_len
        } else {
            self.short_data_len + 1
        }
    }

    /// Data codewords across all blocks
    pub fn data_codewords(&self) -> usize {
        self.short_data_len * self.num_blocks + (self.num_blocks - self.num_short_blocks)
    }

    /// Data plus EC codewords across all blocks
    pub fn total_codewords(&self) -> usize {
        self.data_codewords() + self.ecc_per_block * self.num_blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(n: u8) -> Version {
        Version::new(n).unwrap()
    }

    #[test]
    fn test_raw_modules() {
        assert_eq!(raw_data_modules(v(1)), 208);
        assert_eq!(raw_data_modules(v(2)), 359);
        assert_eq!(raw_data_modules(v(7)), 1568);
        assert_eq!(raw_data_modules(v(40)), 29648);
    }

    #[test]
    fn test_data_codewords_match_standard() {
        assert_eq!(BlockLayout::new(v(1), ECLevel::L).data_codewords(), 19);
        assert_eq!(BlockLayout::new(v(1), ECLevel::M).data_codewords(), 16);
        assert_eq!(BlockLayout::new(v(1), ECLevel::H).data_codewords(), 9);
        assert_eq!(BlockLayout::new(v(5), ECLevel::Q).data_codewords(), 62);
        assert_eq!(BlockLayout::new(v(40), ECLevel::L).data_codewords(), 2956);
        assert_eq!(BlockLayout::new(v(40), ECLevel::H).data_codewords(), 1276);
    }

    #[test]
    fn test_short_and_long_blocks() {
        // 5-Q: 2 blocks of 15 data, 2 blocks of 16 data, 18 EC each
        let layout = BlockLayout::new(v(5), ECLevel::Q);
        assert_eq!(layout.num_blocks, 4);
        assert_eq!(layout.num_short_blocks, 2);
        assert_eq!(layout.data_len(0), 15);
        assert_eq!(layout.data_len(3), 16);
        assert_eq!(layout.ecc_per_block, 18);
        assert_eq!(layout.total_codewords(), total_codewords(v(5)));
    }
}
