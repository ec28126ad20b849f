//! Format and version information extraction from a sampled grid

use crate::capability::bch::{decode_format, decode_version};
use crate::capability::layout::{format_positions, version_positions};
use crate::models::{BitMatrix, ECLevel, MaskPattern, Version};

/// Format info is 15 bits (5 data + 10 ECC), stored twice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    /// Error correction level
    pub ec_level: ECLevel,
    /// Mask applied to the data modules
    pub mask_pattern: MaskPattern,
}

impl FormatInfo {
    /// Decode both copies and keep the one closest to a valid word
    pub fn extract(grid: &BitMatrix) -> Option<Self> {
        Self::candidates(grid).into_iter().next()
    }

    /// Every distinct reading of the two copies, nearest first.
    ///
    /// Copies at equal distance that disagree are both returned, top-left
    /// copy first, so the caller can let the codewords decide.
    pub fn candidates(grid: &BitMatrix) -> Vec<Self> {
        if grid.width() < Version::MIN.size() {
            return Vec::new();
        }
        let mut reads: Vec<(Self, u32)> = format_positions(grid.width())
            .iter()
            .filter_map(|copy| decode_format(read_word(grid, copy) as u16))
            .map(|(ec_level, mask_pattern, distance)| {
                (
                    Self {
                        ec_level,
                        mask_pattern,
                    },
                    distance,
                )
            })
            .collect();
        reads.sort_by_key(|&(_, distance)| distance);
        reads.dedup_by_key(|(info, _)| *info);
        if let Some((_, distance)) = reads.first() {
            tracing::trace!(distance, readings = reads.len(), "format information decoded");
        }
        reads.into_iter().map(|(info, _)| info).collect()
    }
}

/// Version from the two 18-bit version blocks (versions 7+)
pub fn read_version(grid: &BitMatrix) -> Option<Version> {
    if grid.width() < 45 {
        return None;
    }
    version_positions(grid.width())
        .iter()
        .filter_map(|copy| decode_version(read_word(grid, copy)))
        .min_by_key(|&(_, distance)| distance)
        .map(|(version, _)| version)
}

/// Bit i of the word is the module at `positions[i]`
fn read_word(grid: &BitMatrix, positions: &[(usize, usize)]) -> u32 {
    positions
        .iter()
        .enumerate()
        .fold(0u32, |acc, (i, &(x, y))| acc | (u32::from(grid.get(x, y)) << i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::layout::{FunctionLayout, draw_format_bits};

    #[test]
    fn test_reads_drawn_format() {
        let (mut grid, _) = FunctionLayout::new(Version::MIN).into_parts();
        draw_format_bits(&mut grid, ECLevel::Q, MaskPattern::Pattern6);
        let info = FormatInfo::extract(&grid).unwrap();
        assert_eq!(info.ec_level, ECLevel::Q);
        assert_eq!(info.mask_pattern, MaskPattern::Pattern6);
    }

    #[test]
    fn test_survives_one_destroyed_copy() {
        let (mut grid, _) = FunctionLayout::new(Version::MIN).into_parts();
        draw_format_bits(&mut grid, ECLevel::H, MaskPattern::Pattern2);
        let first = format_positions(21)[0];
        let word = read_word(&grid, &first) as u16;
        // Four flipped bits that leave the copy out of reach of every codeword
        let damage = (1u16..0x8000)
            .filter(|e| e.count_ones() == 4)
            .find(|&e| decode_format(word ^ e).is_none())
            .unwrap();
        for (i, &(x, y)) in first.iter().enumerate() {
            if damage >> i & 1 == 1 {
                grid.toggle(x, y);
            }
        }
        assert!(decode_format(read_word(&grid, &first) as u16).is_none());

        let info = FormatInfo::extract(&grid).unwrap();
        assert_eq!(info.ec_level, ECLevel::H);
        assert_eq!(info.mask_pattern, MaskPattern::Pattern2);
        assert_eq!(FormatInfo::candidates(&grid).len(), 1);
    }

    #[test]
    fn test_disagreeing_copies_are_both_offered() {
        // Complementing a format word lands on another valid word
        let (mut grid, _) = FunctionLayout::new(Version::MIN).into_parts();
        draw_format_bits(&mut grid, ECLevel::H, MaskPattern::Pattern2);
        for (x, y) in format_positions(21)[0] {
            grid.toggle(x, y);
        }
        let candidates = FormatInfo::candidates(&grid);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[1].ec_level, ECLevel::H);
        assert_eq!(candidates[1].mask_pattern, MaskPattern::Pattern2);
        assert_ne!(candidates[0], candidates[1]);
    }

    #[test]
    fn test_blank_grid_is_unreadable() {
        // Every masked format word has at least five dark bits
        assert!(FormatInfo::extract(&BitMatrix::square(21)).is_none());
        assert!(FormatInfo::extract(&BitMatrix::square(9)).is_none());
    }

    #[test]
    fn test_reads_version_block() {
        let v = Version::new(12).unwrap();
        let (grid, _) = FunctionLayout::new(v).into_parts();
        assert_eq!(read_version(&grid), Some(v));
        assert_eq!(read_version(&BitMatrix::square(21)), None);
    }
}
