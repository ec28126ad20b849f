//! Codeword extraction from an unmasked grid

use crate::models::BitMatrix;

/// Read `count` codewords, MSB first, along the data module order
pub fn extract_codewords(grid: &BitMatrix, positions: &[(usize, usize)], count: usize) -> Vec<u8> {
    positions
        .chunks_exact(8)
        .take(count)
        .map(|byte| {
            byte.iter()
                .fold(0u8, |acc, &(x, y)| (acc << 1) | u8::from(grid.get(x, y)))
        })
        .collect()
}
