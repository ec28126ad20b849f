//! Codeword placement along the zig-zag data path

use crate::models::BitMatrix;

/// Write codeword bits, MSB first, into `positions`. Positions past the last
/// codeword are remainder bits and stay light.
pub fn place_codewords(modules: &mut BitMatrix, positions: &[(usize, usize)], codewords: &[u8]) {
    for (i, &(x, y)) in positions.iter().enumerate() {
        let dark = codewords
            .get(i / 8)
            .is_some_and(|&byte| (byte >> (7 - i % 8)) & 1 != 0);
        modules.set(x, y, dark);
    }
}
