//! Unmask QR code by applying the mask pattern

use crate::capability::layout::apply_mask;
use crate::models::{BitMatrix, MaskPattern};

/// Remove the data mask in place. Masking is an XOR, so this is the same
/// toggle the encoder applies; function modules are left alone.
pub fn unmask(grid: &mut BitMatrix, function: &BitMatrix, mask: MaskPattern) {
    apply_mask(grid, function, mask);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::layout::FunctionLayout;
    use crate::models::Version;

    #[test]
    fn test_unmask() {
        let layout = FunctionLayout::new(Version::MIN);
        let mut grid = layout.modules().clone();
        grid.set(10, 10, true);
        grid.set(11, 10, false);

        unmask(&mut grid, layout.function_mask(), MaskPattern::Pattern0);

        // Pattern0: (row + col) % 2 == 0
        assert!(!grid.get(10, 10));
        assert!(grid.get(11, 10) == MaskPattern::Pattern0.is_masked(10, 11));
        // Timing module untouched
        assert_eq!(grid.get(8, 6), layout.modules().get(8, 6));
    }
}
