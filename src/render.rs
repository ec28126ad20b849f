//! Rasterize a [`SymbolMatrix`] into pixels

use crate::models::{RasterImage, SymbolMatrix};
use image::{GrayImage, Luma};

const DARK: u8 = 0;
const LIGHT: u8 = 255;

/// Pixel scale and margin of a rendered symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Pixels per module side; 0 is treated as 1
    pub scale: usize,
    /// Light margin around the symbol, in modules
    pub quiet_zone: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: 8,
            quiet_zone: 4,
        }
    }
}

impl RenderOptions {
    /// Default margin at the given scale
    pub fn with_scale(scale: usize) -> Self {
        Self {
            scale,
            ..Self::default()
        }
    }

    /// Output side length in pixels for a symbol of `size` modules
    pub fn side(&self, size: usize) -> usize {
        (size + 2 * self.quiet_zone) * self.scale.max(1)
    }
}

/// Render dark modules black and everything else white, as a grayscale frame
pub fn render(symbol: &SymbolMatrix, options: RenderOptions) -> RasterImage {
    let scale = options.scale.max(1);
    let side = options.side(symbol.size());
    let origin = options.quiet_zone * scale;
    let mut pixels = vec![LIGHT; side * side];

    for y in 0..symbol.size() {
        for x in 0..symbol.size() {
            if !symbol.is_dark(x, y) {
                continue;
            }
            for py in 0..scale {
                let row = (origin + y * scale + py) * side;
                let start = row + origin + x * scale;
                pixels[start..start + scale].fill(DARK);
            }
        }
    }
    RasterImage::gray_unchecked(side, side, pixels)
}

/// Render into an `image` buffer, ready to save as PNG
pub fn to_image(symbol: &SymbolMatrix, options: RenderOptions) -> GrayImage {
    let scale = options.scale.max(1);
    let side = options.side(symbol.size()) as u32;
    let origin = options.quiet_zone;
    GrayImage::from_fn(side, side, |px, py| {
        let (mx, my) = (px as usize / scale, py as usize / scale);
        let inside = (origin..origin + symbol.size()).contains(&mx)
            && (origin..origin + symbol.size()).contains(&my);
        if inside && symbol.is_dark(mx - origin, my - origin) {
            Luma([DARK])
        } else {
            Luma([LIGHT])
        }
    })
}
