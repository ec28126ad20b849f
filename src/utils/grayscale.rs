//! Luminance conversion
//! Y = 0.299*R + 0.587*G + 0.114*B in fixed point: (77*R + 150*G + 29*B) >> 8

const COEF_R: u32 = 77;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((COEF_R * u32::from(r) + COEF_G * u32::from(g) + COEF_B * u32::from(b)) >> 8) as u8
}

/// Convert packed RGB samples to one luminance byte per pixel
pub fn rgb_to_grayscale(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    rgb.chunks_exact(3)
        .take(width * height)
        .map(|px| luma(px[0], px[1], px[2]))
        .collect()
}

/// Convert packed RGBA samples to luminance, ignoring alpha
pub fn rgba_to_grayscale(rgba: &[u8], width: usize, height: usize) -> Vec<u8> {
    rgba.chunks_exact(4)
        .take(width * height)
        .map(|px| luma(px[0], px[1], px[2]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_grayscale() {
        let rgb = vec![255, 255, 255, 0, 0, 0, 255, 0, 0, 0, 255, 0];
        let gray = rgb_to_grayscale(&rgb, 4, 1);
        assert_eq!(gray, vec![255, 0, 76, 149]);
    }

    #[test]
    fn test_rgba_ignores_alpha() {
        let rgba = vec![0, 0, 255, 0, 128, 128, 128, 255];
        assert_eq!(rgba_to_grayscale(&rgba, 2, 1), vec![28, 128]);
    }
}
