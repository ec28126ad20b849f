use crate::config;
use crate::models::BitMatrix;

/// Local standard deviation (grey levels) below which a window counts as flat
/// and the global threshold decides
const FLAT_STDDEV: u64 = 12;

/// Convert grayscale image to binary using Otsu's thresholding method
/// Returns a BitMatrix where true = black, false = white
pub fn otsu_binarize(gray: &[u8], width: usize, height: usize) -> BitMatrix {
    threshold_binarize(gray, width, height, otsu_threshold(gray))
}

/// Otsu's threshold: the cut maximising between-class variance.
/// A single-valued image yields 128.
pub fn otsu_threshold(gray: &[u8]) -> u8 {
    let mut histogram = [0u64; 256];
    for &pixel in gray {
        histogram[pixel as usize] += 1;
    }

    let total = gray.len() as f64;
    let total_sum: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * c as f64)
        .sum();

    let mut below_count = 0.0;
    let mut below_sum = 0.0;
    let mut best_variance = 0.0;
    let mut best = 128u8;
    for (threshold, &count) in histogram.iter().enumerate() {
        // Pixels strictly below `threshold` form the dark class
        let above_count = total - below_count;
        if below_count > 0.0 && above_count > 0.0 {
            let mean_below = below_sum / below_count;
            let mean_above = (total_sum - below_sum) / above_count;
            let variance = below_count * above_count * (mean_below - mean_above).powi(2);
            if variance > best_variance {
                best_variance = variance;
                best = threshold as u8;
            }
        }
        below_count += count as f64;
        below_sum += threshold as f64 * count as f64;
    }
    best
}

/// Simple global threshold binarization
pub fn threshold_binarize(gray: &[u8], width: usize, height: usize, threshold: u8) -> BitMatrix {
    let mut binary = BitMatrix::new(width, height);
    for (y, row) in gray.chunks_exact(width.max(1)).take(height).enumerate() {
        for (x, &pixel) in row.iter().enumerate() {
            if pixel < threshold {
                binary.set(x, y, true);
            }
        }
    }
    binary
}

/// Adaptive binarization with the window and bias from the environment
pub fn binarize(gray: &[u8], width: usize, height: usize) -> BitMatrix {
    adaptive_binarize(
        gray,
        width,
        height,
        config::adaptive_window(),
        config::adaptive_bias_percent(),
    )
}

/// Local-mean thresholding over a `window`-sized square (integral images).
///
/// A pixel is dark when it sits more than `bias_percent` below its window
/// mean. Windows whose standard deviation is under a few grey levels hold no
/// edge, so the global Otsu cut decides there instead.
pub fn adaptive_binarize(
    gray: &[u8],
    width: usize,
    height: usize,
    window: usize,
    bias_percent: u32,
) -> BitMatrix {
    let mut binary = BitMatrix::new(width, height);
    if width == 0 || height == 0 || gray.len() < width * height {
        return binary;
    }

    let stride = width + 1;
    let mut sum = vec![0u64; stride * (height + 1)];
    let mut sq_sum = vec![0u64; stride * (height + 1)];
    for y in 0..height {
        let mut row_sum = 0u64;
        let mut row_sq = 0u64;
        for x in 0..width {
            let p = u64::from(gray[y * width + x]);
            row_sum += p;
            row_sq += p * p;
            sum[(y + 1) * stride + x + 1] = sum[y * stride + x + 1] + row_sum;
            sq_sum[(y + 1) * stride + x + 1] = sq_sum[y * stride + x + 1] + row_sq;
        }
    }
    let area = |table: &[u64], x0: usize, y0: usize, x1: usize, y1: usize| {
        table[y1 * stride + x1] + table[y0 * stride + x0]
            - table[y0 * stride + x1]
            - table[y1 * stride + x0]
    };

    let global = u64::from(otsu_threshold(gray));
    let half = window / 2;
    let keep = u64::from(100 - bias_percent.min(100));
    for y in 0..height {
        let y0 = y.saturating_sub(half);
        let y1 = (y + half + 1).min(height);
        for x in 0..width {
            let x0 = x.saturating_sub(half);
            let x1 = (x + half + 1).min(width);
            let count = ((x1 - x0) * (y1 - y0)) as u64;
            let s = area(&sum, x0, y0, x1, y1);
            let sq = area(&sq_sum, x0, y0, x1, y1);
            let p = u64::from(gray[y * width + x]);

            // count^2 * variance = count * sq - s^2
            let spread = (count * sq).saturating_sub(s * s);
            let dark = if spread < (FLAT_STDDEV * FLAT_STDDEV) * count * count {
                p < global
            } else {
                p * count * 100 < s * keep
            };
            if dark {
                binary.set(x, y, true);
            }
        }
    }
    binary
}
