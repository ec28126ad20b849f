//! Alignment pattern detection
//! Alignment patterns appear in QR codes version 2 and above: a single dark
//! module inside a light ring inside a dark ring (5x5 modules).

use crate::models::{BitMatrix, Point};

/// Search windows tried around the prediction, in modules
const ALLOWANCE_FACTORS: [f32; 3] = [4.0, 8.0, 16.0];

/// Locate the alignment pattern nearest to `predicted`, searching ever wider
/// windows around it
pub fn find_alignment_pattern(
    matrix: &BitMatrix,
    predicted: Point,
    module_size: f32,
) -> Option<Point> {
    if module_size <= 0.0 {
        return None;
    }
    ALLOWANCE_FACTORS.iter().find_map(|&allowance| {
        let radius = (allowance * module_size).ceil() as isize;
        search_region(matrix, predicted, module_size, radius)
    })
}

fn search_region(
    matrix: &BitMatrix,
    predicted: Point,
    module_size: f32,
    radius: isize,
) -> Option<Point> {
    let (w, h) = (matrix.width() as isize, matrix.height() as isize);
    let (px, py) = (predicted.x as isize, predicted.y as isize);
    let x0 = (px - radius).clamp(0, w) as usize;
    let x1 = (px + radius + 1).clamp(0, w) as usize;
    let y0 = (py - radius).clamp(0, h) as usize;
    let y1 = (py + radius + 1).clamp(0, h) as usize;
    if x0 >= x1 || y0 >= y1 {
        return None;
    }

    let mut best: Option<(f32, Point)> = None;
    for y in y0..y1 {
        for x in x0..x1 {
            // Start of a dark run only
            if !matrix.get(x, y) || (x > x0 && matrix.get(x - 1, y)) {
                continue;
            }
            let Some(cx) = measure(matrix.width(), x, module_size, |i| matrix.get(i, y)) else {
                continue;
            };
            let col = cx as usize;
            let Some(cy) = measure(matrix.height(), y, module_size, |i| matrix.get(col, i)) else {
                continue;
            };
            let row = cy as usize;
            let Some(cx) = measure(matrix.width(), col, module_size, |i| matrix.get(i, row)) else {
                continue;
            };
            let center = Point::new(cx, cy);
            let d = center.distance_squared(&predicted);
            if best.is_none_or(|(bd, _)| d < bd) {
                best = Some((d, center));
            }
        }
    }
    best.map(|(_, p)| p)
}

/// Light-dark-light runs around the dark module containing `start`, each
/// about one module long and bounded by dark on both outer sides. Returns the
/// midpoint of the dark run.
fn measure(
    len: usize,
    start: usize,
    module_size: f32,
    is_dark: impl Fn(usize) -> bool,
) -> Option<f32> {
    if start >= len || !is_dark(start) {
        return None;
    }
    let limit = (module_size * 2.0).ceil() as usize + 1;

    let mut begin = start;
    while begin > 0 && is_dark(begin - 1) && start - begin < limit {
        begin -= 1;
    }
    let mut end = start + 1;
    while end < len && is_dark(end) && end - begin < limit {
        end += 1;
    }

    let mut left = begin;
    while left > 0 && !is_dark(left - 1) && begin - left < limit {
        left -= 1;
    }
    let mut right = end;
    while right < len && !is_dark(right) && right - end < limit {
        right += 1;
    }
    // Both light runs must end on dark, not on the edge or the limit
    if left == 0 || right >= len || is_dark(left) || !is_dark(left - 1) || !is_dark(right) {
        return None;
    }

    let close = |run: usize| (run as f32 - module_size).abs() <= module_size * 0.5 + 0.5;
    if close(begin - left) && close(end - begin) && close(right - end) {
        Some(begin as f32 + (end - begin) as f32 / 2.0)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_alignment(matrix: &mut BitMatrix, cx: usize, cy: usize, unit: usize) {
        for my in 0..5usize {
            for mx in 0..5usize {
                let ring = (mx as isize - 2).abs().max((my as isize - 2).abs());
                if ring != 1 {
                    for py in 0..unit {
                        for px in 0..unit {
                            let x = cx - 2 * unit - unit / 2 + mx * unit + px;
                            let y = cy - 2 * unit - unit / 2 + my * unit + py;
                            matrix.set(x, y, true);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_finds_pattern_off_prediction() {
        let mut matrix = BitMatrix::new(100, 100);
        draw_alignment(&mut matrix, 52, 47, 4);
        let found = find_alignment_pattern(&matrix, Point::new(45.0, 50.0), 4.0).unwrap();
        assert!(found.distance(&Point::new(52.0, 47.0)) < 1.0, "{found:?}");
    }

    #[test]
    fn test_nothing_in_blank_area() {
        let matrix = BitMatrix::new(60, 60);
        assert!(find_alignment_pattern(&matrix, Point::new(30.0, 30.0), 3.0).is_none());
    }

    #[test]
    fn test_measure_rejects_wide_center() {
        // Light(3) dark(9) light(3): a finder core, not an alignment center
        let line: Vec<bool> = [vec![true; 2], vec![false; 3], vec![true; 9], vec![false; 3], vec![true; 2]]
            .concat();
        assert!(measure(line.len(), 8, 3.0, |i| line[i]).is_none());
        let line: Vec<bool> = [vec![true; 3], vec![false; 3], vec![true; 3], vec![false; 3], vec![true; 3]]
            .concat();
        assert_eq!(measure(line.len(), 7, 3.0, |i| line[i]), Some(7.5));
    }
}
