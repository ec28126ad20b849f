//! Finder pattern detection: 1:1:3:1:1 row scan confirmed by vertical and
//! horizontal cross-checks

use crate::config;
use crate::models::{BitMatrix, Point};

/// A located finder pattern
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinderPattern {
    /// Center of the 3x3 core in image coordinates
    pub center: Point,
    /// Estimated module size in pixels
    pub module_size: f32,
    /// Number of scan lines that confirmed this pattern
    pub count: usize,
}

impl FinderPattern {
    /// Finder centred at `(x, y)`
    pub fn new(x: f32, y: f32, module_size: f32) -> Self {
        Self {
            center: Point::new(x, y),
            module_size,
            count: 1,
        }
    }

    /// Same pattern seen again, within a module of position and size
    fn about_equals(&self, other: &FinderPattern) -> bool {
        let dx = (self.center.x - other.center.x).abs();
        let dy = (self.center.y - other.center.y).abs();
        let size_diff = (self.module_size - other.module_size).abs();
        dx <= self.module_size
            && dy <= self.module_size
            && (size_diff <= 1.0 || size_diff <= self.module_size)
    }

    /// Count-weighted average with another sighting
    fn combine(&mut self, other: &FinderPattern) {
        let n = self.count as f32;
        let m = other.count as f32;
        let total = n + m;
        self.center = Point::new(
            (self.center.x * n + other.center.x * m) / total,
            (self.center.y * n + other.center.y * m) / total,
        );
        self.module_size = (self.module_size * n + other.module_size * m) / total;
        self.count += other.count;
    }
}

/// Row scan for finder patterns
pub struct FinderDetector;

impl FinderDetector {
    /// Every confirmed finder pattern, most-confirmed first, capped at
    /// `QR_MAX_FINDER_CANDIDATES`
    pub fn detect(matrix: &BitMatrix) -> Vec<FinderPattern> {
        let mut patterns: Vec<FinderPattern> = Vec::new();
        let min_total = 7 * config::min_module_px();

        for y in 0..matrix.height() {
            for (start, lengths) in Self::row_candidates(matrix, y) {
                let total: usize = lengths.iter().sum();
                if total < min_total || !Self::ratio_ok(&lengths) {
                    continue;
                }
                if let Some(found) = Self::confirm(matrix, start, &lengths, y) {
                    match patterns.iter_mut().find(|p| p.about_equals(&found)) {
                        Some(existing) => existing.combine(&found),
                        None => patterns.push(found),
                    }
                }
            }
        }

        patterns.sort_by(|a, b| b.count.cmp(&a.count));
        patterns.truncate(config::max_finder_candidates());
        tracing::trace!(candidates = patterns.len(), "finder scan complete");
        patterns
    }

    /// Windows of five consecutive runs, dark-light-dark-light-dark: start x
    /// of the first run and the five lengths
    fn row_candidates(matrix: &BitMatrix, y: usize) -> Vec<(usize, [usize; 5])> {
        let width = matrix.width();
        let mut runs: Vec<(bool, usize, usize)> = Vec::new();
        let mut run_start = 0;
        for x in 1..=width {
            if x == width || matrix.get(x, y) != matrix.get(run_start, y) {
                runs.push((matrix.get(run_start, y), run_start, x - run_start));
                run_start = x;
            }
        }

        runs.windows(5)
            .filter(|w| w[0].0 && !w[1].0 && w[2].0 && !w[3].0 && w[4].0)
            .map(|w| (w[0].1, [w[0].2, w[1].2, w[2].2, w[3].2, w[4].2]))
            .collect()
    }

    /// Run lengths close to 1:1:3:1:1, each within half a module
    fn ratio_ok(lengths: &[usize; 5]) -> bool {
        let total: usize = lengths.iter().sum();
        if total < 7 {
            return false;
        }
        let module = total as f32 / 7.0;
        let max_variance = module / 2.0;
        let expected = [1.0, 1.0, 3.0, 1.0, 1.0];
        lengths
            .iter()
            .zip(expected)
            .all(|(&len, units)| (module * units - len as f32).abs() < max_variance * units)
    }

    /// Cross-check a row hit vertically, then re-check horizontally through
    /// the refined center
    fn confirm(
        matrix: &BitMatrix,
        start: usize,
        lengths: &[usize; 5],
        y: usize,
    ) -> Option<FinderPattern> {
        let h_total: usize = lengths.iter().sum();
        let center_start = start + lengths[0] + lengths[1];
        let cx = center_start + lengths[2] / 2;

        let (v_lengths, cy) = cross_check(matrix.height(), y, lengths[2], |i| matrix.get(cx, i))?;
        let v_total: usize = v_lengths.iter().sum();
        if 5 * v_total.abs_diff(h_total) >= 2 * h_total || !Self::ratio_ok(&v_lengths) {
            return None;
        }

        let row = cy as usize;
        let (h_lengths, center_x) =
            cross_check(matrix.width(), cx, lengths[2], |i| matrix.get(i, row))?;
        let h_total = h_lengths.iter().sum::<usize>();
        if !Self::ratio_ok(&h_lengths) {
            return None;
        }

        let module_size = (h_total + v_total) as f32 / 14.0;
        Some(FinderPattern::new(center_x, cy, module_size))
    }
}

/// Measure the five runs through `start` along one axis of length `len`.
/// Outer runs longer than `max_count` reject the line. Returns the run
/// lengths and the midpoint of the center run.
pub(crate) fn cross_check(
    len: usize,
    start: usize,
    max_count: usize,
    is_dark: impl Fn(usize) -> bool,
) -> Option<([usize; 5], f32)> {
    if start >= len || !is_dark(start) {
        return None;
    }
    let mut counts = [0usize; 5];

    // Backward: center, light, outer dark
    let mut i = start as isize;
    while i >= 0 && is_dark(i as usize) {
        counts[2] += 1;
        i -= 1;
    }
    let center_begin = (i + 1) as usize;
    while i >= 0 && !is_dark(i as usize) && counts[1] <= max_count {
        counts[1] += 1;
        i -= 1;
    }
    if i < 0 || counts[1] > max_count {
        return None;
    }
    while i >= 0 && is_dark(i as usize) && counts[0] <= max_count {
        counts[0] += 1;
        i -= 1;
    }
    if counts[0] > max_count {
        return None;
    }

    // Forward
    let mut j = start + 1;
    while j < len && is_dark(j) {
        counts[2] += 1;
        j += 1;
    }
    while j < len && !is_dark(j) && counts[3] <= max_count {
        counts[3] += 1;
        j += 1;
    }
    if j == len || counts[3] > max_count {
        return None;
    }
    while j < len && is_dark(j) && counts[4] <= max_count {
        counts[4] += 1;
        j += 1;
    }
    if counts[4] > max_count {
        return None;
    }

    Some((counts, center_begin as f32 + counts[2] as f32 / 2.0))
}
