//! Finder grouping, symbol geometry and sample grid extraction

use super::alignment::find_alignment_pattern;
use super::finder::FinderPattern;
use crate::config;
use crate::models::{BitMatrix, Point, Version};
use crate::utils::geometry::{PerspectiveTransform, cross};

/// Largest module size ratio between finders of one symbol
const MAX_SIZE_RATIO: f32 = 1.5;
/// Largest |cos| of the angle at the top-left finder
const MAX_COS: f32 = 0.3;
/// Largest ratio between the two legs of the right angle
const MAX_LEG_RATIO: f32 = 1.5;

/// Three finders assigned to their corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinderTriple {
    /// Corner at the right angle
    pub top_left: FinderPattern,
    /// Along the first row
    pub top_right: FinderPattern,
    /// Along the first column
    pub bottom_left: FinderPattern,
}

impl FinderTriple {
    /// Assign corners: the finder opposite the longest side is top-left, and
    /// top-right follows it clockwise on screen
    pub fn order(a: FinderPattern, b: FinderPattern, c: FinderPattern) -> Self {
        let ab = a.center.distance_squared(&b.center);
        let bc = b.center.distance_squared(&c.center);
        let ac = a.center.distance_squared(&c.center);
        let (tl, p1, p2) = if bc >= ab && bc >= ac {
            (a, b, c)
        } else if ac >= ab && ac >= bc {
            (b, a, c)
        } else {
            (c, a, b)
        };
        let (top_right, bottom_left) = if cross(&tl.center, &p1.center, &p2.center) > 0.0 {
            (p1, p2)
        } else {
            (p2, p1)
        };
        Self {
            top_left: tl,
            top_right,
            bottom_left,
        }
    }

    /// Mean finder module size
    pub fn module_size(&self) -> f32 {
        (self.top_left.module_size + self.top_right.module_size + self.bottom_left.module_size)
            / 3.0
    }

    /// Version implied by the finder spacing
    pub fn estimate_version(&self) -> Option<Version> {
        let module = self.module_size();
        if module <= 0.0 {
            return None;
        }
        let tl = &self.top_left.center;
        let between = (tl.distance(&self.top_right.center) + tl.distance(&self.bottom_left.center))
            / 2.0
            / module;
        // Finder centers sit 7 modules inside a 17 + 4v wide symbol
        let version = ((between - 10.0) / 4.0).round();
        if (1.0..=40.0).contains(&version) {
            Version::new(version as u8)
        } else {
            None
        }
    }

    /// Lower is a better-shaped triple; `None` when not plausibly one symbol
    fn shape_score(&self) -> Option<f32> {
        let sizes = [
            self.top_left.module_size,
            self.top_right.module_size,
            self.bottom_left.module_size,
        ];
        let max = sizes.iter().copied().fold(f32::MIN, f32::max);
        let min = sizes.iter().copied().fold(f32::MAX, f32::min);
        if min <= 0.0 || max / min > MAX_SIZE_RATIO {
            return None;
        }

        let (ux, uy) = self.top_left.center.to(&self.top_right.center);
        let (vx, vy) = self.top_left.center.to(&self.bottom_left.center);
        let lu = (ux * ux + uy * uy).sqrt();
        let lv = (vx * vx + vy * vy).sqrt();
        if lu < 7.0 * min || lv < 7.0 * min {
            return None;
        }
        let cos = (ux * vx + uy * vy) / (lu * lv);
        let legs = lu.max(lv) / lu.min(lv);
        if cos.abs() > MAX_COS || legs > MAX_LEG_RATIO {
            return None;
        }
        Some(cos.abs() + (legs - 1.0) + (max / min - 1.0))
    }

    /// Bottom-right corner of the parallelogram spanned by the finders
    pub fn parallelogram_corner(&self) -> Point {
        let (tl, tr, bl) = (
            self.top_left.center,
            self.top_right.center,
            self.bottom_left.center,
        );
        Point::new(tr.x + bl.x - tl.x, tr.y + bl.y - tl.y)
    }
}

/// Plausible triples from the candidate list, best-shaped first, capped at
/// `QR_MAX_GROUP_ATTEMPTS`
pub fn group_finders(patterns: &[FinderPattern]) -> Vec<FinderTriple> {
    let mut triples: Vec<(f32, FinderTriple)> = Vec::new();
    for i in 0..patterns.len() {
        for j in (i + 1)..patterns.len() {
            for k in (j + 1)..patterns.len() {
                let triple = FinderTriple::order(patterns[i], patterns[j], patterns[k]);
                if let Some(score) = triple.shape_score() {
                    triples.push((score, triple));
                }
            }
        }
    }
    triples.sort_by(|a, b| a.0.total_cmp(&b.0));
    triples.truncate(config::max_group_attempts());
    triples.into_iter().map(|(_, t)| t).collect()
}

/// Module-to-image transforms to try for a triple at `version`: through the
/// bottom-right alignment pattern when one is found, then through the
/// parallelogram corner.
///
/// Version 1 has no alignment pattern, so only the parallelogram (affine)
/// estimate is available. Its samples drift under keystone distortion, and
/// tilted version 1 captures of more than a few percent are not expected to
/// decode.
pub fn candidate_transforms(
    matrix: &BitMatrix,
    triple: &FinderTriple,
    version: Version,
) -> Vec<PerspectiveTransform> {
    let dim = version.size() as f32;
    let (tl, tr, bl) = (
        triple.top_left.center,
        triple.top_right.center,
        triple.bottom_left.center,
    );
    let corner = triple.parallelogram_corner();
    let mut transforms = Vec::with_capacity(2);

    if version.number() >= 2 {
        // Alignment center lies 3 modules closer to top-left than the corner
        let correction = 1.0 - 3.0 / (dim - 7.0);
        let predicted = Point::new(
            tl.x + correction * (corner.x - tl.x),
            tl.y + correction * (corner.y - tl.y),
        );
        if let Some(align) = find_alignment_pattern(matrix, predicted, triple.module_size()) {
            tracing::trace!(x = align.x, y = align.y, "alignment pattern found");
            let src = module_points(dim, dim - 6.5);
            if let Some(t) = PerspectiveTransform::from_points(&src, &[tl, tr, bl, align]) {
                transforms.push(t);
            }
        }
    }

    let src = module_points(dim, dim - 3.5);
    if let Some(t) = PerspectiveTransform::from_points(&src, &[tl, tr, bl, corner]) {
        transforms.push(t);
    }
    transforms
}

/// Finder centers in module space plus the bottom-right reference at `br`
fn module_points(dim: f32, br: f32) -> [Point; 4] {
    [
        Point::new(3.5, 3.5),
        Point::new(dim - 3.5, 3.5),
        Point::new(3.5, dim - 3.5),
        Point::new(br, br),
    ]
}

/// Read every module center through `transform`. Samples outside the image
/// read as light.
pub fn sample_grid(
    matrix: &BitMatrix,
    transform: &PerspectiveTransform,
    dimension: usize,
) -> BitMatrix {
    let mut grid = BitMatrix::square(dimension);
    for y in 0..dimension {
        for x in 0..dimension {
            let Some(p) = transform.transform(&Point::new(x as f32 + 0.5, y as f32 + 0.5)) else {
                continue;
            };
            if p.x < 0.0 || p.y < 0.0 {
                continue;
            }
            let (ix, iy) = (p.x.floor() as usize, p.y.floor() as usize);
            if ix < matrix.width() && iy < matrix.height() && matrix.get(ix, iy) {
                grid.set(x, y, true);
            }
        }
    }
    grid
}
