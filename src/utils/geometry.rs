//! Perspective mapping between module space and image space

use crate::models::Point;

/// Projective transform (3x3 homography with h33 = 1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveTransform {
    h: [f64; 8],
}

impl PerspectiveTransform {
    /// Transform taking each `src[i]` onto `dst[i]`; `None` when three of
    /// the points are collinear
    pub fn from_points(src: &[Point; 4], dst: &[Point; 4]) -> Option<Self> {
        let mut a = [[0.0f64; 8]; 8];
        let mut b = [0.0f64; 8];

        for i in 0..4 {
            let (sx, sy) = (f64::from(src[i].x), f64::from(src[i].y));
            let (dx, dy) = (f64::from(dst[i].x), f64::from(dst[i].y));
            let row = i * 2;
            a[row] = [sx, sy, 1.0, 0.0, 0.0, 0.0, -dx * sx, -dx * sy];
            b[row] = dx;
            a[row + 1] = [0.0, 0.0, 0.0, sx, sy, 1.0, -dy * sx, -dy * sy];
            b[row + 1] = dy;
        }

        solve_linear_system(a, b).map(|h| Self { h })
    }

    /// Map a point; `None` for points on the line at infinity
    pub fn transform(&self, p: &Point) -> Option<Point> {
        let (x, y) = (f64::from(p.x), f64::from(p.y));
        let h = &self.h;
        let denominator = h[6] * x + h[7] * y + 1.0;
        if denominator.abs() < 1e-12 {
            return None;
        }
        let tx = (h[0] * x + h[1] * y + h[2]) / denominator;
        let ty = (h[3] * x + h[4] * y + h[5]) / denominator;
        Some(Point::new(tx as f32, ty as f32))
    }
}

/// Solve 8x8 linear system using Gaussian elimination with partial pivoting
#[allow(clippy::needless_range_loop)]
fn solve_linear_system(mut a: [[f64; 8]; 8], mut b: [f64; 8]) -> Option<[f64; 8]> {
    let n = 8;

    for i in 0..n {
        let mut max_row = i;
        for k in (i + 1)..n {
            if a[k][i].abs() > a[max_row][i].abs() {
                max_row = k;
            }
        }
        if a[max_row][i].abs() < 1e-12 {
            return None;
        }
        a.swap(i, max_row);
        b.swap(i, max_row);

        for k in (i + 1)..n {
            let factor = a[k][i] / a[i][i];
            b[k] -= factor * b[i];
            for j in i..n {
                a[k][j] -= factor * a[i][j];
            }
        }
    }

    let mut x = [0.0f64; 8];
    for i in (0..n).rev() {
        let mut sum = b[i];
        for j in (i + 1)..n {
            sum -= a[i][j] * x[j];
        }
        x[i] = sum / a[i][i];
    }
    Some(x)
}

/// z component of `(b - a) x (c - a)`
pub fn cross(a: &Point, b: &Point, c: &Point) -> f32 {
    let (abx, aby) = a.to(b);
    let (acx, acy) = a.to(c);
    abx * acy - aby * acx
}
