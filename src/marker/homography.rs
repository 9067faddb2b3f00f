//! Plane-to-image homography from four point correspondences.

use nalgebra::{Matrix3, Point2, SMatrix, SVector};

/// Projective map from marker coordinates to image pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Homography {
    h: Matrix3<f64>,
}

impl Homography {
    /// Solve the 8-parameter DLT system with `h33 = 1`.
    ///
    /// Returns `None` for degenerate configurations (three collinear points).
    pub fn from_correspondences(src: &[Point2<f64>; 4], dst: &[Point2<f64>; 4]) -> Option<Self> {
        if has_collinear_triple(src) || has_collinear_triple(dst) {
            return None;
        }

        let mut a = SMatrix::<f64, 8, 8>::zeros();
        let mut b = SVector::<f64, 8>::zeros();

        for (i, (s, d)) in src.iter().zip(dst.iter()).enumerate() {
            let r = 2 * i;
            a[(r, 0)] = s.x;
            a[(r, 1)] = s.y;
            a[(r, 2)] = 1.0;
            a[(r, 6)] = -s.x * d.x;
            a[(r, 7)] = -s.y * d.x;
            b[r] = d.x;

            a[(r + 1, 3)] = s.x;
            a[(r + 1, 4)] = s.y;
            a[(r + 1, 5)] = 1.0;
            a[(r + 1, 6)] = -s.x * d.y;
            a[(r + 1, 7)] = -s.y * d.y;
            b[r + 1] = d.y;
        }

        let x = a.lu().solve(&b)?;
        if x.iter().any(|v| !v.is_finite()) {
            return None;
        }
        let h = Matrix3::new(x[0], x[1], x[2], x[3], x[4], x[5], x[6], x[7], 1.0);
        Some(Self { h })
    }

    /// Map a point through the homography.
    pub fn project(&self, p: Point2<f64>) -> Option<Point2<f64>> {
        let v = self.h * nalgebra::Vector3::new(p.x, p.y, 1.0);
        if v.z.abs() < 1e-12 {
            return None;
        }
        Some(Point2::new(v.x / v.z, v.y / v.z))
    }
}

fn has_collinear_triple(pts: &[Point2<f64>; 4]) -> bool {
    const TRIPLES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
    TRIPLES.iter().any(|&[i, j, k]| {
        let (a, b, c) = (pts[i], pts[j], pts[k]);
        let cross = (b - a).perp(&(c - a));
        cross.abs() < 1e-9
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> [Point2<f64>; 4] {
        [
            Point2::new(-1.0, -1.0),
            Point2::new(1.0, -1.0),
            Point2::new(1.0, 1.0),
            Point2::new(-1.0, 1.0),
        ]
    }

    #[test]
    fn maps_square_onto_quad() {
        let dst = [
            Point2::new(10.0, 12.0),
            Point2::new(60.0, 8.0),
            Point2::new(66.0, 70.0),
            Point2::new(4.0, 58.0),
        ];
        let h = Homography::from_correspondences(&unit_square(), &dst).unwrap();
        for (s, d) in unit_square().iter().zip(dst.iter()) {
            let p = h.project(*s).unwrap();
            assert_relative_eq!(p.x, d.x, epsilon = 1e-9);
            assert_relative_eq!(p.y, d.y, epsilon = 1e-9);
        }
    }

    #[test]
    fn collinear_points_are_degenerate() {
        let dst = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 2.0),
            Point2::new(3.0, 3.0),
        ];
        assert!(Homography::from_correspondences(&unit_square(), &dst).is_none());
    }
}
