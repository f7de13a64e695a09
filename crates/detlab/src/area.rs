//! Parallelogram area via the 2×2 determinant, plus a barycentric hit test.
//!
//! - `signed_area(u, v)`: `cross(u, v)`; positive when `v` is counter-clockwise from `u`.
//! - `area(u, v)`: `|signed_area|`.
//! - `contains_point(p, u, v)`: solves `p = a·u + b·v` and checks `a, b ∈ [0, 1]`.
//!
//! The parallelogram is never stored on its own; `Parallelogram` is a `Copy`
//! pair recomputed from the current `u, v` whenever a caller needs it.

use nalgebra::Vector2;

use crate::cfg::DEGENERATE_DET_EPS;
use crate::vector::cross;

/// Signed area of the parallelogram spanned by `u` and `v`.
#[inline]
pub fn signed_area(u: Vector2<f64>, v: Vector2<f64>) -> f64 {
    cross(u, v)
}

/// Geometric (unsigned) area.
#[inline]
pub fn area(u: Vector2<f64>, v: Vector2<f64>) -> f64 {
    signed_area(u, v).abs()
}

/// Barycentric membership test (closed parallelogram).
///
/// Returns `false` unconditionally when `|det(u, v)| < 1e-3`: a collapsed
/// parallelogram has no interior to hit.
pub fn contains_point(point: Vector2<f64>, u: Vector2<f64>, v: Vector2<f64>) -> bool {
    let det = cross(u, v);
    if det.abs() < DEGENERATE_DET_EPS {
        return false;
    }
    let a = (v.y * point.x - v.x * point.y) / det;
    let b = (-u.y * point.x + u.x * point.y) / det;
    (0.0..=1.0).contains(&a) && (0.0..=1.0).contains(&b)
}

/// Parallelogram with vertices `0, u, u+v, v`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parallelogram {
    pub u: Vector2<f64>,
    pub v: Vector2<f64>,
}

impl Parallelogram {
    #[inline]
    pub fn new(u: Vector2<f64>, v: Vector2<f64>) -> Self {
        Self { u, v }
    }
    #[inline]
    pub fn signed_area(&self) -> f64 {
        signed_area(self.u, self.v)
    }
    #[inline]
    pub fn area(&self) -> f64 {
        area(self.u, self.v)
    }
    /// Vertices in traversal order: origin, `u`, `u+v`, `v`.
    pub fn vertices(&self) -> [Vector2<f64>; 4] {
        [Vector2::zeros(), self.u, self.u + self.v, self.v]
    }
    /// Vertex centroid, `(u + v) / 2`.
    pub fn center(&self) -> Vector2<f64> {
        let sum = self
            .vertices()
            .iter()
            .fold(Vector2::zeros(), |acc, p| acc + p);
        sum / 4.0
    }
    #[inline]
    pub fn contains_point(&self, point: Vector2<f64>) -> bool {
        contains_point(point, self.u, self.v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn worksheet_areas() {
        assert_eq!(signed_area(vector![1.0, 0.0], vector![0.0, 1.0]), 1.0);
        assert_eq!(signed_area(vector![2.0, 0.0], vector![0.0, 3.0]), 6.0);
        assert_eq!(signed_area(vector![1.0, 2.0], vector![3.0, 1.0]), -5.0);
        assert_eq!(signed_area(vector![2.0, 4.0], vector![4.0, 8.0]), 0.0);
        assert_eq!(area(vector![1.0, 2.0], vector![3.0, 1.0]), 5.0);
    }

    #[test]
    fn vertices_and_center() {
        let p = Parallelogram::new(vector![2.0, 0.0], vector![1.0, 3.0]);
        let vs = p.vertices();
        assert_eq!(vs[0], vector![0.0, 0.0]);
        assert_eq!(vs[1], vector![2.0, 0.0]);
        assert_eq!(vs[2], vector![3.0, 3.0]);
        assert_eq!(vs[3], vector![1.0, 3.0]);
        assert!((p.center() - vector![1.5, 1.5]).norm() < 1e-12);
        assert_eq!(p.signed_area(), 6.0);
    }

    #[test]
    fn hit_test_inside_edges_outside() {
        let u = vector![2.0, 0.0];
        let v = vector![1.0, 2.0];
        assert!(contains_point(vector![1.5, 1.0], u, v));
        // vertices and edges are inside (closed set)
        assert!(contains_point(vector![0.0, 0.0], u, v));
        assert!(contains_point(vector![3.0, 2.0], u, v));
        assert!(contains_point(vector![1.0, 0.0], u, v));
        // outside
        assert!(!contains_point(vector![-0.1, 0.0], u, v));
        assert!(!contains_point(vector![0.0, 1.5], u, v));
        assert!(!contains_point(vector![3.5, 2.0], u, v));
    }

    #[test]
    fn hit_test_ignores_orientation() {
        // clockwise pair (negative det) still tests membership correctly
        let u = vector![0.0, 1.0];
        let v = vector![1.0, 0.0];
        assert!(signed_area(u, v) < 0.0);
        assert!(contains_point(vector![0.5, 0.5], u, v));
        assert!(!contains_point(vector![1.5, 0.5], u, v));
    }

    #[test]
    fn degenerate_parallelogram_contains_nothing() {
        let u = vector![2.0, 4.0];
        let v = vector![4.0, 8.0];
        for p in [vector![0.0, 0.0], vector![1.0, 2.0], vector![3.0, 6.0]] {
            assert!(!contains_point(p, u, v));
        }
        // tiny but nonzero det is still below threshold
        assert!(!contains_point(
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![0.0, 0.0005]
        ));
    }

    #[test]
    fn center_is_always_inside_seeded() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let u = Vector2::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0));
            let v = Vector2::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0));
            let p = Parallelogram::new(u, v);
            if p.area() < DEGENERATE_DET_EPS {
                continue;
            }
            assert!(p.contains_point(p.center()));
        }
    }

    proptest! {
        #[test]
        fn signed_area_is_antisymmetric(ux in -100.0..100.0f64, uy in -100.0..100.0f64,
                                        vx in -100.0..100.0f64, vy in -100.0..100.0f64) {
            let u = Vector2::new(ux, uy);
            let v = Vector2::new(vx, vy);
            prop_assert_eq!(signed_area(u, v), -signed_area(v, u));
            prop_assert!(area(u, v) >= 0.0);
        }

        #[test]
        fn collinear_pairs_contain_nothing(ux in -20.0..20.0f64, uy in -20.0..20.0f64,
                                           k in -3.0..3.0f64,
                                           px in -50.0..50.0f64, py in -50.0..50.0f64) {
            let u = Vector2::new(ux, uy);
            let v = u * k;
            prop_assert!(!contains_point(Vector2::new(px, py), u, v));
        }
    }
}
