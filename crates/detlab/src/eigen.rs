//! Eigenvector detection for a 2×2 matrix and a probe vector.
//!
//! - `detect`: image `A·v`, collinearity via `|cos θ|`, eigenvalue extraction.
//! - `real_eigenpairs`: closed-form real eigenvalues/eigenvectors, used to
//!   show where the "unlocking" directions are and to cross-check `detect`.
//!
//! Degenerate inputs (zero probe, zero image) are a plain `false`, not errors.

use nalgebra::{Matrix2, Vector2};

use crate::cfg::{DEFAULT_EIGEN_TOLERANCE, NEAR_ZERO_EPS};
use crate::vector::{dot, magnitude, normalize};

/// Default allowed deviation of `|cos θ|` from 1.
pub const DEFAULT_TOLERANCE: f64 = DEFAULT_EIGEN_TOLERANCE;

/// Row-major constructor: `[[m00, m01], [m10, m11]]`.
#[inline]
pub fn mat2(m00: f64, m01: f64, m10: f64, m11: f64) -> Matrix2<f64> {
    Matrix2::new(m00, m01, m10, m11)
}

/// Result of one detection call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EigenResult {
    pub is_eigenvector: bool,
    /// `Some(λ)` exactly when `is_eigenvector`.
    pub eigenvalue: Option<f64>,
    /// `A·v`.
    pub image: Vector2<f64>,
}

impl EigenResult {
    /// `λ·v` for the probe `v`, if an eigenvalue was found.
    pub fn lambda_v(&self, v: Vector2<f64>) -> Option<Vector2<f64>> {
        self.eigenvalue.map(|lambda| v * lambda)
    }
}

/// Is `v` an eigenvector of `m` within `tolerance` on `|cos θ|`?
///
/// Pre: finite inputs. Post: `eigenvalue.is_some() == is_eigenvector`.
/// Probes or images shorter than `1e-3` are never eigenvectors.
pub fn detect(m: &Matrix2<f64>, v: Vector2<f64>, tolerance: f64) -> EigenResult {
    let image = m * v;
    let v_len = magnitude(v);
    let image_len = magnitude(image);
    if v_len < NEAR_ZERO_EPS || image_len < NEAR_ZERO_EPS {
        return EigenResult {
            is_eigenvector: false,
            eigenvalue: None,
            image,
        };
    }

    let cos_theta = dot(v, image) / (v_len * image_len);
    let is_eigenvector = (cos_theta.abs() - 1.0).abs() < tolerance;
    let eigenvalue = is_eigenvector.then(|| {
        if v.x.abs() > NEAR_ZERO_EPS {
            image.x / v.x
        } else if v.y.abs() > NEAR_ZERO_EPS {
            image.y / v.y
        } else {
            // both components within 1e-3 of zero
            0.0
        }
    });

    EigenResult {
        is_eigenvector,
        eigenvalue,
        image,
    }
}

/// `detect` with the default tolerance (0.02).
#[inline]
pub fn detect_default(m: &Matrix2<f64>, v: Vector2<f64>) -> EigenResult {
    detect(m, v, DEFAULT_TOLERANCE)
}

/// Real eigenvalues with unit eigenvectors, largest eigenvalue first.
///
/// Roots of `λ² − tr·λ + det = 0`. Empty when the discriminant is negative
/// (rotation-like matrices). A repeated root yields one pair, or two
/// (`e₁`, `e₂`) when `m` is a multiple of the identity.
pub fn real_eigenpairs(m: &Matrix2<f64>) -> Vec<(f64, Vector2<f64>)> {
    const EPS: f64 = 1e-12;
    let (a, b, c, d) = (m[(0, 0)], m[(0, 1)], m[(1, 0)], m[(1, 1)]);
    let half_tr = 0.5 * (a + d);
    let det = a * d - b * c;
    let disc = half_tr * half_tr - det;
    if disc < -EPS {
        return Vec::new();
    }
    let root = disc.max(0.0).sqrt();

    if root <= EPS && b.abs() <= EPS && c.abs() <= EPS {
        // scalar matrix: every direction is an eigenvector
        return vec![
            (half_tr, Vector2::new(1.0, 0.0)),
            (half_tr, Vector2::new(0.0, 1.0)),
        ];
    }

    let lambdas: Vec<f64> = if root <= EPS {
        vec![half_tr]
    } else {
        vec![half_tr + root, half_tr - root]
    };
    lambdas
        .into_iter()
        .filter_map(|lambda| {
            // rows of (A - λI) are orthogonal to the eigenvector
            let from_row0 = Vector2::new(b, lambda - a);
            let from_row1 = Vector2::new(lambda - d, c);
            let dir = if magnitude(from_row0) >= magnitude(from_row1) {
                from_row0
            } else {
                from_row1
            };
            (magnitude(dir) > EPS).then(|| (lambda, normalize(dir)))
        })
        .collect()
}
