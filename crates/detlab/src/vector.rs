//! 2D vector arithmetic.
//!
//! Thin named operations over `nalgebra::Vector2<f64>` so call sites read like
//! the lab worksheets (`cross(u, v)`, `normalize(a)`). All functions are pure
//! and return new values.

use nalgebra::Vector2;

#[inline]
pub fn add(a: Vector2<f64>, b: Vector2<f64>) -> Vector2<f64> {
    a + b
}

#[inline]
pub fn subtract(a: Vector2<f64>, b: Vector2<f64>) -> Vector2<f64> {
    a - b
}

#[inline]
pub fn scale(a: Vector2<f64>, k: f64) -> Vector2<f64> {
    a * k
}

#[inline]
pub fn dot(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.x + a.y * b.y
}

/// Scalar 2D cross product: `a.x*b.y - a.y*b.x`, i.e. `det [a; b]`.
#[inline]
pub fn cross(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

#[inline]
pub fn magnitude(a: Vector2<f64>) -> f64 {
    (a.x * a.x + a.y * a.y).sqrt()
}

/// Unit vector along `a`; the zero vector maps to the zero vector.
#[inline]
pub fn normalize(a: Vector2<f64>) -> Vector2<f64> {
    let mag = magnitude(a);
    if mag > 0.0 {
        Vector2::new(a.x / mag, a.y / mag)
    } else {
        Vector2::zeros()
    }
}

/// Polar angle in radians, `atan2(y, x)` in `(-π, π]`.
#[inline]
pub fn angle(a: Vector2<f64>) -> f64 {
    a.y.atan2(a.x)
}
