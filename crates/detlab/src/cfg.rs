//! Tolerance defaults shared by the area, formula and eigen modules.
//!
//! Policy
//! - Fixed constants. The only per-call knob is the eigen collinearity
//!   tolerance, which callers pass to `eigen::detect`.

/// Below this `|det|` a parallelogram is treated as degenerate (hit test is false).
pub const DEGENERATE_DET_EPS: f64 = 1e-3;
/// Vectors shorter than this are "near zero" for eigen detection.
pub const NEAR_ZERO_EPS: f64 = 1e-3;
/// A formula case matches when `|result - expected|` is below this.
pub const FORMULA_MATCH_EPS: f64 = 1e-3;
/// Default allowed deviation of `|cos θ|` from 1.
pub const DEFAULT_EIGEN_TOLERANCE: f64 = 0.02;
/// Longest normalized formula the parser accepts, in characters.
pub const MAX_FORMULA_LEN: usize = 512;
/// Deepest run of nested parentheses and unary signs the parser accepts.
pub const MAX_FORMULA_DEPTH: usize = 64;
