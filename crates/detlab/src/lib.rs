//! Linear-algebra core for the determinant and eigenvector labs.
//!
//! Everything here is a pure function over small value types: no rendering,
//! no event wiring, no hidden state. Callers (the CLI, or any UI layer) own
//! the "current" vectors and matrices and pass them in explicitly.
//!
//! Layout
//! - `vector`: 2D vector arithmetic on `Vec2`.
//! - `area`: signed/absolute parallelogram area and the barycentric hit test.
//! - `formula`: normalize, compile and validate a typed determinant formula
//!   over the symbols `a, b, c, d`.
//! - `eigen`: eigenvector detection for a 2×2 matrix and a probe vector.
//! - `presets`: named matrices from the lock demos and seeded random ones.

pub mod area;
pub mod cfg;
pub mod eigen;
pub mod formula;
pub mod presets;
pub mod vector;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::{Matrix2 as Mat2, Vector2 as Vec2};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::area::{area, contains_point, signed_area, Parallelogram};
    pub use crate::eigen::{
        detect, detect_default, mat2, real_eigenpairs, EigenResult, DEFAULT_TOLERANCE,
    };
    pub use crate::formula::{
        CompiledFormula, CurrentEvaluation, FormulaCase, FormulaError, FormulaValidator, Hint,
        ValidationResult,
    };
    pub use crate::presets::{random_matrix, Preset};
    pub use nalgebra::{Matrix2 as Mat2, Vector2 as Vec2};
}
