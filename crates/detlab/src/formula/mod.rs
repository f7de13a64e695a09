//! Determinant formula checking.
//!
//! Purpose
//! - Accept a typed formula over `a, b, c, d` (bound to `u.x, u.y, v.x, v.y`),
//!   compile it with a small arithmetic parser, and check it against a fixed
//!   battery of `(u, v) → det` cases.
//!
//! Pipeline
//! - `normalize`: strip whitespace, make implicit products explicit (`ad` → `a*d`).
//! - `substitute_symbols`: boundary-aware `a..d` → `u.x, u.y, v.x, v.y`.
//! - `CompiledFormula::compile`: tokenize + recursive descent into an `Expr` tree.
//!   Only `+ - * / ( )`, decimal literals and the four references are accepted;
//!   nothing is ever executed as code.
//! - `FormulaValidator`: runs the battery, evaluates against a live pair, gives hints.

mod compile;
mod error;
mod hint;
mod normalize;
mod validate;

pub use compile::{BinOp, CompiledFormula, Expr, Symbol};
pub use error::{EvalError, FormulaError};
pub use hint::{hint, Hint};
pub use normalize::{normalize, substitute_symbols};
pub use validate::{
    CurrentEvaluation, FormulaCase, FormulaValidator, ValidationResult, SYNTAX_ERROR_MESSAGE,
};
