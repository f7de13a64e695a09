use nalgebra::Vector2;

use super::compile::CompiledFormula;
use super::error::FormulaError;
use crate::cfg::FORMULA_MATCH_EPS;

/// Fixed message for formulas that do not parse.
pub const SYNTAX_ERROR_MESSAGE: &str = "formula syntax error, check the expression";

/// One `(u, v) → expected` row of the battery.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FormulaCase {
    pub u: Vector2<f64>,
    pub v: Vector2<f64>,
    pub expected: f64,
}

impl FormulaCase {
    pub fn new(u: Vector2<f64>, v: Vector2<f64>, expected: f64) -> Self {
        Self { u, v, expected }
    }

    /// Identity, scaling, generic, reordered and degenerate pairs.
    pub fn standard() -> Vec<FormulaCase> {
        const ROWS: [([f64; 2], [f64; 2], f64); 5] = [
            ([1.0, 0.0], [0.0, 1.0], 1.0),
            ([2.0, 0.0], [0.0, 3.0], 6.0),
            ([1.0, 2.0], [3.0, 1.0], -5.0),
            ([3.0, 1.0], [1.0, 2.0], 5.0),
            ([2.0, 4.0], [4.0, 8.0], 0.0),
        ];
        ROWS.iter()
            .map(|&(u, v, expected)| {
                FormulaCase::new(Vector2::from(u), Vector2::from(v), expected)
            })
            .collect()
    }
}

/// Outcome of running a formula against the whole battery.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationResult {
    pub valid: bool,
    pub matches: usize,
    pub total: usize,
    /// One line per mismatching or failing case, or the compile error.
    pub details: Vec<String>,
    pub compile_error: Option<FormulaError>,
    /// The parsed formula, present exactly when `compile_error` is `None`.
    pub compiled: Option<CompiledFormula>,
}

impl ValidationResult {
    /// One-line summary for feedback panels.
    pub fn message(&self) -> String {
        if self.compile_error.is_some() {
            SYNTAX_ERROR_MESSAGE.to_string()
        } else if self.valid {
            format!("perfect match: formula agrees with all {} cases", self.total)
        } else {
            format!("matched {}/{} cases", self.matches, self.total)
        }
    }
}

/// Outcome of evaluating a formula on the live `(u, v)` pair.
#[derive(Clone, Debug, PartialEq)]
pub struct CurrentEvaluation {
    pub valid: bool,
    pub result: Option<f64>,
    pub message: String,
}

/// Checks typed formulas against a battery of determinant cases.
#[derive(Clone, Debug)]
pub struct FormulaValidator {
    cases: Vec<FormulaCase>,
}

impl Default for FormulaValidator {
    fn default() -> Self {
        Self {
            cases: FormulaCase::standard(),
        }
    }
}

impl FormulaValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cases(cases: Vec<FormulaCase>) -> Self {
        Self { cases }
    }

    pub fn cases(&self) -> &[FormulaCase] {
        &self.cases
    }

    /// Compile `formula` and evaluate it on every case.
    ///
    /// A case matches when `|result - expected| < 1e-3`. Evaluation errors are
    /// recorded in `details` and do not stop the remaining cases.
    pub fn validate_formula(&self, formula: &str) -> ValidationResult {
        let total = self.cases.len();
        let compiled = match CompiledFormula::compile(formula) {
            Ok(c) => c,
            Err(e) => {
                return ValidationResult {
                    valid: false,
                    matches: 0,
                    total,
                    details: vec![format!("{SYNTAX_ERROR_MESSAGE}: {e}")],
                    compile_error: Some(e),
                    compiled: None,
                }
            }
        };

        let mut matches = 0;
        let mut details = Vec::new();
        for (i, case) in self.cases.iter().enumerate() {
            match compiled.eval(case.u, case.v) {
                Ok(x) if (x - case.expected).abs() < FORMULA_MATCH_EPS => matches += 1,
                Ok(x) => details.push(format!(
                    "case {}: computed {:.2}, expected {}",
                    i + 1,
                    x,
                    case.expected
                )),
                Err(e) => details.push(format!("case {}: evaluation error - {e}", i + 1)),
            }
        }

        ValidationResult {
            valid: matches == total,
            matches,
            total,
            details,
            compile_error: None,
            compiled: Some(compiled),
        }
    }

    /// Evaluate `formula` on a single live pair for immediate feedback.
    pub fn validate_current(
        &self,
        formula: &str,
        u: Vector2<f64>,
        v: Vector2<f64>,
    ) -> CurrentEvaluation {
        let compiled = match CompiledFormula::compile(formula) {
            Ok(c) => c,
            Err(_) => {
                return CurrentEvaluation {
                    valid: false,
                    result: None,
                    message: SYNTAX_ERROR_MESSAGE.to_string(),
                }
            }
        };
        match compiled.eval(u, v) {
            Ok(x) => CurrentEvaluation {
                valid: true,
                result: Some(x),
                message: format!("current value: {x:.2}"),
            },
            Err(e) => CurrentEvaluation {
                valid: false,
                result: None,
                message: format!("evaluation error: {e}"),
            },
        }
    }
}
