use std::fmt;

use super::normalize::{normalize, VARIABLES};

/// Feedback for a formula that failed validation. Rules are checked in
/// declaration order and the first match wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hint {
    /// Some of `a, b, c, d` never appear.
    IncludeAllVariables,
    /// No `-` anywhere.
    UseSubtraction,
    /// Both `a*d` and `b*c` appear; likely the operands of `-` are swapped.
    CheckSubtractionOrder,
    KeepTrying,
}

impl Hint {
    pub fn message(self) -> &'static str {
        match self {
            Hint::IncludeAllVariables => {
                "hint: try an expression that uses all four variables a, b, c, d"
            }
            Hint::UseSubtraction => "hint: try an expression that contains a subtraction",
            Hint::CheckSubtractionOrder => "very close! check the order of the subtraction",
            Hint::KeepTrying => "keep going! look at how the diagonal entries relate",
        }
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Text-level heuristic over the normalized formula; never compiles it.
pub fn hint(formula: &str) -> Hint {
    let normalized = normalize(formula);
    if !VARIABLES.iter().all(|&v| normalized.contains(v)) {
        Hint::IncludeAllVariables
    } else if !normalized.contains('-') {
        Hint::UseSubtraction
    } else if normalized.contains("a*d") && normalized.contains("b*c") {
        Hint::CheckSubtractionOrder
    } else {
        Hint::KeepTrying
    }
}
