use thiserror::Error;

/// Compile-time failure: the formula text is not a well-formed expression.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FormulaError {
    #[error("formula is empty")]
    Empty,

    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("unknown identifier '{name}' at position {pos}")]
    UnknownIdentifier { name: String, pos: usize },

    #[error("invalid number '{text}' at position {pos}")]
    InvalidNumber { text: String, pos: usize },

    #[error("unexpected {found} at position {pos}")]
    UnexpectedToken { found: String, pos: usize },

    #[error("unexpected end of formula")]
    UnexpectedEnd,

    #[error("formula is {len} characters long, at most {max} are allowed")]
    TooLong { len: usize, max: usize },

    #[error("formula nests deeper than {max} levels at position {pos}")]
    TooDeep { pos: usize, max: usize },
}

/// Runtime failure while evaluating a compiled formula on concrete vectors.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a finite number")]
    NonFinite,
}
