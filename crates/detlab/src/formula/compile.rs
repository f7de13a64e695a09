//! Tokenizer, recursive-descent parser and evaluator for the formula grammar.
//!
//! Grammar
//! - `expr    := term (('+' | '-') term)*`
//! - `term    := unary (('*' | '/') unary)*`
//! - `unary   := ('+' | '-') unary | primary`
//! - `primary := number | reference | '(' expr ')'`
//!
//! A `reference` is a whole-word variable `a, b, c, d` or its bound form
//! `u.x, u.y, v.x, v.y`. Positions in errors are char offsets into the
//! normalized text.
//!
//! Input length and nesting depth are capped (`cfg::MAX_FORMULA_LEN`,
//! `cfg::MAX_FORMULA_DEPTH`), which keeps the recursive parse, `eval`,
//! `Display` and drop of an `Expr` within a small stack.

use std::fmt;

use nalgebra::Vector2;

use super::error::{EvalError, FormulaError};
use crate::cfg::{MAX_FORMULA_DEPTH, MAX_FORMULA_LEN};
use super::normalize::{normalize, substitute_symbols};

/// One of the four scalar inputs of a formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    Ux,
    Uy,
    Vx,
    Vy,
}

impl Symbol {
    pub const ALL: [Symbol; 4] = [Symbol::Ux, Symbol::Uy, Symbol::Vx, Symbol::Vy];

    /// Letter the user types for this input.
    pub fn letter(self) -> char {
        match self {
            Symbol::Ux => 'a',
            Symbol::Uy => 'b',
            Symbol::Vx => 'c',
            Symbol::Vy => 'd',
        }
    }

    /// Bound reference, e.g. `u.x`.
    pub fn reference(self) -> &'static str {
        match self {
            Symbol::Ux => "u.x",
            Symbol::Uy => "u.y",
            Symbol::Vx => "v.x",
            Symbol::Vy => "v.y",
        }
    }

    #[inline]
    pub fn value(self, u: Vector2<f64>, v: Vector2<f64>) -> f64 {
        match self {
            Symbol::Ux => u.x,
            Symbol::Uy => u.y,
            Symbol::Vx => v.x,
            Symbol::Vy => v.y,
        }
    }

    fn from_word(word: &str) -> Option<Symbol> {
        Symbol::ALL
            .into_iter()
            .find(|s| word == s.reference() || (word.len() == 1 && word.starts_with(s.letter())))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    fn symbol(self) -> char {
        match self {
            BinOp::Add => '+',
            BinOp::Sub => '-',
            BinOp::Mul => '*',
            BinOp::Div => '/',
        }
    }
}

/// Parsed arithmetic expression over the four symbols.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Num(f64),
    Ref(Symbol),
    Neg(Box<Expr>),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    pub fn eval(&self, u: Vector2<f64>, v: Vector2<f64>) -> Result<f64, EvalError> {
        match self {
            Expr::Num(x) => Ok(*x),
            Expr::Ref(s) => Ok(s.value(u, v)),
            Expr::Neg(e) => Ok(-e.eval(u, v)?),
            Expr::Binary { op, lhs, rhs } => {
                let l = lhs.eval(u, v)?;
                let r = rhs.eval(u, v)?;
                match op {
                    BinOp::Add => Ok(l + r),
                    BinOp::Sub => Ok(l - r),
                    BinOp::Mul => Ok(l * r),
                    BinOp::Div if r == 0.0 => Err(EvalError::DivisionByZero),
                    BinOp::Div => Ok(l / r),
                }
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Num(x) => write!(f, "{x}"),
            Expr::Ref(s) => f.write_str(s.reference()),
            Expr::Neg(e) => write!(f, "-{e}"),
            Expr::Binary { op, lhs, rhs } => write!(f, "({lhs} {} {rhs})", op.symbol()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Num(f64),
    Ref(Symbol),
    Op(BinOp),
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Num(x) => format!("number {x}"),
            Token::Ref(s) => format!("variable {}", s.letter()),
            Token::Op(op) => format!("operator '{}'", op.symbol()),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
        }
    }
}

fn tokenize(text: &str) -> Result<Vec<(Token, usize)>, FormulaError> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        let start = i;
        match ch {
            c if c.is_whitespace() => {
                i += 1;
                continue;
            }
            '+' => tokens.push((Token::Op(BinOp::Add), start)),
            '-' => tokens.push((Token::Op(BinOp::Sub), start)),
            '*' => tokens.push((Token::Op(BinOp::Mul), start)),
            '/' => tokens.push((Token::Op(BinOp::Div), start)),
            '(' => tokens.push((Token::LParen, start)),
            ')' => tokens.push((Token::RParen, start)),
            c if c.is_ascii_digit() || c == '.' => {
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let lit: String = chars[start..i].iter().collect();
                let x = lit.parse::<f64>().map_err(|_| FormulaError::InvalidNumber {
                    text: lit.clone(),
                    pos: start,
                })?;
                tokens.push((Token::Num(x), start));
                continue;
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                i = scan_word(&chars, i);
                // dotted reference such as `u.x`
                if i + 1 < chars.len() && chars[i] == '.' && chars[i + 1].is_ascii_alphabetic() {
                    i = scan_word(&chars, i + 1);
                }
                let word: String = chars[start..i].iter().collect();
                let sym = Symbol::from_word(&word)
                    .ok_or(FormulaError::UnknownIdentifier { name: word, pos: start })?;
                tokens.push((Token::Ref(sym), start));
                continue;
            }
            c => return Err(FormulaError::UnexpectedChar { ch: c, pos: start }),
        }
        i += 1;
    }
    Ok(tokens)
}

fn scan_word(chars: &[char], mut i: usize) -> usize {
    while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
        i += 1;
    }
    i
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    idx: usize,
    depth: usize,
}

impl Parser {
    fn new(tokens: Vec<(Token, usize)>) -> Self {
        Self {
            tokens,
            idx: 0,
            depth: 0,
        }
    }

    /// Consume the current token and enter one nesting level.
    fn descend(&mut self) -> Result<(), FormulaError> {
        let pos = self.tokens.get(self.idx).map_or(0, |(_, p)| *p);
        self.idx += 1;
        self.depth += 1;
        if self.depth > MAX_FORMULA_DEPTH {
            return Err(FormulaError::TooDeep {
                pos,
                max: MAX_FORMULA_DEPTH,
            });
        }
        Ok(())
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.idx).map(|(t, _)| t)
    }

    fn next(&mut self) -> Option<(Token, usize)> {
        let tok = self.tokens.get(self.idx).cloned();
        if tok.is_some() {
            self.idx += 1;
        }
        tok
    }

    fn expr(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.term()?;
        while let Some(Token::Op(op @ (BinOp::Add | BinOp::Sub))) = self.peek() {
            let op = *op;
            self.idx += 1;
            let rhs = self.term()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.unary()?;
        while let Some(Token::Op(op @ (BinOp::Mul | BinOp::Div))) = self.peek() {
            let op = *op;
            self.idx += 1;
            let rhs = self.unary()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, FormulaError> {
        match self.peek() {
            Some(Token::Op(BinOp::Sub)) => {
                self.descend()?;
                let inner = self.unary()?;
                self.depth -= 1;
                Ok(Expr::Neg(Box::new(inner)))
            }
            Some(Token::Op(BinOp::Add)) => {
                self.descend()?;
                let inner = self.unary()?;
                self.depth -= 1;
                Ok(inner)
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Expr, FormulaError> {
        if let Some(Token::LParen) = self.peek() {
            self.descend()?;
            let inner = self.expr()?;
            self.depth -= 1;
            return match self.next() {
                Some((Token::RParen, _)) => Ok(inner),
                Some((tok, pos)) => Err(FormulaError::UnexpectedToken {
                    found: tok.describe(),
                    pos,
                }),
                None => Err(FormulaError::UnexpectedEnd),
            };
        }
        match self.next() {
            Some((Token::Num(x), _)) => Ok(Expr::Num(x)),
            Some((Token::Ref(s), _)) => Ok(Expr::Ref(s)),
            Some((tok, pos)) => Err(FormulaError::UnexpectedToken {
                found: tok.describe(),
                pos,
            }),
            None => Err(FormulaError::UnexpectedEnd),
        }
    }
}

/// A formula that parsed successfully; evaluate it with `eval`.
#[derive(Clone, Debug, PartialEq)]
pub struct CompiledFormula {
    source: String,
    normalized: String,
    expr: Expr,
}

impl CompiledFormula {
    /// Normalize and parse `formula`. Never panics; malformed text is an `Err`.
    pub fn compile(formula: &str) -> Result<Self, FormulaError> {
        let normalized = normalize(formula);
        if normalized.is_empty() {
            return Err(FormulaError::Empty);
        }
        let len = normalized.chars().count();
        if len > MAX_FORMULA_LEN {
            return Err(FormulaError::TooLong {
                len,
                max: MAX_FORMULA_LEN,
            });
        }
        let tokens = tokenize(&normalized)?;
        let mut parser = Parser::new(tokens);
        let expr = parser.expr()?;
        if let Some((tok, pos)) = parser.next() {
            return Err(FormulaError::UnexpectedToken {
                found: tok.describe(),
                pos,
            });
        }
        Ok(Self {
            source: formula.to_string(),
            normalized,
            expr,
        })
    }

    /// Evaluate on a concrete pair; division by zero and overflow are errors.
    pub fn eval(&self, u: Vector2<f64>, v: Vector2<f64>) -> Result<f64, EvalError> {
        let x = self.expr.eval(u, v)?;
        if x.is_finite() {
            Ok(x)
        } else {
            Err(EvalError::NonFinite)
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Normalized text with variables rewritten to `u.x, u.y, v.x, v.y`.
    pub fn substituted(&self) -> String {
        substitute_symbols(&self.normalized)
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }
}
