//! UCUM expression AST. A tagged sum type over the grammar in §4.2,
//! carrying source spans so diagnostics can point back into the input.

use crate::diagnostics::Span;
use smallvec::SmallVec;

/// How an exponent was written on the surface; semantics never depend on
/// this, it exists purely for round-tripping/diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExponentFormat {
    /// No sign and no `^`: either no exponent token at all (the value
    /// defaults to 1) or a bare unsigned digit run right after the atom,
    /// e.g. the `2` in `m2`.
    Implicit,
    /// `^` followed by an optionally-signed digit run.
    Caret,
    /// An explicitly-signed digit run with no `^`, e.g. `m-2`/`m+2`.
    Signed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOp {
    Mul,
    Div,
}

/// A single node of a parsed UCUM expression.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expression {
    /// `prefix? atom exponent?`, e.g. `km`, `s-2`, `m.` (no prefix).
    Unit {
        prefix: Option<String>,
        atom: String,
        exponent: i32,
        exponent_format: ExponentFormat,
        annotation: Option<String>,
        span: Span,
    },
    /// A bare positive integer literal, e.g. the `10` in `10.m`.
    Factor {
        value: u64,
        annotation: Option<String>,
        span: Span,
    },
    /// `left (.|/) right`, left-associative, `.` and `/` at equal precedence.
    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
        span: Span,
    },
    /// Leading `/term`.
    Unary {
        operand: Box<Expression>,
        span: Span,
    },
    /// Parenthesized sub-expression; transparent to canonicalization but
    /// preserved so the AST reflects what the user actually wrote.
    Group { inner: Box<Expression>, span: Span },
}

impl Expression {
    pub fn span(&self) -> Span {
        match self {
            Expression::Unit { span, .. }
            | Expression::Factor { span, .. }
            | Expression::Binary { span, .. }
            | Expression::Unary { span, .. }
            | Expression::Group { span, .. } => *span,
        }
    }
}

/// Small inline buffer for factor lists produced while flattening a chain
/// of `.`/`/` operators during canonicalization; most UCUM expressions
/// have only a handful of components.
pub type SmallFactorVec<T> = SmallVec<[T; 8]>;
