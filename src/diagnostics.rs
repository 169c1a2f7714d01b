//! Position-tagged diagnostics produced by the lexer/parser and the
//! error taxonomy surfaced by canonicalization, conversion and quantity
//! algebra.

use std::fmt;

/// A half-open byte range into the original source string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub position: usize,
    pub length: usize,
}

impl Span {
    pub const fn new(position: usize, length: usize) -> Self {
        Self { position, length }
    }

    pub const fn empty(position: usize) -> Self {
        Self { position, length: 0 }
    }
}

/// Non-fatal syntax problem recorded while parsing. The parser always
/// keeps going after recording one of these.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub position: usize,
    pub length: usize,
    pub token: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseErrorKind {
    Syntax,
    UnexpectedToken,
    UnexpectedEof,
    InvalidNumber,
}

impl ParseError {
    pub fn new(
        kind: ParseErrorKind,
        message: impl Into<String>,
        position: usize,
        length: usize,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            position,
            length,
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at position {}", self.message, self.position)
    }
}

/// Non-blocking observation about the surface form of the input.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseWarning {
    pub kind: ParseWarningKind,
    pub message: String,
    pub position: usize,
    pub length: usize,
    pub suggestion: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseWarningKind {
    DeprecatedSyntax,
    Ambiguous,
}

impl ParseWarning {
    pub fn new(
        kind: ParseWarningKind,
        message: impl Into<String>,
        position: usize,
        length: usize,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            position,
            length,
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// The closed set of failures that can cross a public API boundary.
///
/// Parser problems are accumulated rather than raised (see [`ParseError`]);
/// everything past canonicalization surfaces immediately as one of these.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UcumError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("unknown unit atom: '{atom}'")]
    RegistryMiss { atom: String },

    #[error("incompatible dimensions: {from_dim} vs {to_dim} ({context})")]
    IncompatibleDimensions {
        from_dim: String,
        to_dim: String,
        context: String,
    },

    #[error("domain violation in '{function_name}': {reason}")]
    DomainViolation {
        function_name: String,
        value: f64,
        reason: String,
    },

    #[error("arithmetic on special unit '{unit}' is not allowed: {operation}")]
    SpecialUnitArithmetic { unit: String, operation: String },

    #[error("arbitrary unit '{unit}' cannot be converted or combined: {reason}")]
    ArbitraryUnitConversion { unit: String, reason: String },

    #[error("division by zero")]
    DivisionByZero,

    #[error("invalid unit string '{input}': {reason}")]
    InvalidUnit { input: String, reason: String },
}
