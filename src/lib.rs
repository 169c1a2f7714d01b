//! UCUM core library
//!
//! Parsing, canonicalization, conversion and quantity algebra for the
//! Unified Code for Units of Measure (UCUM). The pipeline is: a total
//! [`lexer`] feeds a diagnostics-accumulating [`parser`], whose AST is
//! reduced by [`canonical`] into a [`canonical::CanonicalForm`] — the
//! common currency [`conversion`] and [`quantity`] build on.

#![allow(clippy::result_large_err)]

mod ast;
pub mod canonical;
pub mod conversion;
pub mod diagnostics;
pub mod dimension;
mod lexer;
pub mod parser;
pub mod quantity;
pub mod registry;
pub mod special;

pub use crate::ast::{BinaryOp, ExponentFormat, Expression};
pub use crate::canonical::{to_canonical, to_canonical_str, CanonicalForm, SpecialMarker};
pub use crate::diagnostics::{
    ParseError, ParseErrorKind, ParseWarning, ParseWarningKind, Span, UcumError,
};
pub use crate::dimension::Dimension;
pub use crate::parser::{parse, ParseResult};
pub use crate::quantity::{Quantity, UnitKind};
pub use crate::registry::{find_prefix, find_unit, Prefix, UnitRecord, PREFIXES, UNITS};

/// Parse and canonicalize `expression`, rejecting it outright if parsing
/// recorded any diagnostics — the convenience entry point for callers who
/// just want a working [`CanonicalForm`] or a single [`UcumError`].
pub fn canonicalize(expression: &str) -> Result<CanonicalForm, UcumError> {
    to_canonical_str(expression)
}

/// Whether `from` and `to` share a dimension and can be converted between.
pub fn is_convertible(from: &str, to: &str) -> Result<bool, UcumError> {
    conversion::is_convertible(from, to)
}

/// The pure linear ratio `from -> to`. Fails with
/// [`UcumError::SpecialUnitArithmetic`] if either side is a special unit —
/// use [`convert`] for those.
pub fn conversion_factor(from: &str, to: &str) -> Result<f64, UcumError> {
    conversion::conversion_factor(from, to)
}

/// Convert `value` from unit `from` to unit `to`, handling the pure linear,
/// special-to-linear and special-to-special paths transparently.
pub fn convert(value: f64, from: &str, to: &str) -> Result<f64, UcumError> {
    conversion::convert(value, from, to)
}

/// Construct a [`Quantity`], validating `unit` eagerly.
pub fn quantity(value: f64, unit: impl Into<String>) -> Result<Quantity, UcumError> {
    Quantity::new(value, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_convert_matches_kilogram_to_gram() {
        assert_eq!(convert(1.0, "kg", "g").unwrap(), 1000.0);
    }

    #[test]
    fn public_canonicalize_surfaces_registry_miss() {
        assert!(canonicalize("not_a_real_unit").is_err());
    }

    #[test]
    fn public_quantity_roundtrips_through_add() {
        let a = quantity(5.0, "kg").unwrap();
        let b = quantity(3000.0, "g").unwrap();
        let sum = a.add(&b).unwrap();
        assert!((sum.value - 8.0).abs() < 1e-9);
    }
}
