//! Integration coverage for the eight-member error taxonomy and the
//! parser's total, error-accumulating behavior.

use ucum_rs::{parse, UcumError};

#[test]
fn unknown_atom_surfaces_as_registry_miss() {
    let err = ucum_rs::canonicalize("frobnicate").unwrap_err();
    assert!(matches!(err, UcumError::RegistryMiss { .. }));
}

#[test]
fn incompatible_dimensions_are_rejected() {
    let err = ucum_rs::convert(1.0, "kg", "m").unwrap_err();
    assert!(matches!(err, UcumError::IncompatibleDimensions { .. }));
}

#[test]
fn domain_violation_on_negative_kelvin_to_celsius() {
    let err = ucum_rs::convert(-1.0, "K", "Cel").unwrap_err();
    assert!(matches!(err, UcumError::DomainViolation { .. }));
}

#[test]
fn special_unit_arithmetic_is_rejected_on_conversion_factor() {
    let err = ucum_rs::conversion_factor("Cel", "K").unwrap_err();
    assert!(matches!(err, UcumError::SpecialUnitArithmetic { .. }));
}

#[test]
fn arbitrary_unit_conversion_is_rejected() {
    let q = ucum_rs::quantity(10.0, "[IU]").unwrap();
    let err = q.to_unit("mg").unwrap_err();
    assert!(matches!(err, UcumError::ArbitraryUnitConversion { .. }));
}

#[test]
fn division_by_zero_is_rejected() {
    let q = ucum_rs::quantity(10.0, "m").unwrap();
    let err = q.divide_scalar(0.0).unwrap_err();
    assert!(matches!(err, UcumError::DivisionByZero));
}

#[test]
fn invalid_unit_string_on_quantity_construction() {
    let err = ucum_rs::quantity(1.0, "not_a_unit").unwrap_err();
    assert!(matches!(err, UcumError::InvalidUnit { .. }));
}

#[test]
fn double_dot_is_accumulated_not_fatal() {
    let result = parse("kg..m");
    assert!(result.ast.is_some());
    assert!(!result.errors.is_empty());
}

#[test]
fn multiple_slashes_parse_left_associatively_without_error() {
    let result = parse("kg/m/s");
    assert!(result.ast.is_some());
    assert!(result.errors.is_empty());
}

#[test]
fn unterminated_bracket_atom_still_produces_an_ast() {
    let result = parse("[arb'U");
    assert!(result.ast.is_some());
}
