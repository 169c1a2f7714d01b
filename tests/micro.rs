//! Integration coverage for exponent-format and annotation edge cases in
//! the grammar (signed digits, caret exponents, trailing `{annotation}`).

use ucum_rs::{parse, ExponentFormat, Expression};

fn unit_exponent(expr: &Expression) -> (i32, ExponentFormat) {
    match expr {
        Expression::Unit {
            exponent,
            exponent_format,
            ..
        } => (*exponent, *exponent_format),
        other => panic!("expected a Unit node, got {other:?}"),
    }
}

#[test]
fn bare_trailing_digits_are_a_signed_exponent() {
    let result = parse("m-2");
    let (exponent, format) = unit_exponent(result.ast.as_ref().unwrap());
    assert_eq!(exponent, -2);
    assert_eq!(format, ExponentFormat::Signed);
}

#[test]
fn caret_exponent_is_recognized() {
    let result = parse("m^2");
    let (exponent, format) = unit_exponent(result.ast.as_ref().unwrap());
    assert_eq!(exponent, 2);
    assert_eq!(format, ExponentFormat::Caret);
}

#[test]
fn caret_negative_exponent_is_recognized() {
    let result = parse("s^-1");
    let (exponent, format) = unit_exponent(result.ast.as_ref().unwrap());
    assert_eq!(exponent, -1);
    assert_eq!(format, ExponentFormat::Caret);
}

#[test]
fn bare_unsigned_trailing_digit_is_implicit_not_signed() {
    let result = parse("m2");
    let (exponent, format) = unit_exponent(result.ast.as_ref().unwrap());
    assert_eq!(exponent, 2);
    assert_eq!(format, ExponentFormat::Implicit);
}

#[test]
fn missing_exponent_defaults_to_implicit_one() {
    let result = parse("kg");
    let (exponent, format) = unit_exponent(result.ast.as_ref().unwrap());
    assert_eq!(exponent, 1);
    assert_eq!(format, ExponentFormat::Implicit);
}

#[test]
fn trailing_annotation_is_attached_and_semantically_inert() {
    let result = parse("mg{total}");
    match result.ast.as_ref().unwrap() {
        Expression::Unit { annotation, .. } => {
            assert_eq!(annotation.as_deref(), Some("total"));
        }
        other => panic!("expected a Unit node, got {other:?}"),
    }
    // Same magnitude with or without the annotation.
    let with_annotation = ucum_rs::canonicalize("mg{total}").unwrap();
    let without = ucum_rs::canonicalize("mg").unwrap();
    assert_eq!(with_annotation.magnitude, without.magnitude);
}

#[test]
fn overly_long_annotation_is_flagged_as_ambiguous_warning() {
    let long = "x".repeat(60);
    let src = format!("m{{{long}}}");
    let result = parse(&src);
    assert!(!result.warnings.is_empty());
}
