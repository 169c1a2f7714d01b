//! Integration coverage for the homeopathic-potency and arbitrary-unit
//! corners of the registry, and a sampling of units used across the
//! quantity-algebra and conversion test scenarios.

use ucum_rs::{find_unit, quantity};

#[test]
fn homeopathic_potency_units_are_registered_and_special() {
    for code in ["[hp_X]", "[hp_C]", "[hp_M]", "[hp_Q]"] {
        let unit = find_unit(code).unwrap_or_else(|| panic!("missing unit {code}"));
        assert!(unit.is_special, "{code} should be marked special");
    }
}

#[test]
fn arbitrary_units_are_registered_and_flagged() {
    for code in ["[IU]", "[arb'U]"] {
        let unit = find_unit(code).unwrap_or_else(|| panic!("missing unit {code}"));
        assert_eq!(unit.class, "arbitrary");
    }
}

#[test]
fn homeopathic_potency_forward_inverse_round_trips() {
    // [hp_C]: centesimal potency, forward = -ln(x)/ln(100).
    let c = ucum_rs::convert(0.01, "1", "[hp_C]");
    assert!(c.is_ok());
    assert!((c.unwrap() - 1.0).abs() < 1e-9);
}

#[test]
fn commonly_used_clinical_units_parse_and_canonicalize() {
    let units = [
        "mg", "mg/dL", "mmol/L", "U/L", "kg/m2", "g/dL", "Cel", "[degF]", "mL", "cm", "mm",
        "[in_i]", "[ft_i]", "deg", "rad", "/min",
    ];
    for unit in units {
        ucum_rs::canonicalize(unit).unwrap_or_else(|e| panic!("failed to canonicalize {unit}: {e}"));
    }
}

#[test]
fn arbitrary_unit_quantities_only_add_when_identical() {
    let iu = quantity(10.0, "[IU]").unwrap();
    let same = quantity(5.0, "[IU]").unwrap();
    assert!(iu.add(&same).is_ok());

    let arb = quantity(5.0, "[arb'U]").unwrap();
    assert!(iu.add(&arb).is_err());
}
