//! Static prefix/unit registry.
//!
//! Registry *contents* are an external collaborator — a real deployment
//! generates this table from the upstream UCUM essence XML. This module
//! hand-authors a representative slice of that table (the seven base
//! units, the full SI + binary prefix set, and enough derived/special/
//! arbitrary units to exercise every rule in the conversion and quantity
//! layers) against the schema in §6.1.

use crate::dimension::Dimension;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Prefix {
    pub symbol: &'static str,
    pub name: &'static str,
    pub multiplier: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Definition {
    /// `(scalar, unit_expr_str)` — proper derived unit, or `(scalar, "1")`
    /// for a pure dimensionless unit.
    Scalar(f64, &'static str),
    /// `(function_name, ref_value_str, ref_unit_str)` — special unit.
    Special(&'static str, &'static str, &'static str),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitRecord {
    pub code: &'static str,
    pub class: &'static str,
    pub is_base: bool,
    pub is_metric: bool,
    pub is_special: bool,
    pub dimension: Option<Dimension>,
    pub definition: Definition,
    pub property: &'static str,
}

macro_rules! base_dim {
    ($slot:expr, $exp:expr) => {{
        let mut v = [0i8; 7];
        v[$slot] = $exp;
        Some(Dimension(v))
    }};
}

use crate::dimension::{A, F, L, M, Q, T, THETA};

pub static PREFIXES: &[Prefix] = &[
    Prefix { symbol: "Y", name: "yotta", multiplier: 1e24 },
    Prefix { symbol: "Z", name: "zetta", multiplier: 1e21 },
    Prefix { symbol: "E", name: "exa", multiplier: 1e18 },
    Prefix { symbol: "P", name: "peta", multiplier: 1e15 },
    Prefix { symbol: "T", name: "tera", multiplier: 1e12 },
    Prefix { symbol: "G", name: "giga", multiplier: 1e9 },
    Prefix { symbol: "M", name: "mega", multiplier: 1e6 },
    Prefix { symbol: "k", name: "kilo", multiplier: 1e3 },
    Prefix { symbol: "h", name: "hecto", multiplier: 1e2 },
    Prefix { symbol: "da", name: "deka", multiplier: 1e1 },
    Prefix { symbol: "d", name: "deci", multiplier: 1e-1 },
    Prefix { symbol: "c", name: "centi", multiplier: 1e-2 },
    Prefix { symbol: "m", name: "milli", multiplier: 1e-3 },
    Prefix { symbol: "u", name: "micro", multiplier: 1e-6 },
    Prefix { symbol: "n", name: "nano", multiplier: 1e-9 },
    Prefix { symbol: "p", name: "pico", multiplier: 1e-12 },
    Prefix { symbol: "f", name: "femto", multiplier: 1e-15 },
    Prefix { symbol: "a", name: "atto", multiplier: 1e-18 },
    Prefix { symbol: "z", name: "zepto", multiplier: 1e-21 },
    Prefix { symbol: "y", name: "yocto", multiplier: 1e-24 },
    Prefix { symbol: "Ki", name: "kibi", multiplier: 1024.0 },
    Prefix { symbol: "Mi", name: "mebi", multiplier: 1024.0 * 1024.0 },
    Prefix { symbol: "Gi", name: "gibi", multiplier: 1024.0 * 1024.0 * 1024.0 },
    Prefix { symbol: "Ti", name: "tebi", multiplier: 1024.0 * 1024.0 * 1024.0 * 1024.0 },
];

pub fn find_prefix(symbol: &str) -> Option<&'static Prefix> {
    PREFIXES.iter().find(|p| p.symbol == symbol)
}

pub static UNITS: &[UnitRecord] = &[
    // --- Seven base units -------------------------------------------------
    UnitRecord { code: "m", class: "si", is_base: true, is_metric: true, is_special: false, dimension: base_dim!(L, 1), definition: Definition::Scalar(1.0, "1"), property: "length" },
    UnitRecord { code: "s", class: "si", is_base: true, is_metric: true, is_special: false, dimension: base_dim!(T, 1), definition: Definition::Scalar(1.0, "1"), property: "time" },
    UnitRecord { code: "g", class: "si", is_base: true, is_metric: true, is_special: false, dimension: base_dim!(M, 1), definition: Definition::Scalar(1.0, "1"), property: "mass" },
    UnitRecord { code: "rad", class: "si", is_base: true, is_metric: true, is_special: false, dimension: base_dim!(A, 1), definition: Definition::Scalar(1.0, "1"), property: "angle" },
    UnitRecord { code: "K", class: "si", is_base: true, is_metric: true, is_special: false, dimension: base_dim!(THETA, 1), definition: Definition::Scalar(1.0, "1"), property: "temperature" },
    UnitRecord { code: "C", class: "si", is_base: true, is_metric: true, is_special: false, dimension: base_dim!(Q, 1), definition: Definition::Scalar(1.0, "1"), property: "charge" },
    UnitRecord { code: "cd", class: "si", is_base: true, is_metric: true, is_special: false, dimension: base_dim!(F, 1), definition: Definition::Scalar(1.0, "1"), property: "luminous intensity" },

    // --- Dimensionless -----------------------------------------------------
    UnitRecord { code: "1", class: "dimless", is_base: false, is_metric: false, is_special: false, dimension: None, definition: Definition::Scalar(1.0, "1"), property: "number" },
    UnitRecord { code: "%", class: "dimless", is_base: false, is_metric: false, is_special: false, dimension: None, definition: Definition::Scalar(1e-2, "1"), property: "fraction" },
    UnitRecord { code: "[pi]", class: "dimless", is_base: false, is_metric: false, is_special: false, dimension: None, definition: Definition::Scalar(std::f64::consts::PI, "1"), property: "number" },
    UnitRecord { code: "10*", class: "dimless", is_base: false, is_metric: false, is_special: false, dimension: None, definition: Definition::Scalar(10.0, "1"), property: "number" },
    UnitRecord { code: "10^", class: "dimless", is_base: false, is_metric: false, is_special: false, dimension: None, definition: Definition::Scalar(10.0, "1"), property: "number" },
    UnitRecord { code: "sr", class: "si", is_base: false, is_metric: true, is_special: false, dimension: None, definition: Definition::Scalar(1.0, "rad2"), property: "solid angle" },
    UnitRecord { code: "deg", class: "iso1000", is_base: false, is_metric: false, is_special: false, dimension: None, definition: Definition::Scalar(std::f64::consts::PI / 180.0, "rad"), property: "angle" },

    // --- Time / frequency ----------------------------------------------------
    UnitRecord { code: "min", class: "iso1000", is_base: false, is_metric: false, is_special: false, dimension: None, definition: Definition::Scalar(60.0, "s"), property: "time" },
    UnitRecord { code: "h", class: "iso1000", is_base: false, is_metric: false, is_special: false, dimension: None, definition: Definition::Scalar(60.0, "min"), property: "time" },
    UnitRecord { code: "d", class: "iso1000", is_base: false, is_metric: false, is_special: false, dimension: None, definition: Definition::Scalar(24.0, "h"), property: "time" },
    UnitRecord { code: "Hz", class: "si", is_base: false, is_metric: true, is_special: false, dimension: None, definition: Definition::Scalar(1.0, "s-1"), property: "frequency" },

    // --- Mechanics ------------------------------------------------------------
    UnitRecord { code: "N", class: "si", is_base: false, is_metric: true, is_special: false, dimension: None, definition: Definition::Scalar(1.0, "kg.m/s2"), property: "force" },
    UnitRecord { code: "Pa", class: "si", is_base: false, is_metric: true, is_special: false, dimension: None, definition: Definition::Scalar(1.0, "N/m2"), property: "pressure" },
    UnitRecord { code: "J", class: "si", is_base: false, is_metric: true, is_special: false, dimension: None, definition: Definition::Scalar(1.0, "N.m"), property: "energy" },
    UnitRecord { code: "W", class: "si", is_base: false, is_metric: true, is_special: false, dimension: None, definition: Definition::Scalar(1.0, "J/s"), property: "power" },
    UnitRecord { code: "L", class: "si", is_base: false, is_metric: true, is_special: false, dimension: None, definition: Definition::Scalar(1.0, "dm3"), property: "volume" },
    UnitRecord { code: "dm", class: "si-derived", is_base: false, is_metric: false, is_special: false, dimension: None, definition: Definition::Scalar(1e-1, "m"), property: "length" },
    UnitRecord { code: "mol", class: "si", is_base: false, is_metric: true, is_special: false, dimension: None, definition: Definition::Scalar(1.0, "1"), property: "amount of substance" },

    // --- Electrical -------------------------------------------------------------
    UnitRecord { code: "V", class: "si", is_base: false, is_metric: true, is_special: false, dimension: None, definition: Definition::Scalar(1.0, "J/C"), property: "electric potential" },
    UnitRecord { code: "Ohm", class: "si", is_base: false, is_metric: true, is_special: false, dimension: None, definition: Definition::Scalar(1.0, "V/A"), property: "resistance" },
    UnitRecord { code: "A", class: "si", is_base: false, is_metric: true, is_special: false, dimension: None, definition: Definition::Scalar(1.0, "C/s"), property: "current" },

    // --- Temperature (special) ---------------------------------------------------
    UnitRecord { code: "Cel", class: "si", is_base: false, is_metric: true, is_special: true, dimension: None, definition: Definition::Special("Cel", "1", "K"), property: "temperature" },
    UnitRecord { code: "[degF]", class: "clinical", is_base: false, is_metric: false, is_special: true, dimension: None, definition: Definition::Special("degF", "1", "K"), property: "temperature" },
    UnitRecord { code: "[degRe]", class: "clinical", is_base: false, is_metric: false, is_special: true, dimension: None, definition: Definition::Special("degRe", "1", "K"), property: "temperature" },

    // --- Logarithmic / trigonometric (special) ------------------------------------
    UnitRecord { code: "Np", class: "clinical", is_base: false, is_metric: true, is_special: true, dimension: None, definition: Definition::Special("ln", "1", "1"), property: "level" },
    UnitRecord { code: "B", class: "clinical", is_base: false, is_metric: true, is_special: true, dimension: None, definition: Definition::Special("lg", "1", "1"), property: "level" },
    UnitRecord { code: "B[W]", class: "clinical", is_base: false, is_metric: false, is_special: true, dimension: None, definition: Definition::Special("lg", "1", "W"), property: "level" },
    UnitRecord { code: "B[SPL]", class: "clinical", is_base: false, is_metric: false, is_special: true, dimension: None, definition: Definition::Special("lg", "2e-5", "Pa"), property: "level" },
    UnitRecord { code: "bit_s", class: "infotech", is_base: false, is_metric: true, is_special: true, dimension: None, definition: Definition::Special("ld", "1", "1"), property: "information" },
    UnitRecord { code: "[pH]", class: "chemical", is_base: false, is_metric: false, is_special: true, dimension: None, definition: Definition::Special("pH", "1", "mol/L"), property: "acidity" },
    UnitRecord { code: "[p'diop]", class: "clinical", is_base: false, is_metric: false, is_special: true, dimension: None, definition: Definition::Special("tanTimes100", "1", "rad"), property: "refraction" },
    UnitRecord { code: "%[slope]", class: "clinical", is_base: false, is_metric: false, is_special: true, dimension: None, definition: Definition::Special("100tan", "1", "deg"), property: "slope" },

    // --- Homeopathic potencies (special) --------------------------------------------
    UnitRecord { code: "[hp_X]", class: "homeopathic", is_base: false, is_metric: false, is_special: true, dimension: None, definition: Definition::Special("hpX", "1", "1"), property: "homeopathic potency" },
    UnitRecord { code: "[hp_C]", class: "homeopathic", is_base: false, is_metric: false, is_special: true, dimension: None, definition: Definition::Special("hpC", "1", "1"), property: "homeopathic potency" },
    UnitRecord { code: "[hp_M]", class: "homeopathic", is_base: false, is_metric: false, is_special: true, dimension: None, definition: Definition::Special("hpM", "1", "1"), property: "homeopathic potency" },
    UnitRecord { code: "[hp_Q]", class: "homeopathic", is_base: false, is_metric: false, is_special: true, dimension: None, definition: Definition::Special("hpQ", "1", "1"), property: "homeopathic potency" },

    // --- Arbitrary units -------------------------------------------------------------
    UnitRecord { code: "[IU]", class: "arbitrary", is_base: false, is_metric: false, is_special: false, dimension: None, definition: Definition::Scalar(1.0, "1"), property: "arbitrary" },
    UnitRecord { code: "[arb'U]", class: "arbitrary", is_base: false, is_metric: false, is_special: false, dimension: None, definition: Definition::Scalar(1.0, "1"), property: "arbitrary" },

    // --- Imperial / US length, used in round-trip tests -------------------------------
    UnitRecord { code: "[ft_i]", class: "us-lengths", is_base: false, is_metric: false, is_special: false, dimension: None, definition: Definition::Scalar(12.0, "[in_i]"), property: "length" },
    UnitRecord { code: "[in_i]", class: "us-lengths", is_base: false, is_metric: false, is_special: false, dimension: None, definition: Definition::Scalar(2.54, "cm"), property: "length" },
    UnitRecord { code: "cm", class: "si-derived", is_base: false, is_metric: false, is_special: false, dimension: None, definition: Definition::Scalar(1e-2, "m"), property: "length" },
];

pub fn find_unit(code: &str) -> Option<&'static UnitRecord> {
    UNITS.iter().find(|u| u.code == code)
}

/// `code` is a registry unit and metric, i.e. eligible to carry a prefix.
pub fn is_metric_unit(code: &str) -> bool {
    find_unit(code).map(|u| u.is_metric).unwrap_or(false)
}
