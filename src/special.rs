//! The frozen registry of fifteen special (non-linear) unit functions.
//!
//! Each entry is a forward/inverse pair plus an input-domain predicate.
//! Formulas are reproduced verbatim from UCUM §21–§22 — nothing here is
//! re-derived from prose, so read this table alongside the conversion
//! engine rather than trying to simplify the expressions.

use crate::diagnostics::UcumError;
use phf::phf_map;

pub struct SpecialFunction {
    pub forward: fn(f64) -> f64,
    pub inverse: fn(f64) -> f64,
    pub input_domain: fn(f64) -> bool,
}

fn always(_: f64) -> bool {
    true
}
fn positive(x: f64) -> bool {
    x > 0.0
}
fn non_negative_kelvin(x: f64) -> bool {
    x >= 0.0
}

fn cel_forward(k: f64) -> f64 {
    k - 273.15
}
fn cel_inverse(c: f64) -> f64 {
    c + 273.15
}

fn deg_f_forward(k: f64) -> f64 {
    k * 9.0 / 5.0 - 459.67
}
fn deg_f_inverse(f: f64) -> f64 {
    (f + 459.67) * 5.0 / 9.0
}

fn deg_re_forward(k: f64) -> f64 {
    (k - 273.15) * 4.0 / 5.0
}
fn deg_re_inverse(r: f64) -> f64 {
    r * 5.0 / 4.0 + 273.15
}

fn ln_forward(x: f64) -> f64 {
    x.ln()
}
fn ln_inverse(x: f64) -> f64 {
    x.exp()
}

fn lg_forward(x: f64) -> f64 {
    x.log10()
}
fn lg_inverse(x: f64) -> f64 {
    10f64.powf(x)
}

fn lg_times2_forward(x: f64) -> f64 {
    2.0 * x.log10()
}
fn lg_times2_inverse(x: f64) -> f64 {
    10f64.powf(x / 2.0)
}

fn ld_forward(x: f64) -> f64 {
    x.log2()
}
fn ld_inverse(x: f64) -> f64 {
    2f64.powf(x)
}

fn ph_forward(x: f64) -> f64 {
    -x.log10()
}
fn ph_inverse(x: f64) -> f64 {
    10f64.powf(-x)
}

fn tan_times_100_forward(x_rad: f64) -> f64 {
    100.0 * x_rad.tan()
}
fn tan_times_100_inverse(x: f64) -> f64 {
    (x / 100.0).atan()
}

fn hundred_tan_forward(x_deg: f64) -> f64 {
    100.0 * (x_deg * std::f64::consts::PI / 180.0).tan()
}
fn hundred_tan_inverse(x: f64) -> f64 {
    (x / 100.0).atan() * 180.0 / std::f64::consts::PI
}

fn hp_x_forward(x: f64) -> f64 {
    -x.log10()
}
fn hp_x_inverse(x: f64) -> f64 {
    10f64.powf(-x)
}

fn hp_c_forward(x: f64) -> f64 {
    -x.ln() / 100f64.ln()
}
fn hp_c_inverse(x: f64) -> f64 {
    100f64.powf(-x)
}

fn hp_m_forward(x: f64) -> f64 {
    -x.ln() / 1000f64.ln()
}
fn hp_m_inverse(x: f64) -> f64 {
    1000f64.powf(-x)
}

fn hp_q_forward(x: f64) -> f64 {
    -x.ln() / 50000f64.ln()
}
fn hp_q_inverse(x: f64) -> f64 {
    50000f64.powf(-x)
}

fn sqrt_forward(x: f64) -> f64 {
    x.sqrt()
}
fn sqrt_inverse(x: f64) -> f64 {
    x * x
}

pub static REGISTRY: phf::Map<&'static str, SpecialFunction> = phf_map! {
    "Cel" => SpecialFunction { forward: cel_forward, inverse: cel_inverse, input_domain: non_negative_kelvin },
    "degF" => SpecialFunction { forward: deg_f_forward, inverse: deg_f_inverse, input_domain: non_negative_kelvin },
    "degRe" => SpecialFunction { forward: deg_re_forward, inverse: deg_re_inverse, input_domain: non_negative_kelvin },
    "ln" => SpecialFunction { forward: ln_forward, inverse: ln_inverse, input_domain: positive },
    "lg" => SpecialFunction { forward: lg_forward, inverse: lg_inverse, input_domain: positive },
    "lgTimes2" => SpecialFunction { forward: lg_times2_forward, inverse: lg_times2_inverse, input_domain: positive },
    "ld" => SpecialFunction { forward: ld_forward, inverse: ld_inverse, input_domain: positive },
    "pH" => SpecialFunction { forward: ph_forward, inverse: ph_inverse, input_domain: positive },
    "tanTimes100" => SpecialFunction { forward: tan_times_100_forward, inverse: tan_times_100_inverse, input_domain: always },
    "100tan" => SpecialFunction { forward: hundred_tan_forward, inverse: hundred_tan_inverse, input_domain: always },
    "hpX" => SpecialFunction { forward: hp_x_forward, inverse: hp_x_inverse, input_domain: positive },
    "hpC" => SpecialFunction { forward: hp_c_forward, inverse: hp_c_inverse, input_domain: positive },
    "hpM" => SpecialFunction { forward: hp_m_forward, inverse: hp_m_inverse, input_domain: positive },
    "hpQ" => SpecialFunction { forward: hp_q_forward, inverse: hp_q_inverse, input_domain: positive },
    "sqrt" => SpecialFunction { forward: sqrt_forward, inverse: sqrt_inverse, input_domain: |x| x >= 0.0 },
};

pub fn lookup(function_name: &str) -> Option<&'static SpecialFunction> {
    REGISTRY.get(function_name)
}

pub fn forward(function_name: &str, value: f64) -> Result<f64, UcumError> {
    let f = lookup(function_name).ok_or_else(|| UcumError::DomainViolation {
        function_name: function_name.to_string(),
        value,
        reason: "unknown special function".to_string(),
    })?;
    if !(f.input_domain)(value) {
        return Err(UcumError::DomainViolation {
            function_name: function_name.to_string(),
            value,
            reason: "input outside valid domain".to_string(),
        });
    }
    Ok((f.forward)(value))
}

pub fn inverse(function_name: &str, value: f64) -> Result<f64, UcumError> {
    let f = lookup(function_name).ok_or_else(|| UcumError::DomainViolation {
        function_name: function_name.to_string(),
        value,
        reason: "unknown special function".to_string(),
    })?;
    let result = (f.inverse)(value);
    if !(f.input_domain)(result) {
        return Err(UcumError::DomainViolation {
            function_name: function_name.to_string(),
            value: result,
            reason: "inverse result outside valid domain".to_string(),
        });
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn celsius_round_trips() {
        let k = inverse("Cel", 0.0).unwrap();
        assert!((k - 273.15).abs() < 1e-10);
        let c = forward("Cel", k).unwrap();
        assert!((c - 0.0).abs() < 1e-10);
    }

    #[test]
    fn fahrenheit_matches_known_points() {
        let f = forward("degF", 373.15).unwrap();
        assert!((f - 212.0).abs() < 1e-10);
    }

    #[test]
    fn ph_rejects_non_positive_input() {
        assert!(forward("pH", 0.0).is_err());
        assert!(forward("pH", -1.0).is_err());
    }

    #[test]
    fn temperature_forward_rejects_negative_kelvin() {
        assert!(forward("Cel", -1.0).is_err());
    }

    #[test]
    fn sqrt_rejects_negative_input() {
        assert!(forward("sqrt", -4.0).is_err());
        assert!((forward("sqrt", 4.0).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn all_fifteen_functions_present() {
        let names = [
            "Cel", "degF", "degRe", "ln", "lg", "lgTimes2", "ld", "pH", "tanTimes100",
            "100tan", "hpX", "hpC", "hpM", "hpQ", "sqrt",
        ];
        for name in names {
            assert!(lookup(name).is_some(), "missing special function {name}");
        }
        assert_eq!(REGISTRY.len(), 15);
    }
}
