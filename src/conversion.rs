//! Conversion engine: turns two canonicalized unit expressions and a
//! value into a converted scalar, covering the three paths from §4.5 —
//! pure linear, special↔linear, and special↔special — plus the α
//! (prefix scale factor) detection rule for prefixed metric specials.

use crate::canonical::{to_canonical_str, CanonicalForm};
use crate::diagnostics::UcumError;
use crate::special;

/// §6.4's scale-factor table: for these four function names the base
/// (unprefixed) canonical magnitude is exactly 1, so any magnitude
/// deviation from 1 on an instance of one of them indicates a metric
/// prefix and becomes α. Every other special function's magnitude
/// deviation comes from its reference unit's own scalar, not a prefix,
/// so α stays 1 regardless.
const PREFIXABLE_UNIT_MAGNITUDE: &[&str] = &["Cel", "ln", "lg", "ld"];

fn scale_factor(form: &CanonicalForm) -> f64 {
    match &form.special {
        None => 1.0,
        Some(marker) => {
            if PREFIXABLE_UNIT_MAGNITUDE.contains(&marker.function_name) && form.magnitude != 1.0 {
                form.magnitude
            } else {
                1.0
            }
        }
    }
}

fn is_temperature_family(function_name: &str) -> bool {
    matches!(function_name, "Cel" | "degF" | "degRe")
}

pub fn is_convertible(from: &str, to: &str) -> Result<bool, UcumError> {
    let from_canon = to_canonical_str(from)?;
    let to_canon = to_canonical_str(to)?;
    Ok(from_canon.dimension == to_canon.dimension)
}

/// Errors if either side is special — callers wanting a pure linear ratio
/// should use this rather than `convert`, per §6.3.
pub fn conversion_factor(from: &str, to: &str) -> Result<f64, UcumError> {
    let from_canon = to_canonical_str(from)?;
    let to_canon = to_canonical_str(to)?;
    if from_canon.is_special() || to_canon.is_special() {
        return Err(UcumError::SpecialUnitArithmetic {
            unit: if from_canon.is_special() {
                from.to_string()
            } else {
                to.to_string()
            },
            operation: "conversion_factor".to_string(),
        });
    }
    check_dimensions(&from_canon, &to_canon, "conversion_factor")?;
    Ok(from_canon.magnitude / to_canon.magnitude)
}

pub fn convert(value: f64, from: &str, to: &str) -> Result<f64, UcumError> {
    if from == to {
        return Ok(value);
    }
    let from_canon = to_canonical_str(from)?;
    let to_canon = to_canonical_str(to)?;

    // Conversion reflexivity short-circuit (§4.5 idempotence): structurally
    // identical canonical forms convert without touching the special path.
    if from_canon == to_canon {
        return Ok(value);
    }

    check_dimensions(&from_canon, &to_canon, "convert")?;

    if !from_canon.is_special() && !to_canon.is_special() {
        return Ok(value * from_canon.magnitude / to_canon.magnitude);
    }

    convert_special(value, &from_canon, &to_canon)
}

fn check_dimensions(
    from_canon: &CanonicalForm,
    to_canon: &CanonicalForm,
    context: &str,
) -> Result<(), UcumError> {
    if from_canon.dimension != to_canon.dimension {
        return Err(UcumError::IncompatibleDimensions {
            from_dim: from_canon.dimension.to_string(),
            to_dim: to_canon.dimension.to_string(),
            context: context.to_string(),
        });
    }
    Ok(())
}

/// Implements the order of operations in §4.5: `m = inverse(α_from · v)`
/// on the way in, an asymmetric linear bridge in the middle, then
/// `forward(m) / α_to` on the way out.
///
/// The bridge is asymmetric: a temperature-family special (or any special
/// instance detected as carrying a nonzero prefix, α ≠ 1) has already
/// absorbed its full magnitude into the forward/inverse function, so
/// applying the canonical magnitude ratio on top would double-count it.
/// Every other special (e.g. `B[W]`, whose reference unit `1 W` carries
/// its own scalar) does need the ratio applied, same as a proper unit.
fn convert_special(value: f64, from_canon: &CanonicalForm, to_canon: &CanonicalForm) -> Result<f64, UcumError> {
    let alpha_from = scale_factor(from_canon);
    let alpha_to = scale_factor(to_canon);

    // Step 1: from special-space (or linear) into the from-side proper value.
    let mut m = match &from_canon.special {
        Some(marker) => special::inverse(marker.function_name, alpha_from * value)?,
        None => value,
    };

    let from_skips_ratio = from_canon
        .special
        .as_ref()
        .map(|marker| is_temperature_family(marker.function_name) || alpha_from != 1.0)
        .unwrap_or(false);
    if !from_skips_ratio {
        m *= from_canon.magnitude;
    }

    let to_skips_ratio = to_canon
        .special
        .as_ref()
        .map(|marker| is_temperature_family(marker.function_name) || alpha_to != 1.0)
        .unwrap_or(false);
    if !to_skips_ratio {
        m /= to_canon.magnitude;
    }

    // Step 3: from the to-side proper value into to-side special-space.
    match &to_canon.special {
        Some(marker) => {
            let r = special::forward(marker.function_name, m)?;
            Ok(r / alpha_to)
        }
        None => Ok(m),
    }
}
