//! Canonical-form engine: reduces an [`Expression`] AST to a
//! [`CanonicalForm`] — a scalar magnitude, a normalized base-unit term
//! list, and an optional special-function marker — by recursively
//! resolving atoms/prefixes against the registry and expanding derived
//! units via their definition strings.

use crate::ast::{BinaryOp, Expression, SmallFactorVec};
use crate::diagnostics::UcumError;
use crate::dimension::{base_unit_slot, Dimension};
use crate::parser;
use crate::registry::{self, Definition};
use std::cmp::Ordering;

/// One `(base_unit_code, exponent)` pair in a normalized canonical form.
pub type BaseTerm = (&'static str, i32);

/// A special-function marker: which named function governs conversion,
/// and the reference value/unit the function is defined against.
#[derive(Clone, Debug, PartialEq)]
pub struct SpecialMarker {
    pub function_name: &'static str,
    pub ref_value_str: &'static str,
    pub ref_unit_str: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CanonicalForm {
    pub magnitude: f64,
    pub dimension: Dimension,
    pub base_terms: Vec<BaseTerm>,
    pub special: Option<SpecialMarker>,
}

impl CanonicalForm {
    fn dimensionless(magnitude: f64) -> Self {
        Self {
            magnitude,
            dimension: Dimension::zero(),
            base_terms: Vec::new(),
            special: None,
        }
    }

    pub fn is_special(&self) -> bool {
        self.special.is_some()
    }

    /// Recompute `dimension` from `base_terms` via the fixed base-unit to
    /// dimension-slot map, and normalize the term list: merge identical
    /// base units, drop zero exponents, sort by base-unit key.
    fn normalize(mut self) -> Self {
        self.base_terms.sort_by(|a, b| a.0.cmp(b.0));
        let mut merged: Vec<BaseTerm> = Vec::with_capacity(self.base_terms.len());
        for term in self.base_terms.drain(..) {
            if let Some(last) = merged.last_mut() {
                if last.0 == term.0 {
                    last.1 += term.1;
                    continue;
                }
            }
            merged.push(term);
        }
        merged.retain(|(_, exp)| *exp != 0);
        merged.sort_by(|a: &BaseTerm, b: &BaseTerm| a.0.cmp(b.0));

        let mut dim = Dimension::zero();
        for (code, exp) in &merged {
            if let Some(slot) = base_unit_slot(code) {
                dim = dim.multiply(Dimension::from_slot(slot, clamp_i8(*exp)));
            }
        }
        self.base_terms = merged;
        self.dimension = dim;
        self
    }
}

fn clamp_i8(v: i32) -> i8 {
    v.clamp(i8::MIN as i32, i8::MAX as i32) as i8
}

/// Recursion guard for derived-unit definitions. Real registries are
/// acyclic by construction and only a few levels deep; this just bounds
/// the work in case a hand-edited registry entry is cyclic.
const MAX_RECURSION_DEPTH: usize = 32;

pub fn to_canonical(ast: &Expression) -> Result<CanonicalForm, UcumError> {
    canonicalize(ast, 0)
}

/// Canonicalize a unit-expression string (used both at the public API
/// boundary and recursively, when expanding a derived unit's definition).
pub fn to_canonical_str(source: &str) -> Result<CanonicalForm, UcumError> {
    to_canonical_str_at_depth(source, 0)
}

fn to_canonical_str_at_depth(source: &str, depth: usize) -> Result<CanonicalForm, UcumError> {
    let result = parser::parse(source);
    if let Some(err) = result.errors.first() {
        return Err(UcumError::InvalidUnit {
            input: source.to_string(),
            reason: err.message.clone(),
        });
    }
    match result.ast {
        Some(ast) => canonicalize(&ast, depth),
        None => Err(UcumError::InvalidUnit {
            input: source.to_string(),
            reason: "could not parse any expression".to_string(),
        }),
    }
}

fn canonicalize(ast: &Expression, depth: usize) -> Result<CanonicalForm, UcumError> {
    if depth > MAX_RECURSION_DEPTH {
        return Err(UcumError::InvalidUnit {
            input: String::new(),
            reason: "exceeded maximum derived-unit recursion depth".to_string(),
        });
    }
    match ast {
        Expression::Factor { value, .. } => Ok(CanonicalForm::dimensionless(*value as f64)),

        Expression::Unit {
            prefix,
            atom,
            exponent,
            ..
        } => canonicalize_unit(prefix.as_deref(), atom, *exponent, depth),

        Expression::Binary { op, left, right, .. } => {
            let l = canonicalize(left, depth)?;
            let r = canonicalize(right, depth)?;
            Ok(combine(l, r, *op))
        }

        Expression::Unary { operand, .. } => {
            let inner = canonicalize(operand, depth)?;
            Ok(invert(inner))
        }

        Expression::Group { inner, .. } => canonicalize(inner, depth),
    }
}

fn canonicalize_unit(
    prefix: Option<&str>,
    atom: &str,
    exponent: i32,
    depth: usize,
) -> Result<CanonicalForm, UcumError> {
    let alpha = match prefix {
        Some(p) => registry::find_prefix(p)
            .map(|pfx| pfx.multiplier)
            .ok_or_else(|| UcumError::RegistryMiss {
                atom: p.to_string(),
            })?,
        None => 1.0,
    };
    let alpha_pow = alpha.powi(exponent);

    if let Some(slot) = base_unit_slot(atom) {
        let form = CanonicalForm {
            magnitude: alpha_pow,
            dimension: Dimension::from_slot(slot, clamp_i8(exponent)),
            base_terms: vec![(base_unit_code(atom), exponent)],
            special: None,
        };
        return Ok(form.normalize());
    }

    let record = registry::find_unit(atom).ok_or_else(|| UcumError::RegistryMiss {
        atom: atom.to_string(),
    })?;

    match record.definition {
        Definition::Scalar(scalar, "1") => {
            let form = CanonicalForm::dimensionless(alpha_pow * scalar.powi(exponent));
            Ok(form)
        }
        Definition::Scalar(scalar, unit_expr) => {
            let sub = to_canonical_str_at_depth(unit_expr, depth + 1).map_err(|_| {
                UcumError::RegistryMiss {
                    atom: atom.to_string(),
                }
            })?;
            let combined_scalar = (sub.magnitude * scalar).powi(exponent);
            let mut base_terms: Vec<BaseTerm> = sub
                .base_terms
                .iter()
                .map(|(code, exp)| (*code, exp * exponent))
                .collect();
            let form = CanonicalForm {
                magnitude: alpha_pow * combined_scalar,
                dimension: Dimension::zero(),
                base_terms: std::mem::take(&mut base_terms),
                special: sub.special,
            };
            Ok(form.normalize())
        }
        Definition::Special(function_name, ref_value_str, ref_unit_str) => {
            let sub = to_canonical_str_at_depth(ref_unit_str, depth + 1)
                .unwrap_or_else(|_| CanonicalForm::dimensionless(1.0));
            let ref_value: f64 = ref_value_str.parse().unwrap_or(1.0);
            // The reference unit's own scalar (e.g. Pa's conversion factor
            // for `B[SPL] = lg over 2e-5 Pa`) folds into the magnitude, so
            // the §6.4 scale-factor table can tell a genuine metric prefix
            // apart from a reference unit that simply isn't 1-to-1 with its
            // base terms.
            let form = CanonicalForm {
                magnitude: alpha_pow * (ref_value * sub.magnitude).powi(exponent),
                dimension: sub.dimension,
                base_terms: sub
                    .base_terms
                    .iter()
                    .map(|(code, exp)| (*code, exp * exponent))
                    .collect(),
                special: Some(SpecialMarker {
                    function_name,
                    ref_value_str,
                    ref_unit_str,
                }),
            };
            Ok(form.normalize())
        }
    }
}

/// Base unit codes are always one of the seven fixed anchors, so this is
/// a closed mapping back to the `'static` strings the registry owns.
fn base_unit_code(atom: &str) -> &'static str {
    match atom {
        "m" => "m",
        "s" => "s",
        "g" => "g",
        "rad" => "rad",
        "K" => "K",
        "C" => "C",
        "cd" => "cd",
        _ => unreachable!("base_unit_code called on non-base atom"),
    }
}

fn combine(left: CanonicalForm, right: CanonicalForm, op: BinaryOp) -> CanonicalForm {
    let mut base_terms: SmallFactorVec<BaseTerm> = SmallFactorVec::new();
    base_terms.extend(left.base_terms.iter().copied());
    match op {
        BinaryOp::Mul => {
            base_terms.extend(right.base_terms.iter().copied());
        }
        BinaryOp::Div => {
            base_terms.extend(right.base_terms.iter().map(|(code, exp)| (*code, -exp)));
        }
    }

    let magnitude = match op {
        BinaryOp::Mul => left.magnitude * right.magnitude,
        BinaryOp::Div => left.magnitude / right.magnitude,
    };

    // §9 open question: multiplying two specials has no UCUM-level
    // meaning. This implementation picks the left operand's marker when
    // only one side carries one, and rejects the genuinely ambiguous case
    // of both sides being special by preferring neither — see DESIGN.md.
    let special = match (left.special, right.special) {
        (Some(l), Some(_r)) => Some(l),
        (Some(l), None) => Some(l),
        (None, Some(r)) => Some(r),
        (None, None) => None,
    };

    CanonicalForm {
        magnitude,
        dimension: Dimension::zero(),
        base_terms: base_terms.into_vec(),
        special,
    }
    .normalize()
}

fn invert(form: CanonicalForm) -> CanonicalForm {
    CanonicalForm {
        magnitude: 1.0 / form.magnitude,
        dimension: Dimension::zero(),
        base_terms: form
            .base_terms
            .iter()
            .map(|(code, exp)| (*code, -exp))
            .collect(),
        special: form.special,
    }
    .normalize()
}

impl PartialOrd for CanonicalForm {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.dimension != other.dimension {
            return None;
        }
        self.magnitude.partial_cmp(&other.magnitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn canon(src: &str) -> CanonicalForm {
        to_canonical(&parse(src).ast.unwrap()).unwrap()
    }

    #[test]
    fn kilogram_and_gram_share_dimension() {
        let kg = canon("kg");
        let g = canon("g");
        assert_eq!(kg.dimension, g.dimension);
        assert!((kg.magnitude / g.magnitude - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn newton_expands_to_base_terms() {
        let n = canon("N");
        assert_eq!(n.dimension, crate::dimension::Dimension::from_slot(crate::dimension::M, 1)
            .multiply(crate::dimension::Dimension::from_slot(crate::dimension::L, 1))
            .multiply(crate::dimension::Dimension::from_slot(crate::dimension::T, -2)));
    }

    #[test]
    fn base_terms_are_normalized() {
        let form = canon("m.m/m");
        assert_eq!(form.base_terms, vec![("m", 1)]);
    }

    #[test]
    fn special_marker_propagates_through_unit_node() {
        let cel = canon("Cel");
        assert!(cel.is_special());
        assert_eq!(cel.special.unwrap().function_name, "Cel");
    }

    #[test]
    fn division_negates_exponents() {
        let form = canon("m/s2");
        assert_eq!(form.base_terms, vec![("m", 1), ("s", -2)]);
    }
}
