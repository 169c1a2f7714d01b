//! Value+unit quantity algebra: dimension-checked add/sub, compound-unit
//! multiply/divide/power, and the UCUM rules gating arithmetic on special
//! and arbitrary units (§4.6).

use crate::ast::Expression;
use crate::canonical::{to_canonical_str, CanonicalForm};
use crate::conversion;
use crate::diagnostics::UcumError;
use crate::{parser, registry};
use std::cell::RefCell;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitKind {
    Proper,
    Special,
    Arbitrary,
}

fn classify(canon: &CanonicalForm, unit_record_is_arbitrary: bool) -> UnitKind {
    if unit_record_is_arbitrary {
        UnitKind::Arbitrary
    } else if canon.is_special() {
        UnitKind::Special
    } else {
        UnitKind::Proper
    }
}

/// A value paired with a unit string. Logically immutable: every
/// operation below returns a fresh `Quantity`. The canonical-form cache
/// is a single-assignment memo cell — correctness never depends on
/// whether it has been populated yet.
#[derive(Debug)]
pub struct Quantity {
    pub value: f64,
    pub unit: String,
    cached_canonical: RefCell<Option<CanonicalForm>>,
}

impl Clone for Quantity {
    fn clone(&self) -> Self {
        Self {
            value: self.value,
            unit: self.unit.clone(),
            cached_canonical: RefCell::new(self.cached_canonical.borrow().clone()),
        }
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.unit == other.unit
    }
}

impl Quantity {
    pub fn new(value: f64, unit: impl Into<String>) -> Result<Self, UcumError> {
        let unit = unit.into();
        // Validate eagerly so construction with an un-parseable or
        // unknown-unit string fails with `InvalidUnit`, per §7.
        let canon = to_canonical_str(&unit).map_err(|_| UcumError::InvalidUnit {
            input: unit.clone(),
            reason: "unit string does not parse or references an unknown atom".to_string(),
        })?;
        Ok(Self {
            value,
            unit,
            cached_canonical: RefCell::new(Some(canon)),
        })
    }

    fn canonical(&self) -> CanonicalForm {
        if let Some(c) = self.cached_canonical.borrow().as_ref() {
            return c.clone();
        }
        let canon = to_canonical_str(&self.unit).expect("validated at construction");
        *self.cached_canonical.borrow_mut() = Some(canon.clone());
        canon
    }

    fn is_arbitrary(&self) -> bool {
        is_arbitrary_unit_string(&self.unit)
    }

    pub fn kind(&self) -> UnitKind {
        classify(&self.canonical(), self.is_arbitrary())
    }

    pub fn dimension(&self) -> crate::dimension::Dimension {
        self.canonical().dimension
    }

    pub fn are_compatible(&self, other: &Quantity) -> bool {
        if self.is_arbitrary() || other.is_arbitrary() {
            return self.unit == other.unit;
        }
        self.dimension() == other.dimension()
    }

    pub fn get_value(&self, in_unit: Option<&str>) -> Result<f64, UcumError> {
        match in_unit {
            None => Ok(self.value),
            Some(target) => conversion::convert(self.value, &self.unit, target),
        }
    }

    pub fn to_unit(&self, target: &str) -> Result<Quantity, UcumError> {
        if self.is_arbitrary() {
            if !is_arbitrary_unit_string(target) || target != self.unit {
                return Err(UcumError::ArbitraryUnitConversion {
                    unit: self.unit.clone(),
                    reason: format!("cannot convert arbitrary unit '{}' to '{}'", self.unit, target),
                });
            }
            return Quantity::new(self.value, target);
        }
        let value = conversion::convert(self.value, &self.unit, target)?;
        Quantity::new(value, target)
    }

    pub fn add(&self, other: &Quantity) -> Result<Quantity, UcumError> {
        if self.kind() == UnitKind::Special || other.kind() == UnitKind::Special {
            return Err(UcumError::SpecialUnitArithmetic {
                unit: self.unit.clone(),
                operation: "add".to_string(),
            });
        }
        if self.is_arbitrary() || other.is_arbitrary() {
            if self.unit != other.unit {
                return Err(UcumError::ArbitraryUnitConversion {
                    unit: self.unit.clone(),
                    reason: "arbitrary units can only be added when identical".to_string(),
                });
            }
            return Quantity::new(self.value + other.value, self.unit.clone());
        }
        let rhs_value = conversion::convert(other.value, &other.unit, &self.unit)?;
        Quantity::new(self.value + rhs_value, self.unit.clone())
    }

    pub fn subtract(&self, other: &Quantity) -> Result<Quantity, UcumError> {
        if self.kind() == UnitKind::Special || other.kind() == UnitKind::Special {
            return Err(UcumError::SpecialUnitArithmetic {
                unit: self.unit.clone(),
                operation: "subtract".to_string(),
            });
        }
        if self.is_arbitrary() || other.is_arbitrary() {
            if self.unit != other.unit {
                return Err(UcumError::ArbitraryUnitConversion {
                    unit: self.unit.clone(),
                    reason: "arbitrary units can only be subtracted when identical".to_string(),
                });
            }
            return Quantity::new(self.value - other.value, self.unit.clone());
        }
        let rhs_value = conversion::convert(other.value, &other.unit, &self.unit)?;
        Quantity::new(self.value - rhs_value, self.unit.clone())
    }

    pub fn multiply_scalar(&self, scalar: f64) -> Result<Quantity, UcumError> {
        if self.kind() == UnitKind::Special {
            return Err(UcumError::SpecialUnitArithmetic {
                unit: self.unit.clone(),
                operation: "multiply by scalar".to_string(),
            });
        }
        Quantity::new(self.value * scalar, self.unit.clone())
    }

    pub fn divide_scalar(&self, scalar: f64) -> Result<Quantity, UcumError> {
        if scalar == 0.0 {
            return Err(UcumError::DivisionByZero);
        }
        if self.kind() == UnitKind::Special {
            return Err(UcumError::SpecialUnitArithmetic {
                unit: self.unit.clone(),
                operation: "divide by scalar".to_string(),
            });
        }
        Quantity::new(self.value / scalar, self.unit.clone())
    }

    pub fn multiply(&self, other: &Quantity) -> Result<Quantity, UcumError> {
        if self.kind() == UnitKind::Special || other.kind() == UnitKind::Special {
            return Err(UcumError::SpecialUnitArithmetic {
                unit: self.unit.clone(),
                operation: "multiply".to_string(),
            });
        }
        let unit = compound_unit(&self.unit, &other.unit, true);
        Quantity::new(self.value * other.value, unit)
    }

    pub fn divide(&self, other: &Quantity) -> Result<Quantity, UcumError> {
        if other.value == 0.0 {
            return Err(UcumError::DivisionByZero);
        }
        if self.kind() == UnitKind::Special || other.kind() == UnitKind::Special {
            return Err(UcumError::SpecialUnitArithmetic {
                unit: self.unit.clone(),
                operation: "divide".to_string(),
            });
        }
        let unit = compound_unit(&self.unit, &other.unit, false);
        Quantity::new(self.value / other.value, unit)
    }

    pub fn pow(&self, n: i32) -> Result<Quantity, UcumError> {
        if self.kind() == UnitKind::Special || self.kind() == UnitKind::Arbitrary {
            return Err(UcumError::SpecialUnitArithmetic {
                unit: self.unit.clone(),
                operation: format!("pow({n})"),
            });
        }
        if n == 0 {
            return Quantity::new(1.0, "1");
        }
        if n == 1 {
            return Quantity::new(self.value, self.unit.clone());
        }
        let unit = if self.unit == "1" {
            "1".to_string()
        } else {
            format!("{}{}", self.unit, n)
        };
        Quantity::new(self.value.powi(n), unit)
    }

    pub fn equals(&self, other: &Quantity, tolerance: Option<f64>) -> Result<bool, UcumError> {
        if self.is_arbitrary() || other.is_arbitrary() {
            if self.unit != other.unit {
                return Ok(false);
            }
            return Ok(self.value == other.value);
        }
        let rhs_value = conversion::convert(other.value, &other.unit, &self.unit)?;
        let tol = tolerance.unwrap_or(0.0);
        Ok((self.value - rhs_value).abs() <= tol)
    }

    pub fn less_than(&self, other: &Quantity) -> Result<bool, UcumError> {
        if self.is_arbitrary() || other.is_arbitrary() {
            return Err(UcumError::ArbitraryUnitConversion {
                unit: self.unit.clone(),
                reason: "arbitrary units have no ordering".to_string(),
            });
        }
        let rhs_value = conversion::convert(other.value, &other.unit, &self.unit)?;
        Ok(self.value < rhs_value)
    }
}

/// Arbitrary iff *any* constituent unit atom in the expression resolves to
/// a registry record with `class == "arbitrary"` (§4.6) — walking the AST
/// rather than looking up the whole unit string, so a compound unit built
/// by `multiply`/`divide` (e.g. `"[IU]/mL"`) still carries the flag even
/// though that exact code has no registry entry of its own.
fn is_arbitrary_unit_string(unit: &str) -> bool {
    match parser::parse(unit).ast {
        Some(ast) => expression_contains_arbitrary(&ast),
        None => false,
    }
}

fn expression_contains_arbitrary(expr: &Expression) -> bool {
    match expr {
        Expression::Unit { atom, .. } => registry::find_unit(atom)
            .map(|rec| rec.class == "arbitrary")
            .unwrap_or(false),
        Expression::Factor { .. } => false,
        Expression::Binary { left, right, .. } => {
            expression_contains_arbitrary(left) || expression_contains_arbitrary(right)
        }
        Expression::Unary { operand, .. } => expression_contains_arbitrary(operand),
        Expression::Group { inner, .. } => expression_contains_arbitrary(inner),
    }
}

/// Builds `"a.b"` (multiplication) or `"a/b"` (division), simplifying only
/// the same-code cancellation cases named in §4.6: `u/u → "1"`,
/// `1·u → u`, `u·1 → u`.
fn compound_unit(a: &str, b: &str, is_mul: bool) -> String {
    if is_mul {
        if a == "1" {
            return b.to_string();
        }
        if b == "1" {
            return a.to_string();
        }
        format!("{a}.{b}")
    } else {
        if a == b {
            return "1".to_string();
        }
        if b == "1" {
            return a.to_string();
        }
        format!("{a}/{b}")
    }
}
