//! Products and quotients of Arrhenius properties.
//!
//! Multiplying two Arrhenius laws multiplies the pre-exponential factors and
//! adds the activation energies; dividing divides and subtracts. Only kind
//! pairs that form a physical relation are accepted:
//!
//! | left         | op | right        | result       |
//! |--------------|----|--------------|--------------|
//! | Diffusivity  | ×  | Solubility   | Permeability |
//! | Solubility   | ×  | Diffusivity  | Permeability |
//! | Permeability | ÷  | Diffusivity  | Solubility   |
//! | Permeability | ÷  | Solubility   | Diffusivity  |
//!
//! The result keeps the left operand's provenance and validity range.

use crate::arrhenius::ArrheniusProperty;
use crate::error::{PropertyError, PropertyResult};
use crate::kind::PropertyKind;
use std::fmt;
use std::ops::{Div, Mul};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Multiply,
    Divide,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Multiply => write!(f, "*"),
            Operation::Divide => write!(f, "/"),
        }
    }
}

/// Kind produced by `left op right`, if the pair composes.
pub fn derived_kind(left: PropertyKind, op: Operation, right: PropertyKind) -> Option<PropertyKind> {
    use PropertyKind::*;
    match (left, op, right) {
        (Diffusivity, Operation::Multiply, Solubility)
        | (Solubility, Operation::Multiply, Diffusivity) => Some(Permeability),
        (Permeability, Operation::Divide, Diffusivity) => Some(Solubility),
        (Permeability, Operation::Divide, Solubility) => Some(Diffusivity),
        _ => None,
    }
}

/// Combine two properties into a derived one.
///
/// Both operands are resolved first, so a data-backed operand that cannot be
/// fitted surfaces its fit error. The result carries explicit coefficients.
pub fn combine(
    left: &ArrheniusProperty,
    op: Operation,
    right: &ArrheniusProperty,
) -> PropertyResult<ArrheniusProperty> {
    let incompatible = |reason: String| PropertyError::IncompatibleOperands {
        left: left.kind().to_string(),
        op: op.to_string(),
        right: right.kind().to_string(),
        reason,
    };

    let kind = derived_kind(left.kind(), op, right.kind())
        .ok_or_else(|| incompatible("no derived quantity for this pair".to_string()))?;

    let (l, r) = (left.coefficients()?, right.coefficients()?);
    let (pre_exp, act_energy) = match op {
        Operation::Multiply => (&l.pre_exp * &r.pre_exp, l.act_energy + r.act_energy),
        Operation::Divide => (&l.pre_exp / &r.pre_exp, l.act_energy - r.act_energy),
    };

    let mut provenance = left.provenance().clone();
    provenance.note = Some(format!("derived: {} {op} {}", left.kind(), right.kind()));

    let mut builder = ArrheniusProperty::builder(kind)
        .pre_exp(pre_exp)
        .act_energy(act_energy)
        .provenance(provenance);
    if let Some(range) = left.range() {
        builder = builder.range(range.low(), range.high());
    }
    builder.build().map_err(|e| match e {
        PropertyError::Configuration { what } => incompatible(what),
        PropertyError::Core(core) => incompatible(core.to_string()),
        other => other,
    })
}

impl Mul for &ArrheniusProperty {
    type Output = PropertyResult<ArrheniusProperty>;

    fn mul(self, rhs: &ArrheniusProperty) -> Self::Output {
        combine(self, Operation::Multiply, rhs)
    }
}

impl Div for &ArrheniusProperty {
    type Output = PropertyResult<ArrheniusProperty>;

    fn div(self, rhs: &ArrheniusProperty) -> Self::Output {
        combine(self, Operation::Divide, rhs)
    }
}
