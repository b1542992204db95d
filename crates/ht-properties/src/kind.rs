//! Property kinds and their unit contracts.
//!
//! Each kind has one row in a static table: the dimension its
//! pre-exponential factor must have, how the pressure exponent is treated,
//! and whether a bare number is acceptable. The Henry/Sievert law is read off
//! the pressure exponent of the supplied unit, never declared separately.

use crate::error::{PropertyError, PropertyResult};
use ht_core::{Dimension, Exponent, Unit};
use std::fmt;
use std::str::FromStr;

/// Transport coefficient kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyKind {
    Diffusivity,
    Solubility,
    Permeability,
    DissociationCoeff,
    RecombinationCoeff,
}

/// Solubility regime, distinguished by the pressure exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Law {
    /// Concentration proportional to pressure (molecular dissolution).
    Henry,
    /// Concentration proportional to the square root of pressure
    /// (dissociative dissolution).
    Sievert,
}

impl Law {
    pub fn pressure_exponent(&self) -> Exponent {
        match self {
            Law::Henry => -Exponent::ONE,
            Law::Sievert => -Exponent::HALF,
        }
    }

    /// Law whose pressure exponent has the given magnitude.
    pub fn from_pressure_exponent(e: Exponent) -> Option<Self> {
        match e.abs() {
            Exponent::ONE => Some(Law::Henry),
            Exponent::HALF => Some(Law::Sievert),
            _ => None,
        }
    }
}

impl fmt::Display for Law {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Law::Henry => write!(f, "Henry"),
            Law::Sievert => write!(f, "Sievert"),
        }
    }
}

/// How a kind constrains the pressure exponent of its unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressureRule {
    /// Exponent fixed by the kind.
    Fixed(Exponent),
    /// Exponent selects a Henry or Sievert law.
    Law,
}

/// Static unit contract of one kind.
#[derive(Debug, Clone, Copy)]
pub struct KindSpec {
    pub kind: PropertyKind,
    /// Dimension excluding pressure.
    pub base: Dimension,
    pub pressure: PressureRule,
    /// Whether a pre-exponential factor must carry a unit.
    pub unit_mandatory: bool,
}

const KIND_TABLE: [KindSpec; 5] = [
    KindSpec {
        kind: PropertyKind::Diffusivity,
        base: Dimension::new(2, -1, 0, 0),
        pressure: PressureRule::Fixed(Exponent::ZERO),
        unit_mandatory: false,
    },
    KindSpec {
        kind: PropertyKind::Solubility,
        base: Dimension::new(-3, 0, 1, 0),
        pressure: PressureRule::Law,
        unit_mandatory: true,
    },
    KindSpec {
        kind: PropertyKind::Permeability,
        base: Dimension::new(-1, -1, 1, 0),
        pressure: PressureRule::Law,
        unit_mandatory: true,
    },
    KindSpec {
        kind: PropertyKind::DissociationCoeff,
        base: Dimension::new(-2, -1, 1, 0),
        pressure: PressureRule::Fixed(Exponent::whole(-1)),
        unit_mandatory: true,
    },
    KindSpec {
        kind: PropertyKind::RecombinationCoeff,
        base: Dimension::new(4, -1, -1, 0),
        pressure: PressureRule::Fixed(Exponent::ZERO),
        unit_mandatory: true,
    },
];

impl PropertyKind {
    pub const ALL: [PropertyKind; 5] = [
        PropertyKind::Diffusivity,
        PropertyKind::Solubility,
        PropertyKind::Permeability,
        PropertyKind::DissociationCoeff,
        PropertyKind::RecombinationCoeff,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            PropertyKind::Diffusivity => "diffusivity",
            PropertyKind::Solubility => "solubility",
            PropertyKind::Permeability => "permeability",
            PropertyKind::DissociationCoeff => "dissociation_coeff",
            PropertyKind::RecombinationCoeff => "recombination_coeff",
        }
    }

    pub fn spec(&self) -> &'static KindSpec {
        // Table rows are in declaration order.
        &KIND_TABLE[*self as usize]
    }

    /// Check a supplied unit against the kind's contract and infer its law.
    ///
    /// Returns `None` for kinds without a Henry/Sievert distinction.
    pub fn check_unit(&self, unit: &Unit) -> PropertyResult<Option<Law>> {
        let spec = self.spec();
        let actual = unit.dimension();
        match spec.pressure {
            PressureRule::Fixed(p) => {
                let expected = spec.base.with_pressure(p);
                if actual != expected {
                    return Err(self.dimension_mismatch(&expected.to_string(), &actual));
                }
                Ok(None)
            }
            PressureRule::Law => {
                let law = Law::from_pressure_exponent(actual.pressure)
                    .filter(|law| actual.pressure == law.pressure_exponent());
                match law {
                    Some(law) if actual.with_pressure(Exponent::ZERO) == spec.base => {
                        Ok(Some(law))
                    }
                    _ => {
                        let henry = spec.base.with_pressure(Law::Henry.pressure_exponent());
                        let sievert = spec.base.with_pressure(Law::Sievert.pressure_exponent());
                        Err(self.dimension_mismatch(&format!("{henry} or {sievert}"), &actual))
                    }
                }
            }
        }
    }

    /// Canonical declared unit for this kind under `law`.
    pub fn declared_unit(&self, law: Option<Law>) -> Unit {
        let spec = self.spec();
        let pressure = match (spec.pressure, law) {
            (PressureRule::Fixed(p), _) => p,
            (PressureRule::Law, Some(law)) => law.pressure_exponent(),
            (PressureRule::Law, None) => Law::Sievert.pressure_exponent(),
        };
        Unit::canonical(spec.base.with_pressure(pressure))
    }

    fn dimension_mismatch(&self, expected: &str, actual: &Dimension) -> PropertyError {
        PropertyError::config(format!(
            "{self} pre-exponential factor must have dimension {expected}, got {actual}"
        ))
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKind::Diffusivity => write!(f, "Diffusivity"),
            PropertyKind::Solubility => write!(f, "Solubility"),
            PropertyKind::Permeability => write!(f, "Permeability"),
            PropertyKind::DissociationCoeff => write!(f, "DissociationCoeff"),
            PropertyKind::RecombinationCoeff => write!(f, "RecombinationCoeff"),
        }
    }
}

impl FromStr for PropertyKind {
    type Err = PropertyError;

    fn from_str(s: &str) -> PropertyResult<Self> {
        let wanted = s.trim().to_lowercase();
        PropertyKind::ALL
            .into_iter()
            .find(|k| k.key() == wanted || k.to_string().to_lowercase() == wanted)
            .ok_or_else(|| PropertyError::config(format!("unknown property kind '{s}'")))
    }
}
