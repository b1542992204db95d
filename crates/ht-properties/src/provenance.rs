//! Measurement provenance: who measured what, where, and over which range.

use crate::error::{PropertyError, PropertyResult};
use crate::material::Material;
use ht_core::units::{Temperature, kelvin_of};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Hydrogen isotope a measurement was made with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Isotope {
    /// Protium
    H,
    /// Deuterium
    D,
    /// Tritium
    T,
}

impl Isotope {
    pub const ALL: [Isotope; 3] = [Isotope::H, Isotope::D, Isotope::T];

    pub fn key(&self) -> &'static str {
        match self {
            Isotope::H => "H",
            Isotope::D => "D",
            Isotope::T => "T",
        }
    }
}

impl fmt::Display for Isotope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Isotope {
    type Err = PropertyError;

    fn from_str(s: &str) -> PropertyResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "h" | "h2" | "protium" | "hydrogen" => Ok(Isotope::H),
            "d" | "d2" | "deuterium" => Ok(Isotope::D),
            "t" | "t2" | "tritium" => Ok(Isotope::T),
            other => Err(PropertyError::config(format!("unknown isotope '{other}'"))),
        }
    }
}

/// Strictly increasing absolute-temperature validity range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureRange {
    low: Temperature,
    high: Temperature,
}

impl TemperatureRange {
    pub fn new(low: Temperature, high: Temperature) -> PropertyResult<Self> {
        let (lo, hi) = (kelvin_of(low), kelvin_of(high));
        if !lo.is_finite() || !hi.is_finite() || lo <= 0.0 {
            return Err(PropertyError::config(format!(
                "temperature range ({lo} K, {hi} K) must be finite and above 0 K"
            )));
        }
        if lo >= hi {
            return Err(PropertyError::config(format!(
                "temperature range ({lo} K, {hi} K) is not strictly increasing"
            )));
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> Temperature {
        self.low
    }

    pub fn high(&self) -> Temperature {
        self.high
    }

    pub fn contains(&self, t: Temperature) -> bool {
        let tk = kelvin_of(t);
        kelvin_of(self.low) <= tk && tk <= kelvin_of(self.high)
    }
}

impl fmt::Display for TemperatureRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.0}-{:.0} K",
            kelvin_of(self.low),
            kelvin_of(self.high)
        )
    }
}

/// Descriptive metadata attached to every property. Everything is optional:
/// aggregated or derived properties may not have a single source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Provenance {
    pub material: Option<Arc<Material>>,
    /// Bibliography key of the publication.
    pub source: Option<String>,
    pub name: Option<String>,
    pub year: Option<i32>,
    pub isotope: Option<Isotope>,
    pub author: Option<String>,
    pub note: Option<String>,
}
