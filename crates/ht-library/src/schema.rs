//! Property library file format.

use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LibraryFile {
    pub version: u32,
    #[serde(default)]
    pub materials: Vec<MaterialDef>,
    #[serde(default)]
    pub properties: Vec<PropertyDef>,
}

impl Default for LibraryFile {
    fn default() -> Self {
        Self {
            version: LATEST_VERSION,
            materials: Vec::new(),
            properties: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialDef {
    pub id: String,
    /// Display name; defaults to the id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Tag keys such as `pure_metal` or `plasma_facing`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyDef {
    /// Kind key, e.g. `diffusivity` or `recombination_coeff`.
    pub kind: String,
    /// Material id from [`LibraryFile::materials`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isotope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_exp: Option<QuantityDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub act_energy: Option<EnergyDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<DataDef>,
    /// Validity range `[low, high]` in Kelvin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_k: Option<[f64; 2]>,
}

impl PropertyDef {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            material: None,
            source: None,
            name: None,
            author: None,
            year: None,
            isotope: None,
            note: None,
            pre_exp: None,
            act_energy: None,
            data: None,
            range_k: None,
        }
    }
}

/// A value with unit text, e.g. `{ value: 4.1e-7, unit: "m^2/s" }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuantityDef {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum EnergyUnit {
    #[default]
    #[serde(rename = "eV")]
    Ev,
    #[serde(rename = "J")]
    Joule,
    #[serde(rename = "kJ/mol")]
    KjPerMol,
    #[serde(rename = "J/mol")]
    JPerMol,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnergyDef {
    pub value: f64,
    #[serde(default)]
    pub unit: EnergyUnit,
}

/// Experimental samples; `y` in `unit`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataDef {
    pub t_k: Vec<f64>,
    pub y: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}
