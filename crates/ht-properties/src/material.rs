//! Material references and capability tags.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::PropertyError;

/// Capability/category tag carried by a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaterialTag {
    Metal,
    PureMetal,
    Alloy,
    Steel,
    Ceramic,
    Polymer,
    LiquidMetal,
    MoltenSalt,
    PlasmaFacing,
    Structural,
}

impl MaterialTag {
    pub const ALL: [MaterialTag; 10] = [
        MaterialTag::Metal,
        MaterialTag::PureMetal,
        MaterialTag::Alloy,
        MaterialTag::Steel,
        MaterialTag::Ceramic,
        MaterialTag::Polymer,
        MaterialTag::LiquidMetal,
        MaterialTag::MoltenSalt,
        MaterialTag::PlasmaFacing,
        MaterialTag::Structural,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            MaterialTag::Metal => "metal",
            MaterialTag::PureMetal => "pure_metal",
            MaterialTag::Alloy => "alloy",
            MaterialTag::Steel => "steel",
            MaterialTag::Ceramic => "ceramic",
            MaterialTag::Polymer => "polymer",
            MaterialTag::LiquidMetal => "liquid_metal",
            MaterialTag::MoltenSalt => "molten_salt",
            MaterialTag::PlasmaFacing => "plasma_facing",
            MaterialTag::Structural => "structural",
        }
    }

    /// Broader categories a tag entails (a steel is an alloy is a metal).
    pub fn implied(&self) -> &'static [MaterialTag] {
        match self {
            MaterialTag::PureMetal => &[MaterialTag::Metal],
            MaterialTag::Alloy => &[MaterialTag::Metal],
            MaterialTag::Steel => &[MaterialTag::Alloy, MaterialTag::Metal],
            MaterialTag::LiquidMetal => &[MaterialTag::Metal],
            _ => &[],
        }
    }
}

impl fmt::Display for MaterialTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for MaterialTag {
    type Err = PropertyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace([' ', '-'], "_");
        MaterialTag::ALL
            .into_iter()
            .find(|tag| tag.key() == wanted)
            .ok_or_else(|| PropertyError::config(format!("unknown material tag '{s}'")))
    }
}

/// A material a property was measured in.
///
/// A material answers to its name, to any alias (chemical symbol, grade
/// designation), and to any of its tags, all case-insensitively. Filtering a
/// group by `"metal"` therefore returns tungsten, copper and EUROFER alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Material {
    name: String,
    aliases: Vec<String>,
    tags: BTreeSet<MaterialTag>,
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            tags: BTreeSet::new(),
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Add a tag together with the categories it implies.
    pub fn tag(mut self, tag: MaterialTag) -> Self {
        self.tags.insert(tag);
        self.tags.extend(tag.implied().iter().copied());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn tags(&self) -> impl Iterator<Item = MaterialTag> + '_ {
        self.tags.iter().copied()
    }

    pub fn has_tag(&self, tag: MaterialTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Name, alias or tag match.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if self.name.to_lowercase() == query {
            return true;
        }
        if self.aliases.iter().any(|a| a.to_lowercase() == query) {
            return true;
        }
        self.tags.iter().any(|t| t.key() == query)
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
