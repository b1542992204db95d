//! Flat records of a property group for tabular export.

use crate::LibraryResult;
use crate::bibliography::BibliographyStore;
use ht_core::units::{ev_of, kelvin_of};
use ht_properties::{ArrheniusProperty, PropertiesGroup, PropertyResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// One property as a row. Coefficients are in the declared unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportRecord {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub law: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub material_aliases: Vec<String>,
    /// Tag keys, implied categories included.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub material_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isotope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub pre_exp: f64,
    pub pre_exp_unit: String,
    pub act_energy_ev: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_k: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
}

fn record(
    p: &ArrheniusProperty,
    bibliography: Option<&dyn BibliographyStore>,
) -> PropertyResult<ExportRecord> {
    let coefficients = p.coefficients()?;
    let citation = match (p.source(), bibliography) {
        (Some(key), Some(bib)) => {
            let found = bib.lookup(key).map(ToString::to_string);
            if found.is_none() {
                warn!(key, "no bibliography entry for source");
            }
            found
        }
        _ => None,
    };
    Ok(ExportRecord {
        kind: p.kind().key().to_string(),
        law: p.law().map(|l| l.to_string()),
        material: p.material().map(|m| m.name().to_string()),
        material_aliases: p
            .material()
            .map(|m| m.aliases().to_vec())
            .unwrap_or_default(),
        material_tags: p
            .material()
            .map(|m| m.tags().map(|t| t.key().to_string()).collect())
            .unwrap_or_default(),
        name: p.name().map(str::to_string),
        source: p.source().map(str::to_string),
        author: p.author().map(str::to_string),
        year: p.year(),
        isotope: p.isotope().map(|i| i.key().to_string()),
        note: p.note().map(str::to_string),
        pre_exp: coefficients.pre_exp.value,
        pre_exp_unit: p.unit().to_string(),
        act_energy_ev: ev_of(coefficients.act_energy),
        range_k: p
            .range()
            .map(|r| [kelvin_of(r.low()), kelvin_of(r.high())]),
        citation,
    })
}

/// Flatten `group` in order. Members whose coefficients cannot be resolved
/// are left out and logged.
pub fn export_records(
    group: &PropertiesGroup,
    bibliography: Option<&dyn BibliographyStore>,
) -> Vec<ExportRecord> {
    group
        .iter()
        .enumerate()
        .filter_map(|(index, p)| match record(p, bibliography) {
            Ok(r) => Some(r),
            Err(e) => {
                warn!(index, kind = %p.kind(), error = %e, "skipping unresolvable property");
                None
            }
        })
        .collect()
}

/// Write records as one pretty-printed JSON array.
pub fn write_json(path: &Path, records: &[ExportRecord]) -> LibraryResult<()> {
    let content = serde_json::to_string_pretty(records)?;
    fs::write(path, content)?;
    Ok(())
}

/// Write records one JSON object per line.
pub fn write_jsonl(path: &Path, records: &[ExportRecord]) -> LibraryResult<()> {
    let mut content = String::new();
    for record in records {
        let line = serde_json::to_string(record)?;
        content.push_str(&line);
        content.push('\n');
    }
    fs::write(path, content)?;
    Ok(())
}

pub fn read_jsonl(path: &Path) -> LibraryResult<Vec<ExportRecord>> {
    let content = fs::read_to_string(path)?;
    let mut records = Vec::new();
    for line in content.lines() {
        if !line.trim().is_empty() {
            records.push(serde_json::from_str(line)?);
        }
    }
    Ok(records)
}
