//! Citation lookup for property `source` keys.

use crate::LibraryResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Citation {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if !self.authors.is_empty() {
            let mut who = self.authors.join(", ");
            if let Some(year) = self.year {
                who.push_str(&format!(" ({year})"));
            }
            parts.push(who);
        } else if let Some(year) = self.year {
            parts.push(format!("({year})"));
        }
        parts.extend(self.title.clone());
        parts.extend(self.journal.clone());
        parts.extend(self.doi.as_ref().map(|doi| format!("doi:{doi}")));
        write!(f, "{}", parts.join(". "))
    }
}

/// Source of citations keyed by bibliography key.
pub trait BibliographyStore {
    fn lookup(&self, key: &str) -> Option<&Citation>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryBibliography {
    entries: BTreeMap<String, Citation>,
}

impl InMemoryBibliography {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, citation: Citation) -> Option<Citation> {
        self.entries.insert(key.into(), citation)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a JSON object mapping keys to citations.
    pub fn from_json_str(json: &str) -> LibraryResult<Self> {
        let entries: BTreeMap<String, Citation> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    pub fn load_json(path: &Path) -> LibraryResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

impl BibliographyStore for InMemoryBibliography {
    fn lookup(&self, key: &str) -> Option<&Citation> {
        self.entries.get(key)
    }
}
