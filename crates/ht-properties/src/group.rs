//! Ordered collections of shared properties.
//!
//! Groups hold `Arc` handles: filtering never copies a property, and the same
//! property may sit in many groups at once. Filtered views keep member order.

use crate::arrhenius::ArrheniusProperty;
use crate::error::{PropertyError, PropertyResult};
use crate::query::Query;
use ht_core::Unit;
use ht_core::units::{ev, ev_of};
use std::fmt;
use std::ops::Add;
use std::sync::Arc;
use tracing::{debug, warn};

/// Declared units across a group.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupUnits {
    Empty,
    Uniform(Unit),
    Mixed,
}

impl fmt::Display for GroupUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupUnits::Empty => write!(f, "no units"),
            GroupUnits::Uniform(u) => write!(f, "{u}"),
            GroupUnits::Mixed => write!(f, "mixed units"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PropertiesGroup {
    members: Vec<Arc<ArrheniusProperty>>,
}

impl PropertiesGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<ArrheniusProperty>> {
        self.members.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<ArrheniusProperty>> {
        self.members.get(index)
    }

    pub fn push(&mut self, property: impl Into<Arc<ArrheniusProperty>>) {
        self.members.push(property.into());
    }

    /// Members matching every predicate of `query`.
    pub fn filter(&self, query: &Query) -> Self {
        self.filter_with(query, false)
    }

    /// Members failing at least one predicate of `query`.
    pub fn exclude(&self, query: &Query) -> Self {
        self.filter_with(query, true)
    }

    pub fn filter_with(&self, query: &Query, exclude: bool) -> Self {
        let members: Vec<_> = self
            .members
            .iter()
            .filter(|p| query.matches(p) != exclude)
            .cloned()
            .collect();
        if members.is_empty() {
            warn!(
                query = %query,
                exclude,
                from = self.len(),
                "query matched no properties; returning an empty group"
            );
        } else {
            debug!(query = %query, exclude, kept = members.len(), from = self.len(), "filtered group");
        }
        Self { members }
    }

    /// The declared unit shared by all members.
    pub fn units(&self) -> GroupUnits {
        let mut units = self.members.iter().map(|p| p.unit());
        let Some(first) = units.next() else {
            return GroupUnits::Empty;
        };
        if units.all(|u| u == first) {
            GroupUnits::Uniform(first.clone())
        } else {
            GroupUnits::Mixed
        }
    }

    /// Mean law of a unit-homogeneous group.
    ///
    /// Pre-exponential factors are averaged geometrically, scaled by their
    /// maximum first so that products of large factors stay finite.
    /// Activation energies are averaged arithmetically. The result has no
    /// provenance.
    pub fn mean(&self) -> PropertyResult<ArrheniusProperty> {
        let unit = match self.units() {
            GroupUnits::Uniform(u) => u,
            GroupUnits::Empty => {
                return Err(PropertyError::Aggregation {
                    what: "mean of an empty group".to_string(),
                });
            }
            GroupUnits::Mixed => {
                return Err(PropertyError::Aggregation {
                    what: "mean over mixed units".to_string(),
                });
            }
        };
        let kind = self.members[0].kind();
        if self.members.iter().any(|p| p.kind() != kind) {
            return Err(PropertyError::Aggregation {
                what: "mean over mixed property kinds".to_string(),
            });
        }

        let mut pre_exps = Vec::with_capacity(self.len());
        let mut energies = Vec::with_capacity(self.len());
        for p in &self.members {
            let c = p.coefficients()?;
            pre_exps.push(c.pre_exp.value);
            energies.push(ev_of(c.act_energy));
        }

        let n = self.len() as f64;
        let max = pre_exps.iter().copied().fold(f64::MIN_POSITIVE, f64::max);
        let log_mean = pre_exps.iter().map(|a| (a / max).ln()).sum::<f64>() / n;
        let pre_exp = max * log_mean.exp();
        let act_energy = energies.iter().sum::<f64>() / n;
        debug!(members = self.len(), pre_exp, act_energy, "group mean");

        ArrheniusProperty::builder(kind)
            .pre_exp(ht_core::Coefficient::new(pre_exp, unit))
            .act_energy(ev(act_energy))
            .build()
    }
}

impl fmt::Display for PropertiesGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PropertiesGroup ({} properties, {})", self.len(), self.units())?;
        for p in &self.members {
            writeln!(f, "  {p}")?;
        }
        Ok(())
    }
}

impl From<Vec<Arc<ArrheniusProperty>>> for PropertiesGroup {
    fn from(members: Vec<Arc<ArrheniusProperty>>) -> Self {
        Self { members }
    }
}

impl FromIterator<Arc<ArrheniusProperty>> for PropertiesGroup {
    fn from_iter<I: IntoIterator<Item = Arc<ArrheniusProperty>>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<ArrheniusProperty> for PropertiesGroup {
    fn from_iter<I: IntoIterator<Item = ArrheniusProperty>>(iter: I) -> Self {
        iter.into_iter().map(Arc::new).collect()
    }
}

impl Extend<Arc<ArrheniusProperty>> for PropertiesGroup {
    fn extend<I: IntoIterator<Item = Arc<ArrheniusProperty>>>(&mut self, iter: I) {
        self.members.extend(iter);
    }
}

impl IntoIterator for PropertiesGroup {
    type Item = Arc<ArrheniusProperty>;
    type IntoIter = std::vec::IntoIter<Arc<ArrheniusProperty>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl<'a> IntoIterator for &'a PropertiesGroup {
    type Item = &'a Arc<ArrheniusProperty>;
    type IntoIter = std::slice::Iter<'a, Arc<ArrheniusProperty>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

/// Concatenation, keeping the left group's order first.
impl Add for PropertiesGroup {
    type Output = PropertiesGroup;

    fn add(mut self, rhs: PropertiesGroup) -> PropertiesGroup {
        self.members.extend(rhs.members);
        self
    }
}

impl Add for &PropertiesGroup {
    type Output = PropertiesGroup;

    fn add(self, rhs: &PropertiesGroup) -> PropertiesGroup {
        self.iter().chain(rhs.iter()).cloned().collect()
    }
}
