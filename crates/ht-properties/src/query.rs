//! Field predicates for filtering property groups.
//!
//! A [`Query`] is a conjunction of [`Predicate`]s. Each predicate names one
//! metadata [`Field`] and one or more accepted values; a property satisfies it
//! when its field equals any of them. Text comparisons ignore case, and the
//! material field uses [`Material::matches`](crate::material::Material::matches)
//! so that tags and aliases select too.

use crate::arrhenius::ArrheniusProperty;
use crate::error::{PropertyError, PropertyResult};
use crate::kind::PropertyKind;
use crate::provenance::Isotope;
use std::fmt;
use std::str::FromStr;

/// Metadata fields a query can constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Material,
    Author,
    Isotope,
    Year,
    Source,
    Name,
    Kind,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Material,
        Field::Author,
        Field::Isotope,
        Field::Year,
        Field::Source,
        Field::Name,
        Field::Kind,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Field::Material => "material",
            Field::Author => "author",
            Field::Isotope => "isotope",
            Field::Year => "year",
            Field::Source => "source",
            Field::Name => "name",
            Field::Kind => "kind",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Field {
    type Err = PropertyError;

    fn from_str(s: &str) -> PropertyResult<Self> {
        let wanted = s.trim().to_lowercase();
        Field::ALL
            .into_iter()
            .find(|f| f.key() == wanted)
            .ok_or_else(|| PropertyError::config(format!("unknown query field '{s}'")))
    }
}

/// A value to compare a field against.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Year(i32),
    Isotope(Isotope),
    Kind(PropertyKind),
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i32> for FieldValue {
    fn from(y: i32) -> Self {
        FieldValue::Year(y)
    }
}

impl From<Isotope> for FieldValue {
    fn from(i: Isotope) -> Self {
        FieldValue::Isotope(i)
    }
}

impl From<PropertyKind> for FieldValue {
    fn from(k: PropertyKind) -> Self {
        FieldValue::Kind(k)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Year(y) => write!(f, "{y}"),
            FieldValue::Isotope(i) => write!(f, "{i}"),
            FieldValue::Kind(k) => write!(f, "{k}"),
        }
    }
}

fn text_eq(actual: Option<&str>, wanted: &str) -> bool {
    actual.is_some_and(|a| a.to_lowercase() == wanted.trim().to_lowercase())
}

fn value_matches(property: &ArrheniusProperty, field: Field, value: &FieldValue) -> bool {
    match (field, value) {
        (Field::Material, FieldValue::Text(q)) => property.material().is_some_and(|m| m.matches(q)),
        (Field::Author, FieldValue::Text(q)) => text_eq(property.author(), q),
        (Field::Source, FieldValue::Text(q)) => text_eq(property.source(), q),
        (Field::Name, FieldValue::Text(q)) => text_eq(property.name(), q),
        (Field::Year, FieldValue::Year(y)) => property.year() == Some(*y),
        (Field::Year, FieldValue::Text(q)) => q
            .trim()
            .parse::<i32>()
            .is_ok_and(|y| property.year() == Some(y)),
        (Field::Isotope, FieldValue::Isotope(i)) => property.isotope() == Some(*i),
        (Field::Isotope, FieldValue::Text(q)) => q
            .parse::<Isotope>()
            .is_ok_and(|i| property.isotope() == Some(i)),
        (Field::Kind, FieldValue::Kind(k)) => property.kind() == *k,
        (Field::Kind, FieldValue::Text(q)) => {
            q.parse::<PropertyKind>().is_ok_and(|k| property.kind() == k)
        }
        _ => false,
    }
}

/// One field constrained to a set of values (membership).
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub field: Field,
    pub values: Vec<FieldValue>,
}

impl Predicate {
    pub fn eq(field: Field, value: impl Into<FieldValue>) -> Self {
        Self {
            field,
            values: vec![value.into()],
        }
    }

    /// Satisfied by any of `values`. An empty list matches nothing.
    pub fn one_of<V: Into<FieldValue>>(field: Field, values: impl IntoIterator<Item = V>) -> Self {
        Self {
            field,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn matches(&self, property: &ArrheniusProperty) -> bool {
        self.values
            .iter()
            .any(|v| value_matches(property, self.field, v))
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.values.as_slice() {
            [single] => write!(f, "{}={single}", self.field),
            values => {
                let list: Vec<String> = values.iter().map(ToString::to_string).collect();
                write!(f, "{} in [{}]", self.field, list.join(", "))
            }
        }
    }
}

/// Conjunction of predicates. The empty query matches every property.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    predicates: Vec<Predicate>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn one_of<V: Into<FieldValue>>(self, field: Field, values: impl IntoIterator<Item = V>) -> Self {
        self.and(Predicate::one_of(field, values))
    }

    pub fn material(self, material: impl Into<String>) -> Self {
        self.and(Predicate::eq(Field::Material, material.into()))
    }

    pub fn author(self, author: impl Into<String>) -> Self {
        self.and(Predicate::eq(Field::Author, author.into()))
    }

    pub fn source(self, source: impl Into<String>) -> Self {
        self.and(Predicate::eq(Field::Source, source.into()))
    }

    pub fn name(self, name: impl Into<String>) -> Self {
        self.and(Predicate::eq(Field::Name, name.into()))
    }

    pub fn isotope(self, isotope: Isotope) -> Self {
        self.and(Predicate::eq(Field::Isotope, isotope))
    }

    pub fn year(self, year: i32) -> Self {
        self.and(Predicate::eq(Field::Year, year))
    }

    pub fn kind(self, kind: PropertyKind) -> Self {
        self.and(Predicate::eq(Field::Kind, kind))
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches(&self, property: &ArrheniusProperty) -> bool {
        self.predicates.iter().all(|p| p.matches(property))
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.predicates.is_empty() {
            return write!(f, "<all>");
        }
        let parts: Vec<String> = self.predicates.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join(" & "))
    }
}
