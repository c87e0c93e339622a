//! Base and Final Feature Records

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::derived::DerivedFeatures;
use crate::error::FeatureError;
use crate::schema::AttributeValue;

/// Fully populated schema instance, one value per slot in schema order
#[derive(Debug, Clone, PartialEq)]
pub struct BaseRecord {
    entries: Vec<(&'static str, AttributeValue)>,
}

impl BaseRecord {
    pub(crate) fn from_entries(entries: Vec<(&'static str, AttributeValue)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.entries
            .iter()
            .find(|(slot, _)| *slot == name)
            .map(|(_, value)| value)
    }

    /// Integer value of a slot; a missing or mistyped slot is a schema violation
    pub fn integer(&self, name: &str) -> Result<i64, FeatureError> {
        match self.get(name) {
            Some(AttributeValue::Integer(v)) => Ok(*v),
            Some(other) => Err(FeatureError::SchemaViolation(format!(
                "slot '{}' holds {:?}, expected an integer",
                name,
                other.kind()
            ))),
            None => Err(FeatureError::SchemaViolation(format!(
                "slot '{}' missing from base record",
                name
            ))),
        }
    }

    pub fn categorical(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AttributeValue::as_str)
    }

    /// Slot names in schema order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    pub fn entries(&self) -> &[(&'static str, AttributeValue)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for BaseRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Base record extended with derived attributes; the exact model input
#[derive(Debug, Clone, PartialEq)]
pub struct FinalFeatureRecord {
    base: BaseRecord,
    derived: DerivedFeatures,
}

impl FinalFeatureRecord {
    pub(crate) fn new(base: BaseRecord, derived: DerivedFeatures) -> Self {
        Self { base, derived }
    }

    pub fn base(&self) -> &BaseRecord {
        &self.base
    }

    pub fn derived(&self) -> &DerivedFeatures {
        &self.derived
    }

    /// All columns: base slots in schema order, then derived attributes
    pub fn entries(&self) -> Vec<(&'static str, AttributeValue)> {
        let mut entries = self.base.entries().to_vec();
        entries.extend(self.derived.entries());
        entries
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.base
            .names()
            .chain(self.derived.entries().into_iter().map(|(name, _)| name))
    }

    pub fn get(&self, name: &str) -> Option<AttributeValue> {
        self.base.get(name).cloned().or_else(|| {
            self.derived
                .entries()
                .into_iter()
                .find(|(column, _)| *column == name)
                .map(|(_, value)| value)
        })
    }

    pub fn len(&self) -> usize {
        self.base.len() + DerivedFeatures::COLUMNS.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Serialize for FinalFeatureRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.entries();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (name, value) in &entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
