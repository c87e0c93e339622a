//! Schema Catalog
//!
//! Bundles the attribute schema, the default table and both categorical code
//! mappings into one immutable value. All configuration invariants are checked
//! by the constructor so that a broken table fails at startup, never per request.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::categories::CodeMapping;
use crate::error::FeatureError;
use crate::schema::{
    AttributeKind, AttributeSlot, AttributeValue, StaticValue, REFERENCE_SCHEMA,
    USER_SUPPLIED_SLOTS,
};

/// Validated schema, defaults and code mappings
#[derive(Debug, Clone)]
pub struct SchemaCatalog {
    slots: Vec<AttributeSlot>,
    defaults: HashMap<&'static str, AttributeValue>,
    neighborhoods: CodeMapping,
    house_styles: CodeMapping,
}

impl SchemaCatalog {
    /// Catalog for the reference house price model
    pub fn reference() -> Result<Self, FeatureError> {
        let slots = REFERENCE_SCHEMA.iter().map(|(slot, _)| *slot).collect();
        let defaults = REFERENCE_SCHEMA
            .iter()
            .map(|(slot, default)| (slot.name, *default))
            .collect();
        Self::new(
            slots,
            defaults,
            CodeMapping::neighborhoods(),
            CodeMapping::house_styles(),
        )
    }

    /// Build and validate a catalog
    pub fn new(
        slots: Vec<AttributeSlot>,
        defaults: Vec<(&'static str, StaticValue)>,
        neighborhoods: CodeMapping,
        house_styles: CodeMapping,
    ) -> Result<Self, FeatureError> {
        let mut seen = HashSet::with_capacity(slots.len());
        for slot in &slots {
            if !seen.insert(slot.name) {
                return Err(violation(format!("slot '{}' declared twice", slot.name)));
            }
        }

        let kinds: HashMap<&'static str, AttributeKind> =
            slots.iter().map(|slot| (slot.name, slot.kind)).collect();

        let mut table = HashMap::with_capacity(defaults.len());
        for (name, default) in defaults {
            let kind = kinds
                .get(name)
                .ok_or_else(|| violation(format!("default given for unknown slot '{}'", name)))?;
            if *kind != default.kind() {
                return Err(violation(format!(
                    "default for '{}' is {:?}, slot is {:?}",
                    name,
                    default.kind(),
                    kind
                )));
            }
            if table.insert(name, default.to_value()).is_some() {
                return Err(violation(format!("slot '{}' has more than one default", name)));
            }
        }

        for mapping in [&neighborhoods, &house_styles] {
            check_mapping(mapping, &kinds)?;
        }

        for name in USER_SUPPLIED_SLOTS {
            let expected = if name == neighborhoods.slot() || name == house_styles.slot() {
                AttributeKind::Categorical
            } else {
                AttributeKind::Integer
            };
            match kinds.get(name) {
                Some(kind) if *kind == expected => {}
                Some(kind) => {
                    return Err(violation(format!(
                        "user slot '{}' is {:?}, expected {:?}",
                        name, kind, expected
                    )))
                }
                None => return Err(violation(format!("user slot '{}' missing from schema", name))),
            }
        }

        for slot in &slots {
            if !USER_SUPPLIED_SLOTS.contains(&slot.name) && !table.contains_key(slot.name) {
                return Err(violation(format!("slot '{}' has no default", slot.name)));
            }
        }

        info!(
            "Schema catalog ready: {} slots, {} defaults, {} neighborhoods, {} house styles",
            slots.len(),
            table.len(),
            neighborhoods.len(),
            house_styles.len()
        );

        Ok(Self {
            slots,
            defaults: table,
            neighborhoods,
            house_styles,
        })
    }

    /// Slots in model column order
    pub fn slots(&self) -> &[AttributeSlot] {
        &self.slots
    }

    pub fn slot(&self, name: &str) -> Option<&AttributeSlot> {
        self.slots.iter().find(|slot| slot.name == name)
    }

    pub fn default_for(&self, name: &str) -> Option<&AttributeValue> {
        self.defaults.get(name)
    }

    pub fn neighborhoods(&self) -> &CodeMapping {
        &self.neighborhoods
    }

    pub fn house_styles(&self) -> &CodeMapping {
        &self.house_styles
    }

    /// Whether the slot is filled from user input
    pub fn is_user_supplied(name: &str) -> bool {
        USER_SUPPLIED_SLOTS.contains(&name)
    }
}

fn violation(message: String) -> FeatureError {
    FeatureError::SchemaViolation(message)
}

fn check_mapping(
    mapping: &CodeMapping,
    kinds: &HashMap<&'static str, AttributeKind>,
) -> Result<(), FeatureError> {
    match kinds.get(mapping.slot()) {
        Some(AttributeKind::Categorical) => {}
        Some(kind) => {
            return Err(violation(format!(
                "mapping targets '{}' which is {:?}",
                mapping.slot(),
                kind
            )))
        }
        None => {
            return Err(violation(format!(
                "mapping targets unknown slot '{}'",
                mapping.slot()
            )))
        }
    }

    if mapping.is_empty() {
        return Err(violation(format!("mapping for '{}' is empty", mapping.slot())));
    }

    let mut labels = HashSet::new();
    let mut codes = HashSet::new();
    for (label, code) in mapping.entries() {
        if !labels.insert(*label) {
            return Err(violation(format!(
                "label '{}' appears twice in '{}' mapping",
                label,
                mapping.slot()
            )));
        }
        if !codes.insert(*code) {
            return Err(violation(format!(
                "code '{}' appears twice in '{}' mapping",
                code,
                mapping.slot()
            )));
        }
    }

    debug!("Mapping for {} is bijective ({} entries)", mapping.slot(), mapping.len());
    Ok(())
}
