//! Feature Assembler
//!
//! Turns a partial, human-entered input into a complete base record: labels are
//! translated to model codes, floor areas and the garage year are filled in, the
//! remodel year is clamped, and every remaining slot takes its default.

use std::sync::Arc;

use data_validator::{UserInputSet, Validator};
use tracing::{debug, warn};

use crate::catalog::SchemaCatalog;
use crate::derived::derive;
use crate::error::FeatureError;
use crate::record::{BaseRecord, FinalFeatureRecord};
use crate::schema::{slots, AttributeValue};

/// Lower bound applied to the first-floor area derived from living area
pub const MIN_FIRST_FLOOR_AREA: i64 = 500;

/// Split living area evenly across two floors.
///
/// No floor-by-floor input exists, so this stands in for it. Floor division is
/// intentional and must match the model's training-time preprocessing.
pub fn split_floor_areas(living_area: i64) -> (i64, i64) {
    let half = living_area.div_euclid(2);
    let first = half.max(MIN_FIRST_FLOOR_AREA);
    let second = (living_area - half).max(0);
    (first, second)
}

/// Builds base records against a shared catalog and a fixed reference year
#[derive(Debug, Clone)]
pub struct FeatureAssembler {
    catalog: Arc<SchemaCatalog>,
    validator: Validator,
    reference_year: i64,
}

impl FeatureAssembler {
    /// Create an assembler with the default validation ranges
    pub fn new(catalog: Arc<SchemaCatalog>, reference_year: i64) -> Self {
        Self::with_validator(catalog, Validator::default(), reference_year)
    }

    pub fn with_validator(
        catalog: Arc<SchemaCatalog>,
        validator: Validator,
        reference_year: i64,
    ) -> Self {
        Self {
            catalog,
            validator,
            reference_year,
        }
    }

    pub fn catalog(&self) -> &SchemaCatalog {
        &self.catalog
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn reference_year(&self) -> i64 {
        self.reference_year
    }

    /// Build the base record for `input`
    pub fn assemble(&self, input: &UserInputSet) -> Result<BaseRecord, FeatureError> {
        self.validator.validate(input, self.reference_year)?;

        let neighborhood = self.catalog.neighborhoods().code_for(&input.neighborhood)?;
        let house_style = self.catalog.house_styles().code_for(&input.house_style)?;

        let (first_floor, second_floor) = split_floor_areas(input.living_area);

        let year_remod = input.year_remod_add.min(self.reference_year);
        if year_remod != input.year_remod_add {
            warn!(
                "Remodel year {} is after reference year {}, clamping",
                input.year_remod_add, self.reference_year
            );
        }

        let supplied = [
            (slots::YEAR_BUILT, AttributeValue::Integer(input.year_built)),
            (slots::YEAR_REMOD_ADD, AttributeValue::Integer(year_remod)),
            (slots::OVERALL_QUAL, AttributeValue::Integer(input.overall_qual)),
            (slots::OVERALL_COND, AttributeValue::Integer(input.overall_cond)),
            (slots::LIVING_AREA, AttributeValue::Integer(input.living_area)),
            (slots::LOT_AREA, AttributeValue::Integer(input.lot_area)),
            (slots::TOTAL_BSMT_SF, AttributeValue::Integer(input.total_bsmt_sf)),
            (slots::GARAGE_AREA, AttributeValue::Integer(input.garage_area)),
            (slots::NEIGHBORHOOD, AttributeValue::Categorical(neighborhood.to_string())),
            (slots::HOUSE_STYLE, AttributeValue::Categorical(house_style.to_string())),
            (slots::GARAGE_YEAR_BUILT, AttributeValue::Integer(input.garage_year())),
            (slots::FIRST_FLOOR_AREA, AttributeValue::Integer(first_floor)),
            (slots::SECOND_FLOOR_AREA, AttributeValue::Integer(second_floor)),
        ];

        let schema = self.catalog.slots();
        let mut entries = Vec::with_capacity(schema.len());
        for slot in schema {
            let value = match supplied.iter().find(|(name, _)| *name == slot.name) {
                Some((_, value)) => value.clone(),
                None => self.catalog.default_for(slot.name).cloned().ok_or_else(|| {
                    FeatureError::SchemaViolation(format!("slot '{}' has no default", slot.name))
                })?,
            };
            entries.push((slot.name, value));
        }

        assert_eq!(
            entries.len(),
            schema.len(),
            "base record must hold exactly one value per schema slot"
        );

        debug!(
            "Assembled base record: {} slots, neighborhood={}, style={}",
            entries.len(),
            neighborhood,
            house_style
        );
        Ok(BaseRecord::from_entries(entries))
    }

    /// Assemble and derive in one step
    pub fn build(&self, input: &UserInputSet) -> Result<FinalFeatureRecord, FeatureError> {
        let base = self.assemble(input)?;
        derive(base, self.reference_year)
    }
}
