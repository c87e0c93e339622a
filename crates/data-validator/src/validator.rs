//! Data Validator for Range Checking

use crate::error::{ValidRange, ValidationError};
use crate::input::UserInputSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Validation configuration
///
/// Year ranges are bounded above by the reference year at validation time,
/// so only the earliest supported year is configured here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Earliest supported construction year
    pub earliest_year: i64,
    /// Overall quality score range
    pub quality_range: ValidRange,
    /// Overall condition score range
    pub condition_range: ValidRange,
    /// Living area range (sq ft)
    pub living_area_range: ValidRange,
    /// Lot area range (sq ft)
    pub lot_area_range: ValidRange,
    /// Basement area range (sq ft)
    pub basement_area_range: ValidRange,
    /// Garage area range (sq ft)
    pub garage_area_range: ValidRange,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            earliest_year: 1870,
            quality_range: ValidRange::new(1, 10),
            condition_range: ValidRange::new(1, 10),
            living_area_range: ValidRange::new(0, 10_000),
            lot_area_range: ValidRange::new(0, 200_000),
            basement_area_range: ValidRange::new(0, 5_000),
            garage_area_range: ValidRange::new(0, 2_000),
        }
    }
}

impl ValidationConfig {
    /// Range of accepted construction years for a given reference year
    pub fn year_range(&self, reference_year: i64) -> ValidRange {
        ValidRange::new(self.earliest_year, reference_year)
    }

    /// Outer bound on remodel years. The per-house floor is the construction
    /// year and later years are clamped, so there is no upper bound.
    pub fn remodel_year_range(&self) -> ValidRange {
        ValidRange::at_least(self.earliest_year)
    }
}

/// Validator for user-supplied house attributes
#[derive(Debug, Clone)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: i64,
        range: ValidRange,
    ) -> Result<(), ValidationError> {
        if range.contains(value) {
            Ok(())
        } else {
            Err(ValidationError::OutOfRange { field, value, range })
        }
    }

    /// Validate every numeric field of the input.
    ///
    /// A remodel year after `reference_year` is accepted here; the assembler clamps it.
    /// A remodel year before the construction year is rejected.
    pub fn validate(&self, input: &UserInputSet, reference_year: i64) -> Result<(), ValidationError> {
        let years = self.config.year_range(reference_year);

        self.validate_range("YearBuilt", input.year_built, years)?;
        self.validate_range(
            "YearRemodAdd",
            input.year_remod_add,
            ValidRange::at_least(input.year_built),
        )?;
        self.validate_range("GarageYrBlt", input.garage_year(), years)?;
        self.validate_range("OverallQual", input.overall_qual, self.config.quality_range)?;
        self.validate_range("OverallCond", input.overall_cond, self.config.condition_range)?;
        self.validate_range("GrLivArea", input.living_area, self.config.living_area_range)?;
        self.validate_range("LotArea", input.lot_area, self.config.lot_area_range)?;
        self.validate_range("TotalBsmtSF", input.total_bsmt_sf, self.config.basement_area_range)?;
        self.validate_range("GarageArea", input.garage_area, self.config.garage_area_range)?;

        debug!("Input passed range validation (reference year {})", reference_year);
        Ok(())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}
