//! Derived-Feature Calculator
//!
//! Engineered attributes computed in closed form from a base record.

use serde::Serialize;
use tracing::debug;

use crate::error::FeatureError;
use crate::record::{BaseRecord, FinalFeatureRecord};
use crate::schema::{slots, AttributeKind, AttributeValue};

/// A house older than this many years that was never remodeled gets `IsOldNotRemod = 1`
pub const OLD_HOUSE_AGE: i64 = 50;

/// Secondary attributes appended to the base record
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedFeatures {
    /// `HouseAge`: years since construction
    pub house_age: i64,
    /// `RemodAge`: years since the last remodel
    pub remod_age: i64,
    /// `IsOldNotRemod`: 1 when older than 50 years and never remodeled
    pub is_old_not_remod: i64,
    /// `QualCondDiff`: quality minus condition, may be negative
    pub qual_cond_diff: i64,
    /// `HasGarage`
    pub has_garage: i64,
    /// `HasBsmt`
    pub has_bsmt: i64,
    /// `LotRatio`: lot area per square foot of living area, always finite
    pub lot_ratio: f64,
}

impl DerivedFeatures {
    /// Column names and kinds, in the order they are appended
    pub const COLUMNS: [(&'static str, AttributeKind); 7] = [
        ("HouseAge", AttributeKind::Integer),
        ("RemodAge", AttributeKind::Integer),
        ("IsOldNotRemod", AttributeKind::Integer),
        ("QualCondDiff", AttributeKind::Integer),
        ("HasGarage", AttributeKind::Integer),
        ("HasBsmt", AttributeKind::Integer),
        ("LotRatio", AttributeKind::Real),
    ];

    /// Compute every derived attribute from `base`
    pub fn compute(base: &BaseRecord, reference_year: i64) -> Result<Self, FeatureError> {
        let year_built = base.integer(slots::YEAR_BUILT)?;
        let year_remod = base.integer(slots::YEAR_REMOD_ADD)?;
        let quality = base.integer(slots::OVERALL_QUAL)?;
        let condition = base.integer(slots::OVERALL_COND)?;
        let garage_area = base.integer(slots::GARAGE_AREA)?;
        let basement_area = base.integer(slots::TOTAL_BSMT_SF)?;
        let lot_area = base.integer(slots::LOT_AREA)?;
        let living_area = base.integer(slots::LIVING_AREA)?;

        let house_age = reference_year - year_built;
        let remod_age = reference_year - year_remod;
        // Never remodeled: the remodel year equals the construction year
        let is_old_not_remod = i64::from(house_age > OLD_HOUSE_AGE && remod_age == house_age);

        Ok(Self {
            house_age,
            remod_age,
            is_old_not_remod,
            qual_cond_diff: quality - condition,
            has_garage: i64::from(garage_area > 0),
            has_bsmt: i64::from(basement_area > 0),
            lot_ratio: lot_ratio(lot_area, living_area),
        })
    }

    /// Name/value pairs in column order
    pub fn entries(&self) -> [(&'static str, AttributeValue); 7] {
        let [age, remod, old, gap, garage, bsmt, ratio] = Self::COLUMNS.map(|(name, _)| name);
        [
            (age, AttributeValue::Integer(self.house_age)),
            (remod, AttributeValue::Integer(self.remod_age)),
            (old, AttributeValue::Integer(self.is_old_not_remod)),
            (gap, AttributeValue::Integer(self.qual_cond_diff)),
            (garage, AttributeValue::Integer(self.has_garage)),
            (bsmt, AttributeValue::Integer(self.has_bsmt)),
            (ratio, AttributeValue::Real(self.lot_ratio)),
        ]
    }
}

/// Lot area over living area; zero whenever the ratio would not be finite
fn lot_ratio(lot_area: i64, living_area: i64) -> f64 {
    if living_area == 0 {
        return 0.0;
    }
    let ratio = lot_area as f64 / living_area as f64;
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}

/// Append derived attributes to a base record
pub fn derive(base: BaseRecord, reference_year: i64) -> Result<FinalFeatureRecord, FeatureError> {
    let derived = DerivedFeatures::compute(&base, reference_year)?;
    debug!(
        "Derived features: age={} remod_age={} old_not_remod={} lot_ratio={:.3}",
        derived.house_age, derived.remod_age, derived.is_old_not_remod, derived.lot_ratio
    );
    Ok(FinalFeatureRecord::new(base, derived))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_with(overrides: &[(&'static str, i64)]) -> BaseRecord {
        let mut entries = vec![
            (slots::YEAR_BUILT, AttributeValue::Integer(2000)),
            (slots::YEAR_REMOD_ADD, AttributeValue::Integer(2000)),
            (slots::OVERALL_QUAL, AttributeValue::Integer(6)),
            (slots::OVERALL_COND, AttributeValue::Integer(6)),
            (slots::GARAGE_AREA, AttributeValue::Integer(500)),
            (slots::TOTAL_BSMT_SF, AttributeValue::Integer(1000)),
            (slots::LOT_AREA, AttributeValue::Integer(10_000)),
            (slots::LIVING_AREA, AttributeValue::Integer(1500)),
        ];
        for (name, value) in overrides {
            for entry in entries.iter_mut() {
                if entry.0 == *name {
                    entry.1 = AttributeValue::Integer(*value);
                }
            }
        }
        BaseRecord::from_entries(entries)
    }

    #[test]
    fn test_reference_house() {
        let derived = DerivedFeatures::compute(&base_with(&[]), 2020).unwrap();
        assert_eq!(derived.house_age, 20);
        assert_eq!(derived.remod_age, 20);
        assert_eq!(derived.is_old_not_remod, 0);
        assert_eq!(derived.qual_cond_diff, 0);
        assert_eq!(derived.has_garage, 1);
        assert_eq!(derived.has_bsmt, 1);
        assert!((derived.lot_ratio - 6.6667).abs() < 0.001);
    }

    #[test]
    fn test_old_house_never_remodeled() {
        let base = base_with(&[(slots::YEAR_BUILT, 1950), (slots::YEAR_REMOD_ADD, 1950)]);
        let derived = DerivedFeatures::compute(&base, 2020).unwrap();
        assert_eq!(derived.house_age, 70);
        assert_eq!(derived.is_old_not_remod, 1);
    }

    #[test]
    fn test_old_house_remodeled() {
        let base = base_with(&[(slots::YEAR_BUILT, 1950), (slots::YEAR_REMOD_ADD, 1990)]);
        let derived = DerivedFeatures::compute(&base, 2020).unwrap();
        assert_eq!(derived.is_old_not_remod, 0);
    }

    #[test]
    fn test_exactly_fifty_years_is_not_old() {
        let base = base_with(&[(slots::YEAR_BUILT, 1970), (slots::YEAR_REMOD_ADD, 1970)]);
        let derived = DerivedFeatures::compute(&base, 2020).unwrap();
        assert_eq!(derived.house_age, 50);
        assert_eq!(derived.is_old_not_remod, 0);
    }

    #[test]
    fn test_negative_quality_gap() {
        let base = base_with(&[(slots::OVERALL_QUAL, 3), (slots::OVERALL_COND, 8)]);
        let derived = DerivedFeatures::compute(&base, 2020).unwrap();
        assert_eq!(derived.qual_cond_diff, -5);
    }

    #[test]
    fn test_garage_and_basement_flags() {
        let base = base_with(&[(slots::GARAGE_AREA, 0), (slots::TOTAL_BSMT_SF, 0)]);
        let derived = DerivedFeatures::compute(&base, 2020).unwrap();
        assert_eq!(derived.has_garage, 0);
        assert_eq!(derived.has_bsmt, 0);

        let base = base_with(&[(slots::GARAGE_AREA, 1), (slots::TOTAL_BSMT_SF, 1)]);
        let derived = DerivedFeatures::compute(&base, 2020).unwrap();
        assert_eq!(derived.has_garage, 1);
        assert_eq!(derived.has_bsmt, 1);
    }

    #[test]
    fn test_zero_living_area_gives_zero_ratio() {
        let base = base_with(&[(slots::LIVING_AREA, 0)]);
        let derived = DerivedFeatures::compute(&base, 2020).unwrap();
        assert_eq!(derived.lot_ratio, 0.0);
    }

    #[test]
    fn test_missing_slot_is_schema_violation() {
        let base = BaseRecord::from_entries(vec![(slots::YEAR_BUILT, AttributeValue::Integer(2000))]);
        let err = derive(base, 2020).unwrap_err();
        assert!(matches!(err, FeatureError::SchemaViolation(ref m) if m.contains("YearRemodAdd")));
        assert!(!err.is_user_error());
    }

    #[test]
    fn test_mistyped_slot_is_schema_violation() {
        let mut entries = base_with(&[]).entries().to_vec();
        entries[0].1 = AttributeValue::Categorical("2000".to_string());
        let err = derive(BaseRecord::from_entries(entries), 2020).unwrap_err();
        assert!(matches!(err, FeatureError::SchemaViolation(_)));
    }

    #[test]
    fn test_entries_follow_column_order() {
        let derived = DerivedFeatures::compute(&base_with(&[]), 2020).unwrap();
        let names: Vec<_> = derived.entries().iter().map(|(name, _)| *name).collect();
        let expected: Vec<_> = DerivedFeatures::COLUMNS.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, expected);
        assert_eq!(derived.entries()[6].1.kind(), AttributeKind::Real);
    }
}
