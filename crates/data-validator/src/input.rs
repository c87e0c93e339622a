//! User Input Set

use serde::{Deserialize, Serialize};

/// House attributes supplied by the user.
///
/// Neighborhood and house style are human-readable labels; they are translated
/// to model codes during assembly. The two floor areas are not part of the input:
/// they are derived from `living_area`. Unknown fields are rejected so a
/// misspelled optional field is not silently replaced by its fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserInputSet {
    /// Construction year (`YearBuilt`)
    pub year_built: i64,
    /// Remodel year (`YearRemodAdd`); later than the reference year is clamped
    pub year_remod_add: i64,
    /// Overall material and finish quality, 1-10 (`OverallQual`)
    pub overall_qual: i64,
    /// Overall condition, 1-10 (`OverallCond`)
    pub overall_cond: i64,
    /// Above-ground living area in square feet (`GrLivArea`)
    pub living_area: i64,
    /// Lot area in square feet (`LotArea`)
    pub lot_area: i64,
    /// Total basement area in square feet (`TotalBsmtSF`)
    pub total_bsmt_sf: i64,
    /// Garage area in square feet (`GarageArea`)
    pub garage_area: i64,
    /// Neighborhood label, e.g. "College Creek"
    pub neighborhood: String,
    /// House style label, e.g. "Two story"
    pub house_style: String,
    /// Garage construction year (`GarageYrBlt`); defaults to `year_built`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub garage_year_built: Option<i64>,
}

impl UserInputSet {
    /// Garage year, falling back to the construction year
    pub fn garage_year(&self) -> i64 {
        self.garage_year_built.unwrap_or(self.year_built)
    }
}

impl Default for UserInputSet {
    fn default() -> Self {
        Self {
            year_built: 1980,
            year_remod_add: 1990,
            overall_qual: 6,
            overall_cond: 6,
            living_area: 1500,
            lot_area: 10_000,
            total_bsmt_sf: 1000,
            garage_area: 500,
            neighborhood: "College Creek".to_string(),
            house_style: "Two story".to_string(),
            garage_year_built: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garage_year_falls_back_to_year_built() {
        let input = UserInputSet {
            year_built: 1955,
            ..Default::default()
        };
        assert_eq!(input.garage_year(), 1955);

        let input = UserInputSet {
            garage_year_built: Some(1970),
            ..input
        };
        assert_eq!(input.garage_year(), 1970);
    }

    #[test]
    fn test_deserialize_without_garage_year() {
        let json = r#"{
            "year_built": 2000, "year_remod_add": 2000,
            "overall_qual": 6, "overall_cond": 6,
            "living_area": 1500, "lot_area": 10000,
            "total_bsmt_sf": 1000, "garage_area": 500,
            "neighborhood": "College Creek", "house_style": "Two story"
        }"#;
        let input: UserInputSet = serde_json::from_str(json).unwrap();
        assert_eq!(input.garage_year_built, None);
        assert_eq!(input.garage_year(), 2000);
    }

    #[test]
    fn test_misspelled_field_is_rejected() {
        let json = r#"{
            "year_built": 2000, "year_remod_add": 2000,
            "overall_qual": 6, "overall_cond": 6,
            "living_area": 1500, "lot_area": 10000,
            "total_bsmt_sf": 1000, "garage_area": 500,
            "neighborhood": "College Creek", "house_style": "Two story",
            "garage_yr_built": 1960
        }"#;
        let err = serde_json::from_str::<UserInputSet>(json).unwrap_err();
        assert!(err.to_string().contains("garage_yr_built"));
    }
}
