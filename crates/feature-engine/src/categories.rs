//! Categorical Code Mappings

use data_validator::ValidationError;
use serde::Serialize;

use crate::schema::slots;

/// Neighborhood labels offered to the user and the codes the model was trained on
pub const NEIGHBORHOODS: [(&str, &str); 25] = [
    ("Bloomington Heights", "Blmngtn"),
    ("Bluestem", "Blueste"),
    ("Briardale", "BrDale"),
    ("Brookside", "BrkSide"),
    ("Clear Creek", "ClearCr"),
    ("College Creek", "CollgCr"),
    ("Crawford", "Crawfor"),
    ("Edwards", "Edwards"),
    ("Gilbert", "Gilbert"),
    ("Iowa DOT and Rail Road", "IDOTRR"),
    ("Meadow Village", "MeadowV"),
    ("Mitchell", "Mitchel"),
    ("North Ames", "NAmes"),
    ("Northridge", "NoRidge"),
    ("Northpark Villa", "NPkVill"),
    ("Northridge Heights", "NridgHt"),
    ("Northwest Ames", "NWAmes"),
    ("Old Town", "OldTown"),
    ("South & West of Iowa State University", "SWISU"),
    ("Sawyer", "Sawyer"),
    ("Sawyer West", "SawyerW"),
    ("Somerset", "Somerst"),
    ("Stone Brook", "StoneBr"),
    ("Timberland", "Timber"),
    ("Veenker", "Veenker"),
];

/// House style labels and codes
pub const HOUSE_STYLES: [(&str, &str); 8] = [
    ("One story", "1Story"),
    ("One and one-half story: 2nd level finished", "1.5Fin"),
    ("One and one-half story: 2nd level unfinished", "1.5Unf"),
    ("Two story", "2Story"),
    ("Two and one-half story: 2nd level finished", "2.5Fin"),
    ("Two and one-half story: 2nd level unfinished", "2.5Unf"),
    ("Split Foyer", "SFoyer"),
    ("Split Level", "SLvl"),
];

/// Label-to-code table for one categorical slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeMapping {
    slot: &'static str,
    entries: Vec<(&'static str, &'static str)>,
}

impl CodeMapping {
    /// Build a mapping; bijectivity is checked by the catalog, not here
    pub fn new(slot: &'static str, entries: &[(&'static str, &'static str)]) -> Self {
        Self {
            slot,
            entries: entries.to_vec(),
        }
    }

    pub fn neighborhoods() -> Self {
        Self::new(slots::NEIGHBORHOOD, &NEIGHBORHOODS)
    }

    pub fn house_styles() -> Self {
        Self::new(slots::HOUSE_STYLE, &HOUSE_STYLES)
    }

    /// Slot this mapping fills
    pub fn slot(&self) -> &'static str {
        self.slot
    }

    /// Translate a label into its code
    pub fn code_for(&self, label: &str) -> Result<&'static str, ValidationError> {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, code)| *code)
            .ok_or_else(|| ValidationError::InvalidCategory {
                field: self.slot,
                label: label.to_string(),
            })
    }

    /// Labels in presentation order
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(label, _)| *label)
    }

    /// Codes in presentation order
    pub fn codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(_, code)| *code)
    }

    pub fn entries(&self) -> &[(&'static str, &'static str)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
