//! Log-Linear Price Model
//!
//! JSON artifact format:
//!
//! ```json
//! {
//!   "name": "ames-loglinear-v1",
//!   "intercept": 10.9,
//!   "numeric": { "GrLivArea": 0.00028, "OverallQual": 0.085 },
//!   "categorical": { "Neighborhood": { "NoRidge": 0.21 } }
//! }
//! ```
//!
//! Categorical levels without an offset contribute nothing.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use feature_engine::{AttributeKind, DerivedFeatures, FinalFeatureRecord, SchemaCatalog};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::PriceModel;
use crate::InferenceError;

fn default_name() -> String {
    "loglinear".to_string()
}

/// Linear model over the final feature record predicting `log(1 + price)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    #[serde(default = "default_name")]
    name: String,
    intercept: f64,
    #[serde(default)]
    numeric: BTreeMap<String, f64>,
    #[serde(default)]
    categorical: BTreeMap<String, BTreeMap<String, f64>>,
}

impl LinearModel {
    /// Read and check a JSON artifact
    pub fn from_path(path: &Path, catalog: &SchemaCatalog) -> Result<Self, InferenceError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            InferenceError::ModelUnavailable(format!("cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_json_str(&json, catalog)
    }

    /// Parse an artifact and check every coefficient against the record columns
    pub fn from_json_str(json: &str, catalog: &SchemaCatalog) -> Result<Self, InferenceError> {
        let model: Self = serde_json::from_str(json)
            .map_err(|e| InferenceError::ModelUnavailable(format!("invalid model artifact: {}", e)))?;
        model.check_columns(catalog)?;
        debug!(
            "Linear model '{}': {} numeric terms, {} categorical columns",
            model.name,
            model.numeric.len(),
            model.categorical.len()
        );
        Ok(model)
    }

    fn check_columns(&self, catalog: &SchemaCatalog) -> Result<(), InferenceError> {
        let columns: HashMap<&str, AttributeKind> = catalog
            .slots()
            .iter()
            .map(|slot| (slot.name, slot.kind))
            .chain(DerivedFeatures::COLUMNS)
            .collect();

        if !self.intercept.is_finite() {
            return Err(InferenceError::ModelUnavailable("intercept is not finite".to_string()));
        }

        for (column, weight) in &self.numeric {
            match columns.get(column.as_str()) {
                Some(AttributeKind::Integer) | Some(AttributeKind::Real) => {}
                Some(AttributeKind::Categorical) => {
                    return Err(InferenceError::ModelUnavailable(format!(
                        "numeric coefficient given for categorical column '{}'",
                        column
                    )))
                }
                None => {
                    return Err(InferenceError::ModelUnavailable(format!(
                        "coefficient for unknown column '{}'",
                        column
                    )))
                }
            }
            if !weight.is_finite() {
                return Err(InferenceError::ModelUnavailable(format!(
                    "coefficient for '{}' is not finite",
                    column
                )));
            }
        }

        for column in self.categorical.keys() {
            if columns.get(column.as_str()) != Some(&AttributeKind::Categorical) {
                return Err(InferenceError::ModelUnavailable(format!(
                    "categorical offsets given for non-categorical column '{}'",
                    column
                )));
            }
        }
        Ok(())
    }

    fn score(&self, row: &FinalFeatureRecord) -> Result<f64, InferenceError> {
        let mut total = self.intercept;

        for (column, weight) in &self.numeric {
            let value = row
                .get(column)
                .and_then(|value| value.as_f64())
                .ok_or_else(|| {
                    InferenceError::PredictionFailed(format!("row has no numeric column '{}'", column))
                })?;
            total += weight * value;
        }

        for (column, offsets) in &self.categorical {
            let value = row.get(column).ok_or_else(|| {
                InferenceError::PredictionFailed(format!("row has no column '{}'", column))
            })?;
            if let Some(offset) = value.as_str().and_then(|code| offsets.get(code)) {
                total += offset;
            }
        }

        Ok(total)
    }
}

impl PriceModel for LinearModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, rows: &[FinalFeatureRecord]) -> Result<Vec<f64>, InferenceError> {
        rows.iter().map(|row| self.score(row)).collect()
    }
}
