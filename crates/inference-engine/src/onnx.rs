//! ONNX Price Model (tract)

use std::path::Path;

use feature_engine::{AttributeKind, DerivedFeatures, FinalFeatureRecord, SchemaCatalog};
use tracing::{debug, info};
use tract_onnx::prelude::*;

use crate::model::PriceModel;
use crate::InferenceError;

type Plan = SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>;

/// Flattens a final feature record into the dense `f32` row an ONNX model takes.
///
/// Layout: every numeric column in record order, then a one-hot block per
/// mapped categorical slot with one position per code in mapping order.
/// The remaining categorical slots always hold their defaults and are omitted.
#[derive(Debug, Clone)]
pub struct DenseEncoder {
    numeric: Vec<&'static str>,
    one_hot: Vec<(&'static str, Vec<&'static str>)>,
}

impl DenseEncoder {
    pub fn new(catalog: &SchemaCatalog) -> Self {
        let numeric: Vec<&'static str> = catalog
            .slots()
            .iter()
            .map(|slot| (slot.name, slot.kind))
            .chain(DerivedFeatures::COLUMNS)
            .filter(|(_, kind)| *kind != AttributeKind::Categorical)
            .map(|(name, _)| name)
            .collect();

        let one_hot: Vec<(&'static str, Vec<&'static str>)> = [catalog.neighborhoods(), catalog.house_styles()]
            .into_iter()
            .map(|mapping| (mapping.slot(), mapping.codes().collect()))
            .collect();

        Self { numeric, one_hot }
    }

    /// Length of an encoded row
    pub fn width(&self) -> usize {
        self.numeric.len() + self.one_hot.iter().map(|(_, codes)| codes.len()).sum::<usize>()
    }

    pub fn encode(&self, row: &FinalFeatureRecord) -> Result<Vec<f32>, InferenceError> {
        let mut dense = Vec::with_capacity(self.width());

        for column in &self.numeric {
            let value = row.get(column).and_then(|v| v.as_f64()).ok_or_else(|| {
                InferenceError::PredictionFailed(format!("row has no numeric column '{}'", column))
            })?;
            dense.push(value as f32);
        }

        for (column, codes) in &self.one_hot {
            let value = row.get(column).ok_or_else(|| {
                InferenceError::PredictionFailed(format!("row has no column '{}'", column))
            })?;
            let code = value.as_str();
            dense.extend(codes.iter().map(|c| if Some(*c) == code { 1.0 } else { 0.0 }));
        }

        Ok(dense)
    }
}

/// ONNX regression model run through tract, one row per run
pub struct OnnxModel {
    name: String,
    plan: Plan,
    encoder: DenseEncoder,
}

impl OnnxModel {
    /// Load, type and optimize the model for a `[1, width]` input
    pub fn from_path(path: &Path, catalog: &SchemaCatalog) -> Result<Self, InferenceError> {
        let encoder = DenseEncoder::new(catalog);
        let width = encoder.width();

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| model.with_input_fact(0, f32::fact([1, width]).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| {
                InferenceError::ModelUnavailable(format!("cannot load '{}': {:#}", path.display(), e))
            })?;

        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("onnx")
            .to_string();
        info!("ONNX model '{}' ready, input width {}", name, width);

        Ok(Self { name, plan, encoder })
    }

    fn run_row(&self, row: &FinalFeatureRecord) -> Result<f64, InferenceError> {
        let dense = self.encoder.encode(row)?;
        let width = dense.len();
        let input: Tensor = tract_ndarray::Array2::from_shape_vec((1, width), dense)
            .map_err(|e| InferenceError::InvalidInputShape {
                expected: format!("[1, {}]", self.encoder.width()),
                actual: e.to_string(),
            })?
            .into();

        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| InferenceError::PredictionFailed(format!("{:#}", e)))?;

        let output = outputs
            .first()
            .ok_or_else(|| InferenceError::PredictionFailed("model produced no output".to_string()))?;
        let view = output
            .to_array_view::<f32>()
            .map_err(|e| InferenceError::PredictionFailed(format!("{:#}", e)))?;
        let value = view
            .iter()
            .next()
            .copied()
            .ok_or_else(|| InferenceError::PredictionFailed("empty output tensor".to_string()))?;

        debug!("ONNX output: {}", value);
        Ok(f64::from(value))
    }
}

impl PriceModel for OnnxModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, rows: &[FinalFeatureRecord]) -> Result<Vec<f64>, InferenceError> {
        rows.iter().map(|row| self.run_row(row)).collect()
    }
}
