//! Model Capability Contract

use std::path::Path;
use std::sync::Arc;

use feature_engine::{FinalFeatureRecord, SchemaCatalog};
use tracing::{error, info};

use crate::linear::LinearModel;
use crate::onnx::OnnxModel;
use crate::InferenceError;

/// A loaded price model. Implementations are immutable after loading and shared
/// read-only across requests.
pub trait PriceModel: Send + Sync {
    /// Short description for logs and health output
    fn name(&self) -> &str;

    /// Predict `log(1 + price)` for each row, in row order
    fn predict(&self, rows: &[FinalFeatureRecord]) -> Result<Vec<f64>, InferenceError>;
}

/// Load a model artifact, choosing the backend by file extension
pub fn load_model(
    path: impl AsRef<Path>,
    catalog: &SchemaCatalog,
) -> Result<Arc<dyn PriceModel>, InferenceError> {
    let path = path.as_ref();
    info!("Loading price model from {}", path.display());

    if !path.is_file() {
        error!("Model artifact not found: {}", path.display());
        return Err(InferenceError::ModelUnavailable(format!(
            "model file '{}' not found",
            path.display()
        )));
    }

    let model: Arc<dyn PriceModel> = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Arc::new(LinearModel::from_path(path, catalog)?),
        Some("onnx") => Arc::new(OnnxModel::from_path(path, catalog)?),
        other => {
            return Err(InferenceError::ModelUnavailable(format!(
                "unsupported model format {:?} for '{}'",
                other.unwrap_or(""),
                path.display()
            )))
        }
    };

    info!("Model loaded successfully: {}", model.name());
    Ok(model)
}

/// Stand-in model that predicts the same log price for every row
#[derive(Debug, Clone)]
pub struct ConstantModel {
    log_price: f64,
}

impl ConstantModel {
    pub fn new(log_price: f64) -> Self {
        Self { log_price }
    }

    /// Model whose prediction inverts to exactly `price`
    pub fn for_price(price: f64) -> Self {
        Self::new(price.ln_1p())
    }
}

impl PriceModel for ConstantModel {
    fn name(&self) -> &str {
        "constant"
    }

    fn predict(&self, rows: &[FinalFeatureRecord]) -> Result<Vec<f64>, InferenceError> {
        Ok(vec![self.log_price; rows.len()])
    }
}
