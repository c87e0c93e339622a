//! Price Inference Engine
//!
//! Loads the house price model artifact and turns feature records into prices.
//! The model predicts `log(1 + price)`; the inverse transform is applied here.

mod engine;
mod estimate;
mod linear;
mod model;
mod onnx;

pub use engine::{EstimateError, PriceEngine, Valuation};
pub use estimate::{format_currency, predict_price, PriceEstimate, DEFAULT_BAND_FRACTION};
pub use linear::LinearModel;
pub use model::{load_model, ConstantModel, PriceModel};
pub use onnx::{DenseEncoder, OnnxModel};

use thiserror::Error;

/// Errors during model loading and inference
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    /// Artifact missing, unreadable or incompatible; fatal at startup
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),
    /// The model call itself failed; the request may be retried
    #[error("Prediction failed: {0}")]
    PredictionFailed(String),
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: String, actual: String },
}
