//! Price Engine
//!
//! One request runs assemble -> derive -> predict -> inverse transform.

use std::sync::Arc;
use std::time::Instant;

use data_validator::UserInputSet;
use feature_engine::{FeatureAssembler, FeatureError, FinalFeatureRecord};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::estimate::{living_area, predict_log_price, PriceEstimate, DEFAULT_BAND_FRACTION};
use crate::model::PriceModel;
use crate::InferenceError;

/// Errors from a full estimate request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    #[error(transparent)]
    Features(#[from] FeatureError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

/// Result of a full estimate request
#[derive(Debug, Clone, Serialize)]
pub struct Valuation {
    pub estimate: PriceEstimate,
    pub record: FinalFeatureRecord,
    /// Wall time for the whole request, in microseconds
    pub latency_us: u64,
}

/// Feature pipeline bound to a loaded model
#[derive(Clone)]
pub struct PriceEngine {
    assembler: FeatureAssembler,
    model: Arc<dyn PriceModel>,
    band_fraction: f64,
}

impl PriceEngine {
    /// Create a new price engine
    pub fn new(assembler: FeatureAssembler, model: Arc<dyn PriceModel>) -> Self {
        info!(
            "Creating price engine: model={}, reference_year={}",
            model.name(),
            assembler.reference_year()
        );
        Self {
            assembler,
            model,
            band_fraction: DEFAULT_BAND_FRACTION,
        }
    }

    /// Set the half-width of the displayed price band
    pub fn with_band_fraction(mut self, band_fraction: f64) -> Self {
        self.band_fraction = band_fraction.clamp(0.0, 1.0);
        self
    }

    /// Estimate the sale price for `input`
    pub fn estimate(&self, input: &UserInputSet) -> Result<Valuation, EstimateError> {
        let start = Instant::now();

        let record = self.assembler.build(input)?;
        let log_price = predict_log_price(self.model.as_ref(), &record)?;
        let living_area = living_area(&record)?;
        let estimate = PriceEstimate::from_log_price(log_price, living_area, self.band_fraction)?;

        let latency_us = start.elapsed().as_micros() as u64;
        debug!("Estimate {} computed in {}us", estimate.formatted, latency_us);

        Ok(Valuation {
            estimate,
            record,
            latency_us,
        })
    }

    pub fn assembler(&self) -> &FeatureAssembler {
        &self.assembler
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub fn band_fraction(&self) -> f64 {
        self.band_fraction
    }
}
