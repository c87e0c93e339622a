//! Prediction Routes

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use data_validator::UserInputSet;
use feature_engine::{DerivedFeatures, FinalFeatureRecord};
use inference_engine::PriceEstimate;
use serde::Serialize;
use tracing::{info, info_span};
use uuid::Uuid;

use crate::error::ApiError;
use crate::{AppState, PREDICTIONS_TOTAL, PREDICTION_SECONDS};

/// Response for the predictions endpoint
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub request_id: Uuid,
    pub estimate: PriceEstimate,
    /// Display band, e.g. `$153,849 - $208,149`
    pub range: String,
    pub derived: DerivedFeatures,
    /// Exact record handed to the model
    pub features: FinalFeatureRecord,
    pub reference_year: i64,
    pub model: String,
}

/// Price one house
pub async fn create_prediction(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UserInputSet>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let Json(input) = payload.map_err(|rejection| {
        metrics::counter!(PREDICTIONS_TOTAL, "outcome" => "malformed").increment(1);
        ApiError::MalformedRequest(rejection.body_text())
    })?;

    let request_id = Uuid::new_v4();
    let span = info_span!("prediction", %request_id);
    let start = Instant::now();

    let result = span.in_scope(|| state.engine.estimate(&input));
    metrics::histogram!(PREDICTION_SECONDS).record(start.elapsed().as_secs_f64());

    let valuation = match result {
        Ok(valuation) => valuation,
        Err(err) => {
            let err = span.in_scope(|| ApiError::from(err));
            metrics::counter!(PREDICTIONS_TOTAL, "outcome" => err.code()).increment(1);
            return Err(err);
        }
    };

    metrics::counter!(PREDICTIONS_TOTAL, "outcome" => "ok").increment(1);
    span.in_scope(|| {
        info!(
            "Priced {} in {} at {} ({}us)",
            input.house_style, input.neighborhood, valuation.estimate.formatted, valuation.latency_us
        )
    });

    Ok(Json(PredictionResponse {
        request_id,
        range: valuation.estimate.formatted_range(),
        derived: *valuation.record.derived(),
        estimate: valuation.estimate,
        features: valuation.record,
        reference_year: state.engine.assembler().reference_year(),
        model: state.engine.model_name().to_string(),
    }))
}
