//! API and Startup Errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use data_validator::ValidationError;
use feature_engine::FeatureError;
use inference_engine::{EstimateError, InferenceError};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Errors that stop the service from starting
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Logging setup failed: {0}")]
    Logging(String),
    #[error("Schema catalog invalid: {0}")]
    Schema(#[from] FeatureError),
    #[error(transparent)]
    Model(#[from] InferenceError),
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned by request handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input the user can correct
    #[error(transparent)]
    InvalidInput(#[from] ValidationError),
    /// Body could not be parsed as a user input set
    #[error("Malformed request: {0}")]
    MalformedRequest(String),
    /// Model call failed; the request may be retried
    #[error("{0}")]
    PredictionFailed(String),
    /// Internal invariant broken; details are logged, not returned
    #[error("Internal error")]
    Internal,
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

impl From<EstimateError> for ApiError {
    fn from(err: EstimateError) -> Self {
        match err {
            EstimateError::Features(FeatureError::Validation(e)) => {
                warn!("Rejected input: {}", e);
                ApiError::InvalidInput(e)
            }
            EstimateError::Features(FeatureError::SchemaViolation(message)) => {
                error!("SCHEMA VIOLATION while pricing request: {}", message);
                ApiError::Internal
            }
            EstimateError::Inference(e) => {
                error!("Prediction failed: {}", e);
                ApiError::PredictionFailed(e.to_string())
            }
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PredictionFailed(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(ValidationError::InvalidCategory { .. }) => "invalid_category",
            ApiError::InvalidInput(ValidationError::OutOfRange { .. }) => "out_of_range",
            ApiError::MalformedRequest(_) => "malformed_request",
            ApiError::PredictionFailed(_) => "prediction_failed",
            ApiError::Internal => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let field = match &self {
            ApiError::InvalidInput(e) => Some(e.field()),
            _ => None,
        };
        let message = match &self {
            ApiError::PredictionFailed(_) => {
                format!("{}. Please try again.", self)
            }
            ApiError::Internal => "The price could not be computed.".to_string(),
            _ => self.to_string(),
        };
        let body = ErrorBody {
            error: self.code(),
            message,
            field,
        };
        (self.status(), Json(body)).into_response()
    }
}
