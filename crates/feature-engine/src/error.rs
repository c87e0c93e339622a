//! Feature Pipeline Error Types

use data_validator::ValidationError;
use thiserror::Error;

/// Errors raised while assembling or deriving a feature record
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    /// Caller supplied a bad value
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Internal schema invariant broken; a programming or configuration error
    #[error("Schema violation: {0}")]
    SchemaViolation(String),
}

impl FeatureError {
    /// Whether the caller can fix the error by changing the input
    pub fn is_user_error(&self) -> bool {
        matches!(self, FeatureError::Validation(_))
    }
}
