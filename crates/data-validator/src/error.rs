//! Validation Error Types

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inclusive integer range; an absent `max` means unbounded above
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidRange {
    pub min: i64,
    pub max: Option<i64>,
}

impl ValidRange {
    /// Range bounded on both ends
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max: Some(max) }
    }

    /// Range with only a lower bound
    pub const fn at_least(min: i64) -> Self {
        Self { min, max: None }
    }

    /// Whether `value` lies inside the range
    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && self.max.map_or(true, |max| value <= max)
    }
}

impl fmt::Display for ValidRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "[{}, {}]", self.min, max),
            None => write!(f, "[{}, ...)", self.min),
        }
    }
}

/// Errors caused by user-supplied values. All of them are correctable by the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value out of allowed range
    #[error("{field} value {value} is out of range {range}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        range: ValidRange,
    },

    /// Label not present in the categorical code mapping for the slot
    #[error("{field} has no category labelled '{label}'")]
    InvalidCategory { field: &'static str, label: String },
}

impl ValidationError {
    /// Slot the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::OutOfRange { field, .. } => field,
            ValidationError::InvalidCategory { field, .. } => field,
        }
    }
}
