//! Price Estimate

use std::slice;

use feature_engine::{slots, FeatureError, FinalFeatureRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::model::PriceModel;
use crate::InferenceError;

/// Default half-width of the displayed price band (±15%)
pub const DEFAULT_BAND_FRACTION: f64 = 0.15;

/// Predicted sale price with display helpers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEstimate {
    /// Predicted price in dollars
    pub price: f64,
    /// Raw model output, `log(1 + price)`
    pub log_price: f64,
    /// Price as whole dollars, e.g. `$181,234`
    pub formatted: String,
    /// Lower end of the display band
    pub range_low: f64,
    /// Upper end of the display band
    pub range_high: f64,
    /// Price per square foot of living area; absent for zero living area
    pub price_per_sqft: Option<f64>,
}

impl PriceEstimate {
    /// Build an estimate from the raw model output
    pub fn from_log_price(
        log_price: f64,
        living_area: i64,
        band_fraction: f64,
    ) -> Result<Self, InferenceError> {
        let price = inverse_log_price(log_price)?;
        let price_per_sqft = (living_area > 0).then(|| price / living_area as f64);
        Ok(Self {
            price,
            log_price,
            formatted: format_currency(price),
            range_low: price * (1.0 - band_fraction),
            range_high: price * (1.0 + band_fraction),
            price_per_sqft,
        })
    }

    /// Band formatted for display, e.g. `$153,849 - $208,149`
    pub fn formatted_range(&self) -> String {
        format!(
            "{} - {}",
            format_currency(self.range_low),
            format_currency(self.range_high)
        )
    }
}

fn inverse_log_price(log_price: f64) -> Result<f64, InferenceError> {
    let price = log_price.exp_m1();
    if log_price.is_finite() && price.is_finite() {
        Ok(price)
    } else {
        Err(InferenceError::PredictionFailed(format!(
            "model output {} does not map to a finite price",
            log_price
        )))
    }
}

/// Run the model on a single-row batch and return its `log(1 + price)` output
pub(crate) fn predict_log_price(
    model: &dyn PriceModel,
    record: &FinalFeatureRecord,
) -> Result<f64, InferenceError> {
    let outputs = model.predict(slice::from_ref(record)).map_err(|e| {
        error!("Model '{}' failed: {}", model.name(), e);
        match e {
            InferenceError::PredictionFailed(_) => e,
            other => InferenceError::PredictionFailed(other.to_string()),
        }
    })?;

    match outputs.as_slice() {
        [log_price] => {
            debug!("Model '{}' predicted log price {:.4}", model.name(), log_price);
            Ok(*log_price)
        }
        other => Err(InferenceError::PredictionFailed(format!(
            "model returned {} outputs for 1 row",
            other.len()
        ))),
    }
}

/// Predict the sale price in dollars for one final feature record
pub fn predict_price(
    model: &dyn PriceModel,
    record: &FinalFeatureRecord,
) -> Result<f64, InferenceError> {
    inverse_log_price(predict_log_price(model, record)?)
}

/// Format whole dollars with thousands separators.
///
/// Works on the rounded float directly, so amounts past `i64::MAX` keep every digit.
pub fn format_currency(amount: f64) -> String {
    let dollars = amount.round();
    let digits = format!("{:.0}", dollars.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if dollars < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Living area of a record, used for the per-square-foot figure
pub(crate) fn living_area(record: &FinalFeatureRecord) -> Result<i64, FeatureError> {
    record.base().integer(slots::LIVING_AREA)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConstantModel;
    use data_validator::UserInputSet;
    use feature_engine::{FeatureAssembler, SchemaCatalog};
    use std::sync::Arc;

    struct FailingModel;

    impl PriceModel for FailingModel {
        fn name(&self) -> &str {
            "failing"
        }

        fn predict(&self, _rows: &[FinalFeatureRecord]) -> Result<Vec<f64>, InferenceError> {
            Err(InferenceError::InvalidInputShape {
                expected: "[1, 83]".to_string(),
                actual: "[1, 82]".to_string(),
            })
        }
    }

    struct BatchModel;

    impl PriceModel for BatchModel {
        fn name(&self) -> &str {
            "batch"
        }

        fn predict(&self, _rows: &[FinalFeatureRecord]) -> Result<Vec<f64>, InferenceError> {
            Ok(vec![12.0, 12.5])
        }
    }

    fn record() -> FinalFeatureRecord {
        let catalog = Arc::new(SchemaCatalog::reference().unwrap());
        FeatureAssembler::new(catalog, 2020)
            .build(&UserInputSet::default())
            .unwrap()
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.4), "$999");
        assert_eq!(format_currency(1000.0), "$1,000");
        assert_eq!(format_currency(181_234.49), "$181,234");
        assert_eq!(format_currency(1_234_567.5), "$1,234,568");
        assert_eq!(format_currency(-0.4), "$0");
        assert_eq!(format_currency(-2500.0), "-$2,500");
    }

    #[test]
    fn test_format_currency_beyond_i64() {
        assert_eq!(format_currency(1e19), "$10,000,000,000,000,000,000");
        assert_eq!(format_currency(-1e19), "-$10,000,000,000,000,000,000");
    }

    #[test]
    fn test_huge_estimate_keeps_every_digit() {
        let estimate = PriceEstimate::from_log_price(50.0, 1500, 0.15).unwrap();
        let digits = estimate.formatted.chars().filter(char::is_ascii_digit).count();
        assert_eq!(digits, format!("{:.0}", estimate.price.round()).len());
        assert_eq!(digits, 22);
        assert!(estimate.formatted.starts_with("$5,184,705,528,587,07"));
    }

    #[test]
    fn test_living_area_read_from_record() {
        assert_eq!(living_area(&record()), Ok(1500));
    }

    #[test]
    fn test_inverse_log_transform() {
        let model = ConstantModel::new(200_000f64.ln_1p());
        let price = predict_price(&model, &record()).unwrap();
        assert!((price - 200_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_estimate_band_and_per_sqft() {
        let estimate = PriceEstimate::from_log_price(150_000f64.ln_1p(), 1500, 0.15).unwrap();
        assert!((estimate.range_low - 127_500.0).abs() < 1e-6);
        assert!((estimate.range_high - 172_500.0).abs() < 1e-6);
        assert!((estimate.price_per_sqft.unwrap() - 100.0).abs() < 1e-6);
        assert_eq!(estimate.formatted, "$150,000");
        assert_eq!(estimate.formatted_range(), "$127,500 - $172,500");
    }

    #[test]
    fn test_zero_living_area_has_no_per_sqft() {
        let estimate = PriceEstimate::from_log_price(12.0, 0, 0.15).unwrap();
        assert_eq!(estimate.price_per_sqft, None);
    }

    #[test]
    fn test_non_finite_output_fails() {
        let err = PriceEstimate::from_log_price(f64::NAN, 1500, 0.15).unwrap_err();
        assert!(matches!(err, InferenceError::PredictionFailed(_)));
        assert!(PriceEstimate::from_log_price(1e6, 1500, 0.15).is_err());
    }

    #[test]
    fn test_model_error_becomes_prediction_failed() {
        let err = predict_price(&FailingModel, &record()).unwrap_err();
        assert!(matches!(err, InferenceError::PredictionFailed(ref m) if m.contains("[1, 82]")));
    }

    #[test]
    fn test_wrong_output_count_fails() {
        let err = predict_price(&BatchModel, &record()).unwrap_err();
        assert_eq!(
            err,
            InferenceError::PredictionFailed("model returned 2 outputs for 1 row".to_string())
        );
    }
}
