//! Service Configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `HOUSE_PRICER__SECTION__KEY` environment variables.

use chrono::Datelike;
use config::{Config, ConfigError, Environment, File};
use data_validator::ValidationConfig;
use serde::Deserialize;

use crate::rate_limit::RateLimitConfig;

/// Config file read when no explicit path is given
pub const DEFAULT_CONFIG_PATH: &str = "config/house-pricer.toml";

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "HOUSE_PRICER";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub bind_addr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelSettings {
    /// `.json` (log-linear) or `.onnx` artifact
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PricingSettings {
    /// Year used for age arithmetic and as the upper bound on years; current year when unset
    pub reference_year: Option<i64>,
    /// Half-width of the displayed price band
    pub band_fraction: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

/// Full service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub model: ModelSettings,
    pub pricing: PricingSettings,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Load settings. An explicit `path` must exist; the default path is optional.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let defaults = RateLimitConfig::default();
        let settings: Self = Config::builder()
            .set_default("server.bind_addr", "0.0.0.0:8080")?
            .set_default("model.path", "models/house_price_model.json")?
            .set_default("pricing.band_fraction", 0.15)?
            .set_default("rate_limit.enabled", defaults.enabled)?
            .set_default("rate_limit.per_second", defaults.per_second)?
            .set_default("rate_limit.burst_size", u64::from(defaults.burst_size))?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .add_source(File::with_name(path.unwrap_or(DEFAULT_CONFIG_PATH)).required(path.is_some()))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        settings.check()?;
        Ok(settings)
    }

    /// Reject values that would make every request fail
    fn check(&self) -> Result<(), ConfigError> {
        let earliest = ValidationConfig::default().earliest_year;
        match self.pricing.reference_year {
            Some(year) if year < earliest => Err(ConfigError::Message(format!(
                "pricing.reference_year {} is before the earliest supported year {}",
                year, earliest
            ))),
            _ => Ok(()),
        }
    }

    /// Reference year for this process
    pub fn reference_year(&self) -> i64 {
        self.pricing
            .reference_year
            .unwrap_or_else(|| i64::from(chrono::Local::now().year()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.model.path, "models/house_price_model.json");
        assert!((settings.pricing.band_fraction - 0.15).abs() < f64::EPSILON);
        assert_eq!(settings.rate_limit.burst_size, 10);
        assert!(!settings.logging.json);
    }

    #[test]
    fn test_explicit_file_must_exist() {
        assert!(Settings::load(Some("/nonexistent/house-pricer.toml")).is_err());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("house-pricer-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[pricing]\nreference_year = 2020\nband_fraction = 0.1\n\n[rate_limit]\nenabled = false\n",
        )
        .unwrap();
        let settings = Settings::load(path.to_str()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.reference_year(), 2020);
        assert!((settings.pricing.band_fraction - 0.1).abs() < f64::EPSILON);
        assert!(!settings.rate_limit.enabled);
        assert_eq!(settings.server.bind_addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_reference_year_before_earliest_is_rejected() {
        let path = std::env::temp_dir().join(format!("house-pricer-old-{}.toml", std::process::id()));
        std::fs::write(&path, "[pricing]\nreference_year = 1850\n").unwrap();
        let result = Settings::load(path.to_str());
        std::fs::remove_file(&path).ok();

        let err = result.unwrap_err();
        assert!(err.to_string().contains("1850"));
        assert!(matches!(crate::StartupError::from(err), crate::StartupError::Config(_)));
    }

    #[test]
    fn test_reference_year_falls_back_to_calendar() {
        let settings = Settings::load(None).unwrap();
        if settings.pricing.reference_year.is_none() {
            assert!(settings.reference_year() >= 2024);
        }
    }
}
