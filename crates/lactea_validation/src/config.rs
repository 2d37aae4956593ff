//! Engine configuration
//!
//! Loaded from TOML. Every section and field is optional; missing values take
//! the dashboard defaults (10% / 20% tiers, 30-value samples, liters with two
//! decimals).

use crate::classifier::{AccuracyClassifier, AccuracyPolicy};
use crate::export::{ExportContext, ExportProjection, VolumeUnit, MAX_PRECISION};
use crate::record::RecordBuilder;
use crate::stats::{StatisticsCalculator, DEFAULT_MIN_SAMPLE_SIZE};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Sample requirements for descriptive statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsPolicy {
    #[serde(default = "default_min_sample_size")]
    pub min_sample_size: usize,
}

fn default_min_sample_size() -> usize {
    DEFAULT_MIN_SAMPLE_SIZE
}

impl Default for StatisticsPolicy {
    fn default() -> Self {
        Self {
            min_sample_size: default_min_sample_size(),
        }
    }
}

/// Display settings for exported rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPolicy {
    #[serde(default)]
    pub unit: VolumeUnit,
    #[serde(default = "default_precision")]
    pub precision: usize,
}

fn default_precision() -> usize {
    2
}

impl Default for ExportPolicy {
    fn default() -> Self {
        Self {
            unit: VolumeUnit::default(),
            precision: default_precision(),
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub accuracy: AccuracyPolicy,
    #[serde(default)]
    pub statistics: StatisticsPolicy,
    #[serde(default)]
    pub export: ExportPolicy,
}

impl EngineConfig {
    /// Load and validate configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.accuracy.check().map_err(ConfigError::Invalid)?;
        if self.statistics.min_sample_size == 0 {
            return Err(ConfigError::Invalid(
                "min_sample_size must be at least 1".to_string(),
            ));
        }
        if self.export.precision > MAX_PRECISION {
            return Err(ConfigError::Invalid(format!(
                "precision must be at most {}, got {}",
                MAX_PRECISION, self.export.precision
            )));
        }
        Ok(())
    }

    pub fn classifier(&self) -> AccuracyClassifier {
        AccuracyClassifier::new(self.accuracy)
    }

    pub fn record_builder(&self) -> RecordBuilder {
        RecordBuilder::new(self.classifier())
    }

    pub fn statistics_calculator(&self) -> StatisticsCalculator {
        StatisticsCalculator::new(self.statistics.min_sample_size)
    }

    /// Projection for one product/business pair using the configured unit and precision
    pub fn export_projection(
        &self,
        product: impl Into<String>,
        business: impl Into<String>,
    ) -> ExportProjection {
        let context = ExportContext::new(product, business)
            .with_unit(self.export.unit)
            .with_precision(self.export.precision);
        ExportProjection::new(context, self.classifier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Verdict;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.accuracy.precise_below, 10.0);
        assert_eq!(config.accuracy.acceptable_below, 20.0);
        assert_eq!(config.statistics.min_sample_size, 30);
        assert_eq!(config.export.unit, VolumeUnit::Liters);
        assert_eq!(config.export.precision, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = EngineConfig::from_toml_str(
            r#"
            [accuracy]
            precise_below = 5.0

            [export]
            unit = "kilograms"
            "#,
        )
        .unwrap();

        assert_eq!(config.accuracy.precise_below, 5.0);
        assert_eq!(config.accuracy.acceptable_below, 20.0);
        assert_eq!(config.export.unit, VolumeUnit::Kilograms);
        assert_eq!(config.classifier().classify(7.0), Ok(Verdict::Acceptable));
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        let result = EngineConfig::from_toml_str(
            r#"
            [accuracy]
            precise_below = 25.0
            acceptable_below = 20.0
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = EngineConfig::from_toml_str("[statistics]\nmin_sample_size = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = EngineConfig::from_toml_str("[accuracy]\nprecise_below = \"ten\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lactea.toml");

        let mut config = EngineConfig::default();
        config.statistics.min_sample_size = 12;
        config.export.precision = 1;
        config.save(&path).unwrap();

        let loaded = EngineConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.statistics_calculator().min_sample_size(), 12);
        assert_eq!(loaded.export_projection("Yogur", "Granja").context().precision, 1);
    }
}
