//! # Configuration
//!
//! Optional TOML overrides for the rate table and the savings factors used by
//! the comparative table. Every section and key may be omitted; omitted values
//! keep their defaults.
//!
//! ```toml
//! [rates]
//! labor_rate_per_hour = 50.0
//! overhead_rate = 0.15
//!
//! [rates.material_unit_cost]
//! concrete = 100.0
//! steel = 150.0
//! wood = 80.0
//! brick = 90.0
//!
//! [optimization]
//! default = 0.85
//! labor = 0.9
//! ```
//!
//! The configuration is loaded once at startup, validated, and then only read.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;

use crate::calculations::{CostCategory, SavingsFactors};
use crate::calculations::breakdown::DEFAULT_SAVINGS_FACTOR;
use crate::errors::{CostError, CostResult};
use crate::rates::{MaterialKind, RateTable};

/// Effective estimator settings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EstimatorConfig {
    pub rates: RateTable,
    pub savings: SavingsFactors,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    rates: RawRates,
    #[serde(default)]
    optimization: RawOptimization,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRates {
    labor_rate_per_hour: Option<f64>,
    overhead_rate: Option<f64>,
    #[serde(default)]
    material_unit_cost: HashMap<String, f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawOptimization {
    default: Option<f64>,
    materials: Option<f64>,
    labor: Option<f64>,
    overhead: Option<f64>,
}

impl EstimatorConfig {
    /// Parse configuration from TOML text.
    ///
    /// `origin` names the source in error messages (usually the file path).
    pub fn from_toml_str(text: &str, origin: &str) -> CostResult<Self> {
        let raw: RawConfig =
            toml::from_str(text).map_err(|e| CostError::config_error(origin, e.to_string()))?;

        let rates = build_rates(raw.rates, origin)?;
        let savings = build_savings(raw.optimization);
        savings
            .validate()
            .map_err(|e| CostError::config_error(origin, e.to_string()))?;

        Ok(EstimatorConfig { rates, savings })
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> CostResult<Self> {
        let origin = path.display().to_string();
        let text = std::fs::read_to_string(path)
            .map_err(|e| CostError::config_error(&origin, e.to_string()))?;
        let config = EstimatorConfig::from_toml_str(&text, &origin)?;
        tracing::info!(path = %origin, "loaded estimator configuration");
        Ok(config)
    }

    /// Load `path` if given, otherwise use the defaults
    pub fn load_or_default(path: Option<&Path>) -> CostResult<Self> {
        match path {
            Some(path) => EstimatorConfig::load(path),
            None => Ok(EstimatorConfig::default()),
        }
    }
}

fn build_rates(raw: RawRates, origin: &str) -> CostResult<RateTable> {
    let standard = RateTable::standard();

    let mut costs: BTreeMap<MaterialKind, f64> = standard.materials().collect();
    for (name, cost) in raw.material_unit_cost {
        let kind = MaterialKind::from_str_flexible(&name).map_err(|_| {
            tracing::warn!(material = %name, "rejecting rate for unrecognized material");
            CostError::config_error(origin, format!("unknown material '{}' in [rates.material_unit_cost]", name))
        })?;
        costs.insert(kind, cost);
    }

    RateTable::new(
        costs,
        raw.labor_rate_per_hour.unwrap_or(standard.labor_rate_per_hour()),
        raw.overhead_rate.unwrap_or(standard.overhead_rate()),
    )
    .map_err(|e| CostError::config_error(origin, e.to_string()))
}

fn build_savings(raw: RawOptimization) -> SavingsFactors {
    let mut factors = SavingsFactors::uniform(raw.default.unwrap_or(DEFAULT_SAVINGS_FACTOR));
    for (category, factor) in [
        (CostCategory::Materials, raw.materials),
        (CostCategory::Labor, raw.labor),
        (CostCategory::Overhead, raw.overhead),
    ] {
        if let Some(factor) = factor {
            factors = factors.with_factor(category, factor);
        }
    }
    factors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = EstimatorConfig::from_toml_str("", "test.toml").unwrap();
        assert_eq!(config, EstimatorConfig::default());
        assert_eq!(config.rates, RateTable::standard());
        assert_eq!(config.savings, SavingsFactors::uniform(0.85));
    }

    #[test]
    fn test_partial_overrides() {
        let text = r#"
            [rates]
            labor_rate_per_hour = 65.0

            [rates.material_unit_cost]
            steel = 175.0

            [optimization]
            labor = 0.9
        "#;
        let config = EstimatorConfig::from_toml_str(text, "test.toml").unwrap();

        assert_eq!(config.rates.labor_rate_per_hour(), 65.0);
        assert_eq!(config.rates.overhead_rate(), 0.15);
        assert_eq!(config.rates.lookup(MaterialKind::Steel).unwrap(), 175.0);
        assert_eq!(config.rates.lookup(MaterialKind::Concrete).unwrap(), 100.0);

        assert_eq!(config.savings.factor_for(CostCategory::Labor), 0.9);
        assert_eq!(config.savings.factor_for(CostCategory::Materials), 0.85);
    }

    #[test]
    fn test_unknown_material_rejected() {
        let text = r#"
            [rates.material_unit_cost]
            granite = 300.0
        "#;
        let err = EstimatorConfig::from_toml_str(text, "bad.toml").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
        assert!(err.to_string().contains("granite"));
    }

    #[test]
    fn test_invalid_rates_rejected() {
        let err = EstimatorConfig::from_toml_str("[rates]\noverhead_rate = 1.5\n", "bad.toml").unwrap_err();
        assert!(matches!(err, CostError::ConfigError { .. }));

        let err = EstimatorConfig::from_toml_str(
            "[rates.material_unit_cost]\nwood = -80.0\n",
            "bad.toml",
        )
        .unwrap_err();
        assert!(matches!(err, CostError::ConfigError { .. }));
    }

    #[test]
    fn test_invalid_savings_rejected() {
        let err = EstimatorConfig::from_toml_str("[optimization]\ndefault = 1.5\n", "bad.toml").unwrap_err();
        assert!(matches!(err, CostError::ConfigError { .. }));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = EstimatorConfig::from_toml_str("[rates]\nlabour_rate = 10.0\n", "bad.toml").unwrap_err();
        assert!(matches!(err, CostError::ConfigError { .. }));
    }

    #[test]
    fn test_malformed_toml() {
        let err = EstimatorConfig::from_toml_str("[rates", "broken.toml").unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = EstimatorConfig::load(Path::new("/nonexistent/estimator.toml")).unwrap_err();
        assert!(matches!(err, CostError::ConfigError { .. }));
    }

    #[test]
    fn test_load_or_default_without_path() {
        let config = EstimatorConfig::load_or_default(None).unwrap();
        assert_eq!(config, EstimatorConfig::default());
    }
}
