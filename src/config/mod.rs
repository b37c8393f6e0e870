//! Engine configuration.
//!
//! This module provides [`EngineConfig`], loaded from a YAML file. The
//! only tunable today is the flat estimated-tax rate applied by the
//! payroll reporter; it is configuration, not a hardcoded law.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Runtime configuration for the FieldTrack engine.
///
/// # Example
///
/// ```no_run
/// use fieldtrack::config::EngineConfig;
///
/// let config = EngineConfig::load("./config/engine.yaml")?;
/// println!("tax rate: {}", config.tax_rate);
/// # Ok::<(), fieldtrack::error::EngineError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Flat estimated tax rate used by payroll summaries.
    #[serde(default = "default_tax_rate")]
    pub tax_rate: Decimal,
}

fn default_tax_rate() -> Decimal {
    // Estimated 22%
    Decimal::new(22, 2)
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tax_rate: default_tax_rate(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] if the file does not exist.
    /// - [`EngineError::ConfigParseError`] if the file is not valid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content, &path_str)
    }

    /// Parses configuration from YAML content.
    pub fn from_yaml_str(content: &str, path: &str) -> EngineResult<Self> {
        serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tax_rate_is_22_percent() {
        let config = EngineConfig::default();
        assert_eq!(config.tax_rate, Decimal::new(22, 2));
    }

    #[test]
    fn test_parse_tax_rate_from_yaml() {
        let config = EngineConfig::from_yaml_str("tax_rate: \"0.25\"\n", "test.yaml").unwrap();
        assert_eq!(config.tax_rate, Decimal::new(25, 2));
    }

    #[test]
    fn test_empty_yaml_uses_default() {
        let config = EngineConfig::from_yaml_str("{}", "test.yaml").unwrap();
        assert_eq!(config.tax_rate, Decimal::new(22, 2));
    }

    #[test]
    fn test_invalid_yaml_is_a_parse_error() {
        let result = EngineConfig::from_yaml_str("tax_rate: [not a rate", "bad.yaml");
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let result = EngineConfig::load("/definitely/missing/engine.yaml");
        assert!(matches!(result, Err(EngineError::ConfigNotFound { .. })));
    }
}
