//! Runtime configuration with JSON persistence.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::constants::{DEFAULT_EQUALITY_THRESHOLD_M, DEFAULT_FREQUENCY_THRESHOLD_PCT};

/// Tunable parameters of the localization pipeline.
///
/// Defaults match the consensus behaviour the system ships with; loaded
/// files are validated before they replace a live configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizationConfig {
    /// Euclidean distance under which two candidate positions count as the
    /// same (meters).
    pub equality_threshold_m: f64,
    /// Minimum share of the candidate pool, in percent, required for
    /// consensus.
    pub frequency_threshold_pct: f64,
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            equality_threshold_m: DEFAULT_EQUALITY_THRESHOLD_M,
            frequency_threshold_pct: DEFAULT_FREQUENCY_THRESHOLD_PCT,
        }
    }
}

impl LocalizationConfig {
    /// Load a configuration from a JSON file, validating it before returning.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            message: e.to_string(),
        })?;
        let config: Self =
            serde_json::from_str(&contents).map_err(|e| ConfigError::SerializationError {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Persist the configuration as pretty-printed JSON.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializationError {
                message: e.to_string(),
            })?;
        fs::write(path, contents).map_err(|e| ConfigError::IoError {
            message: e.to_string(),
        })
    }

    /// Check every parameter for a usable value.
    ///
    /// The comparisons are written to reject NaN as well as out-of-range
    /// numbers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.equality_threshold_m > 0.0) {
            return Err(ConfigError::InvalidParameter {
                parameter: "equality_threshold_m".to_string(),
                value: self.equality_threshold_m,
                reason: "must be a positive number of meters".to_string(),
            });
        }
        if !(self.frequency_threshold_pct > 0.0 && self.frequency_threshold_pct <= 100.0) {
            return Err(ConfigError::InvalidParameter {
                parameter: "frequency_threshold_pct".to_string(),
                value: self.frequency_threshold_pct,
                reason: "must be a percentage in (0, 100]".to_string(),
            });
        }
        Ok(())
    }
}

/// Errors raised while loading, saving or validating a configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConfigError {
    /// A parameter holds a value outside its usable range.
    InvalidParameter {
        parameter: String,
        value: f64,
        reason: String,
    },
    /// The configuration file could not be read or written.
    IoError { message: String },
    /// The file contents could not be parsed or encoded as JSON.
    SerializationError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidParameter {
                parameter,
                value,
                reason,
            } => write!(f, "invalid {}: {} ({})", parameter, value, reason),
            ConfigError::IoError { message } => write!(f, "config I/O error: {}", message),
            ConfigError::SerializationError { message } => {
                write!(f, "config serialization error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(LocalizationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_nonpositive_equality_threshold() {
        let config = LocalizationConfig {
            equality_threshold_m: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_rejects_nan_thresholds() {
        let config = LocalizationConfig {
            equality_threshold_m: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = LocalizationConfig {
            frequency_threshold_pct: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_percentage_above_100() {
        let config = LocalizationConfig {
            frequency_threshold_pct: 101.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = std::env::temp_dir().join("triangulation_config_test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");

        let config = LocalizationConfig {
            equality_threshold_m: 0.25,
            frequency_threshold_pct: 66.0,
        };
        config.save_to_file(&path).unwrap();
        let loaded = LocalizationConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_loading_an_invalid_file_fails_validation() {
        let dir = std::env::temp_dir().join("triangulation_config_test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("invalid.json");
        fs::write(&path, r#"{"equality_threshold_m": -1.0, "frequency_threshold_pct": 80.0}"#)
            .unwrap();

        assert!(matches!(
            LocalizationConfig::from_file(&path),
            Err(ConfigError::InvalidParameter { .. })
        ));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let result = LocalizationConfig::from_file("/nonexistent/config.json");
        assert!(matches!(result, Err(ConfigError::IoError { .. })));
    }
}
