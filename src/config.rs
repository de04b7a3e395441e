//! Player configuration.
//!
//! Loaded from a YAML file, every key optional:
//!
//! ```yaml
//! time-scale: 0.5              # play twice as fast
//! default-period-seconds: 10   # period when the notation has no "<n>s"
//! overrun: truncate            # extend | truncate
//! language: fr                 # en | fr
//! catalog: marks.yaml          # extra known marks
//! ```

use crate::describe::Language;
use crate::error::ConfigError;
use crate::playback::OverrunPolicy;
use crate::ast::{DEFAULT_PERIOD_SECONDS, MAX_PERIOD_SECONDS};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct PlayerConfig {
    pub time_scale: f64,
    pub default_period_seconds: f64,
    pub overrun: OverrunPolicy,
    pub language: Language,
    pub catalog: Option<PathBuf>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            default_period_seconds: DEFAULT_PERIOD_SECONDS,
            overrun: OverrunPolicy::Extend,
            language: Language::English,
            catalog: None,
        }
    }
}

impl PlayerConfig {
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to an empty map.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: PlayerConfig =
            serde_yaml::from_str(content).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.time_scale.is_finite() || self.time_scale <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "time-scale must be greater than zero, got {}",
                self.time_scale
            )));
        }
        let period = self.default_period_seconds;
        if !period.is_finite() || period <= 0.0 || period > MAX_PERIOD_SECONDS {
            return Err(ConfigError::Invalid(format!(
                "default-period-seconds must be in (0, {}], got {}",
                MAX_PERIOD_SECONDS, period
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlayerConfig::from_yaml("").unwrap();
        assert_eq!(config, PlayerConfig::default());
        assert_eq!(config.time_scale, 1.0);
        assert_eq!(config.default_period_seconds, 10.0);
    }

    #[test]
    fn test_full_config() {
        let yaml = "time-scale: 0.5\n\
                    default-period-seconds: 6\n\
                    overrun: truncate\n\
                    language: fr\n\
                    catalog: marks.yaml\n";
        let config = PlayerConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.time_scale, 0.5);
        assert_eq!(config.default_period_seconds, 6.0);
        assert_eq!(config.overrun, OverrunPolicy::Truncate);
        assert_eq!(config.language, Language::French);
        assert_eq!(config.catalog, Some(PathBuf::from("marks.yaml")));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = PlayerConfig::from_yaml("language: fr\n").unwrap();
        assert_eq!(config.time_scale, 1.0);
        assert_eq!(config.overrun, OverrunPolicy::Extend);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(PlayerConfig::from_yaml("time-scale: 0\n").is_err());
        assert!(PlayerConfig::from_yaml("default-period-seconds: -3\n").is_err());
        assert!(PlayerConfig::from_yaml("default-period-seconds: 86400\n").is_err());
        assert!(PlayerConfig::from_yaml("overrun: sometimes\n").is_err());
        assert!(PlayerConfig::from_yaml("speed: 2\n").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = PlayerConfig::load(Path::new("/nonexistent/seamark.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
