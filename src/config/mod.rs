mod defaults;
mod types;

pub use types::*;

use crate::error::ConfigError;
use defaults::*;
use std::path::Path;

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            report_dir: default_report_dir(),
            provider: ProviderConfig::default(),
            retry: RetryConfig::default(),
            scout: ScoutConfig::default(),
            explorer: ExplorerConfig::default(),
            edit: EditConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a YAML file. A missing file falls back to defaults so
    /// the tool works out of the box with just the API key set.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scout.max_concurrent_searches == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scout.max_concurrent_searches".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.explorer.max_concurrent_batches == 0 {
            return Err(ConfigError::InvalidValue {
                field: "explorer.max_concurrent_batches".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.explorer.batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "explorer.batch_size".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.scout.links_per_search == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scout.links_per_search".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "retry.max_attempts".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scout.max_concurrent_searches, 4);
        assert_eq!(config.explorer.batch_size, 5);
        assert_eq!(config.explorer.max_concurrent_batches, 3);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "explorer:\n  batch_size: 8\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.explorer.batch_size, 8);
        assert_eq!(config.explorer.max_concurrent_batches, 3);
        assert_eq!(config.provider.model, "gemini-2.0-flash");
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let yaml = "explorer:\n  batch_size: 0\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_err());
    }
}
