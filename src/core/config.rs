use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

fn default_currency_symbol() -> String {
    "₱".to_string()
}

fn default_color() -> String {
    "#6366f1".to_string()
}

fn default_target_months() -> u32 {
    6
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Symbol printed in front of every amount.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Directory holding the fund store. Defaults to the platform data dir.
    pub data_path: Option<String>,
    /// Display color given to new funds.
    #[serde(default = "default_color")]
    pub default_color: String,
    /// How far ahead the target date of a new fund lies when none is given.
    #[serde(default = "default_target_months")]
    pub default_target_months: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            currency_symbol: default_currency_symbol(),
            data_path: None,
            default_color: default_color(),
            default_target_months: default_target_months(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, or built-in defaults when
    /// no config file has been created yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "sinkfund", "sinkfund")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("dev", "sinkfund", "sinkfund")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r##"
currency_symbol: "$"
data_path: "/tmp/sinkfund"
default_color: "#10b981"
default_target_months: 12
"##;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.data_path.as_deref(), Some("/tmp/sinkfund"));
        assert_eq!(config.default_color, "#10b981");
        assert_eq!(config.default_target_months, 12);
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/sinkfund"));
    }

    #[test]
    fn test_config_defaults_for_missing_keys() {
        let config: AppConfig = serde_yaml::from_str("data_path: ~\n").unwrap();
        assert_eq!(config.currency_symbol, "₱");
        assert!(config.data_path.is_none());
        assert_eq!(config.default_color, "#6366f1");
        assert_eq!(config.default_target_months, 6);
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_from_path(dir.path().join("absent.yaml"));
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
