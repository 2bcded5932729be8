//! Configuration management for the demo banking app
//!
//! This module handles loading, validation, and management of the demo
//! configuration from YAML files. The demo must run with zero setup, so a
//! missing config file falls back to the built-in defaults.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::{ConfigError, ConfigErrorCode, ConfigResult};

// ==================== Configuration Types ====================

/// Mock data directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the mock account/transaction JSON files
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    /// Account number used by the demo (selects `<account>.json`)
    #[serde(default = "default_account_number")]
    pub account_number: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            account_number: default_account_number(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("./data/acctdata")
}

fn default_account_number() -> String {
    "2".to_string()
}

/// Client branding and card display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Prefix shown before the trailing card digits (e.g. "...")
    #[serde(default = "default_card_prefix")]
    pub card_digits_prefix: String,
    /// How many trailing digits of the card number to display
    #[serde(default = "default_card_show_digits")]
    pub card_show_digits: usize,
    /// Card art image file name
    #[serde(default = "default_card_image")]
    pub card_image: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            card_digits_prefix: default_card_prefix(),
            card_show_digits: default_card_show_digits(),
            card_image: default_card_image(),
        }
    }
}

fn default_card_prefix() -> String {
    "...".to_string()
}

fn default_card_show_digits() -> usize {
    4
}

fn default_card_image() -> String {
    "card.png".to_string()
}

/// Audio prompt configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Directory holding the prompt WAV files
    #[serde(default = "default_audio_path")]
    pub path: PathBuf,
    /// Whether audio prompts are played at all
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            path: default_audio_path(),
            enabled: true,
        }
    }
}

fn default_audio_path() -> PathBuf {
    PathBuf::from("./audio")
}

fn default_true() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Mock data settings
    #[serde(default)]
    pub data: DataConfig,
    /// Client branding settings
    #[serde(default)]
    pub client: ClientConfig,
    /// Audio prompt settings
    #[serde(default)]
    pub audio: AudioConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.to_string_lossy().to_string(),
                }
            } else {
                ConfigError::IoError
            }
        })?;

        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::InvalidYaml {
                message: e.to_string(),
            })?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load_or_default(path: PathBuf) -> ConfigResult<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(ConfigError::FileNotFound { .. }) => Ok(Config::default()),
            Err(e) => Err(e),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.client.card_show_digits == 0 || self.client.card_show_digits > 8 {
            return Err(ConfigError::InvalidValue {
                field: "client.card_show_digits".to_string(),
                reason: "Displayed card digits must be between 1 and 8".to_string(),
            });
        }
        if self.data.account_number.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "data.account_number".to_string(),
                reason: "Account number must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Full path to the active account's JSON file
    pub fn account_path(&self) -> PathBuf {
        self.data
            .path
            .join(format!("{}.json", self.data.account_number))
    }

    /// Full path to a prompt WAV file
    pub fn prompt_path(&self, file: &str) -> PathBuf {
        self.audio.path.join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.data.path, PathBuf::from("./data/acctdata"));
        assert_eq!(config.data.account_number, "2");
        assert_eq!(config.client.card_show_digits, 4);
        assert_eq!(config.logging.level, "info");
        assert!(config.audio.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_yaml() {
        let yaml = r#"
data:
  path: ./fixtures
client:
  card_digits_prefix: "xx-"
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.data.path, PathBuf::from("./fixtures"));
        assert_eq!(config.client.card_digits_prefix, "xx-");
        // Untouched sections keep their defaults
        assert_eq!(config.data.account_number, "2");
        assert_eq!(config.client.card_show_digits, 4);
    }

    #[test]
    fn test_validate_rejects_zero_digits() {
        let mut config = Config::default();
        config.client.card_show_digits = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_account_path() {
        let config = Config::default();
        assert_eq!(
            config.account_path(),
            PathBuf::from("./data/acctdata/2.json")
        );
    }
}
