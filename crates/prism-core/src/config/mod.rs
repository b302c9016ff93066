//! Configuration management for Prism.
//!
//! Configuration is loaded from the platform config directory (for example
//! `~/.config/prism/config.toml` on Linux) with sensible defaults. Every
//! value follows the same precedence: environment variable, then config
//! file, then built-in default.

mod types;

pub use types::*;

use crate::error::ConfigError;
use crate::format::ImageFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Prism.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gemini provider settings
    pub gemini: GeminiConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.prism.prism/config.toml
    /// - Linux: ~/.config/prism/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\prism\config\config.toml
    ///
    /// Falls back to ~/.prism/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "prism", "prism")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".prism").join("config.toml")
            })
    }

    /// Get the user templates file path, next to the config file.
    pub fn templates_path() -> PathBuf {
        let config = Self::default_path();
        match config.parent() {
            Some(dir) => dir.join("templates.toml"),
            None => PathBuf::from("templates.toml"),
        }
    }

    /// Resolve a config value by CLI-facing key name.
    ///
    /// Precedence: environment variable, then config file, then built-in
    /// default. Returns `None` for unknown keys and for `api-key` when it is
    /// set nowhere.
    pub fn get_value(&self, key: &str) -> Option<String> {
        let spec = config_key(key)?;
        if let Ok(value) = std::env::var(spec.env) {
            if !value.is_empty() {
                return Some(value);
            }
        }
        let file_value = match key {
            "api-key" => self.gemini.api_key.clone(),
            "model" => Some(self.gemini.model.clone()),
            "default-format" => Some(self.output.format.clone()),
            "default-quality" => Some(self.output.quality.clone()),
            _ => None,
        };
        file_value
            .filter(|v| !v.is_empty())
            .or_else(|| Self::default_value(key))
    }

    /// Built-in default for a key, ignoring environment and file.
    pub fn default_value(key: &str) -> Option<String> {
        match key {
            "model" => Some(DEFAULT_MODEL.to_string()),
            "default-format" => Some(OutputConfig::default().format),
            "default-quality" => Some(OutputConfig::default().quality),
            _ => None,
        }
    }

    /// Effective API key (env var beats the config file).
    pub fn gemini_api_key(&self) -> Option<String> {
        self.get_value("api-key")
    }

    /// Effective model name.
    pub fn gemini_model(&self) -> String {
        self.get_value("model")
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    /// Effective default output format.
    pub fn default_format(&self) -> String {
        self.get_value("default-format")
            .unwrap_or_else(|| "png".to_string())
    }

    /// Effective generated-image size tier.
    pub fn default_quality(&self) -> String {
        self.get_value("default-quality")
            .unwrap_or_else(|| "1K".to_string())
    }

    /// Validate configuration values.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if ImageFormat::from_extension(&self.output.format).is_none() {
            return Err(ConfigError::ValidationError(format!(
                "output.format '{}' must be one of: png, jpeg, webp, gif",
                self.output.format
            )));
        }
        if !QUALITY_TIERS.contains(&self.output.quality.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "output.quality '{}' must be one of: {}",
                self.output.quality,
                QUALITY_TIERS.join(", ")
            )));
        }
        if self.gemini.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "gemini.timeout_secs must be > 0".into(),
            ));
        }
        if self.logging.format != "pretty" && self.logging.format != "json" {
            return Err(ConfigError::ValidationError(
                "logging.format must be 'pretty' or 'json'".into(),
            ));
        }
        Ok(())
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}
