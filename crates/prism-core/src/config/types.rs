//! Sub-configuration structs and the CLI-facing key catalog.

use serde::{Deserialize, Serialize};

/// Default Gemini model for all image operations.
pub const DEFAULT_MODEL: &str = "gemini-3-pro-image-preview";

/// Supported generated-image size tiers (wired to the provider's imageSize).
pub const QUALITY_TIERS: &[&str] = &["1K", "2K", "4K"];

/// Gemini provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// API key; the GEMINI_API_KEY environment variable takes precedence
    pub api_key: Option<String>,

    /// Model used for edit, generate, and combine
    pub model: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 120,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Format used when neither a flag nor an output extension decides one
    pub format: String,

    /// Generated image size tier ("1K", "2K", "4K")
    pub quality: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "png".to_string(),
            quality: "1K".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// A configuration key as exposed by `prism config`.
///
/// `section`/`field` locate the value in the TOML file; `env` is the
/// environment variable that overrides it.
pub struct ConfigKey {
    pub name: &'static str,
    pub env: &'static str,
    pub section: &'static str,
    pub field: &'static str,
    pub description: &'static str,
}

/// All keys `prism config set/get/unset` accepts.
pub const CONFIG_KEYS: &[ConfigKey] = &[
    ConfigKey {
        name: "api-key",
        env: "GEMINI_API_KEY",
        section: "gemini",
        field: "api_key",
        description: "Gemini API key",
    },
    ConfigKey {
        name: "model",
        env: "GEMINI_MODEL",
        section: "gemini",
        field: "model",
        description: "Model used for image operations",
    },
    ConfigKey {
        name: "default-format",
        env: "PRISM_DEFAULT_FORMAT",
        section: "output",
        field: "format",
        description: "Output format when none is requested (png, jpeg, webp, gif)",
    },
    ConfigKey {
        name: "default-quality",
        env: "PRISM_DEFAULT_QUALITY",
        section: "output",
        field: "quality",
        description: "Generated image size tier (1K, 2K, 4K)",
    },
];

/// Look up a key by its CLI-facing name.
pub fn config_key(name: &str) -> Option<&'static ConfigKey> {
    CONFIG_KEYS.iter().find(|key| key.name == name)
}

/// Comma-separated key names for error messages.
pub fn valid_keys() -> String {
    CONFIG_KEYS
        .iter()
        .map(|key| key.name)
        .collect::<Vec<_>>()
        .join(", ")
}
