//! Error types for Prism image editing operations.
//!
//! Errors are organized by layer so callers can tell configuration problems,
//! bad input, and provider failures apart without string matching.

use thiserror::Error;

/// Top-level error type for Prism operations.
#[derive(Error, Debug)]
pub enum PrismError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid input caught before any provider call
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Provider call failed
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decode/encode errors
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Input validation errors, raised before any network activity.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Combine was called with fewer than two images
    #[error("At least 2 images are required for combine, got {count}")]
    TooFewImages { count: usize },

    /// Provider name not registered with the factory
    #[error("Unknown provider '{name}'. Available: {available}")]
    UnknownProvider { name: String, available: String },

    /// Output format string not recognized
    #[error("Unknown image format '{value}'. Expected one of: png, jpeg, webp, gif")]
    UnknownFormat { value: String },

    /// Configuration key not recognized
    #[error("Unknown config key '{key}'. Valid keys: {valid}")]
    UnknownConfigKey { key: String, valid: String },
}

/// Errors from image generation providers.
///
/// Domain errors (`TextResponse`, `NoImage`) pass through the orchestrator
/// unchanged; transport failures are wrapped exactly once into `Request`.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// API credentials are missing
    #[error(
        "{provider} API key not configured. \
         Run `prism config set api-key YOUR_KEY` or set {env_var}."
    )]
    NotConfigured { provider: String, env_var: String },

    /// HTTP request or response handling failed
    #[error("{provider} request failed: {message}")]
    Request {
        provider: String,
        message: String,
        status_code: Option<u16>,
    },

    /// Request exceeded the configured deadline
    #[error("{provider} request timed out after {timeout_secs}s")]
    Timeout { provider: String, timeout_secs: u64 },

    /// Model answered with prose instead of an image
    #[error("{provider} returned text instead of an image: {text}")]
    TextResponse { provider: String, text: String },

    /// Response carried neither image nor text parts
    #[error("{provider} response contained no image data")]
    NoImage { provider: String },
}

/// Convenience type alias for Prism results.
pub type Result<T> = std::result::Result<T, PrismError>;
