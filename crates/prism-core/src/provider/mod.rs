//! Image generation provider abstraction.
//!
//! Defines the capability trait all providers implement, plus the factory
//! that creates the right provider from a name and config.

pub(crate) mod gemini;

pub use gemini::GeminiProvider;

use crate::config::Config;
use crate::error::{ProviderError, ValidationError};
use crate::format::ImageFormat;
use async_trait::async_trait;
use std::time::Duration;

/// Provider names the factory accepts.
pub const AVAILABLE_PROVIDERS: &[&str] = &["gemini"];

/// The image produced by a provider operation.
#[derive(Debug, Clone)]
pub struct EditResult {
    /// Raw image bytes
    pub image_data: Vec<u8>,
    /// MIME type reported by the provider
    pub mime_type: String,
    /// Provider that produced the image
    pub provider: String,
    /// Model identifier, if known
    pub model: Option<String>,
}

/// One input image for a combine operation.
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// Raw image bytes
    pub data: Vec<u8>,
    /// MIME type, when the caller knows it
    pub mime_type: Option<String>,
}

impl SourceImage {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            mime_type: None,
        }
    }

    pub fn with_mime(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: Some(mime_type.into()),
        }
    }

    /// MIME type for the wire: the caller's value, else sniffed from the
    /// bytes, else `image/png`.
    pub fn resolved_mime(&self) -> &str {
        match &self.mime_type {
            Some(mime) => mime,
            None => ImageFormat::detect(&self.data)
                .map(|f| f.mime_type())
                .unwrap_or("image/png"),
        }
    }
}

/// Trait that all image generation providers implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (we need `Box<dyn Provider>` for dynamic dispatch).
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider name for logging and display (e.g., "gemini").
    fn name(&self) -> &str;

    /// Whether credentials are present. Never touches the network.
    fn is_configured(&self) -> bool;

    /// Edit an image according to a prompt.
    ///
    /// `mime_type` is used as-is when given; otherwise the provider sniffs
    /// the bytes and falls back to PNG.
    async fn edit(
        &self,
        image: &[u8],
        prompt: &str,
        mime_type: Option<&str>,
    ) -> Result<EditResult, ProviderError>;

    /// Generate an image from a text prompt.
    async fn generate(&self, prompt: &str) -> Result<EditResult, ProviderError>;

    /// Merge multiple images into one according to a prompt.
    async fn combine(
        &self,
        images: &[SourceImage],
        prompt: &str,
    ) -> Result<EditResult, ProviderError>;
}

/// Factory that creates the appropriate provider from a name and config.
pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider by name.
    ///
    /// Credential resolution (env var over config file) happens here so the
    /// provider itself only sees resolved values.
    pub fn create(name: &str, config: &Config) -> Result<Box<dyn Provider>, ValidationError> {
        match name {
            "gemini" => Ok(Box::new(GeminiProvider::new(
                config.gemini_api_key(),
                &config.gemini_model(),
                &config.default_quality(),
                Duration::from_secs(config.gemini.timeout_secs),
            ))),
            other => Err(ValidationError::UnknownProvider {
                name: other.to_string(),
                available: AVAILABLE_PROVIDERS.join(", "),
            }),
        }
    }

    /// Names accepted by [`ProviderFactory::create`].
    pub fn available() -> &'static [&'static str] {
        AVAILABLE_PROVIDERS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_creates_gemini() {
        let provider = ProviderFactory::create("gemini", &Config::default()).unwrap();
        assert_eq!(provider.name(), "gemini");
    }

    #[test]
    fn test_factory_unknown_provider() {
        // Result::unwrap_err needs T: Debug, which Box<dyn Provider> lacks
        match ProviderFactory::create("dalle", &Config::default()) {
            Err(ValidationError::UnknownProvider { name, available }) => {
                assert_eq!(name, "dalle");
                assert!(available.contains("gemini"));
            }
            Err(other) => panic!("Expected UnknownProvider, got: {other}"),
            Ok(_) => panic!("Unknown provider must fail"),
        }
    }

    #[test]
    fn test_source_image_resolved_mime_explicit() {
        let image = SourceImage::with_mime(vec![1, 2, 3], "image/webp");
        assert_eq!(image.resolved_mime(), "image/webp");
    }

    #[test]
    fn test_source_image_resolved_mime_sniffed() {
        let image = SourceImage::new(vec![0xFF, 0xD8, 0xFF, 0xE0]);
        assert_eq!(image.resolved_mime(), "image/jpeg");
    }

    #[test]
    fn test_source_image_resolved_mime_fallback() {
        let image = SourceImage::new(vec![0x00, 0x01, 0x02, 0x03]);
        assert_eq!(image.resolved_mime(), "image/png");
    }
}
