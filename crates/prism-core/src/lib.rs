//! Prism Core - AI-powered image editing library.
//!
//! Prism sends images and prompts to generative image providers and returns
//! edited image bytes. Short template names ("remove-bg", "vintage") expand
//! to full editing prompts through a registry that users can extend.
//!
//! # Architecture
//!
//! ```text
//! Prompt/Template → Resolve → Provider (Gemini) → Image bytes → Convert
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use prism_core::{Config, Editor, ProviderFactory, TemplateRegistry};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> prism_core::Result<()> {
//!     let config = Config::load()?;
//!     let registry = Arc::new(TemplateRegistry::with_builtins());
//!     let provider = ProviderFactory::create("gemini", &config)?;
//!     let editor = Editor::new(registry, provider);
//!
//!     let image = std::fs::read("./photo.jpg")?;
//!     let result = editor.edit(&image, "remove-bg", None).await?;
//!     std::fs::write("./out.png", result.image_data)?;
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod convert;
pub mod editor;
pub mod error;
pub mod format;
pub mod provider;
pub mod template;

// Re-exports for convenient access
pub use config::Config;
pub use convert::convert_format;
pub use editor::Editor;
pub use error::{ConfigError, PrismError, ProviderError, Result, ValidationError};
pub use format::ImageFormat;
pub use provider::{EditResult, Provider, ProviderFactory, SourceImage};
pub use template::{Template, TemplateRegistry};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
