//! Command implementations for the Prism CLI.

pub mod combine;
pub mod config;
pub mod edit;
pub mod generate;
pub mod providers;
pub mod templates;

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use prism_core::{Config, ImageFormat, TemplateRegistry, ValidationError};
use std::sync::Arc;
use std::time::Duration;

/// Build the template registry: built-ins first, then user overrides from
/// the templates file next to the config file.
pub(crate) fn load_registry() -> Arc<TemplateRegistry> {
    let mut registry = TemplateRegistry::with_builtins();
    registry.load_user_templates(&Config::templates_path());
    Arc::new(registry)
}

/// Parse the `--format` flag into a format, rejecting unknown values.
pub(crate) fn parse_format_flag(flag: Option<&str>) -> Result<Option<ImageFormat>> {
    match flag {
        None => Ok(None),
        Some(value) => match ImageFormat::from_extension(value) {
            Some(format) => Ok(Some(format)),
            None => Err(ValidationError::UnknownFormat {
                value: value.to_string(),
            }
            .into()),
        },
    }
}

/// Spinner shown on stderr while a provider call is in flight.
pub(crate) fn provider_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Print a success line to stderr.
pub(crate) fn success(message: &str) {
    eprintln!("{} {message}", style("✓").for_stderr().green());
}
