//! The `prism config` command.
//!
//! Edits the config file with `toml_edit` so user comments and formatting
//! survive a `set` or `unset`.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;
use prism_core::config::{config_key, valid_keys, ConfigKey, QUALITY_TIERS};
use prism_core::{Config, ImageFormat, ValidationError};
use std::path::Path;

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Set a configuration value
    Set {
        /// Key: api-key, model, default-format, or default-quality
        key: String,
        /// Value to store
        value: String,
    },

    /// Print one configuration value
    Get {
        /// Key to read
        key: String,
    },

    /// Remove a value from the config file
    Unset {
        /// Key to remove
        key: String,
    },

    /// Show the full configuration
    Show,

    /// Print the config file path
    Path,

    /// Create a config file populated with the defaults
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command.
pub async fn execute(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Set { key, value } => set_value(&Config::default_path(), &key, &value),
        ConfigCommand::Get { key } => get_value(&key),
        ConfigCommand::Unset { key } => unset_value(&Config::default_path(), &key),
        ConfigCommand::Show => show(),
        ConfigCommand::Path => {
            println!("{}", Config::default_path().display());
            Ok(())
        }
        ConfigCommand::Init { force } => init(&Config::default_path(), force),
    }
}

fn require_key(key: &str) -> Result<&'static ConfigKey> {
    config_key(key).ok_or_else(|| {
        ValidationError::UnknownConfigKey {
            key: key.to_string(),
            valid: valid_keys(),
        }
        .into()
    })
}

/// Reject values that would make the config file fail validation on load.
fn check_value(spec: &ConfigKey, value: &str) -> Result<()> {
    match spec.name {
        "default-format" if ImageFormat::from_extension(value).is_none() => {
            bail!("Invalid format '{value}'. Expected one of: png, jpeg, webp, gif")
        }
        "default-quality" if !QUALITY_TIERS.contains(&value) => {
            bail!(
                "Invalid quality '{value}'. Expected one of: {}",
                QUALITY_TIERS.join(", ")
            )
        }
        _ => Ok(()),
    }
}

fn set_value(config_path: &Path, key: &str, value: &str) -> Result<()> {
    let spec = require_key(key)?;
    check_value(spec, value)?;

    let content = if config_path.exists() {
        std::fs::read_to_string(config_path)?
    } else {
        String::new()
    };
    let mut doc: toml_edit::DocumentMut = content.parse().unwrap_or_default();

    if !doc.contains_key(spec.section) {
        doc[spec.section] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc[spec.section][spec.field] = toml_edit::value(value);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(config_path, doc.to_string())?;

    println!("{} = {}", key, display_value(key, value));
    Ok(())
}

fn get_value(key: &str) -> Result<()> {
    require_key(key)?;
    let config = Config::load()?;
    match config.get_value(key) {
        Some(value) => println!("{}", display_value(key, &value)),
        None => println!("(not set)"),
    }
    Ok(())
}

fn unset_value(config_path: &Path, key: &str) -> Result<()> {
    let spec = require_key(key)?;

    if !config_path.exists() {
        println!("{key} was not set");
        return Ok(());
    }
    let content = std::fs::read_to_string(config_path)?;
    let mut doc: toml_edit::DocumentMut = content.parse().unwrap_or_default();

    let removed = doc
        .get_mut(spec.section)
        .and_then(|item| item.as_table_mut())
        .and_then(|table| table.remove(spec.field))
        .is_some();

    if removed {
        std::fs::write(config_path, doc.to_string())?;
        println!("Removed {key}");
    } else {
        println!("{key} was not set");
    }
    Ok(())
}

/// Write a default config file for hand editing.
fn init(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Config file already exists at: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(config_path, Config::default().to_toml()?)?;

    println!("Configuration initialized at: {}", config_path.display());
    Ok(())
}

fn show() -> Result<()> {
    let config = Config::load()?;

    for spec in prism_core::config::CONFIG_KEYS {
        let value = config.get_value(spec.name);
        let mut display = match &value {
            Some(value) => display_value(spec.name, value),
            None => "(not set)".to_string(),
        };
        if value.is_some() && value == Config::default_value(spec.name) {
            display.push_str(" (default)");
        }
        println!(
            "{:<16} {:<36} {}",
            spec.name,
            display,
            style(spec.description).dim()
        );
    }

    println!();
    println!("Config file: {}", Config::default_path().display());
    Ok(())
}

/// API keys are masked down to their last four characters everywhere the
/// CLI prints them.
fn display_value(key: &str, value: &str) -> String {
    if key != "api-key" {
        return value.to_string();
    }
    let chars: Vec<char> = value.chars().collect();
    if chars.len() > 4 {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("****{tail}")
    } else {
        "****".to_string()
    }
}
