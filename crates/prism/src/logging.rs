//! Logging initialization.
//!
//! Built on the `tracing` ecosystem. All log output goes to stderr so that
//! stdout stays clean for piped image bytes.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging from the loaded configuration.
///
/// The `--verbose` flag forces DEBUG level and `--json-logs` forces JSON
/// output; otherwise `[logging]` in the config file decides. RUST_LOG
/// overrides the level either way.
pub fn init_from_config(config: &prism_core::Config, verbose: bool, json_logs: bool) {
    let default_level = if verbose { "debug" } else { &config.logging.level };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let json_format = json_logs || config.logging.format == "json";

    if json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .init();
    }
}
