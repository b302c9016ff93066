//! The `prism providers` command.

use anyhow::Result;
use console::style;
use prism_core::{Config, ProviderFactory};

/// Execute the providers command: show each provider and whether it is ready.
pub async fn execute() -> Result<()> {
    let config = Config::load()?;

    println!(
        "{}",
        style(format!("{:<10}  {:<32}  {}", "PROVIDER", "MODEL", "STATUS")).bold()
    );

    let mut missing = false;
    for name in ProviderFactory::available() {
        let provider = ProviderFactory::create(name, &config)?;
        let status = if provider.is_configured() {
            style("configured").green()
        } else {
            missing = true;
            style("missing API key").red()
        };
        println!(
            "{:<10}  {:<32}  {}",
            provider.name(),
            config.gemini_model(),
            status
        );
    }

    if missing {
        eprintln!();
        eprintln!("Set GEMINI_API_KEY or run: prism config set api-key YOUR_KEY");
    }

    Ok(())
}
