//! Prism CLI entry point.

mod cli;
mod io;
mod logging;

use anyhow::Result;
use clap::{Parser, Subcommand};
use prism_core::Config;

#[derive(Parser)]
#[command(name = "prism")]
#[command(version)]
#[command(about = "AI-powered image editing from the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Edit an image with a prompt or template name
    Edit(cli::edit::EditArgs),

    /// Generate an image from a text prompt
    Generate(cli::generate::GenerateArgs),

    /// Combine multiple images into one
    Combine(cli::combine::CombineArgs),

    /// List available prompt templates
    Templates,

    /// List providers and their configuration status
    Providers,

    /// Manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config for logging setup; commands load their own copy so a
    // broken config file still leaves `prism config` usable for repairs.
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: {e}");
        eprintln!("Using default configuration. Run `prism config path` to locate the file.");
        Config::default()
    });

    logging::init_from_config(&config, cli.verbose, cli.json_logs);
    tracing::debug!("Prism v{}", prism_core::VERSION);

    match cli.command {
        Commands::Edit(args) => cli::edit::execute(args).await,
        Commands::Generate(args) => cli::generate::execute(args).await,
        Commands::Combine(args) => cli::combine::execute(args).await,
        Commands::Templates => cli::templates::execute().await,
        Commands::Providers => cli::providers::execute().await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
