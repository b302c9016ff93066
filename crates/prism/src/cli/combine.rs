//! The `prism combine` command.

use anyhow::Result;
use clap::Args;
use prism_core::{Config, Editor, ProviderFactory};
use std::path::PathBuf;

use crate::{cli, io};

/// Arguments for the combine command.
#[derive(Args, Debug)]
pub struct CombineArgs {
    /// How to combine the images (free text; template names are not expanded)
    pub prompt: String,

    /// Input image files, in order (repeat -i; piped stdin joins as the first image)
    #[arg(short, long = "input", required = true)]
    pub input: Vec<PathBuf>,

    /// Output file (writes image bytes to stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format: png, jpeg, webp, gif
    #[arg(short, long)]
    pub format: Option<String>,

    /// Provider to use
    #[arg(short, long, default_value = "gemini")]
    pub provider: String,
}

/// Execute the combine command.
pub async fn execute(args: CombineArgs) -> Result<()> {
    let config = Config::load()?;
    let format_flag = cli::parse_format_flag(args.format.as_deref())?;

    let sources = io::read_image_sources(&args.input)?;
    tracing::debug!("Combining {} images", sources.len());

    let registry = cli::load_registry();
    let provider = ProviderFactory::create(&args.provider, &config)?;
    let editor = Editor::new(registry, provider);

    let spinner = cli::provider_spinner(format!(
        "Combining {} images with {}...",
        sources.len(),
        editor.provider_name()
    ));
    let result = editor.combine(sources, &args.prompt).await;
    spinner.finish_and_clear();
    let result = result?;

    let target = io::choose_output_format(format_flag, args.output.as_deref(), &config);
    io::write_image_output(&result.image_data, args.output.as_deref(), target)?;

    if let Some(path) = &args.output {
        cli::success(&format!("Saved to {}", path.display()));
    }

    Ok(())
}
