//! The `prism generate` command.

use anyhow::Result;
use clap::Args;
use prism_core::{Config, Editor, ProviderFactory};
use std::path::PathBuf;

use crate::{cli, io};

/// Arguments for the generate command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Description of the image to generate, or a template name
    pub prompt: String,

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

/// Execute the generate command.
pub async fn execute(args: GenerateArgs) -> Result<()> {
    let config = Config::load()?;
    let format_flag = cli::parse_format_flag(args.format.as_deref())?;

    let registry = cli::load_registry();
    let provider = ProviderFactory::create(&args.provider, &config)?;
    let editor = Editor::new(registry, provider);

    let spinner = cli::provider_spinner(format!("Generating with {}...", editor.provider_name()));
    let result = editor.generate(&args.prompt).await;
    spinner.finish_and_clear();
    let result = result?;

    let target = io::choose_output_format(format_flag, args.output.as_deref(), &config);
    io::write_image_output(&result.image_data, args.output.as_deref(), target)?;

    if let Some(path) = &args.output {
        cli::success(&format!("Saved to {}", path.display()));
    }

    Ok(())
}
