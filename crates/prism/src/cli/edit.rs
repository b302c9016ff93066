//! The `prism edit` command.

use anyhow::Result;
use clap::Args;
use prism_core::{Config, Editor, ProviderFactory};
use std::path::PathBuf;

use crate::{cli, io};

/// Arguments for the edit command.
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Edit instruction or template name (e.g., "make the sky dramatic" or "remove-bg")
    pub prompt: String,

    /// Input image file (reads piped stdin when omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

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

/// Execute the edit command.
pub async fn execute(args: EditArgs) -> Result<()> {
    let config = Config::load()?;
    let format_flag = cli::parse_format_flag(args.format.as_deref())?;

    let (image, detected) = io::read_image_input(args.input.as_deref())?;
    tracing::debug!("Read {} input bytes", image.len());

    let registry = cli::load_registry();
    let provider = ProviderFactory::create(&args.provider, &config)?;
    let editor = Editor::new(registry, provider);

    let spinner = cli::provider_spinner(format!("Editing with {}...", editor.provider_name()));
    let result = editor
        .edit(&image, &args.prompt, detected.map(|f| f.mime_type()))
        .await;
    spinner.finish_and_clear();
    let result = result?;

    let target = io::choose_output_format(format_flag, args.output.as_deref(), &config);
    io::write_image_output(&result.image_data, args.output.as_deref(), target)?;

    if let Some(path) = &args.output {
        cli::success(&format!("Saved to {}", path.display()));
    }

    Ok(())
}
