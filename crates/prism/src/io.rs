//! Image input and output for Unix-style piping.
//!
//! Commands read from files or piped stdin and write to files or stdout.
//! Spinners and status lines go to stderr, so stdout carries nothing but
//! image bytes and can be piped into the next tool.

use anyhow::{bail, ensure, Context, Result};
use prism_core::{convert_format, Config, ImageFormat, SourceImage};
use std::io::{IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

/// Read an input image from a file, or from piped stdin when no path is given.
///
/// Returns the raw bytes along with the detected format. For files whose
/// content is not recognized, the file extension is used as a fallback hint.
pub fn read_image_input(path: Option<&Path>) -> Result<(Vec<u8>, Option<ImageFormat>)> {
    match path {
        Some(path) => {
            let data = std::fs::read(path)
                .with_context(|| format!("Failed to read image: {}", path.display()))?;
            ensure!(!data.is_empty(), "Input file is empty: {}", path.display());
            let format = ImageFormat::detect(&data).or_else(|| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .and_then(ImageFormat::from_extension)
            });
            Ok((data, format))
        }
        None => {
            let mut stdin = std::io::stdin().lock();
            if stdin.is_terminal() {
                bail!("No input image. Pass --input FILE or pipe image bytes on stdin.");
            }
            let mut data = Vec::new();
            stdin.read_to_end(&mut data).context("Failed to read stdin")?;
            ensure!(!data.is_empty(), "Empty input on stdin");
            let format = ImageFormat::detect(&data);
            Ok((data, format))
        }
    }
}

/// Read the input set for `combine`, preserving argument order.
///
/// When exactly one `--input` is given and stdin is piped, the stdin image
/// joins as the first input, so `cat a.png | prism combine "..." -i b.png`
/// combines two images.
pub fn read_image_sources(paths: &[PathBuf]) -> Result<Vec<SourceImage>> {
    let mut sources = Vec::with_capacity(paths.len() + 1);
    for path in paths {
        let (data, format) = read_image_input(Some(path))?;
        sources.push(source_from(data, format));
    }

    if paths.len() == 1 {
        if let Some(data) = try_read_piped_stdin()? {
            let format = ImageFormat::detect(&data);
            sources.insert(0, source_from(data, format));
        }
    }

    Ok(sources)
}

fn source_from(data: Vec<u8>, format: Option<ImageFormat>) -> SourceImage {
    match format {
        Some(format) => SourceImage::with_mime(data, format.mime_type()),
        None => SourceImage::new(data),
    }
}

fn try_read_piped_stdin() -> Result<Option<Vec<u8>>> {
    let mut stdin = std::io::stdin().lock();
    if stdin.is_terminal() {
        return Ok(None);
    }
    let mut data = Vec::new();
    stdin.read_to_end(&mut data).context("Failed to read stdin")?;
    if data.is_empty() {
        Ok(None)
    } else {
        Ok(Some(data))
    }
}

/// Decide the output format: the `--format` flag wins, then the output file
/// extension, then the configured default.
pub fn choose_output_format(
    flag: Option<ImageFormat>,
    output: Option<&Path>,
    config: &Config,
) -> ImageFormat {
    if let Some(format) = flag {
        return format;
    }
    if let Some(format) = output
        .and_then(|path| path.extension())
        .and_then(|ext| ext.to_str())
        .and_then(ImageFormat::from_extension)
    {
        return format;
    }
    ImageFormat::from_extension(&config.default_format()).unwrap_or(ImageFormat::Png)
}

/// Write image bytes to a file or stdout, converting to the target format.
pub fn write_image_output(data: &[u8], output: Option<&Path>, format: ImageFormat) -> Result<()> {
    let converted = convert_format(data, format)
        .with_context(|| format!("Failed to convert output to {}", format.extension()))?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create directory: {}", parent.display())
                    })?;
                }
            }
            std::fs::write(path, &converted)
                .with_context(|| format!("Failed to write: {}", path.display()))?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&converted)
                .context("Failed to write to stdout")?;
            stdout.flush().context("Failed to flush stdout")?;
        }
    }

    Ok(())
}
