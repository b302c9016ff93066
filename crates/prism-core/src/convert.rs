//! Output format conversion.
//!
//! Provider responses are usually PNG; callers may want JPEG, WEBP, or GIF.
//! Conversion decodes and re-encodes only when the bytes are not already in
//! the target format.

use crate::error::Result;
use crate::format::ImageFormat;
use image::DynamicImage;
use std::io::Cursor;

/// JPEG encode quality for converted output.
const JPEG_QUALITY: u8 = 95;

/// Convert image bytes to the target format.
///
/// Bytes already in the target format pass through untouched. JPEG has no
/// alpha channel, so transparency is flattened onto a white background.
pub fn convert_format(data: &[u8], target: ImageFormat) -> Result<Vec<u8>> {
    if ImageFormat::detect(data) == Some(target) {
        return Ok(data.to_vec());
    }

    let img = image::load_from_memory(data)?;
    let mut buffer = Cursor::new(Vec::new());

    match target {
        ImageFormat::Jpeg => {
            let img = if img.color().has_alpha() {
                flatten_onto_white(&img)
            } else {
                img
            };
            let encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
            img.write_with_encoder(encoder)?;
        }
        ImageFormat::Png => {
            img.write_to(&mut buffer, image::ImageFormat::Png)?;
        }
        ImageFormat::Webp => {
            // The lossless WebP encoder only takes RGB8/RGBA8
            DynamicImage::ImageRgba8(img.to_rgba8())
                .write_to(&mut buffer, image::ImageFormat::WebP)?;
        }
        ImageFormat::Gif => {
            DynamicImage::ImageRgba8(img.to_rgba8())
                .write_to(&mut buffer, image::ImageFormat::Gif)?;
        }
    }

    Ok(buffer.into_inner())
}

/// Composite transparent pixels onto a white background.
fn flatten_onto_white(img: &DynamicImage) -> DynamicImage {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut flat = image::RgbImage::new(width, height);
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let alpha = pixel[3] as u32;
        let blend = |channel: u8| ((channel as u32 * alpha + 255 * (255 - alpha)) / 255) as u8;
        flat.put_pixel(
            x,
            y,
            image::Rgb([blend(pixel[0]), blend(pixel[1]), blend(pixel[2])]),
        );
    }
    DynamicImage::ImageRgb8(flat)
}
