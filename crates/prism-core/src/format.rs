//! Image format identification from magic bytes and file extensions.
//!
//! Detection only reads leading header bytes and never decodes pixel data,
//! so it is safe to call on arbitrary untrusted input.

/// Image formats Prism can detect and emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Webp,
    Gif,
}

/// PNG signature: \x89PNG\r\n\x1a\n
const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

impl ImageFormat {
    /// Detect the format from leading magic bytes.
    ///
    /// Returns `None` for anything shorter than 4 bytes or with an
    /// unrecognized header. A `RIFF` container that is not WEBP (or is
    /// truncated before the `WEBP` tag) is also `None`.
    pub fn detect(data: &[u8]) -> Option<Self> {
        if data.len() < 4 {
            return None;
        }
        if data.len() >= 8 && data[..8] == PNG_MAGIC {
            return Some(Self::Png);
        }
        if data[..3] == [0xFF, 0xD8, 0xFF] {
            return Some(Self::Jpeg);
        }
        if &data[..4] == b"RIFF" {
            if data.len() >= 12 && &data[8..12] == b"WEBP" {
                return Some(Self::Webp);
            }
            return None;
        }
        if data.len() >= 6 && (&data[..6] == b"GIF87a" || &data[..6] == b"GIF89a") {
            return Some(Self::Gif);
        }
        None
    }

    /// Parse a format from a file extension (case-insensitive).
    ///
    /// Accepts a leading dot, so both "png" and ".PNG" work.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "webp" => Some(Self::Webp),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// MIME type for HTTP payloads.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Webp => "image/webp",
            Self::Gif => "image/gif",
        }
    }

    /// Canonical file extension, including the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => ".png",
            Self::Jpeg => ".jpg",
            Self::Webp => ".webp",
            Self::Gif => ".gif",
        }
    }
}
