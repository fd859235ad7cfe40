//! Loading photos and fonts from disk.

use std::path::Path;

use photobooth_engine::{SourceError, Typeface, decode_image_bytes};
use photobooth_engine::image::DynamicImage;

const MAX_FONT_SIZE: u64 = 50 * 1024 * 1024; // 50MB
const VALID_EXTENSIONS: &[&str] = &[".ttf", ".otf"];

#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("Invalid font format (only TTF/OTF supported)")]
    InvalidFormat,
    #[error("Font file too large (max 50MB)")]
    FileTooLarge,
    #[error("Font data could not be parsed")]
    Unparsable,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read and decode a still photo. A missing or unreadable file counts as
/// an unavailable source.
pub fn load_photo(path: &Path) -> Result<DynamicImage, SourceError> {
    let bytes = std::fs::read(path)
        .map_err(|e| SourceError::Unavailable(format!("{}: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Read photo");
    decode_image_bytes(&bytes)
}

/// Load a TTF/OTF font for the frame labels.
pub fn load_typeface(path: &Path) -> Result<Typeface, FontError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default();
    if !VALID_EXTENSIONS.contains(&ext.as_str()) {
        return Err(FontError::InvalidFormat);
    }

    if std::fs::metadata(path)?.len() > MAX_FONT_SIZE {
        return Err(FontError::FileTooLarge);
    }

    let data = std::fs::read(path)?;
    Typeface::from_font_data(data).map_err(|_| FontError::Unparsable)
}
