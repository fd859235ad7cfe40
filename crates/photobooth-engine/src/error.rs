//! Error types returned by the photobooth engine.

/// A base image could not be obtained from a frame or file handle.
///
/// The surface is never touched when one of these is returned.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Source frame has no pixels ({width}x{height})")]
    EmptyFrame { width: u32, height: u32 },

    #[error("Frame buffer size mismatch: expected {expected} elements, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Image could not be decoded: {0}")]
    Undecodable(String),

    #[error("Image source unavailable: {0}")]
    Unavailable(String),
}

/// Export failures. No partial output is produced.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("No image to export")]
    NoImage,

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Unknown palette or theme name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unknown frame color: {0}")]
    FrameColor(String),

    #[error("Unknown theme: {0}")]
    Theme(String),
}

#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("Invalid font data (only TTF/OTF supported)")]
    InvalidFont,
}
