//! Image source adapter: turns a ready camera frame or decoded file into the
//! base image of a [`Surface`].
//!
//! Acquisition (waiting for camera permission, reading the file) happens
//! elsewhere; these functions only ingest handles that are already ready.
//! On error the surface is left exactly as it was.

use image::{DynamicImage, Rgba, RgbaImage};
use tracing::{debug, info};

use crate::error::SourceError;
use crate::surface::Surface;

/// One still frame grabbed from a live video stream.
#[derive(Debug, Clone, Copy)]
pub enum VideoFrame<'a> {
    /// Packed 8-bit RGB triplets, row-major (what camera decoders emit).
    Rgb {
        width: u32,
        height: u32,
        data: &'a [u8],
    },
    /// One `0x00RRGGBB` word per pixel, row-major (software framebuffers).
    Xrgb {
        width: u32,
        height: u32,
        data: &'a [u32],
    },
}

impl VideoFrame<'_> {
    pub fn dimensions(&self) -> (u32, u32) {
        match *self {
            VideoFrame::Rgb { width, height, .. } | VideoFrame::Xrgb { width, height, .. } => {
                (width, height)
            }
        }
    }

    fn to_rgba(self) -> Result<RgbaImage, SourceError> {
        let (width, height) = self.dimensions();
        check_dimensions(width, height)?;
        let count = width as usize * height as usize;

        match self {
            VideoFrame::Rgb { data, .. } => {
                check_len(count * 3, data.len())?;
                let mut out = RgbaImage::new(width, height);
                for (dst, src) in out.pixels_mut().zip(data.chunks_exact(3)) {
                    *dst = Rgba([src[0], src[1], src[2], 255]);
                }
                Ok(out)
            }
            VideoFrame::Xrgb { data, .. } => {
                check_len(count, data.len())?;
                let mut out = RgbaImage::new(width, height);
                for (dst, &word) in out.pixels_mut().zip(data) {
                    let r = (word >> 16) as u8;
                    let g = (word >> 8) as u8;
                    let b = word as u8;
                    *dst = Rgba([r, g, b, 255]);
                }
                Ok(out)
            }
        }
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<(), SourceError> {
    if width == 0 || height == 0 {
        return Err(SourceError::EmptyFrame { width, height });
    }
    Ok(())
}

fn check_len(expected: usize, actual: usize) -> Result<(), SourceError> {
    if expected != actual {
        return Err(SourceError::BufferSize { expected, actual });
    }
    Ok(())
}

/// Paint a captured video frame as the new base image.
///
/// Returns the frame's natural size, which is also the new surface size.
pub fn from_live_frame(surface: &mut Surface, frame: VideoFrame<'_>) -> Result<(u32, u32), SourceError> {
    let rgba = frame.to_rgba()?;
    info!(width = rgba.width(), height = rgba.height(), "Ingesting live frame");
    Ok(paint(surface, &rgba))
}

/// Paint a decoded image file as the new base image.
pub fn from_decoded_image(
    surface: &mut Surface,
    image: &DynamicImage,
) -> Result<(u32, u32), SourceError> {
    check_dimensions(image.width(), image.height())?;
    info!(
        width = image.width(),
        height = image.height(),
        "Ingesting decoded image"
    );
    Ok(paint(surface, &image.to_rgba8()))
}

/// Decode an encoded image file (PNG, JPEG, ...) held in memory.
pub fn decode_image_bytes(bytes: &[u8]) -> Result<DynamicImage, SourceError> {
    let image =
        image::load_from_memory(bytes).map_err(|e| SourceError::Undecodable(e.to_string()))?;
    debug!(
        width = image.width(),
        height = image.height(),
        "Decoded image bytes"
    );
    Ok(image)
}

fn paint(surface: &mut Surface, rgba: &RgbaImage) -> (u32, u32) {
    let (width, height) = rgba.dimensions();
    surface.resize(width, height);
    surface.paint_base(rgba);
    (width, height)
}
