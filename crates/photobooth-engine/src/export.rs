//! Compositor: flattens surface, frame and overlays into one PNG.
//!
//! Export reads state only; calling it twice without edits in between yields
//! identical pixels.

use std::io::Cursor;

use chrono::{DateTime, Utc};
use image::imageops::FilterType;
use image::{ImageFormat, RgbaImage, imageops};
use tracing::{debug, info, warn};

use crate::compose;
use crate::error::ExportError;
use crate::overlay::{Overlay, OverlayLayer};
use crate::palette::Theme;
use crate::stickers::StickerLibrary;
use crate::surface::Surface;

/// Encoded result of one export request.
#[derive(Debug, Clone)]
pub struct ExportedImage {
    png: Vec<u8>,
    width: u32,
    height: u32,
    created_at: DateTime<Utc>,
}

impl ExportedImage {
    pub fn png(&self) -> &[u8] {
        &self.png
    }

    pub fn into_png(self) -> Vec<u8> {
        self.png
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// `photobooth-<unix millis>.png`
    pub fn suggested_filename(&self) -> String {
        format!("photobooth-{}.png", self.created_at.timestamp_millis())
    }
}

/// Build the final raster: surface snapshot first, then overlays in
/// ascending z-order when a theme is selected.
pub fn composite(
    surface: &Surface,
    theme: Theme,
    layer: &OverlayLayer,
    library: &StickerLibrary,
) -> Result<RgbaImage, ExportError> {
    if !surface.has_base() {
        return Err(ExportError::NoImage);
    }

    let (width, height) = surface.dimensions();
    let mut output = RgbaImage::new(width, height);
    imageops::replace(&mut output, surface.snapshot(), 0, 0);

    if !theme.is_none() {
        for overlay in layer.overlays_by_z() {
            draw_overlay(&mut output, overlay, library);
        }
    }

    Ok(output)
}

/// Composite and encode as PNG.
pub fn export(
    surface: &Surface,
    theme: Theme,
    layer: &OverlayLayer,
    library: &StickerLibrary,
) -> Result<ExportedImage, ExportError> {
    let output = composite(surface, theme, layer, library)?;
    let (width, height) = output.dimensions();

    let mut png = Vec::new();
    output.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    info!(width, height, bytes = png.len(), theme = %theme, "Exported image");
    Ok(ExportedImage {
        png,
        width,
        height,
        created_at: Utc::now(),
    })
}

fn draw_overlay(output: &mut RgbaImage, overlay: &Overlay, library: &StickerLibrary) {
    let Some(art) = library.get(overlay.image()) else {
        warn!(image = overlay.image(), "Sticker artwork not loaded, skipping overlay");
        return;
    };

    let (w, h) = overlay.size();
    if w == 0 || h == 0 {
        return;
    }
    let (x, y) = overlay.position();
    let (x, y) = (x.round() as i64, y.round() as i64);
    debug!(image = overlay.image(), x, y, w, h, z = overlay.z(), "Drawing overlay");

    if art.dimensions() == (w, h) {
        compose::overlay(output, art, x, y);
    } else {
        let scaled = imageops::resize(art, w, h, FilterType::Lanczos3);
        compose::overlay(output, &scaled, x, y);
    }
}
