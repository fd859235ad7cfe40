//! Sticker artwork registry.
//!
//! Overlays refer to their artwork by an image reference string. The library
//! maps references to loaded RGBA images; a reference with no entry is an
//! image that has not loaded yet.

use std::collections::HashMap;

use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use tracing::debug;

use crate::palette::Theme;

const PLACEHOLDER_PREFIX: &str = "placeholder/";
const PLACEHOLDER_FILL: Rgba<u8> = Rgba([204, 204, 204, 255]);
const PLACEHOLDER_INK: Rgba<u8> = Rgba([136, 136, 136, 255]);

#[derive(Debug, Clone, Default)]
pub struct StickerLibrary {
    images: HashMap<String, RgbaImage>,
}

impl StickerLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// A library holding generated artwork for every `placeholder/W/H`
    /// reference used by the built-in themes.
    pub fn with_placeholders() -> Self {
        let mut library = Self::new();
        for theme in Theme::ALL {
            for spec in theme.overlay_specs() {
                if library.images.contains_key(spec.image) {
                    continue;
                }
                if let Some((w, h)) = placeholder_size(spec.image) {
                    library.images.insert(spec.image.to_string(), placeholder_image(w, h));
                }
            }
        }
        debug!(count = library.images.len(), "Generated placeholder stickers");
        library
    }

    /// Register (or replace) the artwork for `image_ref`.
    pub fn insert(&mut self, image_ref: impl Into<String>, image: &DynamicImage) {
        let image_ref = image_ref.into();
        debug!(
            image_ref = %image_ref,
            width = image.width(),
            height = image.height(),
            "Registering sticker"
        );
        self.images.insert(image_ref, image.to_rgba8());
    }

    pub fn get(&self, image_ref: &str) -> Option<&RgbaImage> {
        self.images.get(image_ref)
    }

    /// Intrinsic size of the artwork, if it has loaded.
    pub fn natural_size(&self, image_ref: &str) -> Option<(u32, u32)> {
        self.images.get(image_ref).map(|img| img.dimensions())
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Parse the size out of a `placeholder/W/H` reference.
pub fn placeholder_size(image_ref: &str) -> Option<(u32, u32)> {
    let rest = image_ref.strip_prefix(PLACEHOLDER_PREFIX)?;
    let (w, h) = rest.split_once('/')?;
    let (w, h) = (w.parse::<u32>().ok()?, h.parse::<u32>().ok()?);
    (w > 0 && h > 0).then_some((w, h))
}

/// Gray card with an outline and a diagonal cross. A zero dimension yields
/// an empty image.
pub fn placeholder_image(width: u32, height: u32) -> RgbaImage {
    if width == 0 || height == 0 {
        return RgbaImage::new(width, height);
    }
    let mut img = RgbaImage::from_pixel(width, height, PLACEHOLDER_FILL);
    draw_hollow_rect_mut(&mut img, Rect::at(0, 0).of_size(width, height), PLACEHOLDER_INK);
    let (w, h) = ((width - 1) as f32, (height - 1) as f32);
    draw_line_segment_mut(&mut img, (0.0, 0.0), (w, h), PLACEHOLDER_INK);
    draw_line_segment_mut(&mut img, (w, 0.0), (0.0, h), PLACEHOLDER_INK);
    img
}
