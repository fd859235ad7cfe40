//! Canvas surface: the working pixel buffer plus the pristine base image.

use image::{RgbaImage, imageops};
use tracing::debug;

/// Working pixels of the editor.
///
/// `pixels` holds base image + frame; `base` keeps the unmodified copy of the
/// last painted image so the frame can be redrawn without ghost borders.
#[derive(Debug, Clone)]
pub struct Surface {
    pixels: RgbaImage,
    base: Option<RgbaImage>,
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface {
    /// An empty 0x0 surface with no base image.
    pub fn new() -> Self {
        Self {
            pixels: RgbaImage::new(0, 0),
            base: None,
        }
    }

    /// Reallocate to exactly `width` x `height`, cleared to transparent.
    ///
    /// Forgets the previous base image.
    pub fn resize(&mut self, width: u32, height: u32) {
        debug!(width, height, "Resizing surface");
        self.pixels = RgbaImage::new(width, height);
        self.base = None;
    }

    /// Copy `source` at (0,0) without scaling and remember it as the base.
    ///
    /// Pixels outside the surface are clipped.
    pub fn paint_base(&mut self, source: &RgbaImage) {
        imageops::replace(&mut self.pixels, source, 0, 0);
        self.base = Some(self.pixels.clone());
    }

    /// Overwrite the working pixels with the remembered base image.
    pub fn restore_base(&mut self) {
        if let Some(base) = &self.base {
            self.pixels.clone_from(base);
        }
    }

    pub fn has_base(&self) -> bool {
        self.base.is_some()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Read-only view of the current pixels.
    pub fn snapshot(&self) -> &RgbaImage {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut RgbaImage {
        &mut self.pixels
    }

    /// Drop the image and return to the 0x0 state.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}
