//! Editor state: one owned value holding everything a photobooth session
//! edits. Each host intent maps to exactly one method.

use chrono::{Local, NaiveDate};
use image::DynamicImage;
use serde::Serialize;
use tracing::info;

use crate::error::{ExportError, SourceError};
use crate::export::{self, ExportedImage};
use crate::frame::FrameRenderer;
use crate::overlay::{DragSession, LayerState, Overlay, OverlayId, OverlayLayer};
use crate::palette::{FrameColor, Theme};
use crate::source::{self, VideoFrame};
use crate::stickers::StickerLibrary;
use crate::surface::Surface;

/// Read-only snapshot of the editor for host controls.
#[derive(Debug, Clone, Serialize)]
pub struct EditorView {
    pub width: u32,
    pub height: u32,
    pub has_image: bool,
    pub frame_color: FrameColor,
    pub frame_hex: &'static str,
    pub theme: Theme,
    pub layer_state: LayerState,
    pub overlays: Vec<Overlay>,
    pub drag: Option<DragSession>,
}

#[derive(Debug, Clone)]
pub struct Editor {
    surface: Surface,
    frame_color: FrameColor,
    theme: Theme,
    layer: OverlayLayer,
    renderer: FrameRenderer,
    library: StickerLibrary,
    date: NaiveDate,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(FrameRenderer::default(), StickerLibrary::with_placeholders())
    }
}

impl Editor {
    /// A fresh editor dated today (local time).
    pub fn new(renderer: FrameRenderer, library: StickerLibrary) -> Self {
        Self {
            surface: Surface::new(),
            frame_color: FrameColor::default(),
            theme: Theme::default(),
            layer: OverlayLayer::new(),
            renderer,
            library,
            date: Local::now().date_naive(),
        }
    }

    /// Pin the date printed on the frame.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Use a captured camera frame as the photo.
    pub fn ingest_live_frame(&mut self, frame: VideoFrame<'_>) -> Result<(u32, u32), SourceError> {
        let size = source::from_live_frame(&mut self.surface, frame)?;
        self.after_ingest();
        Ok(size)
    }

    /// Use a decoded image file as the photo.
    pub fn ingest_decoded_image(&mut self, image: &DynamicImage) -> Result<(u32, u32), SourceError> {
        let size = source::from_decoded_image(&mut self.surface, image)?;
        self.after_ingest();
        Ok(size)
    }

    fn after_ingest(&mut self) {
        self.apply_frame();
        let (width, height) = self.surface.dimensions();
        self.layer.set_theme(self.theme, width, height, &self.library);
    }

    fn apply_frame(&mut self) {
        self.renderer.apply(&mut self.surface, self.frame_color, self.date);
    }

    pub fn select_frame_color(&mut self, color: FrameColor) {
        info!(color = %color, "Frame color selected");
        self.frame_color = color;
        self.apply_frame();
    }

    pub fn select_theme(&mut self, theme: Theme) {
        info!(theme = %theme, "Theme selected");
        self.theme = theme;
        let (width, height) = self.surface.dimensions();
        self.layer.set_theme(theme, width, height, &self.library);
    }

    pub fn begin_drag(&mut self, id: OverlayId, x: f32, y: f32) {
        self.layer.begin_drag(id, x, y);
    }

    pub fn update_drag(&mut self, x: f32, y: f32) {
        self.layer.update_drag(x, y);
    }

    pub fn end_drag(&mut self) {
        self.layer.end_drag();
    }

    /// Register artwork that finished loading and resize overlays using it.
    pub fn load_sticker(&mut self, image_ref: &str, image: &DynamicImage) {
        self.library.insert(image_ref, image);
        self.layer
            .notify_image_size(image_ref, image.width(), image.height());
    }

    pub fn export(&self) -> Result<ExportedImage, ExportError> {
        export::export(&self.surface, self.theme, &self.layer, &self.library)
    }

    /// Drop the photo and return to the default color and theme.
    pub fn reset(&mut self) {
        info!("Editor reset");
        self.surface.clear();
        self.frame_color = FrameColor::default();
        self.theme = Theme::default();
        self.layer.clear();
    }

    pub fn has_image(&self) -> bool {
        self.surface.has_base()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.surface.dimensions()
    }

    pub fn frame_color(&self) -> FrameColor {
        self.frame_color
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn overlays(&self) -> &[Overlay] {
        self.layer.overlays()
    }

    pub fn layer(&self) -> &OverlayLayer {
        &self.layer
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn view(&self) -> EditorView {
        let (width, height) = self.surface.dimensions();
        EditorView {
            width,
            height,
            has_image: self.has_image(),
            frame_color: self.frame_color,
            frame_hex: self.frame_color.hex(),
            theme: self.theme,
            layer_state: self.layer.state(),
            overlays: self.layer.overlays().to_vec(),
            drag: self.layer.drag_session().copied(),
        }
    }
}
