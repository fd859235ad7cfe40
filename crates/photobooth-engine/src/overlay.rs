//! Overlay layer: sticker placement and the drag state machine.
//!
//! ```text
//! Empty ──set_theme(≠ none)──▶ Populated ──begin_drag──▶ Dragging
//!   ▲                             ▲                          │
//!   └──────set_theme(none)────────┴────────end_drag──────────┘
//! ```
//!
//! Invalid drag calls are silent no-ops. Positions are top-left corners in
//! surface pixels; the host converts pointer coordinates before calling in.

use serde::Serialize;
use tracing::debug;

use crate::palette::Theme;
use crate::stickers::StickerLibrary;

/// Natural size used for artwork that has not reported its intrinsic size.
pub const FALLBACK_SIZE: u32 = 50;

/// Z-order of the overlay being dragged. Resting overlays stay below it.
pub const DRAG_Z: u32 = 10;

/// Handle to an overlay. Never reused within one layer, so handles from a
/// discarded theme no longer match anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct OverlayId(u32);

impl OverlayId {
    pub fn get(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
    id: OverlayId,
    image: &'static str,
    x: f32,
    y: f32,
    width: u32,
    height: u32,
    z: u32,
    #[serde(skip)]
    rest_z: u32,
}

impl Overlay {
    pub fn id(&self) -> OverlayId {
        self.id
    }

    pub fn image(&self) -> &'static str {
        self.image
    }

    /// Top-left corner in surface pixels.
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Natural (drawn) size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn z(&self) -> u32 {
        self.z
    }
}

/// An in-progress drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragSession {
    pub target: OverlayId,
    pub pointer_start: (f32, f32),
    pub overlay_start: (f32, f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerState {
    Empty,
    Populated,
    Dragging,
}

#[derive(Debug, Clone, Default)]
pub struct OverlayLayer {
    overlays: Vec<Overlay>,
    drag: Option<DragSession>,
    next_id: u32,
}

impl OverlayLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all overlays with the stickers of `theme`, placed on a
    /// `surface_width` x `surface_height` surface.
    ///
    /// Each sticker is centered on its fractional offset. List order is the
    /// theme's order and also the initial z-order.
    pub fn set_theme(
        &mut self,
        theme: Theme,
        surface_width: u32,
        surface_height: u32,
        library: &StickerLibrary,
    ) {
        self.clear();

        for (rank, spec) in theme.overlay_specs().iter().enumerate() {
            let (width, height) = library
                .natural_size(spec.image)
                .unwrap_or((FALLBACK_SIZE, FALLBACK_SIZE));
            let x = spec.offset_x * surface_width as f32 - width as f32 / 2.0;
            let y = spec.offset_y * surface_height as f32 - height as f32 / 2.0;
            let rest_z = (rank as u32).min(DRAG_Z - 1);

            let id = OverlayId(self.next_id);
            self.next_id = self.next_id.wrapping_add(1);
            self.overlays.push(Overlay {
                id,
                image: spec.image,
                x,
                y,
                width,
                height,
                z: rest_z,
                rest_z,
            });
        }

        debug!(
            theme = %theme,
            count = self.overlays.len(),
            surface_width,
            surface_height,
            "Placed overlays"
        );
    }

    /// Start dragging overlay `id` from pointer (`x`, `y`).
    pub fn begin_drag(&mut self, id: OverlayId, x: f32, y: f32) {
        if let Some(active) = self.drag {
            debug!(?id, active = ?active.target, "Drag already active, ignoring begin_drag");
            return;
        }
        let Some(overlay) = self.overlays.iter_mut().find(|o| o.id == id) else {
            debug!(?id, "Unknown overlay, ignoring begin_drag");
            return;
        };

        overlay.z = DRAG_Z;
        self.drag = Some(DragSession {
            target: id,
            pointer_start: (x, y),
            overlay_start: (overlay.x, overlay.y),
        });
        debug!(?id, x, y, "Drag started");
    }

    /// Move the dragged overlay to its start position plus the pointer's
    /// displacement since the drag began.
    pub fn update_drag(&mut self, x: f32, y: f32) {
        let Some(session) = self.drag else {
            return;
        };
        let Some(overlay) = self.overlays.iter_mut().find(|o| o.id == session.target) else {
            return;
        };

        overlay.x = session.overlay_start.0 + (x - session.pointer_start.0);
        overlay.y = session.overlay_start.1 + (y - session.pointer_start.1);
    }

    /// Finish (or cancel) the current drag. The overlay keeps its position
    /// and returns to its resting z-order.
    pub fn end_drag(&mut self) {
        let Some(session) = self.drag.take() else {
            return;
        };
        if let Some(overlay) = self.overlays.iter_mut().find(|o| o.id == session.target) {
            overlay.z = overlay.rest_z;
            debug!(id = ?session.target, x = overlay.x, y = overlay.y, "Drag ended");
        }
    }

    /// Adopt the intrinsic size of artwork that finished loading after the
    /// overlays were placed. Positions are kept.
    pub fn notify_image_size(&mut self, image_ref: &str, width: u32, height: u32) {
        for overlay in self.overlays.iter_mut().filter(|o| o.image == image_ref) {
            overlay.width = width;
            overlay.height = height;
        }
    }

    /// Discard every overlay and any drag in progress.
    pub fn clear(&mut self) {
        self.overlays.clear();
        self.drag = None;
    }

    pub fn state(&self) -> LayerState {
        if self.drag.is_some() {
            LayerState::Dragging
        } else if self.overlays.is_empty() {
            LayerState::Empty
        } else {
            LayerState::Populated
        }
    }

    /// Overlays in list (theme) order.
    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    pub fn get(&self, id: OverlayId) -> Option<&Overlay> {
        self.overlays.iter().find(|o| o.id == id)
    }

    /// Overlays in ascending z-order, ties broken by list order.
    pub fn overlays_by_z(&self) -> Vec<&Overlay> {
        let mut ordered: Vec<&Overlay> = self.overlays.iter().collect();
        ordered.sort_by_key(|o| o.z);
        ordered
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }
}
