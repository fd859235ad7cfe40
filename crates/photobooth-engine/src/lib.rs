//! Photobooth compositing engine.
//!
//! Turns a captured camera frame or uploaded picture into a framed,
//! watermarked photo with draggable stickers, and flattens it into a PNG.
//! Everything runs synchronously on the caller's thread; acquiring frames and
//! files, and saving the result, are left to the host.

pub mod compose;
pub mod editor;
pub mod error;
pub mod export;
pub mod frame;
pub mod overlay;
pub mod palette;
pub mod source;
pub mod stickers;
pub mod surface;
pub mod text;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use image;
pub use editor::{Editor, EditorView};
pub use error::{ExportError, ParseError, SourceError, TextError};
pub use export::ExportedImage;
pub use frame::{FrameRenderer, FrameStyle};
pub use overlay::{DragSession, LayerState, Overlay, OverlayId, OverlayLayer};
pub use palette::{FrameColor, OverlaySpec, Theme};
pub use source::{VideoFrame, decode_image_bytes};
pub use stickers::StickerLibrary;
pub use surface::Surface;
pub use text::{Typeface, Weight};
