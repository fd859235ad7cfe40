use chrono::NaiveDate;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use crate::{Editor, FrameRenderer, StickerLibrary};

const GRAY: Rgba<u8> = Rgba([128, 128, 128, 255]);

fn test_editor() -> Editor {
    Editor::new(FrameRenderer::default(), StickerLibrary::with_placeholders())
        .with_date(NaiveDate::from_ymd_opt(2025, 1, 31).expect("valid date"))
}

fn gray_photo(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, GRAY))
}

fn decode(png: &[u8]) -> RgbaImage {
    image::load_from_memory_with_format(png, ImageFormat::Png)
        .expect("export is valid PNG")
        .to_rgba8()
}

mod drag_props;
