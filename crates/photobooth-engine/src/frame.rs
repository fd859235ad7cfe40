//! Frame and watermark rendering.
//!
//! The frame is always drawn onto a freshly restored copy of the base image,
//! so reapplying it (with the same or a different color) never stacks strokes.

use std::fmt::Write as _;

use chrono::NaiveDate;
use image::RgbaImage;
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use tracing::debug;

use crate::palette::FrameColor;
use crate::surface::Surface;
use crate::text::{self, Align, LabelStyle, Typeface, Weight};

pub const DEFAULT_STROKE_WIDTH: u32 = 20;
pub const DEFAULT_WATERMARK: &str = "Photobooth App";
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Layout constants for the border and labels.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameStyle {
    /// Border band thickness in pixels, measured inward from each edge.
    pub stroke_width: u32,
    pub watermark: String,
    pub watermark_size: f32,
    pub watermark_weight: Weight,
    pub watermark_opacity: f32,
    pub date_size: f32,
    /// `chrono` strftime pattern for the date label.
    pub date_format: String,
    /// Horizontal inset of both labels from the side edges.
    pub label_inset_x: u32,
    /// Distance from the bottom edge to the label baseline.
    pub label_inset_bottom: u32,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            stroke_width: DEFAULT_STROKE_WIDTH,
            watermark: DEFAULT_WATERMARK.to_string(),
            watermark_size: 16.0,
            watermark_weight: Weight::Bold,
            watermark_opacity: 0.7,
            date_size: 12.0,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            label_inset_x: 30,
            label_inset_bottom: 20,
        }
    }
}

/// Draws the border, watermark and date label onto a [`Surface`].
#[derive(Debug, Clone, Default)]
pub struct FrameRenderer {
    style: FrameStyle,
    face: Typeface,
}

impl FrameRenderer {
    pub fn new(style: FrameStyle, face: Typeface) -> Self {
        Self { style, face }
    }

    pub fn style(&self) -> &FrameStyle {
        &self.style
    }

    /// Redraw the base image, then the border and labels in `color`.
    ///
    /// Does nothing when the surface has no base image yet.
    pub fn apply(&self, surface: &mut Surface, color: FrameColor, date: NaiveDate) {
        if !surface.has_base() {
            debug!("No base image, skipping frame");
            return;
        }
        surface.restore_base();

        let (width, height) = surface.dimensions();
        debug!(width, height, color = %color, "Applying frame");

        let img = surface.pixels_mut();
        self.draw_border(img, color);
        self.draw_labels(img, color, date);
    }

    fn draw_border(&self, img: &mut RgbaImage, color: FrameColor) {
        let (w, h) = img.dimensions();
        let stroke = self.style.stroke_width;
        if stroke == 0 || w == 0 || h == 0 {
            return;
        }
        let band_h = stroke.min(h);
        let band_w = stroke.min(w);
        let rgba = color.rgba();

        draw_filled_rect_mut(img, Rect::at(0, 0).of_size(w, band_h), rgba);
        draw_filled_rect_mut(img, Rect::at(0, (h - band_h) as i32).of_size(w, band_h), rgba);
        draw_filled_rect_mut(img, Rect::at(0, 0).of_size(band_w, h), rgba);
        draw_filled_rect_mut(img, Rect::at((w - band_w) as i32, 0).of_size(band_w, h), rgba);
    }

    fn draw_labels(&self, img: &mut RgbaImage, color: FrameColor, date: NaiveDate) {
        let style = &self.style;
        let (w, h) = img.dimensions();
        let baseline = i64::from(h) - i64::from(style.label_inset_bottom);
        let rgba = color.rgba();

        let watermark = LabelStyle {
            size: style.watermark_size,
            weight: style.watermark_weight,
            color: rgba,
            opacity: style.watermark_opacity,
        };
        text::draw_label(
            img,
            &self.face,
            &watermark,
            i64::from(w) - i64::from(style.label_inset_x),
            baseline,
            Align::Right,
            &style.watermark,
        );

        let date_label = LabelStyle {
            size: style.date_size,
            weight: Weight::Regular,
            color: rgba,
            opacity: 1.0,
        };
        text::draw_label(
            img,
            &self.face,
            &date_label,
            i64::from(style.label_inset_x),
            baseline,
            Align::Left,
            &self.format_date(date),
        );
    }

    /// Date label text. Falls back to the default pattern if the configured
    /// one is not a valid strftime string.
    pub fn format_date(&self, date: NaiveDate) -> String {
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.style.date_format)).is_ok() {
            return out;
        }
        date.format(DEFAULT_DATE_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const GRAY: Rgba<u8> = Rgba([128, 128, 128, 255]);

    fn gray_surface(width: u32, height: u32) -> Surface {
        let mut surface = Surface::new();
        surface.resize(width, height);
        surface.paint_base(&RgbaImage::from_pixel(width, height, GRAY));
        surface
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn border_is_flush_with_every_edge() {
        let mut surface = gray_surface(200, 150);
        FrameRenderer::default().apply(&mut surface, FrameColor::Pink, date());
        let img = surface.snapshot();
        let pink = FrameColor::Pink.rgba();
        for &(x, y) in &[(0, 0), (199, 0), (0, 149), (199, 149), (19, 75), (180, 75), (100, 19), (100, 130)] {
            assert_eq!(img.get_pixel(x, y), &pink, "at ({x}, {y})");
        }
        assert_eq!(img.get_pixel(20, 75), &GRAY);
        assert_eq!(img.get_pixel(179, 75), &GRAY);
        assert_eq!(img.get_pixel(100, 20), &GRAY);
    }

    #[test]
    fn frame_keeps_dimensions() {
        for color in FrameColor::ALL {
            let mut surface = gray_surface(64, 48);
            FrameRenderer::default().apply(&mut surface, color, date());
            assert_eq!(surface.dimensions(), (64, 48));
        }
    }

    #[test]
    fn applying_twice_is_idempotent() {
        let renderer = FrameRenderer::default();
        let mut once = gray_surface(300, 200);
        renderer.apply(&mut once, FrameColor::Blue, date());
        let mut twice = gray_surface(300, 200);
        renderer.apply(&mut twice, FrameColor::Blue, date());
        renderer.apply(&mut twice, FrameColor::Blue, date());
        assert_eq!(once.snapshot(), twice.snapshot());
    }

    #[test]
    fn color_change_leaves_no_ghost_border() {
        let renderer = FrameRenderer::default();
        let mut direct = gray_surface(300, 200);
        renderer.apply(&mut direct, FrameColor::Green, date());
        let mut switched = gray_surface(300, 200);
        renderer.apply(&mut switched, FrameColor::Red, date());
        renderer.apply(&mut switched, FrameColor::Green, date());
        assert_eq!(direct.snapshot(), switched.snapshot());
    }

    #[test]
    fn labels_are_drawn_inside_the_border() {
        let mut surface = gray_surface(300, 200);
        FrameRenderer::default().apply(&mut surface, FrameColor::Black, date());
        let img = surface.snapshot();
        // Labels sit between the border band and the baseline (y = 180).
        let label_rows = 160..180;
        let watermark = (150..270u32)
            .flat_map(|x| label_rows.clone().map(move |y| (x, y)))
            .any(|(x, y)| img.get_pixel(x, y) != &GRAY);
        let date_label = (30..150u32)
            .flat_map(|x| label_rows.clone().map(move |y| (x, y)))
            .any(|(x, y)| img.get_pixel(x, y) == &Rgba([0, 0, 0, 255]));
        assert!(watermark);
        assert!(date_label);
    }

    #[test]
    fn watermark_is_translucent() {
        let style = FrameStyle {
            stroke_width: 0,
            watermark: "I".into(),
            watermark_size: 7.0,
            date_format: String::new(),
            ..FrameStyle::default()
        };
        let mut surface = gray_surface(100, 50);
        FrameRenderer::new(style, Typeface::Bitmap).apply(&mut surface, FrameColor::Black, date());
        // Right edge at x=70, baseline y=30: 'I' top row lit at x 66..=68, y=23.
        let p = surface.snapshot().get_pixel(67, 23);
        assert!(p[0] > 0 && p[0] < 128, "expected blended pixel, got {p:?}");
    }

    #[test]
    fn watermark_is_bold_by_default() {
        let ink = |weight: Weight| {
            let style = FrameStyle {
                stroke_width: 0,
                watermark_weight: weight,
                date_format: String::new(),
                ..FrameStyle::default()
            };
            let mut surface = gray_surface(300, 100);
            FrameRenderer::new(style, Typeface::Bitmap).apply(&mut surface, FrameColor::Black, date());
            surface.snapshot().pixels().filter(|p| **p != GRAY).count()
        };
        assert_eq!(FrameStyle::default().watermark_weight, Weight::Bold);
        assert!(ink(Weight::Bold) > ink(Weight::Regular));
    }

    #[test]
    fn no_base_means_no_frame() {
        let mut surface = Surface::new();
        FrameRenderer::default().apply(&mut surface, FrameColor::Pink, date());
        assert_eq!(surface.dimensions(), (0, 0));
    }

    #[test]
    fn tiny_surface_is_fully_bordered() {
        let mut surface = gray_surface(10, 8);
        FrameRenderer::default().apply(&mut surface, FrameColor::Navy, date());
        let navy = FrameColor::Navy.rgba();
        assert!(surface.snapshot().pixels().all(|p| *p == navy));
    }

    #[test]
    fn date_uses_configured_format() {
        let renderer = FrameRenderer::new(
            FrameStyle {
                date_format: "%Y-%m-%d".into(),
                ..FrameStyle::default()
            },
            Typeface::Bitmap,
        );
        assert_eq!(renderer.format_date(date()), "2024-03-09");
        assert_eq!(FrameRenderer::default().format_date(date()), "09/03/2024");
    }

    #[test]
    fn invalid_date_format_falls_back() {
        let renderer = FrameRenderer::new(
            FrameStyle {
                date_format: "%Q".into(),
                ..FrameStyle::default()
            },
            Typeface::Bitmap,
        );
        assert_eq!(renderer.format_date(date()), "09/03/2024");
    }
}
