//! Text rendering for frame labels.
//!
//! Labels are drawn either with a TrueType/OpenType face supplied by the host
//! or, when none is configured, with a built-in 5x7 bitmap face so the engine
//! never depends on font files being present.

use ab_glyph::{Font, FontArc, GlyphId, PxScale, ScaleFont, point};
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::compose::blend_at;
use crate::error::TextError;

const GLYPH_W: u32 = 5;
const GLYPH_H: u32 = 7;
/// Advance per bitmap glyph in unscaled pixels (5 wide + 1 spacing).
const GLYPH_ADVANCE: u32 = 6;

/// Font used for labels.
#[derive(Clone, Default)]
pub enum Typeface {
    /// Built-in 5x7 bitmap glyphs, scaled by the largest integer factor that
    /// fits in the requested size.
    #[default]
    Bitmap,
    Outline(FontArc),
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Typeface::Bitmap => f.write_str("Typeface::Bitmap"),
            Typeface::Outline(_) => f.write_str("Typeface::Outline"),
        }
    }
}

impl Typeface {
    /// Parse TTF/OTF font data.
    pub fn from_font_data(data: Vec<u8>) -> Result<Self, TextError> {
        FontArc::try_from_vec(data)
            .map(Typeface::Outline)
            .map_err(|_| TextError::InvalidFont)
    }
}

/// Horizontal anchoring of a label relative to its x coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Stroke weight. Bold is synthesized by smearing glyph coverage to the right.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weight {
    #[default]
    Regular,
    Bold,
}

fn bitmap_scale(size: f32) -> u32 {
    ((size / GLYPH_H as f32).floor() as u32).max(1)
}

/// Extra pixels of rightward smear used for synthetic bold outline text.
fn embolden_px(size: f32, weight: Weight) -> u32 {
    match weight {
        Weight::Regular => 0,
        Weight::Bold => ((size / 16.0).round() as u32).max(1),
    }
}

/// Measure the pixel width of `text` at `size` px.
pub fn measure_text_width(face: &Typeface, size: f32, weight: Weight, text: &str) -> u32 {
    let count = text.chars().count() as u32;
    if count == 0 {
        return 0;
    }
    match face {
        Typeface::Bitmap => {
            let scale = bitmap_scale(size);
            let columns = match weight {
                Weight::Regular => count * GLYPH_ADVANCE - (GLYPH_ADVANCE - GLYPH_W),
                Weight::Bold => count * GLYPH_ADVANCE,
            };
            columns * scale
        }
        Typeface::Outline(font) => {
            let scaled = font.as_scaled(PxScale::from(size));
            let mut width = 0.0f32;
            let mut prev_glyph: Option<GlyphId> = None;

            for ch in text.chars() {
                let glyph_id = scaled.glyph_id(ch);
                if let Some(prev) = prev_glyph {
                    width += scaled.kern(prev, glyph_id);
                }
                width += scaled.h_advance(glyph_id);
                prev_glyph = Some(glyph_id);
            }

            width.ceil() as u32 + embolden_px(size, weight)
        }
    }
}

/// Size, weight and paint of one label.
#[derive(Debug, Clone, Copy)]
pub struct LabelStyle {
    pub size: f32,
    pub weight: Weight,
    pub color: Rgba<u8>,
    pub opacity: f32,
}

/// Draw `text` with its baseline at `baseline_y`.
///
/// `x` is the left edge for [`Align::Left`] and the right edge for
/// [`Align::Right`]. Glyph pixels are blended at the style's opacity;
/// anything outside the image is clipped.
pub fn draw_label(
    img: &mut RgbaImage,
    face: &Typeface,
    style: &LabelStyle,
    x: i64,
    baseline_y: i64,
    align: Align,
    text: &str,
) {
    let left = match align {
        Align::Left => x,
        Align::Right => {
            x - i64::from(measure_text_width(face, style.size, style.weight, text))
        }
    };

    match face {
        Typeface::Bitmap => draw_bitmap_text(img, style, left, baseline_y, text),
        Typeface::Outline(font) => draw_outline_text(img, font, style, left, baseline_y, text),
    }
}

/// Glyph coverage is accumulated (max) into a buffer first, so overlapping
/// glyphs and the bold smear never blend the same pixel twice.
fn draw_outline_text(
    img: &mut RgbaImage,
    font: &FontArc,
    style: &LabelStyle,
    left: i64,
    baseline_y: i64,
    text: &str,
) {
    let scale = PxScale::from(style.size);
    let scaled = font.as_scaled(scale);
    let mut caret = left as f32;
    let mut prev_glyph: Option<GlyphId> = None;
    let mut outlined = Vec::new();

    for ch in text.chars() {
        let glyph_id = scaled.glyph_id(ch);
        if let Some(prev) = prev_glyph {
            caret += scaled.kern(prev, glyph_id);
        }
        let glyph = glyph_id.with_scale_and_position(scale, point(caret, baseline_y as f32));
        caret += scaled.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);

        if let Some(g) = font.outline_glyph(glyph) {
            outlined.push(g);
        }
    }
    if outlined.is_empty() {
        return;
    }

    let smear = i64::from(embolden_px(style.size, style.weight));
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (i64::MAX, i64::MAX, i64::MIN, i64::MIN);
    for g in &outlined {
        let b = g.px_bounds();
        min_x = min_x.min(b.min.x as i64);
        min_y = min_y.min(b.min.y as i64);
        max_x = max_x.max(b.max.x.ceil() as i64 + smear);
        max_y = max_y.max(b.max.y.ceil() as i64);
    }
    let (buf_w, buf_h) = ((max_x - min_x).max(0) as usize, (max_y - min_y).max(0) as usize);
    let mut coverage = vec![0.0f32; buf_w * buf_h];

    for g in &outlined {
        let b = g.px_bounds();
        let (ox, oy) = (b.min.x as i64 - min_x, b.min.y as i64 - min_y);
        g.draw(|gx, gy, c| {
            let row = oy + i64::from(gy);
            for dx in 0..=smear {
                let col = ox + i64::from(gx) + dx;
                if (0..buf_w as i64).contains(&col) && (0..buf_h as i64).contains(&row) {
                    let cell = &mut coverage[row as usize * buf_w + col as usize];
                    *cell = cell.max(c);
                }
            }
        });
    }

    for (i, c) in coverage.iter().enumerate() {
        if *c > 0.0 {
            let px = min_x + (i % buf_w) as i64;
            let py = min_y + (i / buf_w) as i64;
            blend_at(img, px, py, style.color, style.opacity * c.min(1.0));
        }
    }
}

fn draw_bitmap_text(img: &mut RgbaImage, style: &LabelStyle, left: i64, baseline_y: i64, text: &str) {
    let scale = i64::from(bitmap_scale(style.size));
    let top = baseline_y - i64::from(GLYPH_H) * scale;
    let mut x = left;

    for ch in text.chars() {
        if let Some(rows) = glyph5x7(ch) {
            for (ry, bits) in rows.iter().enumerate() {
                // Bold ORs in a copy shifted one column right, so each row spans 6 columns.
                let row = match style.weight {
                    Weight::Regular => u16::from(*bits) << 1,
                    Weight::Bold => (u16::from(*bits) << 1) | u16::from(*bits),
                };
                for rx in 0..GLYPH_ADVANCE {
                    if row & (1 << (GLYPH_ADVANCE - 1 - rx)) == 0 {
                        continue;
                    }
                    let cell_x = x + i64::from(rx) * scale;
                    let cell_y = top + ry as i64 * scale;
                    for dy in 0..scale {
                        for dx in 0..scale {
                            blend_at(img, cell_x + dx, cell_y + dy, style.color, style.opacity);
                        }
                    }
                }
            }
        }
        x += i64::from(GLYPH_ADVANCE) * scale;
    }
}

/// 5x7 glyph rows; the low 5 bits are pixels, bit 4 is the leftmost column.
///
/// Lowercase letters use the uppercase shapes. Unsupported characters
/// render as blank space.
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    let g = match ch.to_ascii_uppercase() {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        ' ' => [0; 7],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00100, 0b00000],
        ',' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00110, 0b00100, 0b01000],
        ':' => [0b00000, 0b00100, 0b00000, 0b00000, 0b00100, 0b00000, 0b00000],
        '/' => [0b00001, 0b00010, 0b00010, 0b00100, 0b01000, 0b01000, 0b10000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '|' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        '?' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100],
        '#' => [0b01010, 0b01010, 0b11111, 0b01010, 0b11111, 0b01010, 0b01010],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        '\'' => [0b00100, 0b00100, 0b01000, 0b00000, 0b00000, 0b00000, 0b00000],
        _ => return None,
    };
    Some(g)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn black(size: f32, weight: Weight) -> LabelStyle {
        LabelStyle {
            size,
            weight,
            color: BLACK,
            opacity: 1.0,
        }
    }

    #[test]
    fn bitmap_width_scales_with_size() {
        let face = Typeface::Bitmap;
        assert_eq!(measure_text_width(&face, 7.0, Weight::Regular, "A"), 5);
        assert_eq!(measure_text_width(&face, 7.0, Weight::Regular, "AB"), 11);
        assert_eq!(measure_text_width(&face, 16.0, Weight::Regular, "AB"), 22);
        assert_eq!(measure_text_width(&face, 16.0, Weight::Regular, ""), 0);
        assert_eq!(measure_text_width(&face, 7.0, Weight::Bold, "AB"), 12);
        assert_eq!(measure_text_width(&face, 7.0, Weight::Bold, ""), 0);
    }

    #[test]
    fn date_and_watermark_sizes_stay_distinct() {
        assert_eq!(bitmap_scale(12.0), 1);
        assert_eq!(bitmap_scale(16.0), 2);
        assert_eq!(bitmap_scale(3.0), 1);
        let face = Typeface::Bitmap;
        assert!(
            measure_text_width(&face, 12.0, Weight::Regular, "0")
                < measure_text_width(&face, 16.0, Weight::Regular, "0")
        );
    }

    #[test]
    fn bold_bitmap_fills_the_column_to_the_right() {
        let mut regular = RgbaImage::from_pixel(20, 12, WHITE);
        draw_label(&mut regular, &Typeface::Bitmap, &black(7.0, Weight::Regular), 2, 10, Align::Left, "I");
        let mut bold = RgbaImage::from_pixel(20, 12, WHITE);
        draw_label(&mut bold, &Typeface::Bitmap, &black(7.0, Weight::Bold), 2, 10, Align::Left, "I");

        // 'I' middle rows light column 2 only; bold adds column 3.
        assert_eq!(regular.get_pixel(4, 5), &BLACK);
        assert_eq!(regular.get_pixel(5, 5), &WHITE);
        assert_eq!(bold.get_pixel(4, 5), &BLACK);
        assert_eq!(bold.get_pixel(5, 5), &BLACK);
        let ink = |img: &RgbaImage| img.pixels().filter(|p| **p == BLACK).count();
        assert!(ink(&bold) > ink(&regular));
    }

    #[test]
    fn left_aligned_label_starts_at_x() {
        let mut img = RgbaImage::from_pixel(40, 20, WHITE);
        draw_label(&mut img, &Typeface::Bitmap, &black(7.0, Weight::Regular), 3, 10, Align::Left, "I");
        // 'I' top row is 0b01110: columns 1..=3 lit, starting at x=3, top at y=3.
        assert_eq!(img.get_pixel(3, 3), &WHITE);
        assert_eq!(img.get_pixel(4, 3), &BLACK);
        assert_eq!(img.get_pixel(6, 3), &BLACK);
        assert_eq!(img.get_pixel(7, 3), &WHITE);
    }

    #[test]
    fn right_aligned_label_ends_at_x() {
        let mut img = RgbaImage::from_pixel(40, 20, WHITE);
        draw_label(&mut img, &Typeface::Bitmap, &black(7.0, Weight::Regular), 30, 10, Align::Right, "L");
        // 'L' bottom row is fully lit: x in 25..30 on the last glyph row (y=9).
        for x in 25..30 {
            assert_eq!(img.get_pixel(x, 9), &BLACK);
        }
        assert_eq!(img.get_pixel(30, 9), &WHITE);
        assert_eq!(img.get_pixel(24, 9), &WHITE);
    }

    #[test]
    fn labels_clip_at_image_edges() {
        let mut img = RgbaImage::from_pixel(4, 4, WHITE);
        draw_label(&mut img, &Typeface::Bitmap, &black(16.0, Weight::Bold), -5, 2, Align::Left, "WW");
    }

    #[test]
    fn lowercase_uses_uppercase_shapes() {
        assert_eq!(glyph5x7('p'), glyph5x7('P'));
        assert!(glyph5x7('~').is_none());
    }

    #[test]
    fn invalid_font_data_is_rejected() {
        let err = Typeface::from_font_data(vec![0, 1, 2, 3]).unwrap_err();
        assert!(matches!(err, TextError::InvalidFont));
    }
}
