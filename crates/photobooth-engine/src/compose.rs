//! Image composition utilities: alpha-composite one image over another.

use image::{Rgba, RgbaImage};

/// Composite `top` over `base` with its top-left corner at (`x`, `y`).
///
/// Offsets may be negative or run past the base; the overlapping region is
/// drawn and the rest is clipped.
pub fn overlay(base: &mut RgbaImage, top: &RgbaImage, x: i64, y: i64) {
    let (base_w, base_h) = (i64::from(base.width()), i64::from(base.height()));
    let (top_w, top_h) = (i64::from(top.width()), i64::from(top.height()));

    let src_x_start = x.saturating_neg().max(0);
    let src_y_start = y.saturating_neg().max(0);
    let src_x_end = top_w.min(base_w.saturating_sub(x));
    let src_y_end = top_h.min(base_h.saturating_sub(y));

    if src_x_start >= src_x_end || src_y_start >= src_y_end {
        return;
    }

    for sy in src_y_start..src_y_end {
        for sx in src_x_start..src_x_end {
            let pixel = top.get_pixel(sx as u32, sy as u32);
            let (dx, dy) = ((x + sx) as u32, (y + sy) as u32);
            let alpha = pixel[3] as f32 / 255.0;
            if alpha > 0.99 {
                base.put_pixel(dx, dy, *pixel);
            } else if alpha > 0.01 {
                let bg = *base.get_pixel(dx, dy);
                base.put_pixel(dx, dy, blend_pixel(bg, *pixel, alpha));
            }
        }
    }
}

/// Blend `color` into the pixel at (`x`, `y`) with the given opacity.
///
/// Out-of-bounds coordinates are ignored.
pub fn blend_at(img: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>, opacity: f32) {
    if x < 0 || y < 0 || x >= i64::from(img.width()) || y >= i64::from(img.height()) {
        return;
    }
    let alpha = opacity.clamp(0.0, 1.0) * (color[3] as f32 / 255.0);
    if alpha <= 0.0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    let bg = *img.get_pixel(x, y);
    img.put_pixel(x, y, blend_pixel(bg, color, alpha));
}

/// Source-over blend of `fg` (with effective opacity `alpha`) onto `bg`.
fn blend_pixel(bg: Rgba<u8>, fg: Rgba<u8>, alpha: f32) -> Rgba<u8> {
    let bg_alpha = bg[3] as f32 / 255.0;
    let out_alpha = alpha + bg_alpha * (1.0 - alpha);
    if out_alpha < 0.001 {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |f: u8, b: u8| -> u8 {
        let mixed = (f as f32 * alpha + b as f32 * bg_alpha * (1.0 - alpha)) / out_alpha;
        mixed.round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        channel(fg[0], bg[0]),
        channel(fg[1], bg[1]),
        channel(fg[2], bg[2]),
        (out_alpha * 255.0).round() as u8,
    ])
}
