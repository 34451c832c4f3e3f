//! Minimal raster drawing: rectangles and 8×8 bitmap text.
//!
//! The collage needs exactly four primitives — fill, stroke, measure, draw —
//! so this stays a thin layer over `font8x8` glyphs and direct pixel writes.
//! Everything is opaque paint on an opaque canvas; out-of-bounds coordinates
//! clip instead of panicking, so callers can center text without worrying
//! about narrow canvases.

use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::{Rgb, RgbImage};

/// Glyph cell size of the `font8x8` face, before scaling.
const GLYPH: u32 = 8;

/// Pixel width of `text` rendered at `scale` (single line).
pub fn text_width(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * GLYPH * scale.max(1)
}

/// Draw a single line of `text` with its top-left corner at `(x, y)`.
///
/// Glyphs outside `BASIC_FONTS` render as `?`. Pixels falling outside the
/// canvas are skipped, so partially visible text is fine.
pub fn draw_text(img: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>, scale: u32) {
    let scale = scale.max(1) as i32;
    let mut cursor_x = x;
    for ch in text.chars() {
        let glyph = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?'));
        let Some(glyph) = glyph else {
            cursor_x += GLYPH as i32 * scale;
            continue;
        };
        for (row_idx, row) in glyph.iter().enumerate() {
            let bits = *row;
            for col_idx in 0..GLYPH as i32 {
                if (bits >> col_idx) & 1 == 0 {
                    continue;
                }
                let px = cursor_x + col_idx * scale;
                let py = y + row_idx as i32 * scale;
                for sy in 0..scale {
                    for sx in 0..scale {
                        let (tx, ty) = (px + sx, py + sy);
                        if tx >= 0
                            && ty >= 0
                            && tx < img.width() as i32
                            && ty < img.height() as i32
                        {
                            img.put_pixel(tx as u32, ty as u32, color);
                        }
                    }
                }
            }
        }
        cursor_x += GLYPH as i32 * scale;
    }
}

/// Fill the rectangle at `(x, y)` sized `w × h`, clipped to the canvas.
pub fn fill_rect(img: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: Rgb<u8>) {
    let x1 = x.saturating_add(w).min(img.width());
    let y1 = y.saturating_add(h).min(img.height());
    for yy in y..y1 {
        for xx in x..x1 {
            img.put_pixel(xx, yy, color);
        }
    }
}

/// Stroke a border of `thickness` pixels just inside the rectangle edge.
pub fn stroke_rect(img: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: Rgb<u8>, thickness: u32) {
    if w == 0 || h == 0 {
        return;
    }
    let t = thickness.max(1).min(w).min(h);
    fill_rect(img, x, y, w, t, color);
    fill_rect(img, x, y + h.saturating_sub(t), w, t, color);
    fill_rect(img, x, y, t, h, color);
    fill_rect(img, x + w.saturating_sub(t), y, t, h, color);
}
