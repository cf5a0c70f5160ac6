//! Branding watermark for generated images.
//!
//! The text is drawn with a built-in 5x7 bitmap face scaled to the computed
//! font size, left-aligned, its bottom edge resting `margin` pixels above the
//! bottom of the image. Fill is white at half opacity. Output is always JPEG.

use hayat_types::{GenerationError, ImagePayload, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};

pub const WATERMARK_TEXT: &str = "Hayat Ai";

const MIN_FONT_SIZE: u32 = 12;
const JPEG_QUALITY: u8 = 92;
const OUTPUT_MIME_TYPE: &str = "image/jpeg";

const GLYPH_COLS: u32 = 5;
const GLYPH_ROWS: u32 = 7;
/// Horizontal advance per character, in glyph cells.
const GLYPH_ADVANCE: u32 = 6;

/// Font size in pixels for an image `width` pixels wide.
pub fn font_size_for_width(width: u32) -> u32 {
    (width / 90).max(MIN_FONT_SIZE)
}

/// Decode `encoded`, stamp the watermark, and re-encode as JPEG.
///
/// CPU bound; async callers should run it on a blocking thread.
pub fn apply(encoded: &[u8]) -> Result<ImagePayload> {
    let decoded = image::load_from_memory(encoded)
        .map_err(|e| GenerationError::image_processing(format!("decode failed: {}", e)))?;
    if decoded.width() == 0 || decoded.height() == 0 {
        return Err(GenerationError::image_processing("image has no drawable surface"));
    }

    let mut surface = decoded.to_rgb8();
    let font_size = font_size_for_width(surface.width());
    draw_text(&mut surface, WATERMARK_TEXT, font_size);

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY)
        .encode_image(&surface)
        .map_err(|e| GenerationError::image_processing(format!("encode failed: {}", e)))?;

    tracing::debug!(
        width = surface.width(),
        height = surface.height(),
        font_size,
        bytes = out.len(),
        "Watermarked image"
    );
    Ok(ImagePayload::new(OUTPUT_MIME_TYPE, out))
}

fn draw_text(surface: &mut RgbImage, text: &str, font_size: u32) {
    let cell = (font_size / 9).max(1);
    let margin = font_size;

    // Text that would not fit above the margin is skipped, not clipped at the top.
    let Some(top) = surface.height().checked_sub(margin + GLYPH_ROWS * cell) else {
        return;
    };

    let mut left = margin;
    for ch in text.chars() {
        for (row, bits) in glyph(ch).iter().enumerate() {
            for col in 0..GLYPH_COLS {
                if bits & (1 << (GLYPH_COLS - 1 - col)) != 0 {
                    fill_cell(surface, left + col * cell, top + row as u32 * cell, cell);
                }
            }
        }
        left += GLYPH_ADVANCE * cell;
    }
}

fn fill_cell(surface: &mut RgbImage, x: u32, y: u32, size: u32) {
    let (width, height) = surface.dimensions();
    for py in y..(y + size).min(height) {
        for px in x..(x + size).min(width) {
            let Rgb(channels) = *surface.get_pixel(px, py);
            let blended = channels.map(|c| ((u16::from(c) + 255) / 2) as u8);
            surface.put_pixel(px, py, Rgb(blended));
        }
    }
}

/// Rows top to bottom, bit 4 is the leftmost column.
fn glyph(ch: char) -> [u8; GLYPH_ROWS as usize] {
    match ch {
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'a' => [0b00000, 0b00000, 0b01110, 0b00001, 0b01111, 0b10001, 0b01111],
        'y' => [0b00000, 0b00000, 0b10001, 0b10001, 0b01111, 0b00001, 0b01110],
        't' => [0b01000, 0b01000, 0b11100, 0b01000, 0b01000, 0b01001, 0b00110],
        'i' => [0b00100, 0b00000, 0b01100, 0b00100, 0b00100, 0b00100, 0b01110],
        _ => [0; GLYPH_ROWS as usize],
    }
}
