//! Status icon bitmap renderer.
//!
//! Draws a colored dot on a colored background with a single identifying
//! glyph on top. Pure function of its inputs; the two state bitmaps are
//! rendered once at startup and never regenerated.

use std::{fs, path::Path};

use fontdue::{Font, FontSettings};
use image::{Rgba, RgbaImage};
use tracing::{debug, warn};

/// Width and height of the rendered icon in pixels.
pub const ICON_SIZE: u32 = 64;

/// The dot is the circle inscribed in (10,10)-(54,54).
const DOT_CENTER: f32 = 32.0;
const DOT_RADIUS: f32 = 22.0;

/// Point size of the identifying glyph.
const GLYPH_SIZE: f32 = 50.0;

/// Glyph anchor: visually centered, nudged up one pixel.
const GLYPH_ANCHOR: (i32, i32) = (32, 31);

/// Renders one status icon bitmap.
///
/// Colors are RGBA byte tuples. The glyph is rasterized from a system
/// font; when no usable font is found the icon is rendered without the
/// glyph and a warning is logged. There is no other failure mode - invalid
/// colors are rejected upstream during configuration validation.
pub fn render_icon(
    dot_color: [u8; 4],
    background: [u8; 4],
    font_color: [u8; 4],
    glyph: char,
) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(ICON_SIZE, ICON_SIZE, Rgba(background));

    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let dx = x as f32 + 0.5 - DOT_CENTER;
        let dy = y as f32 + 0.5 - DOT_CENTER;
        if dx * dx + dy * dy <= DOT_RADIUS * DOT_RADIUS {
            *pixel = Rgba(dot_color);
        }
    }

    match load_system_font() {
        Some(font) => draw_glyph(&mut image, &font, glyph, font_color),
        None => warn!(%glyph, "No usable system font found, rendering icon without glyph"),
    }

    image
}

/// Rasterizes `glyph` and alpha-blends it centered on the icon.
fn draw_glyph(image: &mut RgbaImage, font: &Font, glyph: char, color: [u8; 4]) {
    let (metrics, coverage) = font.rasterize(glyph, GLYPH_SIZE);
    if metrics.width == 0 || metrics.height == 0 {
        return;
    }

    let x0 = GLYPH_ANCHOR.0 - metrics.width as i32 / 2;
    let y0 = GLYPH_ANCHOR.1 - metrics.height as i32 / 2;

    for row in 0..metrics.height {
        for col in 0..metrics.width {
            let x = x0 + col as i32;
            let y = y0 + row as i32;
            if x < 0 || y < 0 || x >= ICON_SIZE as i32 || y >= ICON_SIZE as i32 {
                continue;
            }

            let alpha = u16::from(coverage[row * metrics.width + col]) * u16::from(color[3]) / 255;
            if alpha == 0 {
                continue;
            }

            let pixel = image.get_pixel_mut(x as u32, y as u32);
            for channel in 0..3 {
                let blended = (u16::from(color[channel]) * alpha
                    + u16::from(pixel[channel]) * (255 - alpha))
                    / 255;
                pixel[channel] = blended as u8;
            }
            pixel[3] = pixel[3].max(alpha as u8);
        }
    }
}

/// Well-known font locations, tried in order. Bold sans faces first for
/// legibility at tray sizes.
const FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Finds and parses the first available system font.
fn load_system_font() -> Option<Font> {
    for path in FONT_PATHS {
        if !Path::new(path).exists() {
            continue;
        }

        let Ok(data) = fs::read(path) else {
            continue;
        };

        match Font::from_bytes(data, FontSettings::default()) {
            Ok(font) => {
                debug!(%path, "Loaded glyph font");
                return Some(font);
            }
            Err(e) => warn!(%path, error = %e, "Failed to parse font, trying next"),
        }
    }

    None
}
