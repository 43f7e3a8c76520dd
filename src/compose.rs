//! In-memory compositing: circular portraits, border rings, name labels,
//! decorative overlays.
//!
//! Every function here mutates or produces image buffers — no disk access.
//! Loading photos, fonts, and templates is the renderer's job
//! ([`render`](crate::render)), which keeps this module testable with
//! synthetic buffers.
//!
//! The portrait pipeline per person: fill-resize the photo to the mask
//! square (Lanczos3, center-cropped), punch a circular alpha disc through
//! it, alpha-composite it onto the canvas, ring it, and draw the name
//! centered below.

use crate::config::BorderConfig;
use crate::layout::Cell;
use ab_glyph::{Font, PxScale};
use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, Luma, Rgba, RgbaImage, imageops};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_hollow_circle_mut, draw_text_mut, text_size,
};

/// Label text color. Templates are light; the original posts use black.
const LABEL_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// A filled disc of `diameter`, white inside, black outside.
///
/// Used as the alpha channel of a portrait: everything outside the disc
/// becomes fully transparent at paste time.
fn circular_mask(diameter: u32) -> GrayImage {
    let mut mask = GrayImage::new(diameter, diameter);
    let center = (diameter / 2) as i32;
    draw_filled_circle_mut(&mut mask, (center, center), center, Luma([255u8]));
    mask
}

/// Crop a photo into a circular portrait of `diameter`.
///
/// The photo is resized to fill the mask square (aspect ratio preserved,
/// center-cropped) and the circular mask becomes its alpha channel.
pub fn circular_portrait(photo: &DynamicImage, diameter: u32) -> RgbaImage {
    let mut fitted = photo
        .resize_to_fill(diameter, diameter, FilterType::Lanczos3)
        .to_rgba8();
    let mask = circular_mask(diameter);
    for (x, y, pixel) in fitted.enumerate_pixels_mut() {
        pixel[3] = mask.get_pixel(x, y)[0];
    }
    fitted
}

/// Alpha-composite a portrait onto the canvas at its cell position.
///
/// Out-of-bounds portions (possible when the grid is wider than the canvas)
/// are clipped.
pub fn paste_portrait(canvas: &mut RgbaImage, portrait: &RgbaImage, cell: &Cell) {
    imageops::overlay(canvas, portrait, cell.x, cell.y);
}

/// Draw the decorative ring just outside a portrait's circle boundary.
///
/// One hollow circle per pixel of thickness, radii growing outward from the
/// portrait edge. Thickness 0 draws nothing.
pub fn draw_ring(canvas: &mut RgbaImage, cell: &Cell, diameter: u32, border: &BorderConfig) {
    let [r, g, b] = border.color;
    let color = Rgba([r, g, b, 255]);
    let center = (
        (cell.x + (diameter / 2) as i64) as i32,
        (cell.y + (diameter / 2) as i64) as i32,
    );
    for ring in 0..border.thickness {
        let radius = (diameter / 2 + ring) as i32;
        draw_hollow_circle_mut(canvas, center, radius, color);
    }
}

/// Draw a person's name centered under their portrait.
///
/// Font size is proportional to the portrait (`diameter / 10`); the cell's
/// label anchor gives the horizontal center and top edge of the text.
pub fn draw_label(
    canvas: &mut RgbaImage,
    font: &impl Font,
    diameter: u32,
    cell: &Cell,
    name: &str,
) {
    let scale = PxScale::from(diameter as f32 / 10.0);
    let (text_width, _) = text_size(scale, font, name);
    let x = cell.label_center_x - (text_width / 2) as i64;
    draw_text_mut(
        canvas,
        LABEL_COLOR,
        x as i32,
        cell.label_top_y as i32,
        scale,
        font,
        name,
    );
}

/// Composite a pre-loaded decorative sticker onto the canvas.
///
/// The sticker is resized to exactly `size` (stickers are authored for a
/// spot on the template, so the aspect ratio is the caller's problem).
pub fn place_overlay(canvas: &mut RgbaImage, sticker: &DynamicImage, position: [i64; 2], size: [u32; 2]) {
    let resized = sticker
        .resize_exact(size[0], size[1], FilterType::Lanczos3)
        .to_rgba8();
    imageops::overlay(canvas, &resized, position[0], position[1]);
}
