//! Shared raster drawing primitives for the overlay strategies.

use std::path::Path;

use ab_glyph::{FontArc, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;

use crate::overlay::coords::PixelRect;
use crate::overlay::error::OverlayError;

/// Label marking a box as a document title.
pub const TITLE_LABEL: &str = "Title";

/// Fixed dark gray used for title outlines and text.
pub const TITLE_COLOR: Rgb<u8> = Rgb([10, 10, 10]);

/// Outline thickness for ordinary box rectangles.
pub const BOX_THICKNESS: u32 = 2;

/// Vertical offset of per-box label text above the top-left corner.
pub const LABEL_OFFSET: i32 = 10;

/// Vertical offset of title text above the top-left corner.
pub const TITLE_OFFSET: i32 = 30;

/// Default pixel height for label text.
pub const LABEL_SCALE: f32 = 20.0;

/// Font used for label text.
///
/// The crate ships no font binary; callers load one at runtime (the same
/// way they load the image) and pass it in through `RenderOptions`.
/// Strategies render geometry-only when no font is available.
pub struct LabelFont {
    font: FontArc,
    scale: PxScale,
}

impl LabelFont {
    /// Load a TTF/OTF font from raw bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, OverlayError> {
        let font = FontArc::try_from_vec(data)?;
        Ok(Self {
            font,
            scale: PxScale::from(LABEL_SCALE),
        })
    }

    /// Load a TTF/OTF font from a file.
    pub fn from_file(path: &Path) -> Result<Self, OverlayError> {
        log::info!("Loading label font from {:?}", path);
        Self::from_bytes(std::fs::read(path)?)
    }

    /// Override the text scale (pixel height).
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = PxScale::from(scale);
        self
    }
}

/// Draw a hollow rectangle `thickness` pixels wide by stacking 1 px
/// rings, each inset by one pixel. Degenerate extents clamp to 1 px so
/// the box stays visible; parts outside the canvas are clipped by the
/// raster layer.
pub fn draw_box_outline(image: &mut RgbImage, rect: PixelRect, color: Rgb<u8>, thickness: u32) {
    for inset in 0..thickness.max(1) as i32 {
        let width = (i64::from(rect.width) - 2 * i64::from(inset)).max(1) as u32;
        let height = (i64::from(rect.height) - 2 * i64::from(inset)).max(1) as u32;
        let ring = Rect::at(rect.x + inset, rect.y + inset).of_size(width, height);
        draw_hollow_rect_mut(image, ring, color);
    }
}

/// Draw `text` with its top-left corner at `(x, y)`.
///
/// Returns false when no font is available, leaving the image untouched.
pub fn draw_label(
    image: &mut RgbImage,
    text: &str,
    x: i32,
    y: i32,
    color: Rgb<u8>,
    font: Option<&LabelFont>,
) -> bool {
    let Some(font) = font else {
        return false;
    };
    draw_text_mut(image, color, x, y, font.scale, &font.font, text);
    true
}

/// Title marking pass: a dark-gray outline over the box plus a "Title"
/// text above it. Drawn after the base rectangle so it sits on top.
///
/// Returns false when the text part was skipped for lack of a font; the
/// outline is drawn either way.
pub fn draw_title_overlay(
    image: &mut RgbImage,
    rect: PixelRect,
    thickness: u32,
    font: Option<&LabelFont>,
) -> bool {
    draw_box_outline(image, rect, TITLE_COLOR, thickness);
    draw_label(
        image,
        TITLE_LABEL,
        rect.x,
        rect.y - TITLE_OFFSET,
        TITLE_COLOR,
        font,
    )
}
