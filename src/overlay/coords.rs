//! Coordinate-unit resolution for box placement.
//!
//! Annotation documents mix two unit systems for the same fields: some
//! tools export box geometry as percentages of the image dimensions,
//! others as absolute pixels. Resolution is per component, by magnitude.

use crate::model::BoundingBox;

/// Resolved pixel placement of a box.
///
/// `x`/`y` may be negative (regions can start off-canvas); clipping is
/// left to the raster layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    /// Left edge in pixels.
    pub x: i32,
    /// Top edge in pixels.
    pub y: i32,
    /// Horizontal extent in pixels.
    pub width: u32,
    /// Vertical extent in pixels.
    pub height: u32,
}

/// Resolve one coordinate component to absolute pixels.
///
/// A raw value strictly below 1.0 is read as a percentage of `extent`;
/// anything else is already absolute and only integer-truncated. The
/// threshold is inherently ambiguous (a 0.5 px extent is
/// indistinguishable from a 0.5% one) and is kept as-is; callers needing
/// exact units must carry them out of band. Note that negative values
/// also fall on the percentage side of the threshold.
pub fn resolve_component(raw: f32, extent: u32) -> i32 {
    if raw < 1.0 {
        (raw * extent as f32 / 100.0) as i32
    } else {
        raw as i32
    }
}

/// Placement without unit resolution.
///
/// Corners are truncated directly from the raw values, so the pixel width
/// spans `trunc(x)` to `trunc(x + width)` rather than being truncated on
/// its own.
pub fn raw_rect(bbox: &BoundingBox) -> PixelRect {
    let x0 = bbox.x as i32;
    let y0 = bbox.y as i32;
    let x1 = (bbox.x + bbox.width) as i32;
    let y1 = (bbox.y + bbox.height) as i32;
    PixelRect {
        x: x0,
        y: y0,
        width: (x1 - x0).max(0) as u32,
        height: (y1 - y0).max(0) as u32,
    }
}

/// Placement with per-component unit resolution against the image
/// extents: `x`/`width` against the image width, `y`/`height` against
/// the image height.
pub fn resolved_rect(bbox: &BoundingBox, image_width: u32, image_height: u32) -> PixelRect {
    PixelRect {
        x: resolve_component(bbox.x, image_width),
        y: resolve_component(bbox.y, image_height),
        width: resolve_component(bbox.width, image_width).max(0) as u32,
        height: resolve_component(bbox.height, image_height).max(0) as u32,
    }
}

/// Pick the placement for a box under the given normalization setting.
pub fn placement(
    bbox: &BoundingBox,
    image_width: u32,
    image_height: u32,
    normalize: bool,
) -> PixelRect {
    if normalize {
        resolved_rect(bbox, image_width, image_height)
    } else {
        raw_rect(bbox)
    }
}
