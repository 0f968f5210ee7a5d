//! annoview - Annotation bounding-box overlay tool
//!
//! Draws annotated bounding-box regions onto raster images for visual
//! inspection of structural labeling (titles, groups, subgroups,
//! patterns). Annotation documents are JSON review exports; the overlay
//! strategies color boxes by parent lineage, group-type label, or
//! pattern lineage.
//!
//! File upload, image decoding, and display are the caller's concern:
//! the library takes a decoded `RgbImage` plus raw JSON text and hands
//! back the same buffer with shapes drawn on it.

pub mod format;
pub mod model;
pub mod overlay;

use image::RgbImage;

pub use format::{Extraction, FormatError, extract_boxes};
pub use model::{BoundingBox, GroupMarker, LabelSet};
pub use overlay::{
    LabelFont, OverlayError, OverlayStrategy, RenderOptions, RenderResult, StrategyRegistry,
};

/// Draw `boxes` onto `image` with the strategy named by `selector` — a
/// semantic id or an option number ("1" | "2" | "3").
pub fn overlay_boxes(
    image: &mut RgbImage,
    boxes: &[BoundingBox],
    selector: &str,
    options: &RenderOptions,
) -> Result<RenderResult, OverlayError> {
    let registry = StrategyRegistry::new();
    let strategy = registry.select(selector)?;
    Ok(strategy.render(image, boxes, options))
}
