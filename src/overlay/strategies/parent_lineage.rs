//! Overlay strategy coloring boxes by parent lineage.

use image::RgbImage;

use crate::model::BoundingBox;
use crate::overlay::color::ColorAssignment;
use crate::overlay::coords::placement;
use crate::overlay::draw::{BOX_THICKNESS, TITLE_LABEL, draw_box_outline, draw_title_overlay};
use crate::overlay::traits::{OverlayStrategy, RenderOptions, RenderResult};

/// Colors every box by its `parent_id`: the first box of a lineage
/// allocates a random color, later boxes of the same lineage reuse it.
/// Title boxes get the dark-gray marking drawn on top of their lineage
/// rectangle (both rectangles are drawn).
///
/// Does not resolve percentage units by default; inputs are taken as
/// absolute pixels unless [`RenderOptions::normalize`] says otherwise.
pub struct ParentLineageStrategy;

impl OverlayStrategy for ParentLineageStrategy {
    fn id(&self) -> &'static str {
        "parent-lineage"
    }

    fn option_number(&self) -> u8 {
        1
    }

    fn display_name(&self) -> &'static str {
        "By parent lineage"
    }

    fn normalizes_coordinates(&self) -> bool {
        false
    }

    fn render(
        &self,
        image: &mut RgbImage,
        boxes: &[BoundingBox],
        options: &RenderOptions,
    ) -> RenderResult {
        let normalize = options.normalize_or(self.normalizes_coordinates());
        let (image_width, image_height) = image.dimensions();
        let mut colors = ColorAssignment::new();
        let mut result = RenderResult::new();

        for bbox in boxes {
            let rect = placement(bbox, image_width, image_height, normalize);
            let color = colors.color_for(bbox.parent_id.as_deref());
            draw_box_outline(image, rect, color, BOX_THICKNESS);

            if bbox.labels.contains(TITLE_LABEL)
                && !draw_title_overlay(image, rect, BOX_THICKNESS, options.font.as_ref())
            {
                result.labels_skipped += 1;
            }
            result.boxes_drawn += 1;
        }

        if result.labels_skipped > 0 {
            log::warn!(
                "No label font supplied, skipped {} title text(s)",
                result.labels_skipped
            );
        }
        result
    }
}
