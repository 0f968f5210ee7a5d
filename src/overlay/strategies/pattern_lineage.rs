//! Overlay strategy coloring subgroup boxes by pattern lineage.

use image::RgbImage;

use crate::model::{BoundingBox, GroupMarker};
use crate::overlay::color::ColorAssignment;
use crate::overlay::coords::placement;
use crate::overlay::draw::{
    BOX_THICKNESS, LABEL_OFFSET, TITLE_LABEL, draw_box_outline, draw_label, draw_title_overlay,
};
use crate::overlay::traits::{OverlayStrategy, RenderOptions, RenderResult};

/// Draws only `Subgroup` boxes, colored by their shared `parent_id` — the
/// pattern identifier in this view. Boxes belonging to no subgroup are
/// not drawn at all; that exclusion is the point of the view, not an
/// oversight. Each box is captioned with its comma-joined label sequence.
///
/// Resolves percentage units by default.
pub struct PatternLineageStrategy;

impl OverlayStrategy for PatternLineageStrategy {
    fn id(&self) -> &'static str {
        "pattern-lineage"
    }

    fn option_number(&self) -> u8 {
        3
    }

    fn display_name(&self) -> &'static str {
        "By pattern lineage"
    }

    fn normalizes_coordinates(&self) -> bool {
        true
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
            if bbox.marker != GroupMarker::Subgroup {
                result.boxes_skipped += 1;
                continue;
            }

            let rect = placement(bbox, image_width, image_height, normalize);
            let color = colors.color_for(bbox.parent_id.as_deref());
            draw_box_outline(image, rect, color, BOX_THICKNESS);

            let caption = bbox.labels.join(",");
            if !draw_label(
                image,
                &caption,
                rect.x,
                rect.y - LABEL_OFFSET,
                color,
                options.font.as_ref(),
            ) {
                result.labels_skipped += 1;
            }

            if bbox.labels.contains(TITLE_LABEL)
                && !draw_title_overlay(image, rect, BOX_THICKNESS, options.font.as_ref())
            {
                result.labels_skipped += 1;
            }

            result.boxes_drawn += 1;
        }

        if result.boxes_skipped > 0 {
            log::debug!(
                "{} box(es) outside any subgroup were not drawn",
                result.boxes_skipped
            );
        }
        if result.labels_skipped > 0 {
            log::warn!(
                "No label font supplied, skipped {} label text(s)",
                result.labels_skipped
            );
        }
        result
    }
}
