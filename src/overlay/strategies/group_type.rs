//! Overlay strategy coloring boxes by group-type label.

use image::{Rgb, RgbImage};

use crate::model::{BoundingBox, GroupMarker, LabelSet};
use crate::overlay::coords::placement;
use crate::overlay::draw::{
    BOX_THICKNESS, LABEL_OFFSET, TITLE_LABEL, draw_box_outline, draw_label, draw_title_overlay,
};
use crate::overlay::traits::{OverlayStrategy, RenderOptions, RenderResult};

const A_GROUP_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const PARENT_GROUP_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const SUBGROUP_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
const UNGROUPED_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// Outline thickness for the title marking under this strategy.
const TITLE_THICKNESS: u32 = 4;

/// Colors every box by its group-type label with a fixed palette and
/// writes the matched label above it. Boxes carrying `Title` but no
/// group-type label at all get the heavier dark-gray title marking.
///
/// Resolves percentage units by default.
pub struct GroupTypeStrategy;

/// First-match classification over the label sequence. The group-type
/// label strings are the `GroupMarker` display names.
fn classify(labels: &LabelSet) -> (Rgb<u8>, &'static str) {
    if labels.contains(GroupMarker::AGroup.name()) {
        (A_GROUP_COLOR, GroupMarker::AGroup.name())
    } else if labels.contains(GroupMarker::ParentGroup.name()) {
        (PARENT_GROUP_COLOR, GroupMarker::ParentGroup.name())
    } else if labels.contains(GroupMarker::Subgroup.name()) {
        (SUBGROUP_COLOR, GroupMarker::Subgroup.name())
    } else {
        (UNGROUPED_COLOR, GroupMarker::Ungrouped.name())
    }
}

impl OverlayStrategy for GroupTypeStrategy {
    fn id(&self) -> &'static str {
        "group-type"
    }

    fn option_number(&self) -> u8 {
        2
    }

    fn display_name(&self) -> &'static str {
        "By group type"
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
        let mut result = RenderResult::new();

        for bbox in boxes {
            let rect = placement(bbox, image_width, image_height, normalize);
            let (color, label) = classify(&bbox.labels);

            draw_box_outline(image, rect, color, BOX_THICKNESS);
            if !draw_label(
                image,
                label,
                rect.x,
                rect.y - LABEL_OFFSET,
                color,
                options.font.as_ref(),
            ) {
                result.labels_skipped += 1;
            }

            // Title marking applies only to boxes with no group-type
            // label at all.
            let grouped = bbox.labels.contains_any(&[
                GroupMarker::Subgroup.name(),
                GroupMarker::ParentGroup.name(),
                GroupMarker::AGroup.name(),
            ]);
            if bbox.labels.contains(TITLE_LABEL)
                && !grouped
                && !draw_title_overlay(image, rect, TITLE_THICKNESS, options.font.as_ref())
            {
                result.labels_skipped += 1;
            }

            result.boxes_drawn += 1;
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
