//! End-to-end scenarios: document in, drawn pixels out.

use image::{Rgb, RgbImage};

use crate::format::extract_boxes;
use crate::overlay::{OverlayError, RenderOptions, TITLE_COLOR};
use crate::overlay_boxes;

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

const TWO_SIBLINGS: &str = r#"{
    "annotations": [{"result": [
        {"from_name": "elements", "parent_id": "A",
         "value": {"x": 10, "y": 10, "width": 50, "height": 50,
                   "rectanglelabels": ["Text"]}},
        {"from_name": "elements", "parent_id": "A",
         "value": {"x": 100, "y": 100, "width": 30, "height": 30,
                   "rectanglelabels": ["Text"]}}
    ]}]
}"#;

const IGNORED_ONLY: &str = r#"{
    "annotations": [{"result": [
        {"from_name": "ignored",
         "value": {"x": 10, "y": 10, "width": 50, "height": 50,
                   "rectanglelabels": ["Text"]}}
    ]}]
}"#;

#[test]
fn test_two_siblings_share_color_at_exact_coordinates() {
    let extraction = extract_boxes(TWO_SIBLINGS).unwrap();
    let mut image = RgbImage::new(300, 300);

    let result = overlay_boxes(&mut image, &extraction.boxes, "1", &RenderOptions::new()).unwrap();

    assert_eq!(result.boxes_drawn, 2);
    let color = *image.get_pixel(10, 10);
    assert_ne!(color, BLACK);
    assert_ne!(color, TITLE_COLOR);
    // Both rectangles, one lineage color, exact placement.
    assert_eq!(*image.get_pixel(59, 59), color);
    assert_eq!(*image.get_pixel(100, 100), color);
    assert_eq!(*image.get_pixel(129, 129), color);
    // No title markers anywhere: nothing carried the Title label.
    assert!(image.pixels().all(|p| *p != TITLE_COLOR));
}

#[test]
fn test_unrecognized_layer_never_draws() {
    let extraction = extract_boxes(IGNORED_ONLY).unwrap();
    assert!(extraction.boxes.is_empty());

    for selector in ["1", "2", "3"] {
        let mut image = RgbImage::new(100, 100);
        let result =
            overlay_boxes(&mut image, &extraction.boxes, selector, &RenderOptions::new()).unwrap();

        assert_eq!(result.boxes_drawn, 0);
        assert!(image.pixels().all(|p| *p == BLACK), "strategy {} drew", selector);
    }
}

#[test]
fn test_fixed_palette_rendering_is_reproducible() {
    let document = r#"{
        "annotations": [{"result": [
            {"from_name": "class",
             "value": {"x": 20, "y": 20, "width": 40, "height": 40,
                       "rectanglelabels": ["a group"]}},
            {"from_name": "class",
             "value": {"x": 5, "y": 70, "width": 20, "height": 20,
                       "rectanglelabels": ["Subgroup"]}}
        ]}]
    }"#;
    let extraction = extract_boxes(document).unwrap();

    let mut first = RgbImage::new(150, 150);
    let mut second = RgbImage::new(150, 150);
    overlay_boxes(&mut first, &extraction.boxes, "2", &RenderOptions::new()).unwrap();
    overlay_boxes(&mut second, &extraction.boxes, "2", &RenderOptions::new()).unwrap();

    assert_eq!(first.as_raw(), second.as_raw());
}

#[test]
fn test_lineage_colors_vary_but_geometry_does_not() {
    let extraction = extract_boxes(TWO_SIBLINGS).unwrap();

    let mut first = RgbImage::new(300, 300);
    let mut second = RgbImage::new(300, 300);
    overlay_boxes(&mut first, &extraction.boxes, "1", &RenderOptions::new()).unwrap();
    overlay_boxes(&mut second, &extraction.boxes, "1", &RenderOptions::new()).unwrap();

    // Fresh color state per pass: the colors may differ, the set of
    // touched pixels may not.
    let touched = |image: &RgbImage| {
        image
            .enumerate_pixels()
            .filter(|(_, _, p)| **p != BLACK)
            .map(|(x, y, _)| (x, y))
            .collect::<Vec<_>>()
    };
    assert_eq!(touched(&first), touched(&second));
}

#[test]
fn test_unknown_selector_is_an_error() {
    let mut image = RgbImage::new(10, 10);
    let error = overlay_boxes(&mut image, &[], "9", &RenderOptions::new()).unwrap_err();

    assert!(matches!(error, OverlayError::UnknownStrategy { .. }));
}
