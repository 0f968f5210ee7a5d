//! Review-export annotation document parsing.
//!
//! Converts the `annotations[].result[]` JSON shape produced by the
//! labeling tool into the flat `BoundingBox` sequence the overlay
//! strategies consume. Only result entries produced by the `elements`,
//! `class`, and `meta` layers are retained; entries from any other layer
//! are filtered out silently (a documented filter, not an error).
//!
//! Retained entries with missing or malformed geometry are skipped with a
//! warning by default, so one bad entry cannot abort a whole image review
//! session. Strict extraction turns those skips into hard errors.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::format::error::FormatError;
use crate::model::{BoundingBox, GroupMarker, LabelSet};

/// Annotation layers whose result entries are retained.
pub const RETAINED_SOURCES: [&str; 3] = ["elements", "class", "meta"];

/// Options for document extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Fail the whole parse on a malformed retained entry instead of
    /// skipping it with a warning.
    pub strict: bool,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set strict mode (true = malformed entries abort the parse).
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Warning generated while extracting boxes in lenient mode.
#[derive(Debug, Clone)]
pub struct FormatWarning {
    /// Index of the annotation within `annotations`.
    pub annotation_index: usize,

    /// Index of the result entry within that annotation's `result` array.
    pub result_index: usize,

    /// Human-readable reason the entry was skipped.
    pub message: String,
}

/// Outcome of extracting a document.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Extracted boxes, in document order.
    pub boxes: Vec<BoundingBox>,

    /// Entries skipped in lenient mode.
    pub warnings: Vec<FormatWarning>,
}

impl Extraction {
    /// Check if there were any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Extract all retained bounding boxes from a raw annotation document.
///
/// Output order follows the document. Order carries no rendering meaning
/// but is deterministic for testability.
pub fn extract_boxes(json: &str) -> Result<Extraction, FormatError> {
    extract_boxes_with(json, &ExtractOptions::default())
}

/// Like [`extract_boxes`], with explicit options.
pub fn extract_boxes_with(json: &str, options: &ExtractOptions) -> Result<Extraction, FormatError> {
    let document: RawDocument = serde_json::from_str(json)?;

    let mut extraction = Extraction::default();
    for (annotation_index, annotation) in document.annotations.iter().enumerate() {
        for (result_index, entry) in annotation.result.iter().enumerate() {
            let retained = entry
                .from_name
                .as_ref()
                .and_then(Value::as_str)
                .is_some_and(|name| RETAINED_SOURCES.contains(&name));
            if !retained {
                continue;
            }

            match convert_entry(entry) {
                Ok(bbox) => extraction.boxes.push(bbox),
                Err(error) if options.strict => return Err(error),
                Err(error) => {
                    log::warn!(
                        "Skipping result {} of annotation {}: {}",
                        result_index,
                        annotation_index,
                        error
                    );
                    extraction.warnings.push(FormatWarning {
                        annotation_index,
                        result_index,
                        message: error.to_string(),
                    });
                }
            }
        }
    }

    log::info!(
        "Extracted {} boxes ({} entries skipped)",
        extraction.boxes.len(),
        extraction.warnings.len()
    );

    Ok(extraction)
}

/// Read a document from disk and extract its boxes.
pub fn extract_boxes_from_file(
    path: &Path,
    options: &ExtractOptions,
) -> Result<Extraction, FormatError> {
    log::info!("Extracting annotations from {:?}", path);
    let json = std::fs::read_to_string(path)?;
    extract_boxes_with(&json, options)
}

// Raw document shape.
//
// Marker fields are kept as opaque JSON values: only their presence
// matters (and, for parent_id, their scalar content). A field explicitly
// set to JSON null deserializes as absent.

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    annotations: Vec<RawAnnotation>,
}

#[derive(Debug, Deserialize)]
struct RawAnnotation {
    #[serde(default)]
    result: Vec<RawResult>,
}

#[derive(Debug, Deserialize)]
struct RawResult {
    #[serde(default)]
    from_name: Option<Value>,
    #[serde(default)]
    value: Option<RawValue>,
    #[serde(default)]
    parent_id: Option<Value>,
    #[serde(default)]
    group_id: Option<Value>,
    #[serde(default)]
    a_group_id: Option<Value>,
    #[serde(default)]
    element_count: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawValue {
    #[serde(default)]
    x: Option<Value>,
    #[serde(default)]
    y: Option<Value>,
    #[serde(default)]
    width: Option<Value>,
    #[serde(default)]
    height: Option<Value>,
    #[serde(default)]
    rectanglelabels: Option<Value>,
}

/// Convert one retained result entry into a box.
fn convert_entry(entry: &RawResult) -> Result<BoundingBox, FormatError> {
    let value = entry
        .value
        .as_ref()
        .ok_or_else(|| FormatError::missing_field("value"))?;

    let x = geometry_component(value.x.as_ref(), "value.x")?;
    let y = geometry_component(value.y.as_ref(), "value.y")?;
    let width = geometry_component(value.width.as_ref(), "value.width")?;
    let height = geometry_component(value.height.as_ref(), "value.height")?;
    if width < 0.0 || height < 0.0 {
        return Err(FormatError::invalid_geometry(format!(
            "negative extent {}x{}",
            width, height
        )));
    }

    let labels = rectangle_labels(value.rectanglelabels.as_ref())?;

    let mut bbox = BoundingBox::new(x, y, width, height)
        .with_marker(derive_marker(entry))
        .with_labels(labels);
    if let Some(parent_id) = scalar_key(entry.parent_id.as_ref())? {
        bbox = bbox.with_parent_id(parent_id);
    }
    Ok(bbox)
}

/// Read one numeric geometry component.
fn geometry_component(raw: Option<&Value>, field: &str) -> Result<f32, FormatError> {
    let value = raw.ok_or_else(|| FormatError::missing_field(field))?;
    let number = value
        .as_f64()
        .ok_or_else(|| FormatError::invalid_geometry(format!("{} is not a number", field)))?;
    if !number.is_finite() {
        return Err(FormatError::invalid_geometry(format!(
            "{} is not finite",
            field
        )));
    }
    Ok(number as f32)
}

/// Read the `rectanglelabels` array.
fn rectangle_labels(raw: Option<&Value>) -> Result<LabelSet, FormatError> {
    let value = raw.ok_or_else(|| FormatError::missing_field("value.rectanglelabels"))?;
    let entries = value
        .as_array()
        .ok_or_else(|| FormatError::invalid_format("rectanglelabels must be an array"))?;

    let mut labels = LabelSet::new();
    for entry in entries {
        let label = entry.as_str().ok_or_else(|| {
            FormatError::invalid_format("rectanglelabels entries must be strings")
        })?;
        labels.insert(label.to_string());
    }
    Ok(labels)
}

/// Derive the structural marker from entry-level field presence.
///
/// Priority order matters: `group_id` wins when several markers are
/// present on the same entry.
fn derive_marker(entry: &RawResult) -> GroupMarker {
    if entry.group_id.is_some() {
        GroupMarker::ParentGroup
    } else if entry.a_group_id.is_some() {
        GroupMarker::AGroup
    } else if entry.element_count.is_some() {
        GroupMarker::Subgroup
    } else {
        GroupMarker::Ungrouped
    }
}

/// Normalize a scalar lineage key to its string form.
///
/// Documents carry parent ids as strings or numbers interchangeably;
/// both forms of the same id must land on the same grouping key.
fn scalar_key(raw: Option<&Value>) -> Result<Option<String>, FormatError> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(_) => Err(FormatError::invalid_format("parent_id must be a scalar")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(results: &str) -> String {
        format!(r#"{{"annotations": [{{"result": [{}]}}]}}"#, results)
    }

    const ELEMENT: &str = r#"{
        "from_name": "elements",
        "value": {"x": 10, "y": 20, "width": 30, "height": 40,
                  "rectanglelabels": ["Title"]},
        "parent_id": "p1"
    }"#;

    #[test]
    fn test_retained_sources_filter() {
        let json = document(&format!(
            r#"{}, {{"from_name": "ignored",
                     "value": {{"x": 1, "y": 1, "width": 1, "height": 1,
                               "rectanglelabels": []}}}}"#,
            ELEMENT
        ));
        let extraction = extract_boxes(&json).unwrap();

        assert_eq!(extraction.boxes.len(), 1);
        assert!(!extraction.has_warnings());
    }

    #[test]
    fn test_missing_from_name_is_filtered() {
        let json = document(
            r#"{"value": {"x": 1, "y": 1, "width": 1, "height": 1,
                          "rectanglelabels": []}}"#,
        );
        let extraction = extract_boxes(&json).unwrap();

        assert!(extraction.boxes.is_empty());
        assert!(!extraction.has_warnings());
    }

    #[test]
    fn test_geometry_and_labels() {
        let extraction = extract_boxes(&document(ELEMENT)).unwrap();
        let bbox = &extraction.boxes[0];

        assert_eq!(bbox.x, 10.0);
        assert_eq!(bbox.y, 20.0);
        assert_eq!(bbox.width, 30.0);
        assert_eq!(bbox.height, 40.0);
        assert!(bbox.labels.contains("Title"));
        assert_eq!(bbox.parent_id.as_deref(), Some("p1"));
        assert_eq!(bbox.marker, GroupMarker::Ungrouped);
    }

    #[test]
    fn test_marker_priority() {
        let json = document(
            r#"{"from_name": "class", "group_id": 3, "element_count": 5,
                "value": {"x": 1, "y": 1, "width": 1, "height": 1,
                          "rectanglelabels": []}}"#,
        );
        let extraction = extract_boxes(&json).unwrap();

        // group_id wins even when a subgroup marker is also present.
        assert_eq!(extraction.boxes[0].marker, GroupMarker::ParentGroup);
    }

    #[test]
    fn test_marker_variants() {
        for (marker_field, expected) in [
            ("group_id", GroupMarker::ParentGroup),
            ("a_group_id", GroupMarker::AGroup),
            ("element_count", GroupMarker::Subgroup),
        ] {
            let json = document(&format!(
                r#"{{"from_name": "meta", "{}": 1,
                     "value": {{"x": 1, "y": 1, "width": 1, "height": 1,
                               "rectanglelabels": []}}}}"#,
                marker_field
            ));
            let extraction = extract_boxes(&json).unwrap();
            assert_eq!(extraction.boxes[0].marker, expected);
        }
    }

    #[test]
    fn test_null_marker_reads_as_absent() {
        let json = document(
            r#"{"from_name": "meta", "group_id": null,
                "value": {"x": 1, "y": 1, "width": 1, "height": 1,
                          "rectanglelabels": []}}"#,
        );
        let extraction = extract_boxes(&json).unwrap();

        assert_eq!(extraction.boxes[0].marker, GroupMarker::Ungrouped);
    }

    #[test]
    fn test_numeric_parent_id_normalizes_to_string() {
        let json = document(
            r#"{"from_name": "elements", "parent_id": 7,
                "value": {"x": 1, "y": 1, "width": 1, "height": 1,
                          "rectanglelabels": []}}"#,
        );
        let extraction = extract_boxes(&json).unwrap();

        assert_eq!(extraction.boxes[0].parent_id.as_deref(), Some("7"));
    }

    #[test]
    fn test_missing_geometry_skipped_with_warning() {
        let json = document(
            r#"{"from_name": "elements",
                "value": {"x": 1, "y": 1, "height": 1,
                          "rectanglelabels": []}}"#,
        );
        let extraction = extract_boxes(&json).unwrap();

        assert!(extraction.boxes.is_empty());
        assert_eq!(extraction.warnings.len(), 1);
        assert_eq!(extraction.warnings[0].annotation_index, 0);
        assert_eq!(extraction.warnings[0].result_index, 0);
        assert!(extraction.warnings[0].message.contains("value.width"));
    }

    #[test]
    fn test_strict_mode_fails_on_malformed_entry() {
        let json = document(
            r#"{"from_name": "elements",
                "value": {"x": 1, "y": 1, "height": 1,
                          "rectanglelabels": []}}"#,
        );
        let error = extract_boxes_with(&json, &ExtractOptions::new().strict(true)).unwrap_err();

        assert!(matches!(error, FormatError::MissingField { .. }));
    }

    #[test]
    fn test_non_numeric_geometry_is_invalid() {
        let json = document(
            r#"{"from_name": "elements",
                "value": {"x": "ten", "y": 1, "width": 1, "height": 1,
                          "rectanglelabels": []}}"#,
        );
        let extraction = extract_boxes(&json).unwrap();

        assert!(extraction.boxes.is_empty());
        assert!(extraction.warnings[0].message.contains("value.x"));
    }

    #[test]
    fn test_negative_extent_is_invalid() {
        let json = document(
            r#"{"from_name": "elements",
                "value": {"x": 1, "y": 1, "width": -5, "height": 1,
                          "rectanglelabels": []}}"#,
        );
        let extraction = extract_boxes(&json).unwrap();

        assert!(extraction.boxes.is_empty());
        assert_eq!(extraction.warnings.len(), 1);
    }

    #[test]
    fn test_bad_entry_does_not_block_siblings() {
        let json = document(&format!(
            r#"{{"from_name": "elements",
                 "value": {{"rectanglelabels": []}}}}, {}"#,
            ELEMENT
        ));
        let extraction = extract_boxes(&json).unwrap();

        assert_eq!(extraction.boxes.len(), 1);
        assert_eq!(extraction.warnings.len(), 1);
        assert_eq!(extraction.boxes[0].x, 10.0);
    }

    #[test]
    fn test_document_order_preserved() {
        let json = document(
            r#"{"from_name": "elements",
                "value": {"x": 1, "y": 0, "width": 1, "height": 1,
                          "rectanglelabels": []}},
               {"from_name": "class",
                "value": {"x": 2, "y": 0, "width": 1, "height": 1,
                          "rectanglelabels": []}},
               {"from_name": "meta",
                "value": {"x": 3, "y": 0, "width": 1, "height": 1,
                          "rectanglelabels": []}}"#,
        );
        let extraction = extract_boxes(&json).unwrap();

        let xs: Vec<f32> = extraction.boxes.iter().map(|b| b.x).collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_empty_document() {
        let extraction = extract_boxes("{}").unwrap();
        assert!(extraction.boxes.is_empty());
    }

    #[test]
    fn test_invalid_json_is_a_hard_error() {
        let error = extract_boxes("not json").unwrap_err();
        assert!(matches!(error, FormatError::Json(_)));
    }

    #[test]
    fn test_percentage_geometry_passes_through_raw() {
        // Unit resolution happens at render time, not here.
        let json = document(
            r#"{"from_name": "elements",
                "value": {"x": 0.5, "y": 0.25, "width": 0.1, "height": 0.2,
                          "rectanglelabels": []}}"#,
        );
        let extraction = extract_boxes(&json).unwrap();

        assert_eq!(extraction.boxes[0].x, 0.5);
        assert_eq!(extraction.boxes[0].width, 0.1);
    }
}
