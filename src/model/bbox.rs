//! Normalized bounding-box records extracted from annotation documents.

use crate::model::LabelSet;

/// Structural role of a box, derived at parse time from which marker
/// field its source entry carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupMarker {
    /// Entry carried a `group_id` marker.
    ParentGroup,
    /// Entry carried an `a_group_id` marker.
    AGroup,
    /// Entry carried an `element_count` marker.
    Subgroup,
    /// Entry carried no marker field.
    #[default]
    Ungrouped,
}

impl GroupMarker {
    /// Get the display name for this marker.
    ///
    /// These names double as the group-type label strings found in
    /// annotation documents.
    pub fn name(&self) -> &'static str {
        match self {
            GroupMarker::ParentGroup => "Parent Group",
            GroupMarker::AGroup => "a group",
            GroupMarker::Subgroup => "Subgroup",
            GroupMarker::Ungrouped => "None",
        }
    }

    /// Get all marker variants.
    pub fn all() -> &'static [GroupMarker] {
        &[
            GroupMarker::ParentGroup,
            GroupMarker::AGroup,
            GroupMarker::Subgroup,
            GroupMarker::Ungrouped,
        ]
    }
}

/// One annotated region, in raw document units.
///
/// Geometry may be expressed in absolute pixels or as percentages of the
/// image dimensions; the ambiguity is resolved at render time (see
/// `overlay::coords`). `x`/`y` may be negative (regions can start
/// off-canvas); `width`/`height` are non-negative, enforced by the parser.
/// Records are immutable once constructed and scoped to a single
/// rendering call.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    /// Left edge, raw units.
    pub x: f32,
    /// Top edge, raw units.
    pub y: f32,
    /// Horizontal extent, raw units.
    pub width: f32,
    /// Vertical extent, raw units.
    pub height: f32,
    /// Derived structural role.
    pub marker: GroupMarker,
    /// Labels attached to the region, in document order.
    pub labels: LabelSet,
    /// Opaque lineage key. Used as a lookup key for grouping, never
    /// resolved into an object graph.
    pub parent_id: Option<String>,
}

impl BoundingBox {
    /// Create a box with the given geometry and no marker, labels, or
    /// lineage.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            marker: GroupMarker::Ungrouped,
            labels: LabelSet::new(),
            parent_id: None,
        }
    }

    /// Set the structural marker.
    pub fn with_marker(mut self, marker: GroupMarker) -> Self {
        self.marker = marker;
        self
    }

    /// Set the label set.
    pub fn with_labels(mut self, labels: LabelSet) -> Self {
        self.labels = labels;
        self
    }

    /// Set the lineage key.
    pub fn with_parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }
}
