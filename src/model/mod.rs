//! Core data model for annotated regions.

mod bbox;
mod label;

pub use bbox::{BoundingBox, GroupMarker};
pub use label::LabelSet;
