//! Annotation document import.
//!
//! This module converts raw review-export JSON into the normalized box
//! records consumed by the overlay strategies. Parsing is lenient by
//! default: retained entries with malformed geometry are skipped with a
//! warning rather than aborting the whole document (strict mode is
//! available for callers that prefer hard failures).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use annoview::format::extract_boxes;
//!
//! let extraction = extract_boxes(&json_text)?;
//! for warning in &extraction.warnings {
//!     eprintln!("skipped entry: {}", warning.message);
//! }
//! render(&extraction.boxes);
//! ```

mod error;
mod labelstudio;

pub use error::FormatError;
pub use labelstudio::{
    ExtractOptions, Extraction, FormatWarning, RETAINED_SOURCES, extract_boxes,
    extract_boxes_from_file, extract_boxes_with,
};
