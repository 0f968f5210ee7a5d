//! Error types for annotation document parsing.

use thiserror::Error;

/// Errors that can occur while parsing an annotation document.
///
/// In the default lenient mode only document-level failures surface as
/// errors; per-entry problems become warnings (see
/// `format::labelstudio`). Strict extraction promotes per-entry problems
/// to `MissingField` / `InvalidGeometry` / `InvalidFormat`.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error while reading a document from disk
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Required field is missing from a retained result entry
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the missing field
        field: String,
    },

    /// Geometry values that cannot describe a region
    #[error("Invalid geometry: {message}")]
    InvalidGeometry {
        /// Description of the geometry error
        message: String,
    },

    /// Invalid structure or content in a result entry
    #[error("Invalid format: {message}")]
    InvalidFormat {
        /// Description of the format error
        message: String,
    },
}

impl FormatError {
    /// Create a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid geometry error.
    pub fn invalid_geometry(message: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            message: message.into(),
        }
    }

    /// Create an invalid format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }
}
