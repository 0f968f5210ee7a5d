//! Error types for overlay rendering.

use thiserror::Error;

/// Errors that can occur while setting up an overlay pass.
///
/// Rendering itself is infallible: strategies draw what they can and
/// report counts instead of failing.
#[derive(Error, Debug)]
pub enum OverlayError {
    /// Strategy selector matched no registered strategy
    #[error("Unknown strategy: {selector}")]
    UnknownStrategy {
        /// The selector that failed to resolve
        selector: String,
    },

    /// I/O error while reading a font file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Font data could not be parsed
    #[error("Invalid font: {0}")]
    InvalidFont(#[from] ab_glyph::InvalidFont),
}

impl OverlayError {
    /// Create an unknown strategy error.
    pub fn unknown_strategy(selector: impl Into<String>) -> Self {
        Self::UnknownStrategy {
            selector: selector.into(),
        }
    }
}
