//! Trait definitions for overlay rendering strategies.

use image::RgbImage;

use crate::model::BoundingBox;
use crate::overlay::draw::LabelFont;

/// Trait for box-overlay rendering strategies.
///
/// Each strategy consumes the extracted box sequence and a decoded image
/// and draws rectangles and labels according to its grouping policy. A
/// strategy makes a single deterministic pass in input order, so later
/// boxes draw on top of earlier ones; the box slice is never mutated, and
/// all color state lives and dies within one `render` call.
pub trait OverlayStrategy: Send + Sync {
    /// Unique identifier for this strategy (e.g., "parent-lineage").
    fn id(&self) -> &'static str;

    /// Caller-facing option number.
    fn option_number(&self) -> u8;

    /// Human-readable name for display.
    fn display_name(&self) -> &'static str;

    /// Whether this strategy resolves percentage coordinates by default.
    ///
    /// [`RenderOptions::normalize`] overrides this per call.
    fn normalizes_coordinates(&self) -> bool;

    /// Draw every applicable box onto `image`.
    fn render(
        &self,
        image: &mut RgbImage,
        boxes: &[BoundingBox],
        options: &RenderOptions,
    ) -> RenderResult;
}

/// Options for a rendering pass.
#[derive(Default)]
pub struct RenderOptions {
    /// Font for label text. Without one, geometry is still drawn and
    /// skipped texts are counted in [`RenderResult::labels_skipped`].
    pub font: Option<LabelFont>,

    /// Override the strategy's coordinate-normalization default.
    pub normalize: Option<bool>,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `font` for label text.
    pub fn font(mut self, font: LabelFont) -> Self {
        self.font = Some(font);
        self
    }

    /// Force coordinate normalization on or off for this pass.
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = Some(normalize);
        self
    }

    /// Effective normalization for a strategy with the given default.
    pub(crate) fn normalize_or(&self, default: bool) -> bool {
        self.normalize.unwrap_or(default)
    }
}

/// Result of a rendering pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderResult {
    /// Boxes drawn onto the image.
    pub boxes_drawn: usize,

    /// Boxes excluded by the strategy's grouping policy.
    pub boxes_skipped: usize,

    /// Label texts skipped because no font was supplied.
    pub labels_skipped: usize,
}

impl RenderResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }
}
