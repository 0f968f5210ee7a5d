//! Box overlay rendering.
//!
//! This module draws extracted bounding boxes onto a decoded image. The
//! system is trait-based: each grouping policy implements the
//! `OverlayStrategy` trait and is discovered through the
//! `StrategyRegistry`.
//!
//! ## Built-in strategies
//!
//! - **parent-lineage** (option 1): one random color per `parent_id`
//! - **group-type** (option 2): fixed palette by group-type label
//! - **pattern-lineage** (option 3): subgroup boxes only, one random
//!   color per pattern id
//!
//! ## Usage
//!
//! ```rust,ignore
//! use annoview::overlay::{RenderOptions, StrategyRegistry};
//!
//! let registry = StrategyRegistry::new();
//! let strategy = registry.select("2")?;
//! let result = strategy.render(&mut image, &boxes, &RenderOptions::new());
//! ```

mod color;
mod coords;
mod draw;
mod error;
mod registry;
pub mod strategies;
mod traits;

pub use color::{ColorAssignment, allocate_color};
pub use coords::{PixelRect, placement, raw_rect, resolve_component, resolved_rect};
pub use draw::{
    BOX_THICKNESS, LABEL_OFFSET, LABEL_SCALE, LabelFont, TITLE_COLOR, TITLE_LABEL, TITLE_OFFSET,
    draw_box_outline, draw_label, draw_title_overlay,
};
pub use error::OverlayError;
pub use registry::StrategyRegistry;
pub use traits::{OverlayStrategy, RenderOptions, RenderResult};
