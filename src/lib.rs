//! Annotile is a set of image-annotation and layout utilities for node-based
//! image pipelines.
//!
//! Two stateless transformation cores, each a pure function from frames and
//! parameters to new frames:
//!
//! 1. **Label**: [`LabelCompositor`] renders a styled, optionally multi-line
//!    text block (background box, corner rounding, outline, opacity) onto a
//!    copy of every frame in a batch at a named anchor position.
//! 2. **Grid**: [`tile`] merges up to six frame batches into a batch of grid
//!    canvases with configurable columns and padding, reconciling uneven
//!    batch lengths and frame sizes.
//!
//! Around them sits the glue a host graph needs: [`FontLibrary`] as the
//! explicit font-resolver handle, the [`params`] JSON boundary for node
//! parameters, and [`report`] for run-overlay text.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: identical inputs produce byte-identical
//!   outputs; no clocks, no randomness, no internal concurrency.
//! - **No IO in renderers**: font loading is front-loaded in [`FontLibrary`].
//! - **Premultiplied RGBA8** end-to-end: host byte/float RGB converts at the
//!   [`Frame`] boundary and nowhere else.
//! - **Caller-owned inputs**: batches are taken by reference and never
//!   mutated; outputs are freshly allocated.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod composite;
mod fonts;
mod foundation;
mod grid;
mod label;

/// JSON parameter boundary for the host graph.
pub mod params;
/// Overlay-text formatting for generation runs.
pub mod report;

pub use composite::{PremulRgba8, blit_over, over, over_in_place};
pub use fonts::library::{FontLibrary, LoadedFont};
pub use fonts::shape::{TextBrushRgba8, TextExtent, TextShaper, measure_block};
pub use foundation::core::{Frame, FrameBatch, Rgba8Premul};
pub use foundation::error::{AnnotileError, AnnotileResult};
pub use grid::compositor::{GridOptions, MAX_GRID_INPUTS, tile};
pub use label::anchor::{BlockBox, resolve_block_origin};
pub use label::compositor::LabelCompositor;
pub use label::style::{ColorScheme, HorizontalAlign, LabelStyle, Placement};
pub use report::{SamplerSummary, append_elapsed, format_elapsed};
