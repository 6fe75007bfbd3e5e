//! JSON parameter boundary for the host graph.
//!
//! The host supplies node parameters as JSON objects; these helpers turn them
//! into validated, closed configuration types so malformed input fails here
//! rather than mid-render.

use crate::foundation::error::{AnnotileError, AnnotileResult};
use crate::grid::compositor::GridOptions;
use crate::label::style::LabelStyle;

/// Deserialize and validate a [`LabelStyle`] from host-supplied JSON.
///
/// Missing fields take the node defaults; unknown enum strings (alignment,
/// placement, color scheme) are config errors.
pub fn label_style_from_value(value: serde_json::Value) -> AnnotileResult<LabelStyle> {
    let style: LabelStyle = serde_json::from_value(value)
        .map_err(|e| AnnotileError::config(format!("invalid label style params: {e}")))?;
    style.validate()?;
    Ok(style)
}

/// Deserialize and validate [`GridOptions`] from host-supplied JSON.
pub fn grid_options_from_value(value: serde_json::Value) -> AnnotileResult<GridOptions> {
    let opts: GridOptions = serde_json::from_value(value)
        .map_err(|e| AnnotileError::config(format!("invalid grid params: {e}")))?;
    opts.validate()?;
    Ok(opts)
}
