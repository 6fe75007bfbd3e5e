//! Text-label compositing: style model, anchor resolution, rendering.

pub mod anchor;
pub mod compositor;
pub mod style;
