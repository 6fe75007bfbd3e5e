//! Image-grid compositing: tile frame batches into comparison canvases.

pub mod compositor;
