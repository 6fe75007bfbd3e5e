use crate::composite::blit_over;
use crate::foundation::core::{Frame, FrameBatch, Rgba8Premul};
use crate::foundation::error::{AnnotileError, AnnotileResult};

/// Maximum number of batch inputs a single grid accepts.
pub const MAX_GRID_INPUTS: usize = 6;

/// Static configuration for [`tile`].
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct GridOptions {
    /// Column count; must be at least 1.
    #[serde(default = "default_columns")]
    pub columns: u32,
    /// Padding in pixels between and around cells.
    #[serde(default = "default_padding")]
    pub padding: u32,
    /// Canvas fill behind and between cells.
    #[serde(default = "default_background")]
    pub background: Rgba8Premul,
}

fn default_columns() -> u32 {
    2
}

fn default_padding() -> u32 {
    2
}

fn default_background() -> Rgba8Premul {
    Rgba8Premul::opaque(0, 0, 0)
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            padding: default_padding(),
            background: default_background(),
        }
    }
}

impl GridOptions {
    /// Options with the given layout scalars and the default background.
    pub fn new(columns: u32, padding: u32) -> Self {
        Self {
            columns,
            padding,
            ..Self::default()
        }
    }

    /// Validate options at the configuration boundary.
    pub fn validate(&self) -> AnnotileResult<()> {
        if self.columns < 1 {
            return Err(AnnotileError::config("grid columns must be >= 1"));
        }
        Ok(())
    }
}

/// Tile up to [`MAX_GRID_INPUTS`] optional frame batches into a batch of grid
/// canvases.
///
/// Absent and empty inputs are skipped (order preserved); with none left the
/// call fails with a config error. Every cell is sized to the maximum frame
/// width/height across all surviving batches; smaller frames are centered in
/// their cell over the configured background, never stretched.
///
/// Batches of differing length reconcile by frame index: the output batch is
/// as long as the longest input, and output frame `i` holds one cell per
/// input batch showing that batch's frame `i`, clamped to its last frame when
/// the batch is shorter. Cells fill row-major, and the canvas is always
/// `columns` cells wide with padding between and around cells; trailing cells
/// without an input stay background.
#[tracing::instrument(skip(inputs))]
pub fn tile(inputs: &[Option<&FrameBatch>], opts: &GridOptions) -> AnnotileResult<FrameBatch> {
    opts.validate()?;
    if inputs.len() > MAX_GRID_INPUTS {
        return Err(AnnotileError::config(format!(
            "grid accepts at most {MAX_GRID_INPUTS} inputs, got {}",
            inputs.len()
        )));
    }

    let batches: Vec<&FrameBatch> = inputs
        .iter()
        .filter_map(|b| *b)
        .filter(|b| !b.is_empty())
        .collect();
    if batches.is_empty() {
        return Err(AnnotileError::config("no grid inputs to tile"));
    }

    let mut cell_w = 0u32;
    let mut cell_h = 0u32;
    let mut out_len = 0usize;
    for batch in &batches {
        for frame in batch.iter() {
            cell_w = cell_w.max(frame.width());
            cell_h = cell_h.max(frame.height());
        }
        out_len = out_len.max(batch.len());
    }

    let cells = batches.len() as u32;
    let columns = opts.columns;
    let rows = cells.div_ceil(columns);
    let (canvas_w, canvas_h) = canvas_dimensions(columns, rows, cell_w, cell_h, opts.padding)?;
    tracing::debug!(
        cells,
        columns,
        rows,
        canvas_w,
        canvas_h,
        frames = out_len,
        "tiling grid"
    );

    let mut out = Vec::with_capacity(out_len);
    for i in 0..out_len {
        let mut canvas = Frame::solid(canvas_w, canvas_h, opts.background)?;
        for (slot, batch) in batches.iter().enumerate() {
            let frame = &batch.frames()[i.min(batch.len() - 1)];
            let row = slot as u32 / columns;
            let col = slot as u32 % columns;
            let cell_x = opts.padding + col * (cell_w + opts.padding);
            let cell_y = opts.padding + row * (cell_h + opts.padding);
            // Undersized frames center in their cell.
            let off_x = (cell_w - frame.width()) / 2;
            let off_y = (cell_h - frame.height()) / 2;
            blit_over(&mut canvas, frame, cell_x + off_x, cell_y + off_y)?;
        }
        out.push(canvas);
    }

    FrameBatch::new(out)
}

fn canvas_dimensions(
    columns: u32,
    rows: u32,
    cell_w: u32,
    cell_h: u32,
    padding: u32,
) -> AnnotileResult<(u32, u32)> {
    let dim = |cells: u32, cell: u32| -> Option<u32> {
        let span =
            u64::from(cells) * u64::from(cell) + (u64::from(cells) + 1) * u64::from(padding);
        u32::try_from(span).ok()
    };
    match (dim(columns, cell_w), dim(rows, cell_h)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(AnnotileError::render("grid canvas dimensions overflow u32")),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/compositor.rs"]
mod tests;
