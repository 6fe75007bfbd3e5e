/// Crate-wide result alias.
pub type AnnotileResult<T> = Result<T, AnnotileError>;

/// Error taxonomy for annotation calls.
///
/// Degraded font resolution is intentionally absent: an unknown font family
/// falls back to the library default with a warning and never fails a call.
#[derive(thiserror::Error, Debug)]
pub enum AnnotileError {
    /// Invalid static configuration (bad style/grid parameters, no usable
    /// grid inputs). Fatal to the call, never retried.
    #[error("config error: {0}")]
    Config(String),

    /// Internal render failure (buffer mismatch, canvas size over limits).
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped failure from an IO/decoding boundary.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AnnotileError {
    /// Build a [`AnnotileError::Config`] from any message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`AnnotileError::Render`] from any message.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}
