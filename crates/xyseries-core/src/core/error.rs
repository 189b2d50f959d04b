use crate::core::models::series::Axis;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("No input values were supplied")]
    EmptyInput,

    #[error("The series buffer is empty")]
    EmptyBuffer,

    #[error("Index {index} is out of bounds for a series of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("No entry with {axis} = {value} was found")]
    NotFound { axis: Axis, value: f64 },

    #[error("Resolved index range {start}..={end} is inverted")]
    InvertedRange { start: usize, end: usize },

    #[error("Histogram grouping stopped after {limit} distinct values")]
    GroupingLimit { limit: usize },

    #[error("Invalid tolerance (abs: {abs_epsilon}, rel: {rel_epsilon}); epsilons must be finite and non-negative, and rel below 0.5")]
    InvalidTolerance { abs_epsilon: f64, rel_epsilon: f64 },

    #[error("I/O error: {0}")]
    Stream(#[from] std::io::Error),

    #[error("File I/O error for '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SeriesError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Attaches `path` to a bare stream error.
    pub(crate) fn at_path(self, path: &std::path::Path) -> Self {
        match self {
            Self::Stream(source) => Self::io(path, source),
            other => other,
        }
    }
}
