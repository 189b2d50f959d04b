use super::binning::BinningError;
use super::config::ConfigError;
use crate::core::error::SeriesError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Cannot read '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid sample '{token}' on line {line}")]
    Parse { line: usize, token: String },

    #[error("Input contains no samples")]
    EmptySampleSet,

    #[error("Wrong max/min values (min: {min}, max: {max}); the sample range is degenerate")]
    DegenerateRange { min: f64, max: f64 },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Binning failed: {0}")]
    Binning(#[from] BinningError),

    #[error(transparent)]
    Series(#[from] SeriesError),
}
