use super::binning::BinningMode;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Number of bins must be at least 1")]
    InvalidBinCount,
}

/// Everything the histogram workflow needs to run.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub bins: usize,
    pub mode: BinningMode,
    /// Maximum number of bins written (`0` = all).
    pub max_write: usize,
}

#[derive(Default)]
pub struct HistogramConfigBuilder {
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    bins: Option<usize>,
    mode: Option<BinningMode>,
    max_write: Option<usize>,
}

impl HistogramConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_path(mut self, path: PathBuf) -> Self {
        self.input_path = Some(path);
        self
    }
    pub fn output_path(mut self, path: PathBuf) -> Self {
        self.output_path = Some(path);
        self
    }
    pub fn bins(mut self, bins: usize) -> Self {
        self.bins = Some(bins);
        self
    }
    pub fn mode(mut self, mode: BinningMode) -> Self {
        self.mode = Some(mode);
        self
    }
    pub fn max_write(mut self, max_write: usize) -> Self {
        self.max_write = Some(max_write);
        self
    }

    /// `mode` falls back to [`BinningMode::Offset`] and `max_write` to `0` (all bins).
    pub fn build(self) -> Result<HistogramConfig, ConfigError> {
        let bins = self.bins.ok_or(ConfigError::MissingParameter("bins"))?;
        if bins == 0 {
            return Err(ConfigError::InvalidBinCount);
        }
        Ok(HistogramConfig {
            input_path: self
                .input_path
                .ok_or(ConfigError::MissingParameter("input_path"))?,
            output_path: self
                .output_path
                .ok_or(ConfigError::MissingParameter("output_path"))?,
            bins,
            mode: self.mode.unwrap_or_default(),
            max_write: self.max_write.unwrap_or(0),
        })
    }
}
