//! Fixed-width binning of scalar samples.
//!
//! [`BinLayout`] maps a sample to a bin index for a given range and bin count, in
//! either the offset-corrected or the legacy convention (see [`BinningMode`]).
//! [`FixedHistogram`] is an accumulating spectrum over a fixed `[min, max]` range with
//! under/overflow tallies, bin-centre statistics and text output.

use crate::core::models::series::SeriesBuffer;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum BinningError {
    #[error("Bin count must be at least 1")]
    InvalidBinCount,

    #[error("Range [{min}, {max}] is empty or not finite")]
    DegenerateRange { min: f64, max: f64 },

    #[error("Histogram has no entries")]
    NoEntries,

    #[error("Cannot write histogram to '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Convention used to turn a sample into a bin index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BinningMode {
    /// Bins start at the range minimum: index `floor((v - min) / step)`, upper edges
    /// `min + (i + 1) * step`. The range maximum falls into the last bin.
    #[default]
    Offset,
    /// Bins start at zero regardless of the range: index `floor(v / step)`, upper edges
    /// `(i + 1) * step`. Samples whose index falls outside the bins are not counted.
    Legacy,
}

impl std::str::FromStr for BinningMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "offset" => Ok(Self::Offset),
            "legacy" => Ok(Self::Legacy),
            other => Err(format!(
                "unknown binning mode '{}', expected 'offset' or 'legacy'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinLayout {
    min: f64,
    max: f64,
    step: f64,
    bins: usize,
    mode: BinningMode,
}

impl BinLayout {
    pub fn new(min: f64, max: f64, bins: usize, mode: BinningMode) -> Result<Self, BinningError> {
        if bins == 0 {
            return Err(BinningError::InvalidBinCount);
        }
        if !min.is_finite() || !max.is_finite() || max <= min {
            return Err(BinningError::DegenerateRange { min, max });
        }
        Ok(Self {
            min,
            max,
            step: (max - min) / bins as f64,
            bins,
            mode,
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    pub fn mode(&self) -> BinningMode {
        self.mode
    }

    pub fn upper_edge(&self, index: usize) -> f64 {
        let edge = (index + 1) as f64 * self.step;
        match self.mode {
            BinningMode::Offset => self.min + edge,
            BinningMode::Legacy => edge,
        }
    }

    pub fn center(&self, index: usize) -> f64 {
        self.upper_edge(index) - 0.5 * self.step
    }

    /// Bin receiving `value`, or `None` when the value is not counted.
    pub fn index_of(&self, value: f64) -> Option<usize> {
        let scaled = match self.mode {
            BinningMode::Offset => {
                if !(self.min..=self.max).contains(&value) {
                    return None;
                }
                (value - self.min) / self.step
            }
            BinningMode::Legacy => value / self.step,
        };
        if !(scaled >= 0.0) || !scaled.is_finite() {
            return None;
        }
        let index = scaled.floor() as usize;
        match self.mode {
            BinningMode::Offset => Some(index.min(self.bins - 1)),
            BinningMode::Legacy => (index < self.bins).then_some(index),
        }
    }
}

/// Accumulating histogram over a fixed range.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedHistogram {
    layout: BinLayout,
    counts: Vec<u64>,
    underflow: u64,
    overflow: u64,
}

impl FixedHistogram {
    /// Creates an empty histogram; inverted bounds are swapped.
    pub fn new(min: f64, max: f64, bins: usize) -> Result<Self, BinningError> {
        let (min, max) = if max < min { (max, min) } else { (min, max) };
        let layout = BinLayout::new(min, max, bins, BinningMode::Offset)?;
        Ok(Self {
            layout,
            counts: vec![0; bins],
            underflow: 0,
            overflow: 0,
        })
    }

    pub fn layout(&self) -> &BinLayout {
        &self.layout
    }

    /// Counts `value`; values outside `[min, max]` go to the under/overflow tallies.
    pub fn fill(&mut self, value: f64) {
        match self.layout.index_of(value) {
            Some(index) => self.counts[index] += 1,
            None if value < self.layout.min => self.underflow += 1,
            None => self.overflow += 1,
        }
    }

    pub fn clear(&mut self) {
        self.counts.iter_mut().for_each(|c| *c = 0);
        self.underflow = 0;
        self.overflow = 0;
    }

    pub fn bins(&self) -> usize {
        self.layout.bins
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn underflow(&self) -> u64 {
        self.underflow
    }

    /// Values above the range, including `NaN`.
    pub fn overflow(&self) -> u64 {
        self.overflow
    }

    /// Total of the in-range counts.
    pub fn entries(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn bin_center(&self, index: usize) -> f64 {
        self.layout.center(index)
    }

    pub fn bin_upper_edge(&self, index: usize) -> f64 {
        self.layout.upper_edge(index)
    }

    /// Count-weighted mean and RMS spread of the bin centres.
    pub fn statistics(&self) -> Result<(f64, f64), BinningError> {
        let mut n = 0.0;
        let mut sx = 0.0;
        let mut sx2 = 0.0;
        for (i, &count) in self.counts.iter().enumerate() {
            let c = count as f64;
            let x = self.bin_center(i);
            n += c;
            sx += c * x;
            sx2 += c * x * x;
        }
        if n == 0.0 {
            return Err(BinningError::NoEntries);
        }
        let mean = sx / n;
        let rms = (sx2 / n - mean * mean).max(0.0).sqrt();
        Ok((mean, rms))
    }

    /// Writes `banner` followed by one `centre<TAB>count` line per bin.
    pub fn write_to(&self, writer: &mut impl Write, banner: &str) -> io::Result<()> {
        writeln!(writer, "{}", banner)?;
        for (i, count) in self.counts.iter().enumerate() {
            writeln!(writer, "{}\t{}", self.bin_center(i), count)?;
        }
        Ok(())
    }

    /// Writes `centre<TAB>count` lines for the non-empty bins only.
    pub fn write_nonzero_to(&self, writer: &mut impl Write) -> io::Result<()> {
        for (i, count) in self.counts.iter().enumerate().filter(|(_, c)| **c > 0) {
            writeln!(writer, "{}\t{}", self.bin_center(i), count)?;
        }
        Ok(())
    }

    /// Saves the full histogram to `path` and the non-empty bins to `path` + `.dat`.
    pub fn save(&self, path: &Path, banner: &str) -> Result<(), BinningError> {
        let mut dat_name = path.as_os_str().to_owned();
        dat_name.push(".dat");
        let dat_path = PathBuf::from(dat_name);

        write_file(path, |w| self.write_to(w, banner))?;
        write_file(&dat_path, |w| self.write_nonzero_to(w))?;
        debug!("Saved histogram to {:?} and {:?}", path, dat_path);
        Ok(())
    }

    /// Bin centres in X, counts in Y.
    pub fn to_series(&self) -> SeriesBuffer<f64> {
        let x: Vec<f64> = (0..self.bins()).map(|i| self.bin_center(i)).collect();
        let y: Vec<f64> = self.counts.iter().map(|&c| c as f64).collect();
        SeriesBuffer::from_xy(x, y)
    }
}

fn write_file(
    path: &Path,
    body: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>,
) -> Result<(), BinningError> {
    let to_err = |source: io::Error| BinningError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(to_err)?);
    body(&mut writer).map_err(to_err)?;
    writer.flush().map_err(to_err)
}
