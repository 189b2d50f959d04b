use crate::core::error::SeriesError;
use crate::core::models::scalar::Scalar;
use crate::core::models::series::SeriesBuffer;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Default ceiling on the number of pairs read when no limit is requested.
pub const MAX_READ_PAIRS: usize = 1 << 28;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Keep the existing buffer contents and append the file's pairs after them.
    pub append: bool,
    /// Maximum number of pairs to read; `0` means [`MAX_READ_PAIRS`].
    pub max_count: usize,
}

impl ReadOptions {
    pub fn limit(&self) -> usize {
        if self.max_count == 0 {
            MAX_READ_PAIRS
        } else {
            self.max_count
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Append to the target file instead of truncating it.
    pub append: bool,
    /// Maximum number of pairs to write; `0` writes every pair.
    pub max_count: usize,
}

/// Defines the interface for reading and writing series file formats.
///
/// Implementors handle format-specific parsing and serialization against generic
/// readers and writers; the path-based methods take care of opening files and of
/// attaching the path to any I/O error.
pub trait SeriesFile {
    /// Reads pairs from a buffered reader into `buffer`.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    /// * `buffer` - The buffer receiving the pairs.
    /// * `options` - Append mode and read limit.
    ///
    /// # Return
    ///
    /// Returns the number of pairs read.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer cannot be updated.
    fn read_from<T: Scalar>(
        reader: &mut impl BufRead,
        buffer: &mut SeriesBuffer<T>,
        options: &ReadOptions,
    ) -> Result<usize, SeriesError>;

    /// Writes the pairs of `buffer` to a writer.
    ///
    /// # Arguments
    ///
    /// * `buffer` - The buffer to serialize.
    /// * `writer` - The writer to output to.
    /// * `options` - Write limit (`append` is only meaningful for paths).
    ///
    /// # Return
    ///
    /// Returns the number of pairs written.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to<T: Scalar>(
        buffer: &SeriesBuffer<T>,
        writer: &mut impl Write,
        options: &WriteOptions,
    ) -> Result<usize, SeriesError>;

    /// Reads pairs from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::Io`] if the file cannot be opened; the buffer is left
    /// untouched in that case.
    fn read_from_path<T: Scalar, P: AsRef<Path>>(
        path: P,
        buffer: &mut SeriesBuffer<T>,
        options: &ReadOptions,
    ) -> Result<usize, SeriesError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| SeriesError::io(path, e))?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader, buffer, options).map_err(|e| e.at_path(path))
    }

    /// Writes pairs to a file path, truncating or appending per `options`.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::Io`] if the file cannot be opened or written.
    fn write_to_path<T: Scalar, P: AsRef<Path>>(
        buffer: &SeriesBuffer<T>,
        path: P,
        options: &WriteOptions,
    ) -> Result<usize, SeriesError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(options.append)
            .truncate(!options.append)
            .open(path)
            .map_err(|e| SeriesError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        let written = Self::write_to(buffer, &mut writer, options).map_err(|e| e.at_path(path))?;
        writer.flush().map_err(|e| SeriesError::io(path, e))?;
        Ok(written)
    }
}
