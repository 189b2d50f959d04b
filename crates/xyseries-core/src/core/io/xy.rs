use super::traits::{ReadOptions, SeriesFile, WriteOptions};
use crate::core::error::SeriesError;
use crate::core::models::scalar::Scalar;
use crate::core::models::series::SeriesBuffer;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Number of pairs collected before they are appended to the buffer.
const CHUNK_PAIRS: usize = 1024;

/// Plain-text (X, Y) format: one pair per line, tab separated on write, any
/// whitespace accepted on read. No header, no length prefix.
pub struct XyFile;

impl SeriesFile for XyFile {
    fn read_from<T: Scalar>(
        reader: &mut impl BufRead,
        buffer: &mut SeriesBuffer<T>,
        options: &ReadOptions,
    ) -> Result<usize, SeriesError> {
        if !options.append {
            buffer.clear();
        }
        let limit = options.limit();
        let mut chunk_x: Vec<T> = Vec::with_capacity(CHUNK_PAIRS);
        let mut chunk_y: Vec<T> = Vec::with_capacity(CHUNK_PAIRS);
        let mut pending_x: Option<T> = None;
        let mut total = 0usize;

        'lines: for (line_num, line_res) in reader.lines().enumerate() {
            let line = match line_res {
                Ok(line) => line,
                Err(e) => {
                    warn!("Read error after {} pairs, stopping: {}", total, e);
                    break;
                }
            };
            for token in line.split_whitespace() {
                let Ok(value) = token.parse::<T>() else {
                    warn!(
                        "Unparseable token '{}' on line {}, stopping after {} pairs.",
                        token,
                        line_num + 1,
                        total
                    );
                    pending_x = None;
                    break 'lines;
                };
                match pending_x.take() {
                    None => pending_x = Some(value),
                    Some(x) => {
                        chunk_x.push(x);
                        chunk_y.push(value);
                        total += 1;
                        if chunk_x.len() == CHUNK_PAIRS {
                            buffer.append(&chunk_x, &chunk_y)?;
                            chunk_x.clear();
                            chunk_y.clear();
                        }
                        if total >= limit {
                            break 'lines;
                        }
                    }
                }
            }
        }

        if !chunk_x.is_empty() {
            buffer.append(&chunk_x, &chunk_y)?;
        }
        if pending_x.is_some() {
            warn!("Dropping trailing X value without a matching Y value.");
        }
        debug!("Read {} pairs (buffer length now {}).", total, buffer.len());
        Ok(total)
    }

    fn write_to<T: Scalar>(
        buffer: &SeriesBuffer<T>,
        writer: &mut impl Write,
        options: &WriteOptions,
    ) -> Result<usize, SeriesError> {
        let limit = if options.max_count == 0 {
            buffer.len()
        } else {
            options.max_count.min(buffer.len())
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);
        for point in buffer.iter().take(limit) {
            csv_writer
                .write_record([point.x.to_string(), point.y.to_string()])
                .map_err(io::Error::from)?;
        }
        csv_writer.flush()?;
        debug!("Wrote {} of {} pairs.", limit, buffer.len());
        Ok(limit)
    }
}

impl<T: Scalar> SeriesBuffer<T> {
    /// Writes up to `max_count` pairs (`0` = all) as `x<TAB>y` lines.
    ///
    /// The file is truncated unless `append` is set.
    pub fn write_to_file(
        &self,
        path: impl AsRef<Path>,
        append: bool,
        max_count: usize,
    ) -> Result<usize, SeriesError> {
        XyFile::write_to_path(self, path, &WriteOptions { append, max_count })
    }

    /// Reads whitespace-separated `x y` pairs, replacing the contents unless `append`
    /// is set. Reading stops at end of file, at the first unparseable token, or after
    /// `max_count` pairs (`0` = effectively unbounded).
    pub fn read_from_file(
        &mut self,
        path: impl AsRef<Path>,
        append: bool,
        max_count: usize,
    ) -> Result<usize, SeriesError> {
        XyFile::read_from_path(path, self, &ReadOptions { append, max_count })
    }
}
