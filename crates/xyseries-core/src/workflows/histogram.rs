use crate::core::models::series::SeriesBuffer;
use crate::engine::binning::{BinLayout, BinningMode};
use crate::engine::config::HistogramConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Number of samples between two progress updates.
const PROGRESS_STRIDE: u64 = 4096;

pub const PHASE_SCAN: &str = "Scanning samples";
pub const PHASE_BIN: &str = "Binning samples";
pub const PHASE_WRITE: &str = "Writing histogram";

/// Phases reported by [`run`], in order.
pub const PHASES: [&str; 3] = [PHASE_SCAN, PHASE_BIN, PHASE_WRITE];

/// What a histogram run read, computed and wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramReport {
    pub samples: usize,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub bins: usize,
    pub mode: BinningMode,
    /// Samples that did not fall into any bin.
    pub skipped: usize,
    /// Number of (edge, count) lines written.
    pub written: usize,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, Copy)]
struct SampleRange {
    count: usize,
    min: f64,
    max: f64,
}

/// Bins the samples of `config.input_path` and writes the histogram to
/// `config.output_path`.
///
/// The input is streamed twice: once to find the sample range and once to count the
/// samples per bin, so memory use depends only on the number of bins. The output holds
/// one `upper_edge<TAB>count` line per bin.
///
/// # Errors
///
/// - [`EngineError::Io`] if the input cannot be opened or read.
/// - [`EngineError::Parse`] for a token that is not a number.
/// - [`EngineError::EmptySampleSet`] if the input holds no samples.
/// - [`EngineError::DegenerateRange`] if the maximum does not exceed the minimum.
/// - [`EngineError::Series`] if the output cannot be written.
#[instrument(skip_all, name = "histogram_workflow", fields(input = %config.input_path.display()))]
pub fn run(
    config: &HistogramConfig,
    reporter: &ProgressReporter,
) -> Result<HistogramReport, EngineError> {
    // === Phase 1: Sample range ===
    reporter.report(Progress::PhaseStart { name: PHASE_SCAN });
    let range = scan_range(&config.input_path)?;
    reporter.report(Progress::PhaseFinish);
    info!(
        "Read {} samples (min: {}, max: {}).",
        range.count, range.min, range.max
    );

    if range.count == 0 {
        return Err(EngineError::EmptySampleSet);
    }
    if !(range.max > range.min) || !range.min.is_finite() || !range.max.is_finite() {
        return Err(EngineError::DegenerateRange {
            min: range.min,
            max: range.max,
        });
    }
    let layout = BinLayout::new(range.min, range.max, config.bins, config.mode)?;
    debug!(
        "Using {} bins of width {} ({:?} binning).",
        layout.bins(),
        layout.step(),
        layout.mode()
    );

    // === Phase 2: Binning ===
    reporter.report(Progress::PhaseStart { name: PHASE_BIN });
    reporter.report(Progress::TaskStart {
        total_steps: range.count as u64,
    });
    let mut counts = vec![0u64; layout.bins()];
    let mut skipped = 0usize;
    let mut seen = 0u64;
    for_each_sample(&config.input_path, |value| {
        match layout.index_of(value) {
            Some(index) => counts[index] += 1,
            None => skipped += 1,
        }
        seen += 1;
        if seen % PROGRESS_STRIDE == 0 {
            reporter.report(Progress::TaskAdvance {
                steps: PROGRESS_STRIDE,
            });
        }
    })?;
    let remainder = seen % PROGRESS_STRIDE;
    if remainder > 0 {
        reporter.report(Progress::TaskAdvance { steps: remainder });
    }
    reporter.report(Progress::TaskFinish);
    if skipped > 0 {
        warn!("{} samples fell outside the bins and were not counted.", skipped);
        reporter.report(Progress::Message(format!(
            "{} of {} samples fell outside the bins",
            skipped, range.count
        )));
    }
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Output ===
    reporter.report(Progress::PhaseStart { name: PHASE_WRITE });
    let edges: Vec<f64> = (0..layout.bins()).map(|i| layout.upper_edge(i)).collect();
    let values: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
    let histogram = SeriesBuffer::from_xy(edges, values);
    let written = histogram.write_to_file(&config.output_path, false, config.max_write)?;
    reporter.report(Progress::PhaseFinish);
    info!(
        "Wrote {} bins to '{}'.",
        written,
        config.output_path.display()
    );

    Ok(HistogramReport {
        samples: range.count,
        min: range.min,
        max: range.max,
        step: layout.step(),
        bins: layout.bins(),
        mode: layout.mode(),
        skipped,
        written,
        output_path: config.output_path.clone(),
    })
}

fn scan_range(path: &Path) -> Result<SampleRange, EngineError> {
    let mut range = SampleRange {
        count: 0,
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };
    for_each_sample(path, |value| {
        range.count += 1;
        range.min = range.min.min(value);
        range.max = range.max.max(value);
    })?;
    Ok(range)
}

/// Feeds every whitespace-separated number of the file at `path` to `visit`.
fn for_each_sample(path: &Path, mut visit: impl FnMut(f64)) -> Result<(), EngineError> {
    let io_err = |source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    };
    let reader = BufReader::new(File::open(path).map_err(io_err)?);
    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(io_err)?;
        for token in line.split_whitespace() {
            let value = token.parse::<f64>().map_err(|_| EngineError::Parse {
                line: line_num + 1,
                token: token.to_string(),
            })?;
            visit(value);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::HistogramConfigBuilder;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::{TempDir, tempdir};

    fn setup(content: &str, bins: usize, mode: BinningMode) -> (TempDir, HistogramConfig) {
        let dir = tempdir().unwrap();
        let input = dir.path().join("samples.dat");
        fs::write(&input, content).unwrap();
        let config = HistogramConfigBuilder::new()
            .input_path(input)
            .output_path(dir.path().join("out.hist.dat"))
            .bins(bins)
            .mode(mode)
            .build()
            .unwrap();
        (dir, config)
    }

    fn read_counts(path: &Path) -> Vec<f64> {
        let mut buffer = SeriesBuffer::<f64>::new();
        buffer.read_from_file(path, false, 0).unwrap();
        buffer.y_values().to_vec()
    }

    #[test]
    fn bins_every_sample_with_offset_binning() {
        let (_dir, config) = setup("1\n2\n2\n3\n3\n3\n", 3, BinningMode::Offset);
        let report = run(&config, &ProgressReporter::new()).unwrap();

        assert_eq!(report.samples, 6);
        assert_eq!(report.min, 1.0);
        assert_eq!(report.max, 3.0);
        assert_eq!(report.skipped, 0);
        assert_eq!(report.written, 3);
        assert_eq!(read_counts(&config.output_path), vec![1.0, 2.0, 3.0]);

        let content = fs::read_to_string(&config.output_path).unwrap();
        assert_eq!(content.lines().count(), 3);
        let last_edge: f64 = content.lines().last().unwrap().split('\t').next().unwrap().parse().unwrap();
        assert!((last_edge - 3.0).abs() < 1e-12);
    }

    #[test]
    fn legacy_binning_drops_samples_outside_the_bins() {
        let (_dir, config) = setup("1 2 2 3 3 3", 3, BinningMode::Legacy);
        let report = run(&config, &ProgressReporter::new()).unwrap();

        assert_eq!(report.skipped, 5);
        assert_eq!(read_counts(&config.output_path), vec![0.0, 1.0, 0.0]);
        let content = fs::read_to_string(&config.output_path).unwrap();
        let first_edge: f64 = content.lines().next().unwrap().split('\t').next().unwrap().parse().unwrap();
        assert!((first_edge - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn write_limit_truncates_output() {
        let (_dir, mut config) = setup("0 1 2 3 4 5 6 7 8 9", 5, BinningMode::Offset);
        config.max_write = 2;
        let report = run(&config, &ProgressReporter::new()).unwrap();
        assert_eq!(report.written, 2);
        assert_eq!(read_counts(&config.output_path), vec![2.0, 2.0]);
    }

    #[test]
    fn reports_progress_for_every_sample() {
        let content: String = (0..10_000).map(|i| format!("{}\n", i)).collect();
        let (_dir, config) = setup(&content, 10, BinningMode::Offset);
        let advanced = Mutex::new(0u64);
        let phases = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| match event {
            Progress::TaskAdvance { steps } => *advanced.lock().unwrap() += steps,
            Progress::PhaseStart { name } => phases.lock().unwrap().push(name),
            _ => {}
        }));

        run(&config, &reporter).unwrap();
        assert_eq!(*advanced.lock().unwrap(), 10_000);
        assert_eq!(*phases.lock().unwrap(), PHASES.to_vec());
    }

    #[test]
    fn announces_skipped_samples() {
        let messages = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::Message(text) = event {
                messages.lock().unwrap().push(text);
            }
        }));

        let (_dir, config) = setup("1 2 2 3 3 3", 3, BinningMode::Legacy);
        run(&config, &reporter).unwrap();
        let (_dir, config) = setup("1 2 2 3 3 3", 3, BinningMode::Offset);
        run(&config, &reporter).unwrap();

        assert_eq!(
            *messages.lock().unwrap(),
            vec!["5 of 6 samples fell outside the bins".to_string()]
        );
    }

    #[test]
    fn rejects_unparseable_samples() {
        let (_dir, config) = setup("1.0 2.0\n3.0 abc\n", 4, BinningMode::Offset);
        let result = run(&config, &ProgressReporter::new());
        assert!(matches!(
            result,
            Err(EngineError::Parse { line: 2, ref token }) if token == "abc"
        ));
        assert!(!config.output_path.exists());
    }

    #[test]
    fn rejects_empty_input() {
        let (_dir, config) = setup("  \n\n", 4, BinningMode::Offset);
        assert!(matches!(
            run(&config, &ProgressReporter::new()),
            Err(EngineError::EmptySampleSet)
        ));
    }

    #[test]
    fn rejects_degenerate_range() {
        let (_dir, config) = setup("5 5 5", 4, BinningMode::Offset);
        assert!(matches!(
            run(&config, &ProgressReporter::new()),
            Err(EngineError::DegenerateRange { min, max }) if min == 5.0 && max == 5.0
        ));
        assert!(!config.output_path.exists());
    }

    #[test]
    fn rejects_missing_input() {
        let (dir, mut config) = setup("1 2", 4, BinningMode::Offset);
        config.input_path = dir.path().join("missing.dat");
        assert!(matches!(
            run(&config, &ProgressReporter::new()),
            Err(EngineError::Io { .. })
        ));
    }

    #[test]
    fn fails_when_output_cannot_be_written() {
        let (dir, mut config) = setup("1 2", 4, BinningMode::Offset);
        config.output_path = dir.path().join("no/such/dir/out.dat");
        assert!(matches!(
            run(&config, &ProgressReporter::new()),
            Err(EngineError::Series(_))
        ));
    }
}
