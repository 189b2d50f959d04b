use clap::Parser;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    name = "xyhist",
    author = "The xyseries developers",
    version,
    about = "xyhist - Bins a file of whitespace-separated numeric samples into an equal-width histogram.",
    after_help = "Example: xyhist file1.dat file1_histo.dat 2000",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// File of whitespace-separated numeric samples.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Histogram output file [default: output.hist.dat]
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Number of bins [default: 2000]
    #[arg(value_name = "N_BINS")]
    pub bins: Option<usize>,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output and the progress display
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Bin by `floor(value / step)` without subtracting the minimum, dropping samples
    /// outside the bins.
    #[arg(long)]
    pub legacy_binning: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S histogram.bins=500
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}
