use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::Cli;
use crate::error::{CliError, Result};
use std::path::PathBuf;
use xyseries::engine::binning::BinningMode;
use xyseries::engine::config::HistogramConfigBuilder;

/// Merges built-in defaults, the config file, `--set` overrides and the command line,
/// in increasing order of precedence.
pub fn build_config(cli: &Cli) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let input_path = cli
        .input
        .clone()
        .ok_or_else(|| CliError::Argument("No input file given".to_string()))?;

    let file_config = if let Some(config_path) = &cli.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &cli.set_values)?;

    let hist_file = file_config.histogram.take().unwrap_or_default();
    let output_file = file_config.output.take().unwrap_or_default();

    let output_path = cli
        .output
        .clone()
        .or(hist_file.output)
        .unwrap_or_else(|| PathBuf::from(&defaults.output));
    let bins = cli.bins.or(hist_file.bins).unwrap_or(defaults.bins);
    let mode = if cli.legacy_binning {
        BinningMode::Legacy
    } else {
        hist_file.binning.unwrap_or(defaults.binning)
    };
    let max_write = output_file.max_entries.unwrap_or(defaults.max_entries);

    let core_config = HistogramConfigBuilder::new()
        .input_path(input_path)
        .output_path(output_path)
        .bins(bins)
        .mode(mode)
        .max_write(max_write)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        source: cli.config.clone(),
        core_config,
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "histogram.bins" => {
                config
                    .histogram
                    .get_or_insert_with(Default::default)
                    .bins = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid integer value for {}: {}", key, value_str))
                })?);
            }
            "histogram.output" => {
                config
                    .histogram
                    .get_or_insert_with(Default::default)
                    .output = Some(PathBuf::from(value_str));
            }
            "histogram.binning" => {
                config
                    .histogram
                    .get_or_insert_with(Default::default)
                    .binning = Some(value_str.parse().map_err(|e: String| {
                    CliError::Config(format!("Invalid value for {}: {}", key, e))
                })?);
            }
            "output.max-entries" => {
                config
                    .output
                    .get_or_insert_with(Default::default)
                    .max_entries = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid integer value for {}: {}", key, value_str))
                })?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
