use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use xyseries::engine::binning::BinningMode;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileHistogramConfig {
    pub bins: Option<usize>,
    pub output: Option<PathBuf>,
    pub binning: Option<BinningMode>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileOutputConfig {
    pub max_entries: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub histogram: Option<FileHistogramConfig>,
    pub output: Option<FileOutputConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parses_all_sections() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("xyhist.toml");
        fs::write(
            &path,
            r#"
            [histogram]
            bins = 500
            output = "spectrum.dat"
            binning = "legacy"

            [output]
            max-entries = 10
            "#,
        )
        .unwrap();

        let config = FileConfig::from_file(&path).unwrap();
        let histogram = config.histogram.unwrap();
        assert_eq!(histogram.bins, Some(500));
        assert_eq!(histogram.output, Some(PathBuf::from("spectrum.dat")));
        assert_eq!(histogram.binning, Some(BinningMode::Legacy));
        assert_eq!(config.output.unwrap().max_entries, Some(10));
    }

    #[test]
    fn rejects_unknown_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("xyhist.toml");
        fs::write(&path, "[histogram]\nbin-count = 3\n").unwrap();
        assert!(matches!(
            FileConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            FileConfig::from_file(&dir.path().join("absent.toml")),
            Err(CliError::Io(_))
        ));
    }
}
