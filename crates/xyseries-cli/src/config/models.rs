use std::path::PathBuf;
use xyseries::engine::config::HistogramConfig;

pub struct AppConfig {
    /// Configuration file the values were read from, if any.
    pub source: Option<PathBuf>,
    pub core_config: HistogramConfig,
}
