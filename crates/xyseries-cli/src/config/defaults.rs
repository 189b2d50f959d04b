use xyseries::engine::binning::BinningMode;

pub struct DefaultsConfig {
    pub output: String,
    pub bins: usize,
    pub binning: BinningMode,
    pub max_entries: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output: "output.hist.dat".to_string(),
            bins: 2000,
            binning: BinningMode::Offset,
            max_entries: 0,
        }
    }
}
