use std::path::PathBuf;

use serde::Deserialize;

/// Output locations for persisted artifacts.
///
/// Passed explicitly into every persistence call; there is no process-wide
/// output path.
#[derive(Deserialize, Clone, Debug)]
pub struct OutputConfig {
    /// Directory that augmented feature tables are written to.
    pub dataset_dir: PathBuf,
    /// Directory that rendered figures are written to.
    pub figure_dir: PathBuf,
}

impl OutputConfig {
    pub fn new(dataset_dir: impl Into<PathBuf>, figure_dir: impl Into<PathBuf>) -> Self {
        Self {
            dataset_dir: dataset_dir.into(),
            figure_dir: figure_dir.into(),
        }
    }
}
