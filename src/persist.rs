//! Dataset persistence.

use std::fs::File;
use std::path::Path;

use log::info;
use polars::prelude::{CsvWriter, DataFrame, SerWriter};

use crate::errors::Result;

/// Receives augmented feature tables from workflows.
pub trait DatasetSink {
    /// Persists `df` under `name` inside `dir`.
    fn save_data(&self, df: &mut DataFrame, name: &str, dir: &Path) -> Result<()>;
}

/// Sink that writes `<dir>/<name>.csv`, creating the directory if needed.
pub struct CsvSink;

impl DatasetSink for CsvSink {
    fn save_data(&self, df: &mut DataFrame, name: &str, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("{name}.csv"));
        let mut file = File::create(&path)?;
        CsvWriter::new(&mut file).has_header(true).finish(df)?;
        info!("dataset `{name}` saved to {}", path.display());
        Ok(())
    }
}
