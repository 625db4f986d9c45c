//! CSV Data Writer Module
//! Persists the train/test partitions under `<output_dir>/raw/`.

use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::TrainTestSplit;

pub const RAW_SUBDIR: &str = "raw";
pub const TRAIN_FILE: &str = "train.csv";
pub const TEST_FILE: &str = "test.csv";

#[derive(Error, Debug)]
pub enum WriterError {
    #[error("Cannot write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
}

/// Writes both partitions as headered CSV without a row-index column.
pub struct DataWriter;

impl DataWriter {
    /// Create `<output_dir>/raw` if needed and (over)write `train.csv` and `test.csv`.
    ///
    /// Returns the `raw` directory.
    pub fn save(split: &mut TrainTestSplit, output_dir: &Path) -> Result<PathBuf, WriterError> {
        let raw_dir = output_dir.join(RAW_SUBDIR);
        fs::create_dir_all(&raw_dir).map_err(|source| WriterError::Io {
            path: raw_dir.clone(),
            source,
        })?;

        Self::write_csv(&mut split.train, &raw_dir.join(TRAIN_FILE))?;
        Self::write_csv(&mut split.test, &raw_dir.join(TEST_FILE))?;

        tracing::debug!("Train and Test data saved to {}", raw_dir.display());
        Ok(raw_dir)
    }

    /// Write one frame, truncating any existing file.
    pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<(), WriterError> {
        let mut file = File::create(path).map_err(|source| WriterError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(df)
            .map_err(|source| WriterError::Csv {
                path: path.to_path_buf(),
                source,
            })
    }
}
