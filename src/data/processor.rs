//! Data Processor Module
//! Column cleanup: drops the spill-over columns and gives the label and
//! message columns their canonical names.

use polars::prelude::*;
use thiserror::Error;

/// Spill-over columns produced by stray separators in the raw file.
pub const DROPPED_COLUMNS: [&str; 3] = ["Unnamed: 2", "Unnamed: 3", "Unnamed: 4"];

/// `(raw name, canonical name)` pairs.
pub const RENAMED_COLUMNS: [(&str, &str); 2] = [("v1", "target"), ("v2", "text")];

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Missing column in the dataframe: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("Unexpected error during preprocessing: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Handles the fixed column cleanup.
pub struct DataProcessor;

impl DataProcessor {
    /// Drop the `Unnamed:*` columns and rename `v1`/`v2` to `target`/`text`.
    ///
    /// Every expected column must be present; other columns pass through
    /// untouched and keep their order.
    pub fn preprocess(df: DataFrame) -> Result<DataFrame, ProcessorError> {
        let missing = Self::missing_columns(&df);
        if !missing.is_empty() {
            return Err(ProcessorError::MissingColumns(missing));
        }

        let mut df = df.drop_many(DROPPED_COLUMNS);
        for (from, to) in RENAMED_COLUMNS {
            df.rename(from, to.into())?;
        }

        tracing::debug!("Data preprocessing completed");
        Ok(df)
    }

    /// Expected columns absent from `df`, in the order they are expected.
    pub fn missing_columns(df: &DataFrame) -> Vec<String> {
        DROPPED_COLUMNS
            .iter()
            .copied()
            .chain(RENAMED_COLUMNS.iter().map(|(from, _)| *from))
            .filter(|name| df.get_column_index(name).is_none())
            .map(str::to_string)
            .collect()
    }
}
