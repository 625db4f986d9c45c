//! Ingestion Pipeline Module
//! Runs load → preprocess → split → save once, in order.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::{ConfigError, IngestionConfig};
use crate::data::{
    split_train_test, CsvSource, DataLoader, DataProcessor, DataWriter, LoaderError,
    ProcessorError, SplitError, WriterError, TEST_FILE, TRAIN_FILE,
};

#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Preprocess(#[from] ProcessorError),
    #[error("Failed to split the data: {0}")]
    Split(#[from] SplitError),
    #[error(transparent)]
    Save(#[from] WriterError),
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct IngestionSummary {
    pub total_rows: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub train_path: PathBuf,
    pub test_path: PathBuf,
}

pub struct IngestionPipeline {
    config: IngestionConfig,
}

impl IngestionPipeline {
    pub fn new(config: IngestionConfig) -> Self {
        Self { config }
    }

    /// Execute every stage. The first failure is logged with its stage and returned.
    pub fn run(&self) -> Result<IngestionSummary, IngestionError> {
        let config = &self.config;
        config.validate().map_err(|e| {
            tracing::error!("Invalid ingestion configuration: {}", e);
            e
        })?;
        tracing::debug!("Ingestion config: {}", config.to_json());

        let source = CsvSource::parse(&config.data_url);
        let df = DataLoader::load(&source).map_err(|e| {
            match &e {
                LoaderError::Parse(_) => tracing::error!("{}", e),
                _ => tracing::error!("Unexpected error occurred while loading the data: {}", e),
            }
            e
        })?;

        let df = DataProcessor::preprocess(df).map_err(|e| {
            tracing::error!("{}", e);
            e
        })?;
        let total_rows = df.height();

        let mut split =
            split_train_test(&df, config.test_size, config.random_state).map_err(|e| {
                tracing::error!("Failed to split the data: {}", e);
                e
            })?;

        let raw_dir = DataWriter::save(&mut split, &config.output_dir).map_err(|e| {
            tracing::error!("Unexpected error occurred while saving the data: {}", e);
            e
        })?;

        let summary = IngestionSummary {
            total_rows,
            train_rows: split.train.height(),
            test_rows: split.test.height(),
            train_path: raw_dir.join(TRAIN_FILE),
            test_path: raw_dir.join(TEST_FILE),
        };
        tracing::info!(
            "Ingested {} rows: {} train -> {}, {} test -> {}",
            summary.total_rows,
            summary.train_rows,
            summary.train_path.display(),
            summary.test_rows,
            summary.test_path.display()
        );
        Ok(summary)
    }
}
