//! Ingestion Configuration Module
//! Fixed job parameters: data source, split ratio, seed and output layout.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Pinned copy of the SMS spam collection.
pub const DEFAULT_DATA_URL: &str = "https://raw.githubusercontent.com/vikashishere/YT-MLOPS-Complete-ML-Pipeline/7b6959709ce419648103993fb8c3faf847e2db72/experiments/spam.csv";
/// Fraction of rows assigned to the test partition
pub const DEFAULT_TEST_SIZE: f64 = 0.2;
pub const DEFAULT_RANDOM_STATE: u64 = 2;
pub const DEFAULT_OUTPUT_DIR: &str = "./data";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const LOGGER_NAME: &str = "data_ingestion";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("test size must be a fraction in (0, 1), got {0}")]
    InvalidTestSize(f64),
    #[error("data source must not be empty")]
    EmptySource,
}

/// Parameters of one ingestion run.
#[derive(Debug, Clone, Serialize)]
pub struct IngestionConfig {
    pub data_url: String,
    pub test_size: f64,
    pub random_state: u64,
    pub output_dir: PathBuf,
    pub log_dir: PathBuf,
    pub logger_name: String,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            data_url: DEFAULT_DATA_URL.to_string(),
            test_size: DEFAULT_TEST_SIZE,
            random_state: DEFAULT_RANDOM_STATE,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            logger_name: LOGGER_NAME.to_string(),
        }
    }
}

impl IngestionConfig {
    /// Reject parameters the split or loader cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_url.trim().is_empty() {
            return Err(ConfigError::EmptySource);
        }
        if !(self.test_size.is_finite() && self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(ConfigError::InvalidTestSize(self.test_size));
        }
        Ok(())
    }

    /// Path of the log file inside `log_dir`.
    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(format!("{}.log", self.logger_name))
    }

    /// Single-line JSON rendering for the startup log entry.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| format!("<unserializable config: {}>", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_job_literals() {
        let config = IngestionConfig::default();
        assert_eq!(config.test_size, 0.2);
        assert_eq!(config.random_state, 2);
        assert_eq!(config.output_dir, PathBuf::from("./data"));
        assert_eq!(config.log_file(), PathBuf::from("logs/data_ingestion.log"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_test_size() {
        for bad in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            let config = IngestionConfig {
                test_size: bad,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidTestSize(_))
            ));
        }
    }

    #[test]
    fn test_rejects_empty_source() {
        let config = IngestionConfig {
            data_url: "  ".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptySource)));
    }

    #[test]
    fn test_json_contains_parameters() {
        let json = IngestionConfig::default().to_json();
        assert!(json.contains("\"test_size\":0.2"));
        assert!(json.contains("\"random_state\":2"));
    }
}
