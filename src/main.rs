//! Spam Ingest - SMS spam dataset ingestion job
//!
//! Downloads the SMS spam collection, drops the spill-over columns, renames
//! the label and message columns, and writes a seeded 80/20 train/test split
//! to `./data/raw/`.

mod config;
mod data;
mod logging;
mod pipeline;

use anyhow::Result;
use config::IngestionConfig;
use logging::LogContext;
use pipeline::{IngestionPipeline, IngestionSummary};
use std::io::Write;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout = std::io::stdout();
    match run(IngestionConfig::default(), &mut stdout) {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

/// Run one ingestion job, printing `Error: <message>` to `out` when it fails.
fn run(config: IngestionConfig, out: &mut impl Write) -> Result<IngestionSummary> {
    let log = match LogContext::open(&config.log_file(), &config.logger_name) {
        Ok(log) => log,
        Err(e) => {
            writeln!(out, "Error: {:#}", e)?;
            return Err(e);
        }
    };

    let pipeline = IngestionPipeline::new(config);
    let outcome = log.scope(|| {
        tracing::debug!("Logging to {}", log.path().display());
        pipeline.run().map_err(|e| {
            tracing::error!("Failed to complete the data ingestion process: {}", e);
            e
        })
    });

    if let Err(e) = log.close() {
        eprintln!("{:#}", e);
    }

    match outcome {
        Ok(summary) => Ok(summary),
        Err(e) => {
            writeln!(out, "Error: {}", e)?;
            Err(e.into())
        }
    }
}
