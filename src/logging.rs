//! Logging Context Module
//! Run-scoped logging to the console and a log file.
//!
//! Nothing is installed globally: a [`LogContext`] owns its dispatcher and
//! log file, and events are captured only while code runs inside
//! [`LogContext::scope`]. Both destinations receive identical lines:
//!
//! ```text
//! 2024-05-01 10:15:42,118 - data_ingestion - DEBUG - Data loaded from ./spam.csv
//! ```

use anyhow::{Context, Result};
use chrono::Local;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing::{Dispatch, Event, Level, Subscriber};
use tracing_subscriber::filter::Targets;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// `<timestamp> - <logger name> - <LEVEL> - <message>` line format.
#[derive(Debug, Clone)]
pub struct LineFormat {
    logger_name: String,
}

impl LineFormat {
    pub fn new(logger_name: impl Into<String>) -> Self {
        Self {
            logger_name: logger_name.into(),
        }
    }
}

fn level_name(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARNING",
        Level::INFO => "INFO",
        Level::DEBUG => "DEBUG",
        Level::TRACE => "TRACE",
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(
            writer,
            "{} - {} - {} - ",
            Local::now().format(TIMESTAMP_FORMAT),
            self.logger_name,
            level_name(event.metadata().level())
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Logging destinations for one ingestion run.
pub struct LogContext {
    dispatch: Dispatch,
    file: Arc<File>,
    path: PathBuf,
}

impl LogContext {
    /// Create the log file's directory if needed and open the file for appending.
    pub fn open(path: &Path, logger_name: &str) -> Result<Self> {
        if let Some(log_dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(log_dir).with_context(|| {
                format!("Cannot create log directory '{}'", log_dir.display())
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Cannot open log file '{}'", path.display()))?;
        let file = Arc::new(file);

        let format = LineFormat::new(logger_name);
        let subscriber = tracing_subscriber::registry()
            .with(
                Targets::new().with_target(env!("CARGO_CRATE_NAME"), LevelFilter::DEBUG),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .event_format(format.clone())
                    .with_writer(std::io::stderr),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .event_format(format)
                    .with_writer(Arc::clone(&file)),
            );

        Ok(Self {
            dispatch: Dispatch::new(subscriber),
            file,
            path: path.to_path_buf(),
        })
    }

    /// Run `f` with this context receiving every event it emits.
    pub fn scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush the log file to disk and release both destinations.
    pub fn close(self) -> Result<()> {
        self.file
            .sync_all()
            .with_context(|| format!("Cannot flush log file '{}'", self.path.display()))
    }
}
