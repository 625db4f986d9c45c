//! CSV Data Loader Module
//! Fetches a CSV resource from disk or over HTTP and parses it with Polars.

use polars::prelude::*;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::io::Cursor;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to parse the CSV file: {0}")]
    Parse(#[source] PolarsError),
    #[error("CSV content is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    #[error("Cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Request to '{url}' failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Request to '{url}' returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// Where the CSV text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvSource {
    Url(String),
    Path(PathBuf),
}

impl CsvSource {
    /// `http://` and `https://` locations are fetched remotely, anything else is a file path.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            CsvSource::Url(trimmed.to_string())
        } else {
            CsvSource::Path(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for CsvSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsvSource::Url(url) => f.write_str(url),
            CsvSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Loads the raw dataset into a DataFrame of text columns.
pub struct DataLoader;

impl DataLoader {
    /// Fetch and parse a CSV resource.
    pub fn load(source: &CsvSource) -> Result<DataFrame, LoaderError> {
        let bytes = Self::fetch(source)?;
        let df = Self::parse_csv(&bytes)?;
        tracing::debug!("Data loaded from {}", source);
        Ok(df)
    }

    /// Read the raw bytes behind a source. Blocks until the whole body is read.
    pub fn fetch(source: &CsvSource) -> Result<Vec<u8>, LoaderError> {
        match source {
            CsvSource::Path(path) => std::fs::read(path).map_err(|source| LoaderError::Io {
                path: path.clone(),
                source,
            }),
            CsvSource::Url(url) => {
                let network = |source: reqwest::Error| LoaderError::Network {
                    url: url.clone(),
                    source,
                };
                // A slow download keeps waiting; the blocking client otherwise gives up after 30s.
                let client = reqwest::blocking::Client::builder()
                    .timeout(None)
                    .build()
                    .map_err(network)?;
                let response = client.get(url.as_str()).send().map_err(network)?;
                let status = response.status();
                if !status.is_success() {
                    return Err(LoaderError::Status {
                        url: url.clone(),
                        status,
                    });
                }
                let body = response.bytes().map_err(network)?;
                Ok(body.to_vec())
            }
        }
    }

    /// Parse CSV bytes whose first record is the header row.
    ///
    /// Every column is read as text so no value is coerced. Blank header
    /// cells are named `Unnamed: <index>` and repeated names get a `.N`
    /// suffix, the naming conventionally used for this dataset.
    pub fn parse_csv(bytes: &[u8]) -> Result<DataFrame, LoaderError> {
        std::str::from_utf8(bytes)?;

        // The header is read as an ordinary record so its cells can be named here.
        let raw = CsvReadOptions::default()
            .with_has_header(false)
            .with_infer_schema_length(Some(0))
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()
            .map_err(LoaderError::Parse)?;

        if raw.height() == 0 {
            return Err(LoaderError::Parse(PolarsError::NoData(
                "CSV content has no header row".into(),
            )));
        }

        let mut header: Vec<Option<String>> = Vec::with_capacity(raw.width());
        for column in raw.get_columns() {
            let cell = column
                .str()
                .map_err(LoaderError::Parse)?
                .get(0)
                .map(str::to_string);
            header.push(cell);
        }

        let mut df = raw.slice(1, raw.height() - 1);
        df.set_column_names(normalize_header(&header))
            .map_err(LoaderError::Parse)?;
        Ok(df)
    }
}

/// Name blank header cells `Unnamed: <i>` and de-duplicate repeats as `name.1`, `name.2`, ...
fn normalize_header(cells: &[Option<String>]) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut suffixes: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(cells.len());

    for (idx, cell) in cells.iter().enumerate() {
        // Whitespace only decides blankness; names keep their exact text.
        let base = match cell.as_deref() {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => format!("Unnamed: {}", idx),
        };

        let mut name = base.clone();
        if used.contains(&name) {
            let suffix = suffixes.entry(base.clone()).or_insert(0);
            loop {
                *suffix += 1;
                let candidate = format!("{}.{}", base, suffix);
                if !used.contains(&candidate) {
                    name = candidate;
                    break;
                }
            }
        }
        used.insert(name.clone());
        names.push(name);
    }

    names
}
