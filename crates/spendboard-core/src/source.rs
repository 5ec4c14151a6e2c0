//! Spreadsheet data loader
//!
//! A source yields the raw CSV export of the expenses sheet. Only three
//! columns are kept (completion date, description, amount); everything else
//! in the sheet is ignored. Descriptions are lowercased here so every later
//! stage can match against them directly.
//!
//! Sources:
//! - `FileSource` reads a local CSV export
//! - `HttpSource` downloads a published sheet export (e.g. a Google Sheets
//!   `export?format=csv` link), optionally with a bearer token

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use csv::{ReaderBuilder, StringRecord};
use reqwest::Client;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::SourceRow;

/// Default timeout for downloading the sheet
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Names of the sheet columns the loader keeps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: String,
    pub description: String,
    pub amount: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            date: "Completion_Date".to_string(),
            description: "Description".to_string(),
            amount: "Amount".to_string(),
        }
    }
}

/// Trait for places the expenses sheet can be read from
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Human-readable location for logs
    fn describe(&self) -> String;

    /// Fetch the raw CSV export
    async fn fetch(&self) -> Result<Vec<u8>>;
}

/// A CSV export on the local filesystem
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TransactionSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<u8>> {
        std::fs::read(&self.path).map_err(|e| {
            Error::Source(format!("Failed to read {}: {}", self.path.display(), e))
        })
    }
}

/// A published sheet export reachable over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpSource {
    http_client: Client,
    url: String,
    token: Option<String>,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: &str) -> Self {
        Self {
            http_client: Client::new(),
            url: url.to_string(),
            token: None,
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Send `Authorization: Bearer <token>` with the request
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl TransactionSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Vec<u8>> {
        let mut request = self.http_client.get(&self.url).timeout(self.timeout);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Source(format!(
                "{} returned HTTP {}",
                self.url, status
            )));
        }

        let body = response.bytes().await?;
        debug!("Downloaded {} bytes from {}", body.len(), self.url);
        Ok(body.to_vec())
    }
}

/// Pick a source from a location string: http(s) URLs download, anything
/// else is treated as a file path
pub fn source_for(
    location: &str,
    token: Option<String>,
    timeout: Duration,
) -> Box<dyn TransactionSource> {
    let lower = location.to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Box::new(
            HttpSource::new(location)
                .with_token(token)
                .with_timeout(timeout),
        )
    } else {
        Box::new(FileSource::new(location))
    }
}

/// Fetch and parse every row from a source
pub async fn load(source: &dyn TransactionSource, columns: &ColumnMap) -> Result<Vec<SourceRow>> {
    let body = source.fetch().await?;
    let rows = parse_rows(body.as_slice(), columns)?;
    info!("Loaded {} transactions from {}", rows.len(), source.describe());
    Ok(rows)
}

/// Parse a CSV export, keeping only the mapped columns
pub fn parse_rows<R: Read>(reader: R, columns: &ColumnMap) -> Result<Vec<SourceRow>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let date_idx = column_index(&headers, &columns.date)?;
    let description_idx = column_index(&headers, &columns.description)?;
    let amount_idx = column_index(&headers, &columns.amount)?;

    let mut rows = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let row_number = i + 1;

        // Sheets exports often end with fully blank rows
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let date = field(&record, date_idx, row_number, &columns.date)?
            .trim()
            .to_string();

        let description = field(&record, description_idx, row_number, &columns.description)?
            .trim()
            .to_lowercase();

        let amount_str = field(&record, amount_idx, row_number, &columns.amount)?;
        let amount = parse_amount(amount_str).ok_or_else(|| Error::InvalidAmount {
            row: row_number,
            value: amount_str.to_string(),
        })?;

        rows.push(SourceRow {
            row: row_number,
            date,
            description,
            amount,
        });
    }

    debug!("Parsed {} sheet rows", rows.len());
    Ok(rows)
}

fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| Error::MissingColumn {
            column: name.to_string(),
        })
}

fn field<'r>(record: &'r StringRecord, idx: usize, row: usize, column: &str) -> Result<&'r str> {
    record.get(idx).ok_or_else(|| Error::MissingField {
        row,
        column: column.to_string(),
    })
}

/// Parse an amount string, handling currency symbols and commas
fn parse_amount(s: &str) -> Option<f64> {
    let cleaned: String = s
        .trim()
        .replace(['$', '€', '£', '₹', ',', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    // f64 parsing also accepts "NaN" and "inf"
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
