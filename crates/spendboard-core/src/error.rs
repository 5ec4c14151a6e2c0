//! Error types for Spendboard

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Source unavailable: {0}")]
    Source(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing expected column: {column}")]
    MissingColumn { column: String },

    #[error("Row {row}: missing value for column {column}")]
    MissingField { row: usize, column: String },

    #[error("Row {row}: unable to parse amount: {value}")]
    InvalidAmount { row: usize, value: String },

    #[error("Row {row}: unable to parse date: {value}")]
    InvalidDate { row: usize, value: String },

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;
