//! Error taxonomy for loading, aggregating and comparing model point data

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MpfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Required input columns are absent from the header row
    #[error("Input table is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// Period identifier carries no numeric token to translate
    #[error("Period {0:?} contains no numeric period code")]
    PeriodWithoutCode(String),

    /// Extracted period code has no entry in the period label table
    #[error("Period {raw:?} has code {code} with no label in the period table")]
    UnmappedPeriod { raw: String, code: String },

    /// More than one summary row for a (source, period) pair reached the pivot
    #[error("Duplicate summary rows for source {source_code} in period {period}")]
    DuplicateKey { source_code: String, period: String },

    /// Source is not part of the canonical product ordering
    #[error("Source {0} is not listed under any product")]
    UnknownSource(String),

    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    #[error("Unknown theme: {0} (expected dark or light)")]
    UnknownTheme(String),

    #[error("Unknown period label: {0}")]
    UnknownPeriodLabel(String),

    /// Malformed period or product mapping file
    #[error("Mapping error: {0}")]
    Mapping(String),
}

pub type Result<T> = std::result::Result<T, MpfError>;
