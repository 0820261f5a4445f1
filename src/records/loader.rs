//! Load policy records from the extracted MPF table

use std::io::Read;
use std::path::Path;

use csv::{Reader, ReaderBuilder, Trim};
use log::info;

use super::PolicyRecord;
use crate::error::{MpfError, Result};

/// Default location of the extracted MPF table
pub const DEFAULT_INPUT_PATH: &str = "Extracted_MPFs.csv";

/// Columns the extract must carry; anything else is ignored
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "SOURCE",
    "Period",
    "SPCODE",
    "PREM_SINGLE",
    "ANNUITY_ANNUAL",
    "AGE_AT_ENTRY",
    "DURATION_IF_M",
    "ANNUITY_EXPENSE_REN",
    "ANNUITY_ESC_MONTH",
    "ANNUITY_ESC_PC",
];

/// Load all records from a CSV file
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<PolicyRecord>> {
    let path = path.as_ref();
    let reader = ReaderBuilder::new().trim(Trim::All).from_path(path)?;
    let records = read_records(reader)?;

    info!("Loaded {} policy records from {}", records.len(), path.display());
    Ok(records)
}

/// Load records from any reader (e.g., string buffer, stdin)
pub fn load_records_from_reader<R: Read>(reader: R) -> Result<Vec<PolicyRecord>> {
    let reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    read_records(reader)
}

/// Load records from the default extract location
pub fn load_default_extract() -> Result<Vec<PolicyRecord>> {
    load_records(DEFAULT_INPUT_PATH)
}

fn read_records<R: Read>(mut reader: Reader<R>) -> Result<Vec<PolicyRecord>> {
    check_schema(reader.headers()?)?;

    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: PolicyRecord = result?;
        records.push(record);
    }

    Ok(records)
}

/// Fail fast when any required column is absent
fn check_schema(headers: &csv::StringRecord) -> Result<()> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h == **column))
        .map(|column| column.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(MpfError::MissingColumns(missing))
    }
}
