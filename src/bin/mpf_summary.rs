//! Print the aggregated (source, period) summary table as CSV on stdout
//!
//! Usage: cargo run --bin mpf_summary -- [--input Extracted_MPFs.csv]

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use mpf_checks::mappings::Mappings;
use mpf_checks::records::{load_records, loader::DEFAULT_INPUT_PATH};
use mpf_checks::summarize;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Extracted MPF table (CSV)
    #[arg(short, long, default_value = DEFAULT_INPUT_PATH, env = "MPF_INPUT", value_name = "FILE")]
    input: PathBuf,

    /// Directory with period_labels.csv / product_sources.csv overrides
    #[arg(short, long, env = "MPF_MAPPINGS", value_name = "DIR")]
    mappings: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let mappings = match &args.mappings {
        Some(dir) => Mappings::from_csv_path(dir)?,
        None => Mappings::load_default()?,
    };
    let records = load_records(&args.input)
        .with_context(|| format!("Failed to load MPF extract {}", args.input.display()))?;
    let summary = summarize(&records, &mappings.periods)?;

    let mut writer = csv::Writer::from_writer(io::stdout());
    for row in summary.rows() {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}
