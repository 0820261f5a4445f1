//! MPF Checks CLI
//!
//! Loads the extracted MPF table, aggregates it once, and prints the
//! comparison dashboard for the selected products.

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, ValueEnum};
use log::info;

use mpf_checks::mappings::Mappings;
use mpf_checks::records::{load_records, loader::DEFAULT_INPUT_PATH};
use mpf_checks::report::{render_json, write_text, TextOptions, Theme};
use mpf_checks::{summarize, DashboardConfig, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Annuity model point file checks
///
/// Summarises the MPF extract by source and period and compares two
/// reporting periods side by side for every metric.
///
/// Examples:
///   mpf_checks --input Extracted_MPFs.csv
///   mpf_checks --products Non-Profit,PlatMM --periods Jun24,Dec23
///   mpf_checks --format json --theme light
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Extracted MPF table (CSV)
    #[arg(short, long, default_value = DEFAULT_INPUT_PATH, env = "MPF_INPUT", value_name = "FILE")]
    input: PathBuf,

    /// Directory with period_labels.csv / product_sources.csv overrides
    #[arg(short, long, env = "MPF_MAPPINGS", value_name = "DIR")]
    mappings: Option<PathBuf>,

    /// Products to show, comma separated. Defaults to every product;
    /// pass the flag with no value to select none.
    #[arg(short, long, num_args = 0.., value_delimiter = ',', value_name = "PRODUCT")]
    products: Option<Vec<String>>,

    /// Period labels to compare; exactly two adds the Difference column
    #[arg(long, value_delimiter = ',', value_name = "LABEL")]
    periods: Option<Vec<String>>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Difference-cell colour theme (dark or light)
    #[arg(long, default_value = "dark")]
    theme: Theme,

    /// Page title
    #[arg(long)]
    title: Option<String>,

    /// Disable ANSI colours in text output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let mappings = match &args.mappings {
        Some(dir) => Mappings::from_csv_path(dir)
            .with_context(|| format!("Failed to load mappings from {}", dir.display()))?,
        None => Mappings::load_default().context("Failed to load mappings")?,
    };

    let records = load_records(&args.input)
        .with_context(|| format!("Failed to load MPF extract {}", args.input.display()))?;
    let summary = summarize(&records, &mappings.periods).context("Failed to aggregate MPF extract")?;
    info!("Summary ready: {} (source, period) rows", summary.len());

    let mut config = DashboardConfig::default();
    if let Some(periods) = args.periods.clone() {
        config.periods = periods;
    }
    if let Some(title) = args.title.clone() {
        config.title = title;
    }

    let mut session = Session::new(Arc::new(summary), Arc::new(mappings), config)?;
    let selected = args.products.clone().unwrap_or_else(|| session.all_products());
    let view = session.view(&selected)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Text => {
            let options = TextOptions {
                theme: args.theme,
                color: !args.no_color && io::stdout().is_terminal(),
            };
            write_text(&mut out, &view, &options, Local::now())?;
        }
        OutputFormat::Json => {
            writeln!(out, "{}", render_json(&view, args.theme, Local::now())?)?;
        }
    }

    Ok(())
}
