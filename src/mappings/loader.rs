//! CSV-based mapping loader
//!
//! Loads the period and product tables from CSV files in data/mappings/.
//! Either file may be absent, in which case the built-in table is used.

use std::fs::File;
use std::path::Path;

use log::info;

use super::{Mappings, PeriodLabels, ProductGroup, ProductSources};
use crate::error::{MpfError, Result};

/// Default path to the mappings directory
pub const DEFAULT_MAPPINGS_PATH: &str = "data/mappings";

pub const PERIOD_LABELS_FILE: &str = "period_labels.csv";
pub const PRODUCT_SOURCES_FILE: &str = "product_sources.csv";

/// Load period labels from CSV
/// Columns: Code, Label
pub fn load_period_labels(path: &Path) -> Result<PeriodLabels> {
    let file = File::open(path.join(PERIOD_LABELS_FILE))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut entries = Vec::new();

    for result in reader.records() {
        let record = result?;
        if record.len() < 2 {
            return Err(MpfError::Mapping(format!(
                "{}: expected Code,Label but found {} field(s)",
                PERIOD_LABELS_FILE,
                record.len()
            )));
        }
        let code: u32 = record[0].trim().parse().map_err(|_| {
            MpfError::Mapping(format!("{}: bad period code {:?}", PERIOD_LABELS_FILE, &record[0]))
        })?;
        entries.push((code, record[1].trim().to_string()));
    }

    PeriodLabels::new(entries)
}

/// Load the product grouping from CSV
/// Columns: Product, Source. Row order is the canonical order.
pub fn load_product_sources(path: &Path) -> Result<ProductSources> {
    let file = File::open(path.join(PRODUCT_SOURCES_FILE))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut groups: Vec<ProductGroup> = Vec::new();

    for result in reader.records() {
        let record = result?;
        if record.len() < 2 {
            return Err(MpfError::Mapping(format!(
                "{}: expected Product,Source but found {} field(s)",
                PRODUCT_SOURCES_FILE,
                record.len()
            )));
        }
        let product = record[0].trim();
        let source = record[1].trim().to_string();

        match groups.iter_mut().find(|g| g.product == product) {
            Some(group) => group.sources.push(source),
            None => groups.push(ProductGroup {
                product: product.to_string(),
                sources: vec![source],
            }),
        }
    }

    ProductSources::new(groups)
}

impl Mappings {
    /// Load mappings from the default path
    pub fn load_default() -> Result<Self> {
        Self::from_csv_path(Path::new(DEFAULT_MAPPINGS_PATH))
    }

    /// Load mappings from a directory, falling back to the built-in table for
    /// any file that is not present
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let mut mappings = Mappings::default();

        if path.join(PERIOD_LABELS_FILE).is_file() {
            mappings.periods = load_period_labels(path)?;
            info!("Loaded {} period labels from {}", mappings.periods.len(), path.display());
        }

        if path.join(PRODUCT_SOURCES_FILE).is_file() {
            mappings.products = load_product_sources(path)?;
            info!(
                "Loaded {} products from {}",
                mappings.products.groups().len(),
                path.display()
            );
        }

        Ok(mappings)
    }
}
