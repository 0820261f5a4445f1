//! Dashboard view model: product selection, one panel per metric
//!
//! A panel pairs the period comparison table with the metric's time-series
//! chart. Renderers in `report` turn a [`DashboardView`] into text or JSON.

mod chart;
mod session;

pub use chart::{ChartPoint, ChartSeries, LineChart};
pub use session::Session;

use serde::Serialize;

use crate::comparison::ComparisonTable;
use crate::error::Result;
use crate::mappings::ProductSources;
use crate::summary::Metric;

pub const DEFAULT_TITLE: &str = "Annuities Data Checks - June 2024";
pub const DEFAULT_SUBTITLE: &str = "Model Point Files Checks";

/// Periods compared side by side, most recent first
pub const DEFAULT_COMPARISON_PERIODS: [&str; 2] = ["Jun24", "Dec23"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Period labels compared in every table; the difference column needs exactly two
    pub periods: Vec<String>,
    pub title: String,
    pub subtitle: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            periods: DEFAULT_COMPARISON_PERIODS.iter().map(|p| p.to_string()).collect(),
            title: DEFAULT_TITLE.to_string(),
            subtitle: DEFAULT_SUBTITLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricPanel {
    pub heading: String,
    pub metric: Metric,
    pub table: ComparisonTable,
    pub chart: LineChart,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub title: String,
    pub subtitle: String,
    pub products: Vec<String>,
    pub sources: Vec<String>,
    pub periods: Vec<String>,
    pub panels: Vec<MetricPanel>,
}

/// Expand a product selection to its source codes in canonical order.
/// No products selected gives no sources.
pub fn select_sources(products: &ProductSources, selected: &[String]) -> Result<Vec<String>> {
    products.expand(selected.iter().map(String::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_sources() {
        let products = ProductSources::default();

        let sources = select_sources(&products, &["Non-Profit".to_string()]).unwrap();
        assert_eq!(sources.len(), 6);
        assert_eq!(sources[0], "C_NI_S");

        assert!(select_sources(&products, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.periods, vec!["Jun24", "Dec23"]);
        assert_eq!(config.title, DEFAULT_TITLE);
    }
}
