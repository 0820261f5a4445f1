//! MPF Checks - period-on-period checks of annuity model point files
//!
//! This library provides:
//! - Loading of the extracted model point file (MPF) table
//! - Per-source, per-period summary statistics
//! - Side-by-side period comparison tables with a difference column
//! - A dashboard view (comparison table and time-series chart per metric)
//!   rendered as text or JSON

pub mod error;
pub mod mappings;
pub mod records;
pub mod summary;
pub mod comparison;
pub mod dashboard;
pub mod report;

// Re-export commonly used types
pub use error::{MpfError, Result};
pub use mappings::{Mappings, PeriodLabels, ProductSources};
pub use records::PolicyRecord;
pub use summary::{summarize, Metric, SummaryRow, SummaryTable};
pub use comparison::{build_comparison, ComparisonTable};
pub use dashboard::{DashboardConfig, DashboardView, Session};
