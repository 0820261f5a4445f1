//! Period-on-period comparison tables

mod format;
mod table;

pub use format::{format_amount, THOUSANDS_SEPARATOR};
pub use table::{
    build_comparison, ComparisonBody, ComparisonTable, FormattedRow, RawRow, DIFFERENCE_COLUMN,
};
