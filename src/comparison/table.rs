//! Pivot summary rows into a side-by-side period comparison

use std::collections::HashMap;

use log::debug;
use serde::Serialize;

use super::format::format_amount;
use crate::error::{MpfError, Result};
use crate::mappings::ProductSources;
use crate::summary::{Metric, SummaryRow};

pub const DIFFERENCE_COLUMN: &str = "Difference";

/// Two-period comparison row, rendered for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedRow {
    pub source: String,
    /// One formatted cell per requested period
    pub values: Vec<String>,
    pub difference: String,
    /// Unrounded first-minus-second value the difference cell was formatted from
    #[serde(skip)]
    pub raw_difference: Option<f64>,
}

/// Comparison row over any other number of periods, values left numeric
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawRow {
    pub source: String,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum ComparisonBody {
    /// Exactly two periods: difference column, every cell a display string
    Formatted(Vec<FormattedRow>),
    /// No difference column and no formatting
    Raw(Vec<RawRow>),
}

/// One metric compared across periods, one row per source in canonical order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonTable {
    pub metric: Metric,
    pub periods: Vec<String>,
    pub body: ComparisonBody,
}

impl ComparisonTable {
    pub fn has_difference(&self) -> bool {
        matches!(self.body, ComparisonBody::Formatted(_))
    }

    /// Column headers after the source column
    pub fn columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = self.periods.iter().map(String::as_str).collect();
        if self.has_difference() {
            columns.push(DIFFERENCE_COLUMN);
        }
        columns
    }

    pub fn len(&self) -> usize {
        match &self.body {
            ComparisonBody::Formatted(rows) => rows.len(),
            ComparisonBody::Raw(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Source codes in row order
    pub fn sources(&self) -> Vec<&str> {
        match &self.body {
            ComparisonBody::Formatted(rows) => rows.iter().map(|r| r.source.as_str()).collect(),
            ComparisonBody::Raw(rows) => rows.iter().map(|r| r.source.as_str()).collect(),
        }
    }
}

/// Cell state during the pivot: outer `None` means no summary row seen yet
type PivotCells = Vec<Option<Option<f64>>>;

/// Build the comparison of `metric` across `periods` from summary rows.
///
/// Rows for periods not requested are ignored. Each (source, period) pair
/// may appear at most once, and every source must belong to a product.
pub fn build_comparison<'a, I>(
    rows: I,
    periods: &[String],
    metric: Metric,
    products: &ProductSources,
) -> Result<ComparisonTable>
where
    I: IntoIterator<Item = &'a SummaryRow>,
{
    let mut pivot: HashMap<&str, PivotCells> = HashMap::new();

    for row in rows {
        let mut columns = periods
            .iter()
            .enumerate()
            .filter(|(_, p)| **p == row.period)
            .map(|(j, _)| j)
            .peekable();
        if columns.peek().is_none() {
            continue;
        }

        let cells = pivot
            .entry(row.source.as_str())
            .or_insert_with(|| vec![None; periods.len()]);
        for j in columns {
            if cells[j].is_some() {
                return Err(MpfError::DuplicateKey {
                    source_code: row.source.clone(),
                    period: row.period.clone(),
                });
            }
            cells[j] = Some(row.value(metric));
        }
    }

    let mut ordered = Vec::with_capacity(pivot.len());
    for (source, cells) in pivot {
        let rank = products
            .rank(source)
            .ok_or_else(|| MpfError::UnknownSource(source.to_string()))?;
        let values: Vec<Option<f64>> = cells.into_iter().map(Option::flatten).collect();
        ordered.push((rank, source, values));
    }
    ordered.sort_by_key(|(rank, _, _)| *rank);

    debug!(
        "Comparison of {} over {:?}: {} sources",
        metric,
        periods,
        ordered.len()
    );

    let body = if periods.len() == 2 {
        ComparisonBody::Formatted(
            ordered
                .into_iter()
                .map(|(_, source, values)| {
                    let raw_difference = match (values[0], values[1]) {
                        (Some(a), Some(b)) => Some(a - b),
                        _ => None,
                    };
                    FormattedRow {
                        source: source.to_string(),
                        values: values.iter().map(|v| format_amount(*v)).collect(),
                        difference: format_amount(raw_difference),
                        raw_difference,
                    }
                })
                .collect(),
        )
    } else {
        ComparisonBody::Raw(
            ordered
                .into_iter()
                .map(|(_, source, values)| RawRow {
                    source: source.to_string(),
                    values,
                })
                .collect(),
        )
    };

    Ok(ComparisonTable {
        metric,
        periods: periods.to_vec(),
        body,
    })
}
